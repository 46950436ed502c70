//! pt-core: stable foundation for proptrace.
//!
//! Contains:
//! - ids (compact arena ids for tree nodes)
//! - path (canonical slash-separated variable paths)
//! - numeric (Real + float helpers)
//! - timing (step/render cost accounting)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod path;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use path::VarPath;

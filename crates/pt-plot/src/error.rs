//! Error types for plot surface operations.

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("region index {index} out of range (len {len})")]
    RegionOutOfRange { index: usize, len: usize },
}

//! pt-plot: stacked strip charts over a [`pt_log::TimeSeriesLog`].
//!
//! [`PlotSurface`] owns layout, the shared time axis, the crosshair and the
//! series selection. Drawing goes through a [`RenderLayer`] so the surface
//! stays independent of any graphics API; the [`Compositor`] decides when a
//! full redraw is needed and when the cached background can be reused.

pub mod axis;
pub mod crosshair;
pub mod error;
pub mod geometry;
pub mod region;
pub mod render;
pub mod surface;

pub use axis::{TimeAxis, ValueRange};
pub use crosshair::{label_size, nearest_index, place_label};
pub use error::{PlotError, PlotResult};
pub use geometry::{Pos, Rect, distance_to_polyline, distance_to_segment};
pub use region::{PlotRegion, SeriesRef};
pub use render::{
    Artifact, Color, Compositor, FrameKind, LayerCall, RecordingLayer, RenderLayer, Scene, Stroke,
    TextRole,
};
pub use surface::{BindOutcome, DropTarget, PlotSurface, SurfaceOptions};

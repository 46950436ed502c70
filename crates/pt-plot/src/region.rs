//! One stacked chart of the surface.

use pt_core::VarPath;

use crate::axis::ValueRange;
use crate::geometry::Rect;

/// Address of a series on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesRef {
    pub region: usize,
    pub series: usize,
}

/// Series bound to one region, plus its layout.
///
/// A region with no series does not exist: the surface removes it.
#[derive(Debug, Clone)]
pub struct PlotRegion {
    pub(crate) series: Vec<VarPath>,
    /// Full band allotted to the region; the drop target.
    pub(crate) band: Rect,
    /// Inner draw area (band minus axis margins).
    pub(crate) data: Rect,
    pub(crate) y: ValueRange,
}

impl PlotRegion {
    pub(crate) fn new(series: Vec<VarPath>) -> Self {
        Self {
            series,
            band: Rect::default(),
            data: Rect::default(),
            y: ValueRange::default(),
        }
    }

    pub fn series(&self) -> &[VarPath] {
        &self.series
    }

    pub fn band(&self) -> Rect {
        self.band
    }

    pub fn data_rect(&self) -> Rect {
        self.data
    }

    pub fn value_range(&self) -> ValueRange {
        self.y
    }

    pub fn contains(&self, path: &VarPath) -> bool {
        self.series.contains(path)
    }

    /// Axis title: the first series' path.
    pub fn title(&self) -> &str {
        self.series.first().map(VarPath::as_str).unwrap_or("")
    }

    /// Append variables not already present; returns how many were added.
    pub(crate) fn append(&mut self, vars: &[VarPath]) -> usize {
        let before = self.series.len();
        for var in vars {
            if !self.series.contains(var) {
                self.series.push(var.clone());
            }
        }
        self.series.len() - before
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<VarPath> {
        (index < self.series.len()).then(|| self.series.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

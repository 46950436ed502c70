//! Data-to-screen mappings: the shared time axis and per-region value ranges.

use pt_core::{finite_bounds, remap};

use crate::geometry::Rect;

/// Relative padding added around a value range.
const VALUE_MARGIN: f64 = 0.05;

/// Time axis shared by every region.
///
/// While following, the right edge grows geometrically so that new samples
/// only force a structural redraw every so often. A zoom stops following
/// unless it shows the full recorded range.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    lo: f64,
    hi: f64,
    dt: f64,
    growth: f64,
    follow: bool,
}

impl TimeAxis {
    pub fn new(dt: f64, growth: f64) -> Self {
        Self {
            lo: 0.0,
            hi: dt,
            dt,
            growth: growth.max(1.0),
            follow: true,
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.lo && t <= self.hi
    }

    /// Back to `[0, dt]`, following.
    pub fn reset(&mut self, dt: f64) {
        self.dt = dt;
        self.lo = 0.0;
        self.hi = dt;
        self.follow = true;
    }

    /// Make `last_time` visible when following. Returns true if the range moved.
    pub fn follow_to(&mut self, last_time: f64) -> bool {
        if !self.follow || last_time <= self.hi {
            return false;
        }
        self.hi = (self.hi * self.growth).max(last_time);
        true
    }

    /// Rescale around `anchor` by `base^-steps`, clamped to `[0, last_time]`.
    ///
    /// Returns true if the range changed.
    pub fn zoom(&mut self, anchor: f64, steps: f64, base: f64, last_time: f64) -> bool {
        let limit = last_time.max(self.dt);
        let factor = base.powf(-steps);
        let anchor = anchor.clamp(self.lo, self.hi);

        let mut lo = (anchor - (anchor - self.lo) * factor).max(0.0);
        let mut hi = (anchor + (self.hi - anchor) * factor).min(limit);
        if hi - lo < self.dt {
            hi = (lo + self.dt).min(limit);
            lo = (hi - self.dt).max(0.0);
        }

        let changed = lo != self.lo || hi != self.hi;
        self.lo = lo;
        self.hi = hi;
        self.follow = lo <= 0.0 && hi >= limit;
        changed
    }

    pub fn to_screen(&self, t: f64, rect: &Rect) -> f32 {
        remap(t, self.lo, self.hi, rect.min.x as f64, rect.max.x as f64) as f32
    }

    pub fn from_screen(&self, x: f32, rect: &Rect) -> f64 {
        remap(x as f64, rect.min.x as f64, rect.max.x as f64, self.lo, self.hi)
    }
}

/// Vertical range of one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub lo: f64,
    pub hi: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { lo: -1.0, hi: 1.0 }
    }
}

impl ValueRange {
    /// Fit the finite values of every row, with a margin.
    pub fn fit<'a>(rows: impl IntoIterator<Item = &'a [f64]>) -> Self {
        let bounds = rows
            .into_iter()
            .filter_map(finite_bounds)
            .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)));
        match bounds {
            Some((lo, hi)) => Self::padded(lo, hi),
            None => Self::default(),
        }
    }

    fn padded(lo: f64, hi: f64) -> Self {
        let span = hi - lo;
        let pad = if span > f64::EPSILON * lo.abs().max(1.0) {
            span * VALUE_MARGIN
        } else {
            (lo.abs() * 0.1).max(1.0)
        };
        Self {
            lo: lo - pad,
            hi: hi + pad,
        }
    }

    /// Grow to include `v`. NaN and infinities are ignored. Returns true if grown.
    pub fn include(&mut self, v: f64) -> bool {
        if !v.is_finite() || (v >= self.lo && v <= self.hi) {
            return false;
        }
        *self = Self::padded(self.lo.min(v), self.hi.max(v));
        true
    }

    pub fn to_screen(&self, v: f64, rect: &Rect) -> f32 {
        remap(v, self.lo, self.hi, rect.max.y as f64, rect.min.y as f64) as f32
    }
}

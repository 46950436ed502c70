//! Screen-space primitives (pixels, y grows downwards).

use core::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Pos {
    type Output = Pos;
    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Pos;
    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Pos {
    type Output = Pos;
    fn mul(self, rhs: f32) -> Pos {
        Pos::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle, `min` top-left, `max` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Pos,
    pub max: Pos,
}

impl Rect {
    pub const fn from_min_max(min: Pos, max: Pos) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Pos, width: f32, height: f32) -> Self {
        Self {
            min,
            max: Pos::new(min.x + width, min.y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True if the rect has no drawable area.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Inclusive on all edges.
    pub fn contains(&self, p: Pos) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Shrink by the given margins; may become degenerate.
    pub fn shrink(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Pos::new(self.min.x + left, self.min.y + top),
            max: Pos::new(self.max.x - right, self.max.y - bottom),
        }
    }
}

pub fn distance_to_segment(point: Pos, a: Pos, b: Pos) -> f32 {
    let ab = b - a;
    let ap = point - a;
    let denom = ab.x * ab.x + ab.y * ab.y;
    if denom.abs() < f32::EPSILON {
        return (point - a).length();
    }
    let t = (ap.x * ab.x + ap.y * ab.y) / denom;
    let t = t.clamp(0.0, 1.0);
    let closest = a + ab * t;
    (point - closest).length()
}

/// Distance to the closest segment; `f32::MAX` for fewer than two points.
pub fn distance_to_polyline(point: Pos, points: &[Pos]) -> f32 {
    if points.len() < 2 {
        return f32::MAX;
    }

    let mut min_dist = f32::MAX;
    for segment in points.windows(2) {
        let dist = distance_to_segment(point, segment[0], segment[1]);
        min_dist = min_dist.min(dist);
    }

    min_dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Pos::new(0.0, 0.0);
        let b = Pos::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Pos::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Pos::new(13.0, 4.0), a, b), 5.0);
        assert!((distance_to_segment(Pos::new(1.0, 1.0), a, a) - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn polyline_needs_two_points() {
        assert_eq!(distance_to_polyline(Pos::new(0.0, 0.0), &[Pos::new(1.0, 1.0)]), f32::MAX);
        let line = [Pos::new(0.0, 0.0), Pos::new(0.0, 10.0), Pos::new(10.0, 10.0)];
        assert_eq!(distance_to_polyline(Pos::new(5.0, 12.0), &line), 2.0);
    }

    #[test]
    fn shrink_can_degenerate() {
        let r = Rect::from_min_size(Pos::new(0.0, 0.0), 20.0, 20.0);
        assert!(!r.shrink(5.0, 5.0, 5.0, 5.0).is_degenerate());
        assert!(r.shrink(15.0, 0.0, 10.0, 0.0).is_degenerate());
    }
}

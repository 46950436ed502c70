//! Crosshair sample lookup and readout placement.

use crate::geometry::{Pos, Rect};

/// Gap in pixels between a sample point and its readout.
const LABEL_OFFSET: f32 = 1.0;

/// Index of the sample closest to time `t` on the grid `i * dt`.
///
/// Exactly half a step (within float noise) resolves to the later sample.
/// Negative or NaN times map to 0.
pub fn nearest_index(t: f64, dt: f64) -> usize {
    if !(t > 0.0) || !(dt > 0.0) {
        return 0;
    }
    let base = (t / dt).floor();
    let offset = t - base * dt;
    let idx = base as usize;
    if offset + dt * 1e-9 >= dt / 2.0 { idx + 1 } else { idx }
}

/// Estimated size of a single-line label.
pub fn label_size(text: &str, char_width: f32, line_height: f32) -> (f32, f32) {
    (text.chars().count() as f32 * char_width, line_height)
}

/// Top-left corner for a `width` x `height` label attached to `anchor`.
///
/// Preferred spot is above-right of the anchor; the label flips left or
/// below when it would leave `bounds`, then is clamped inside them.
pub fn place_label(anchor: Pos, width: f32, height: f32, bounds: &Rect) -> Pos {
    let mut x = anchor.x + LABEL_OFFSET;
    let mut y = anchor.y - height - LABEL_OFFSET;
    if x + width > bounds.max.x {
        x = anchor.x - width - LABEL_OFFSET;
    }
    if y < bounds.min.y {
        y = anchor.y + LABEL_OFFSET;
    }
    Pos::new(
        x.min(bounds.max.x - width).max(bounds.min.x),
        y.min(bounds.max.y - height).max(bounds.min.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_at_046_resolves_to_sample_5() {
        assert_eq!(nearest_index(0.46, 0.1), 5);
        assert_eq!(nearest_index(0.44, 0.1), 4);
    }

    #[test]
    fn half_step_goes_to_later_sample() {
        assert_eq!(nearest_index(0.25, 0.5), 1);
        assert_eq!(nearest_index(0.375, 0.25), 2);
        assert_eq!(nearest_index(0.45, 0.1), 5);
    }

    #[test]
    fn negative_time_is_first_sample() {
        assert_eq!(nearest_index(-3.0, 0.1), 0);
        assert_eq!(nearest_index(f64::NAN, 0.1), 0);
    }

    #[test]
    fn label_stays_inside_bounds() {
        let bounds = Rect::from_min_size(Pos::new(0.0, 0.0), 100.0, 50.0);
        let (w, h) = (30.0, 10.0);

        let p = place_label(Pos::new(20.0, 30.0), w, h, &bounds);
        assert_eq!(p, Pos::new(21.0, 19.0));

        // Near the right edge: flips left.
        let p = place_label(Pos::new(90.0, 30.0), w, h, &bounds);
        assert_eq!(p, Pos::new(59.0, 19.0));

        // Near the top: flips below.
        let p = place_label(Pos::new(20.0, 5.0), w, h, &bounds);
        assert_eq!(p, Pos::new(21.0, 6.0));

        // Wider than the bounds: pinned to the left edge.
        let p = place_label(Pos::new(50.0, 30.0), 150.0, h, &bounds);
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn label_size_counts_chars() {
        assert_eq!(label_size(" 1.50000 ", 7.0, 14.0), (63.0, 14.0));
    }

    proptest::proptest! {
        #[test]
        fn nearest_sample_is_within_half_a_step(t in 0.0f64..100.0, dt in 0.001f64..1.0) {
            let idx = nearest_index(t, dt);
            proptest::prop_assert!((idx as f64 * dt - t).abs() <= dt / 2.0 + dt * 1e-6);
        }

        #[test]
        fn fitting_label_never_leaves_bounds(
            ax in 0.0f32..400.0,
            ay in 0.0f32..300.0,
            w in 1.0f32..100.0,
            h in 1.0f32..40.0,
        ) {
            let bounds = Rect::from_min_size(Pos::new(0.0, 0.0), 400.0, 300.0);
            let p = place_label(Pos::new(ax, ay), w, h, &bounds);
            proptest::prop_assert!(p.x >= 0.0 && p.y >= 0.0);
            proptest::prop_assert!(p.x + w <= 400.0 + 1e-3);
            proptest::prop_assert!(p.y + h <= 300.0 + 1e-3);
        }
    }
}

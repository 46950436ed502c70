/// Floating point type used for every sampled value and time stamp.
pub type Real = f64;

/// Minimum and maximum of the finite values in `values`.
///
/// NaN entries (unknown history) are ignored; `None` if nothing is finite.
pub fn finite_bounds(values: &[Real]) -> Option<(Real, Real)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Linear map of `v` from `[a0, a1]` onto `[b0, b1]`; degenerate sources map to `b0`.
pub fn remap(v: Real, a0: Real, a1: Real, b0: Real, b1: Real) -> Real {
    let span = a1 - a0;
    if span.abs() <= Real::EPSILON {
        return b0;
    }
    b0 + (v - a0) / span * (b1 - b0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_bounds_skips_nan() {
        assert_eq!(finite_bounds(&[Real::NAN, 2.0, -1.0, Real::NAN]), Some((-1.0, 2.0)));
        assert_eq!(finite_bounds(&[Real::NAN]), None);
        assert_eq!(finite_bounds(&[]), None);
    }

    #[test]
    fn remap_handles_degenerate_span() {
        assert_eq!(remap(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(remap(5.0, 1.0, 1.0, 3.0, 9.0), 3.0);
    }
}

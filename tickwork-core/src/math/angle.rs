//! Angle helpers
//!
//! `core` offers no float rounding, so wrapping is done with the float
//! remainder and a single correction step.

use core::f64::consts::{PI, TAU};

/// Absolute value of an `f64`
pub fn abs(value: f64) -> f64 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

/// Wrap an angle in radians into `(-PI, PI]`
///
/// Non-finite input yields NaN.
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return f64::NAN;
    }

    // Remainder after removing whole turns lies in (-TAU, TAU) for any
    // finite magnitude
    let mut wrapped = angle % TAU;

    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }

    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_wrap_identity_in_range() {
        assert!(abs(wrap_angle(0.5) - 0.5) < EPS);
        assert!(abs(wrap_angle(-0.5) + 0.5) < EPS);
        assert!(abs(wrap_angle(PI) - PI) < EPS);
    }

    #[test]
    fn test_wrap_negative_pi_maps_to_pi() {
        assert!(abs(wrap_angle(-PI) - PI) < EPS);
    }

    #[test]
    fn test_wrap_across_seam() {
        // Target just past +PI from a heading just below it
        let error = wrap_angle((-PI + 0.1) - (PI - 0.1));
        assert!(abs(error - 0.2) < EPS);
    }

    #[test]
    fn test_wrap_many_turns() {
        let wrapped = wrap_angle(7.0 * TAU + 1.0);
        assert!(abs(wrapped - 1.0) < 1e-6);
    }

    #[test]
    fn test_wrap_beyond_integer_range() {
        for angle in [1.0e20, -1.0e20, f64::MAX, f64::MIN] {
            let wrapped = wrap_angle(angle);
            assert!(wrapped >= -PI && wrapped <= PI, "{} -> {}", angle, wrapped);
        }
    }

    #[test]
    fn test_wrap_non_finite() {
        assert!(wrap_angle(f64::INFINITY).is_nan());
        assert!(wrap_angle(f64::NAN).is_nan());
    }

    #[test]
    fn test_abs() {
        assert_eq!(abs(-2.5), 2.5);
        assert_eq!(abs(2.5), 2.5);
        assert_eq!(abs(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn wrapped_angle_in_half_open_range(angle in proptest::num::f64::NORMAL) {
            let wrapped = wrap_angle(angle);
            prop_assert!(wrapped > -PI - 1e-9);
            prop_assert!(wrapped <= PI + 1e-9);
        }

        #[test]
        fn wrapping_preserves_direction(angle in -1.0e3f64..1.0e3) {
            // The wrapped angle differs from the input by whole turns
            let turns = (angle - wrap_angle(angle)) / TAU;
            let nearest = if turns < 0.0 { (turns - 0.5) as i64 } else { (turns + 0.5) as i64 };
            prop_assert!(abs(turns - nearest as f64) < 1e-6);
        }
    }
}

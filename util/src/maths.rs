//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
///
/// Values outside the source range are extrapolated, not clamped.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Linearly interpolate between `start` and `end`, with `frac = 0` giving `start` and `frac = 1`
/// giving `end`.
pub fn lerp<T>(start: T, end: T, frac: T) -> T
where
    T: Float,
{
    lin_map((T::zero(), T::one()), (start, end), frac)
}

/// Clamp a value between `min` and `max`.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    value.max(min).min(max)
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// Due to floating point round-off the result can equal `rhs.abs()` when `lhs` is a tiny negative
/// number.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

/// Map a value in the range [-pi, pi] to [0, 2pi)
pub fn map_pi_to_2pi<T>(value: T) -> T
where
    T: Float,
{
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    if value < T::zero() {
        tau_t + value
    } else {
        value
    }
}

/// Wrap an angle in degrees into the range [-180, 180].
///
/// Values already inside the range are returned unchanged, so `180` stays `180` rather than
/// becoming `-180`.
pub fn wrap_180<T>(value: T) -> T
where
    T: Float,
{
    let half: T = T::from(180.0).unwrap();
    let full: T = T::from(360.0).unwrap();

    if value >= -half && value <= half {
        value
    } else {
        rem_euclid(value + half, full) - half
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 1f64), (10f64, 20f64), 0.5), 15.0);
        assert_eq!(lin_map((0f64, 1f64), (10f64, 20f64), 2.0), 30.0);
        assert_eq!(lin_map((-1f64, 1f64), (1f64, -1f64), 0.25), -0.25);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(2f64, 4f64, 0.0), 2.0);
        assert_eq!(lerp(2f64, 4f64, 1.0), 4.0);
        assert_eq!(lerp(10f64, 10f64, 0.3), 10.0);
        assert_eq!(lerp(4f64, 2f64, 0.5), 3.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5f64, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5f64, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5f64, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_map_pi_to_2pi() {
        assert_eq!(map_pi_to_2pi(0f64), 0.0);
        assert_eq!(map_pi_to_2pi(PI), PI);
        assert_eq!(map_pi_to_2pi(-PI / 2.0), 3.0 * PI / 2.0);
        assert!(map_pi_to_2pi(-1e-3f64) < TAU);
    }

    #[test]
    fn test_wrap_180() {
        assert_eq!(wrap_180(180f64), 180.0);
        assert_eq!(wrap_180(-180f64), -180.0);
        assert_eq!(wrap_180(45f64), 45.0);
        assert_eq!(wrap_180(190f64), -170.0);
        assert_eq!(wrap_180(-190f64), 170.0);
        assert_eq!(wrap_180(540f64), -180.0);
    }
}

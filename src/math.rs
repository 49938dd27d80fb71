//! Math utility functions, following the semantics of the shading language
//! built-ins they are named after.

use num_traits::{Float, FloatConst};

use crate::Component;

/// Seconds it takes the hue to complete one full turn.
pub const HUE_PERIOD_SECONDS: Component = 5.0;

/// Scale applied to the distance from the disk center. Values past 1.0 are
/// outside the visible disk, so the circle sits slightly inside its quad.
pub const DISK_MARGIN: Component = 1.1;

/// Linearly interpolate from `a` to `b` using `t` as the progress between
/// them.
pub fn mix<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Floored modulo: the result always has the sign of `y`.
pub fn modulo<T: Float>(x: T, y: T) -> T {
    x - y * (x / y).floor()
}

/// Limit `x` to the range `[lo, hi]`.
pub fn clamp<T: Float>(x: T, lo: T, hi: T) -> T {
    x.max(lo).min(hi)
}

/// Hue in turns for the point `(u, v)` on a disk, rotated forward by
/// `seconds`. The result is not wrapped into `[0, 1)`.
pub fn hue_at<T: Float + FloatConst>(u: T, v: T, seconds: T) -> T {
    let period = T::from(HUE_PERIOD_SECONDS).unwrap_or_else(T::one);
    v.atan2(u) / T::TAU() + seconds / period
}

//! Scalar helpers used by the layout, conversion and zoom code.
//!
//! Interpolation never extrapolates: `lerp` clamps its parameter, so callers
//! that need values outside the `[a, b]` range must compute them directly.

use crate::error::{CropError, Result};

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this does not panic when `min > max`; the lower
/// bound wins. Pan bounds can invert by a rounding error when the image is
/// exactly mask-sized.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Linear interpolation between `a` and `b`.
///
/// `t` is clamped to 0.0-1.0 before use. Both endpoints, and every `t` of
/// an empty range, return `a` or `b` exactly.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if a == b {
        return a;
    }
    let t = t.clamp(0.0, 1.0);
    a * (1.0 - t) + b * t
}

/// Inverse of [`lerp`]: where `value` sits between `a` and `b`.
///
/// The result is not clamped.
///
/// # Errors
/// Returns [`CropError::DivisionUndefined`] when `a == b`. Zoom code treats
/// that as alpha 0 (a `max_scale_factor` of 1 gives an empty zoom range).
#[inline]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> Result<f64> {
    if a == b {
        return Err(CropError::DivisionUndefined);
    }
    Ok((value - a) / (b - a))
}

/// Absolute distance between two scalars.
#[inline]
pub fn distance(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Recover a full length from the visible part of it.
///
/// `base` is the visible length and `inset_sum` the fraction of the full
/// length cropped away, so the full length is `base / (1 - inset_sum)`.
///
/// # Errors
/// Returns [`CropError::InvalidInset`] when `inset_sum` is negative, not
/// finite, or `>= 1` (the crop would have no positive size).
pub fn extrapolate_from_inset(base: f64, inset_sum: f64) -> Result<f64> {
    if !(0.0..1.0).contains(&inset_sum) {
        return Err(CropError::InvalidInset { sum: inset_sum });
    }
    Ok(base / (1.0 - inset_sum))
}

// extensions/easing.rs
//
// Interpolation helpers for eased approaches.
// No dependencies on Entity/Scene, just math.

use glam::Vec3;

/// Reference tick rate the per-tick approach factors are tuned for.
pub const REFERENCE_DT: f32 = 1.0 / 60.0;

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Convert a per-reference-tick approach factor into the factor for a step of `dt`.
///
/// Covering `factor` of the remaining distance every `REFERENCE_DT` is an
/// exponential decay; this keeps the decay rate identical for any step size.
/// Factors outside [0, 1] are clamped.
#[inline]
pub fn rate_adjusted(factor: f32, dt: f32) -> f32 {
    let factor = factor.clamp(0.0, 1.0);
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - factor).powf(dt / REFERENCE_DT)
}

/// Move `current` toward `target` by `factor` of the remaining distance.
/// For 0 < factor < 1 this never overshoots.
#[inline]
pub fn approach_vec3(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    lerp_vec3(current, target, factor.clamp(0.0, 1.0))
}

/// Number of ticks a fractional approach needs to shrink `distance` below `threshold`.
/// Returns `None` when it never converges (factor not in (0, 1]).
pub fn ticks_to_converge(distance: f32, threshold: f32, factor: f32) -> Option<u32> {
    if distance < threshold {
        return Some(0);
    }
    if !(factor > 0.0 && factor <= 1.0) || threshold <= 0.0 {
        return None;
    }
    if factor >= 1.0 {
        return Some(1);
    }
    // distance * (1 - f)^n < threshold
    let n = (threshold / distance).ln() / (1.0 - factor).ln();
    Some(n.floor() as u32 + 1)
}

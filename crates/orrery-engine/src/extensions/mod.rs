// extensions/mod.rs
//
// Optional extension modules for OrreryEngine.
// These are decoupled from core Entity/Scene; games opt in by using them.

pub mod easing;
pub mod transform;

pub use easing::{lerp, lerp_vec3, approach_vec3, rate_adjusted, ticks_to_converge, REFERENCE_DT};
pub use transform::Frame;

/// Orbit kinematics: pure math, no engine state.
///
/// Orbits are kinematic. A body's place on its ellipse is a direct function
/// of elapsed simulation time, so pausing means freezing the clock input.
/// The same `position_at_angle` drives both the moving body and its drawn
/// path, which keeps the two from ever drifting apart.

use std::f32::consts::TAU;
use glam::{Quat, Vec3};
use orrery_engine::REFERENCE_DT;

/// Global slow-down applied to every orbital speed.
pub const ORBIT_TIME_SCALE: f64 = 0.1;
/// Self-rotation per reference tick is `rotation_speed * SPIN_RATE_SCALE`.
pub const SPIN_RATE_SCALE: f32 = 0.01;
/// Segments in a drawn orbit path.
pub const ORBIT_PATH_SEGMENTS: usize = 128;

/// Orbit angle θ = t·ω·k + φ, wrapped into [0, TAU).
///
/// Time stays f64 until after the wrap so long sessions keep their precision.
pub fn orbit_angle(elapsed: f64, orbital_speed: f32, phase: f32) -> f32 {
    let theta = elapsed * orbital_speed as f64 * ORBIT_TIME_SCALE + phase as f64;
    theta.rem_euclid(std::f64::consts::TAU) as f32
}

/// Polar conic radius r = R(1 − e²) / (1 + e·cos θ).
pub fn radius_at(orbit_radius: f32, eccentricity: f32, angle: f32) -> f32 {
    orbit_radius * (1.0 - eccentricity * eccentricity) / (1.0 + eccentricity * angle.cos())
}

/// Point on the untilted orbit ellipse (XZ plane of the orbit frame).
pub fn position_at_angle(orbit_radius: f32, eccentricity: f32, angle: f32) -> Vec3 {
    let r = radius_at(orbit_radius, eccentricity, angle);
    Vec3::new(r * angle.cos(), 0.0, r * angle.sin())
}

/// Position on the untilted orbit after `elapsed` simulation seconds.
/// A zero radius is the stationary anchor.
pub fn position_at_time(
    orbit_radius: f32,
    eccentricity: f32,
    orbital_speed: f32,
    phase: f32,
    elapsed: f64,
) -> Vec3 {
    if orbit_radius == 0.0 {
        return Vec3::ZERO;
    }
    position_at_angle(orbit_radius, eccentricity, orbit_angle(elapsed, orbital_speed, phase))
}

/// Rotation that tilts an orbit plane about X by `degrees`.
pub fn inclination(degrees: f32) -> Quat {
    Quat::from_rotation_x(degrees.to_radians())
}

/// Closed path sampled at θ_i = i/segments · TAU, first point repeated at the end.
pub fn path_points(orbit_radius: f32, eccentricity: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            position_at_angle(orbit_radius, eccentricity, theta)
        })
        .collect()
}

/// Spin advance for a step of `sim_dt` seconds, wrapped into [0, TAU).
pub fn advance_spin(spin: f32, rotation_speed: f32, sim_dt: f32) -> f32 {
    let delta = rotation_speed * SPIN_RATE_SCALE * (sim_dt / REFERENCE_DT);
    (spin + delta).rem_euclid(TAU)
}

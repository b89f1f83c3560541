use std::f32::consts::{PI, TAU};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::renderer::camera::Camera3D;

/// Keeps the polar angle away from the poles so `look_at` stays well defined.
const POLAR_EPSILON: f32 = 1e-4;

/// Limits and feel of the pointer orbit control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlsConfig {
    /// Closest the camera may get to the target.
    pub min_distance: f32,
    /// Farthest the camera may get from the target.
    pub max_distance: f32,
    /// Polar angle limits in radians (0 = looking straight down).
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    /// Fraction of the pending rotation applied per update (0 disables damping).
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Revolutions per minute at 60 updates per second is `auto_rotate_speed`.
    pub auto_rotate_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.25,
            max_distance: 500.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            auto_rotate_speed: 0.2,
            enable_rotate: true,
            enable_zoom: true,
        }
    }
}

/// Pointer-driven orbit control around a mutable look-target.
///
/// Other systems may write `target` and the camera pose between updates;
/// `update` re-derives the orbit from whatever it finds, applies pending
/// gesture deltas with damping, clamps distance and polar angle, and turns
/// the camera toward the target.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits around and looks at.
    pub target: Vec3,
    pub config: ControlsConfig,
    /// Slowly spin around the target while idle.
    pub auto_rotate: bool,
    interacting: bool,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}

impl OrbitControls {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            config,
            auto_rotate: false,
            interacting: false,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    // -- Gesture lifecycle --

    /// A pointer gesture started (drag began).
    pub fn begin_interaction(&mut self) {
        if !self.interacting {
            log::debug!("orbit controls: interaction start");
        }
        self.interacting = true;
    }

    /// The pointer gesture ended.
    pub fn end_interaction(&mut self) {
        if self.interacting {
            log::debug!("orbit controls: interaction end");
        }
        self.interacting = false;
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    // -- Gesture input --

    /// Queue a rotation from a pointer drag given in normalized device units.
    /// A drag across the full viewport height turns the camera by one revolution.
    pub fn rotate(&mut self, dx_ndc: f32, dy_ndc: f32, aspect: f32) {
        if !self.config.enable_rotate {
            return;
        }
        let speed = self.config.rotate_speed;
        self.theta_delta -= PI * dx_ndc * aspect * speed;
        self.phi_delta += PI * dy_ndc * speed;
    }

    /// Queue a dolly from a wheel delta. Positive moves away from the target.
    pub fn dolly(&mut self, wheel_delta: f32) {
        if !self.config.enable_zoom || wheel_delta == 0.0 {
            return;
        }
        let step = 0.95f32.powf(self.config.zoom_speed);
        if wheel_delta > 0.0 {
            self.scale /= step;
        } else {
            self.scale *= step;
        }
    }

    /// Discard all pending gesture motion.
    pub fn stop(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.scale = 1.0;
    }

    fn auto_rotate_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.config.auto_rotate_speed
    }

    /// Apply pending motion and constraints to `camera`. Call once per tick after
    /// any other system has written the target or the camera pose.
    pub fn update(&mut self, camera: &mut Camera3D) {
        let mut offset = camera.position - self.target;
        if offset.length_squared() < 1e-12 {
            offset = Vec3::new(0.0, 0.0, self.config.min_distance.max(1e-3));
        }

        // Spherical coordinates around +Y: theta from +Z toward +X, phi from +Y
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.auto_rotate && !self.interacting {
            self.theta_delta -= self.auto_rotate_angle();
        }

        let damping = self.config.damping_factor;
        if damping > 0.0 {
            theta += self.theta_delta * damping;
            phi += self.phi_delta * damping;
        } else {
            theta += self.theta_delta;
            phi += self.phi_delta;
        }

        let min_polar = self.config.min_polar_angle.max(POLAR_EPSILON);
        let max_polar = self.config.max_polar_angle.min(PI - POLAR_EPSILON);
        phi = phi.clamp(min_polar, max_polar.max(min_polar));

        radius *= self.scale;
        radius = radius.clamp(self.config.min_distance, self.config.max_distance);

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);

        if damping > 0.0 {
            self.theta_delta *= 1.0 - damping;
            self.phi_delta *= 1.0 - damping;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
        }
        self.scale = 1.0;
    }
}

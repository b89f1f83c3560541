// extensions/transform.rs
//
// Rigid frame composition for nested hierarchies.
// Completely decoupled from Entity/Scene internals.
//
// Usage:
//   let planet = Frame::IDENTITY.child(orbit_offset, tilt);
//   let moon = planet.child(moon_offset, moon_tilt);
//   let world = moon.position;

use glam::{Quat, Vec3};

/// A rigid transform: where a node sits and how its local axes are rotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// World-space origin of the frame.
    pub position: Vec3,
    /// World-space orientation of the frame's axes.
    pub rotation: Quat,
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Map a point expressed in this frame's local axes to world space.
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Map a direction (no translation) to world space.
    #[inline]
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Frame of a child placed at `offset` (in this frame's axes) whose own
    /// axes are additionally rotated by `local_rotation`.
    #[inline]
    pub fn child(&self, offset: Vec3, local_rotation: Quat) -> Frame {
        Frame {
            position: self.transform_point(offset),
            rotation: (self.rotation * local_rotation).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_child_is_plain_translation() {
        let child = Frame::IDENTITY.child(Vec3::new(50.0, 0.0, 0.0), Quat::IDENTITY);
        assert_eq!(child.position, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn nested_translation_adds_up() {
        let parent = Frame::IDENTITY.child(Vec3::new(100.0, 0.0, 100.0), Quat::IDENTITY);
        let child = parent.child(Vec3::new(50.0, 0.0, 0.0), Quat::IDENTITY);
        assert_eq!(child.position, Vec3::new(150.0, 0.0, 100.0));
    }

    #[test]
    fn parent_rotation_tilts_child_offset() {
        let parent = Frame::new(Vec3::ZERO, Quat::from_rotation_x(FRAC_PI_2));
        let child = parent.child(Vec3::new(0.0, 0.0, 1.0), Quat::IDENTITY);
        // Rx(90°) maps +Z onto -Y
        assert!((child.position - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
    }
}

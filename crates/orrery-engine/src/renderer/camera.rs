use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3};

/// Perspective camera for 3D rendering.
/// Orientation follows the right-handed convention: the camera looks down -Z, +Y is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera3D {
    /// Camera position in world space.
    pub position: Vec3,
    /// Camera orientation in world space.
    pub orientation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// xyz = eye position, w = 1.
    pub eye: [f32; 4],
}

/// A half-line used for pointer picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first intersection with a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_d = disc.sqrt();
        let near = -b - sqrt_d;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere
        let far = -b + sqrt_d;
        (far >= 0.0).then_some(far)
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(60f32.to_radians(), 16.0 / 9.0)
    }
}

impl Camera3D {
    pub fn new(fov_y: f32, aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            orientation: Quat::IDENTITY,
            fov_y,
            aspect,
            near: 0.1,
            far: 2000.0,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Unit vector to the camera's right.
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Unit vector pointing up in camera space.
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Rotate the camera so it faces `target`, keeping world +Y as up.
    /// A target at the camera position leaves the orientation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() < 1e-12 {
            return;
        }
        let dir = dir.normalize();
        // Looking straight up or down: fall back to +Z as the up hint
        let up = if dir.cross(Vec3::Y).length_squared() < 1e-8 { Vec3::Z } else { Vec3::Y };
        let view = Mat4::look_at_rh(self.position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.orientation = rotation.normalize();
    }

    /// Update the aspect ratio on viewport resize.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_width > 0.0 && viewport_height > 0.0 {
            self.aspect = viewport_width / viewport_height;
        }
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    /// Perspective projection, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }

    /// Ray from the eye through a point given in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let near = inv * ndc.extend(0.0).extend(1.0);
        let far = inv * ndc.extend(1.0).extend(1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        let direction = (far - near).try_normalize().unwrap_or_else(|| self.forward());
        Ray {
            origin: self.position,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_faces_target() {
        let mut cam = Camera3D::default().with_position(Vec3::new(0.0, 50.0, 150.0));
        cam.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((cam.forward() - expected).length() < 1e-4);
        // Up stays roughly world-up (no roll)
        assert!(cam.right().y.abs() < 1e-4);
    }

    #[test]
    fn look_at_straight_down_is_finite() {
        let mut cam = Camera3D::default().with_position(Vec3::new(0.0, 10.0, 0.0));
        cam.look_at(Vec3::ZERO);
        assert!(cam.orientation.is_finite());
        assert!((cam.forward() - Vec3::NEG_Y).length() < 1e-4);
    }

    #[test]
    fn center_ray_matches_forward() {
        let mut cam = Camera3D::default().with_position(Vec3::new(3.0, 4.0, 20.0));
        cam.look_at(Vec3::new(1.0, 0.0, 0.0));
        let ray = cam.ray_through(Vec2::ZERO);
        assert!((ray.direction - cam.forward()).length() < 1e-3);
    }

    #[test]
    fn ray_hits_sphere_in_front() {
        let ray = Ray { origin: Vec3::new(0.0, 0.0, 10.0), direction: Vec3::NEG_Z };
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        // Sphere behind the origin is missed
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 20 * 4);
    }
}

pub mod instance;
pub mod camera;
pub mod orbit_controls;

// Re-export key types for convenient access
pub use camera::{Camera3D, CameraUniform, Ray};
pub use instance::{BodyInstance, PointInstance, RenderBuffer};
pub use orbit_controls::{ControlsConfig, OrbitControls};

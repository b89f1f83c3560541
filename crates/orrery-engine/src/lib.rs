pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, SoundEvent, GameEvent, flag};
pub use components::entity::{Entity, Appearance};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, SimClock};
pub use renderer::instance::{BodyInstance, PointInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, CameraUniform, Ray};
pub use renderer::orbit_controls::{ControlsConfig, OrbitControls};
pub use input::queue::{InputEvent, InputQueue, Key};
pub use assets::manifest::{AssetManifest, TextureDescriptor, SoundDescriptor};
pub use assets::registry::{AssetStatus, TextureRegistry};
pub use bridge::protocol::{ProtocolLayout, CAMERA_FLOATS};
pub use systems::render::build_render_buffer;

// Extensions: decoupled math helpers
pub use extensions::{
    lerp, lerp_vec3, approach_vec3, rate_adjusted, ticks_to_converge, REFERENCE_DT,
    Frame,
};

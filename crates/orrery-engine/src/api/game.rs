use glam::Vec3;
use crate::core::scene::Scene;
use crate::api::types::{EntityId, SoundEvent, GameEvent};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::TextureRegistry;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::PointInstance;
use crate::renderer::orbit_controls::{ControlsConfig, OrbitControls};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of body instances per frame (default: 64).
    pub max_bodies: usize,
    /// Maximum number of point-sprite instances per frame (default: 8192).
    pub max_points: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Initial camera position.
    pub camera_position: Vec3,
    /// Orbit control limits and rates.
    pub controls: ControlsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_bodies: 64,
            max_points: 8192,
            max_sounds: 32,
            max_events: 32,
            camera_position: Vec3::new(0.0, 50.0, 150.0),
            controls: ControlsConfig::default(),
        }
    }
}

/// The core contract every exhibit must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed simulation step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub controls: OrbitControls,
    /// Point sprites (belts, orbit paths). Owned by the game, which rebuilds
    /// them when they change; they persist across frames otherwise.
    pub points: Vec<PointInstance>,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Texture slots and sound ids known to the host page.
    pub manifest: AssetManifest,
    /// Per-texture load results reported by the host page.
    pub textures: TextureRegistry,
    /// Seconds of the current fixed step.
    pub dt: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create a context with the camera and controls taken from `config`.
    pub fn with_config(config: &GameConfig) -> Self {
        let mut camera = Camera3D::default().with_position(config.camera_position);
        camera.look_at(Vec3::ZERO);
        Self {
            scene: Scene::with_capacity(config.max_bodies),
            camera,
            controls: OrbitControls::new(config.controls),
            points: Vec::with_capacity(config.max_points),
            sounds: Vec::new(),
            events: Vec::new(),
            manifest: AssetManifest::default(),
            textures: TextureRegistry::new(),
            dt: config.fixed_dt,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound event to be forwarded to the host page.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Replace the asset manifest; every listed texture becomes pending again.
    pub fn load_manifest(&mut self, manifest: AssetManifest) {
        self.textures = TextureRegistry::from_manifest(&manifest);
        self.manifest = manifest;
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn camera_starts_looking_at_origin() {
        let ctx = EngineContext::new();
        let to_origin = (Vec3::ZERO - ctx.camera.position).normalize();
        assert!(ctx.camera.forward().dot(to_origin) > 0.999);
    }

    #[test]
    fn loading_manifest_marks_textures_pending() {
        let mut ctx = EngineContext::new();
        assert!(ctx.textures.is_resolved("earth"));

        let mut manifest = AssetManifest::default();
        manifest.add_texture("earth", "earthmap1k.jpg");
        ctx.load_manifest(manifest);
        assert!(!ctx.textures.is_resolved("earth"));
        assert_eq!(ctx.manifest.texture_slot("earth"), Some(0));
    }

    #[test]
    fn clear_frame_data_keeps_scene() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id).with_tag("sun"));
        ctx.emit_sound(SoundEvent(1));
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        ctx.points.push(PointInstance::default());

        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
        assert_eq!(ctx.points.len(), 1);
        assert_eq!(ctx.scene.len(), 1);
    }
}

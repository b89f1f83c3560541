use glam::{Quat, Vec3};
use crate::api::types::EntityId;

/// Per-node material state the renderer reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// 0.0 = invisible, 1.0 = opaque.
    pub opacity: f32,
    /// Emissive intensity (selection / hover glow).
    pub emissive: f32,
    /// Uniform scale multiplier on top of the radius (hover growth).
    pub scale: f32,
    /// Texture slot for the renderer (index into the asset manifest).
    pub texture: u32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            emissive: 0.0,
            scale: 1.0,
            texture: 0,
        }
    }
}

/// Fat Entity: one struct per mounted scene node.
/// The tag doubles as the stable lookup key (body id).
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Stable name used for lookups by the camera and picking.
    pub tag: String,
    /// Inactive entities stay mounted but are skipped by rendering and picking.
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Orientation of the orbital frame the node lives in.
    pub orientation: Quat,
    /// Self-rotation about the local Y axis, in radians (unbounded).
    pub spin: f32,
    /// Sphere radius in world units.
    pub radius: f32,
    pub appearance: Appearance,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            spin: 0.0,
            radius: 1.0,
            appearance: Appearance::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Radius after the appearance scale is applied (used for picking).
    pub fn effective_radius(&self) -> f32 {
        self.radius * self.appearance.scale
    }
}

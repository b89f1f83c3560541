use serde::{Deserialize, Serialize};

use crate::bodies::{BodyCatalog, BodyKind, OrbitalBody, ERIS_ID, SUN_ALT_TEXTURE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SunTexture {
    #[default]
    A,
    B,
}

/// A user-switchable feature. Codes match the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    AdvancedMoons,
    AsteroidBelt,
    KuiperBelt,
    Eris,
    SunTexture,
}

impl Feature {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Feature::AdvancedMoons),
            1 => Some(Feature::AsteroidBelt),
            2 => Some(Feature::KuiperBelt),
            3 => Some(Feature::Eris),
            4 => Some(Feature::SunTexture),
            _ => None,
        }
    }
}

/// Visibility switches. Hiding a body filters it out of traversal;
/// the body table itself is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureToggles {
    pub advanced_moons: bool,
    pub asteroid_belt: bool,
    pub kuiper_belt: bool,
    pub eris: bool,
    pub sun_texture: SunTexture,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            advanced_moons: true,
            asteroid_belt: true,
            kuiper_belt: true,
            eris: true,
            sun_texture: SunTexture::A,
        }
    }
}

impl FeatureToggles {
    /// Flip one feature.
    pub fn toggle(&mut self, feature: Feature) {
        match feature {
            Feature::AdvancedMoons => self.advanced_moons = !self.advanced_moons,
            Feature::AsteroidBelt => self.asteroid_belt = !self.asteroid_belt,
            Feature::KuiperBelt => self.kuiper_belt = !self.kuiper_belt,
            Feature::Eris => self.eris = !self.eris,
            Feature::SunTexture => {
                self.sun_texture = match self.sun_texture {
                    SunTexture::A => SunTexture::B,
                    SunTexture::B => SunTexture::A,
                }
            }
        }
    }

    /// Whether this body passes its own switch (ancestors not considered).
    pub fn shows(&self, body: &OrbitalBody) -> bool {
        match body.kind {
            BodyKind::Asteroid if !self.asteroid_belt => false,
            BodyKind::Moon if body.is_togglable && !self.advanced_moons => false,
            _ if body.id == ERIS_ID && !self.eris => false,
            _ => true,
        }
    }

    /// Whether the body at `idx` and every ancestor are shown.
    pub fn is_visible(&self, catalog: &BodyCatalog, idx: usize) -> bool {
        let mut cur = Some(idx);
        while let Some(i) = cur {
            match catalog.node(i) {
                Some(node) if self.shows(&node.body) => cur = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Texture key used for a body, honouring the sun texture switch.
    pub fn texture_key<'a>(&self, body: &'a OrbitalBody) -> &'a str {
        if body.is_sun && self.sun_texture == SunTexture::B {
            SUN_ALT_TEXTURE
        } else {
            &body.id
        }
    }

    /// Bitmask for the host page: bit 0 advanced moons, 1 asteroid belt,
    /// 2 Kuiper belt, 3 Eris, 4 sun texture B.
    pub fn bits(&self) -> u32 {
        (self.advanced_moons as u32)
            | (self.asteroid_belt as u32) << 1
            | (self.kuiper_belt as u32) << 2
            | (self.eris as u32) << 3
            | ((self.sun_texture == SunTexture::B) as u32) << 4
    }
}

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing every texture and sound the exhibit uses.
/// Loaded from a JSON file at runtime; the host page does the actual loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Textures in slot order. The slot index is what render instances carry.
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    /// Optional audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Lookup key (usually a body id, or e.g. "sun-b" for alternates).
    pub key: String,
    /// URL or relative path of the image.
    pub path: String,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path or URL of the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
    /// Loop playback (ambient tracks).
    #[serde(default)]
    pub looped: bool,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Append a texture, returning its slot. Re-adding a key returns the existing slot.
    pub fn add_texture(&mut self, key: impl Into<String>, path: impl Into<String>) -> u32 {
        let key = key.into();
        if let Some(slot) = self.texture_slot(&key) {
            return slot;
        }
        self.textures.push(TextureDescriptor { key, path: path.into() });
        (self.textures.len() - 1) as u32
    }

    /// Slot index of the texture registered under `key`.
    pub fn texture_slot(&self, key: &str) -> Option<u32> {
        self.textures.iter().position(|t| t.key == key).map(|i| i as u32)
    }

    /// Serialize back to JSON for the host page.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "sounds": {
                "click": { "path": "click.ogg", "event_id": 1 },
                "ambient": { "path": "deep-space.mp3", "looped": true }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);

        let click = &manifest.sounds["click"];
        assert_eq!(click.path, "click.ogg");
        assert_eq!(click.event_id, Some(1));
        assert!(!click.looped);

        let ambient = &manifest.sounds["ambient"];
        assert_eq!(ambient.event_id, None);
        assert!(ambient.looped);
    }

    #[test]
    fn texture_slots_follow_order() {
        let json = r#"{
            "textures": [
                { "key": "sun", "path": "sunmap.jpg" },
                { "key": "earth", "path": "earthmap1k.jpg" }
            ]
        }"#;
        let mut manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.texture_slot("earth"), Some(1));
        assert_eq!(manifest.texture_slot("mars"), None);
        assert_eq!(manifest.add_texture("mars", "marsmap1k.jpg"), 2);
        assert_eq!(manifest.add_texture("sun", "other.jpg"), 0);
    }
}

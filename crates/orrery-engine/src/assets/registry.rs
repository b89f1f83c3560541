use std::collections::HashMap;
use crate::assets::manifest::AssetManifest;

/// Load state of one texture as reported by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    /// The load failed; consumers fall back to an untextured material.
    Failed,
}

impl AssetStatus {
    /// Loaded or failed; either way the consumer may stop waiting.
    pub fn is_resolved(self) -> bool {
        !matches!(self, AssetStatus::Pending)
    }
}

/// Tracks texture load results by key, built from an AssetManifest.
pub struct TextureRegistry {
    status: HashMap<String, AssetStatus>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            status: HashMap::new(),
        }
    }

    /// Every manifest texture starts out pending.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let status = manifest
            .textures
            .iter()
            .map(|t| (t.key.clone(), AssetStatus::Pending))
            .collect();
        Self { status }
    }

    /// Record a load result for `key`.
    pub fn report(&mut self, key: &str, ok: bool) {
        let status = if ok { AssetStatus::Loaded } else { AssetStatus::Failed };
        if !ok {
            log::warn!("texture '{}' failed to load, using fallback material", key);
        }
        self.status.insert(key.to_string(), status);
    }

    /// Mark everything loaded (hosts that preload or render untextured).
    pub fn resolve_all(&mut self) {
        for status in self.status.values_mut() {
            if *status == AssetStatus::Pending {
                *status = AssetStatus::Loaded;
            }
        }
    }

    /// Unknown keys count as resolved: nothing to wait for.
    pub fn status(&self, key: &str) -> AssetStatus {
        self.status.get(key).copied().unwrap_or(AssetStatus::Loaded)
    }

    pub fn is_resolved(&self, key: &str) -> bool {
        self.status(key).is_resolved()
    }

    /// Number of textures still pending.
    pub fn pending(&self) -> usize {
        self.status.values().filter(|s| **s == AssetStatus::Pending).count()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> AssetManifest {
        let mut m = AssetManifest::default();
        m.add_texture("sun", "sunmap.jpg");
        m.add_texture("earth", "earthmap1k.jpg");
        m
    }

    #[test]
    fn starts_pending_and_resolves() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        assert_eq!(reg.pending(), 2);
        assert!(!reg.is_resolved("earth"));

        reg.report("earth", true);
        assert_eq!(reg.status("earth"), AssetStatus::Loaded);
        reg.report("sun", false);
        assert_eq!(reg.status("sun"), AssetStatus::Failed);
        assert!(reg.is_resolved("sun"));
        assert_eq!(reg.pending(), 0);
    }

    #[test]
    fn unknown_keys_are_resolved() {
        let reg = TextureRegistry::new();
        assert!(reg.is_resolved("nonexistent"));
    }

    #[test]
    fn resolve_all_keeps_failures() {
        let mut reg = TextureRegistry::from_manifest(&manifest());
        reg.report("sun", false);
        reg.resolve_all();
        assert_eq!(reg.status("sun"), AssetStatus::Failed);
        assert_eq!(reg.status("earth"), AssetStatus::Loaded);
    }
}

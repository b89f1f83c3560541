use orrery_engine::ControlsConfig;
use serde::{Deserialize, Serialize};

use crate::camera_controller::CameraTuning;
use crate::error::ConfigError;
use crate::features::FeatureToggles;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioSettings {
    pub enabled: bool,
    pub background_volume: f32,
    pub ui_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            background_volume: 0.05,
            ui_volume: 0.5,
        }
    }
}

/// Exhibit tuning loadable from JSON. Every section falls back to its defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExhibitConfig {
    pub camera: CameraTuning,
    pub controls: ControlsConfig,
    pub features: FeatureToggles,
    pub audio: AudioSettings,
}

impl ExhibitConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ExhibitConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        unit_factor("camera.targetLerp", camera.target_lerp)?;
        unit_factor("camera.positionLerp", camera.position_lerp)?;
        positive("camera.convergenceThreshold", camera.convergence_threshold)?;
        positive("camera.freeRoamSpeed", camera.free_roam_speed)?;
        if camera.max_transition_ticks == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "camera.maxTransitionTicks",
                value: 0.0,
            });
        }

        let controls = &self.controls;
        positive("controls.minDistance", controls.min_distance)?;
        if !(controls.max_distance >= controls.min_distance) {
            return Err(ConfigError::InvalidSetting {
                field: "controls.maxDistance",
                value: controls.max_distance,
            });
        }
        if !(0.0..=1.0).contains(&controls.damping_factor) {
            return Err(ConfigError::InvalidSetting {
                field: "controls.dampingFactor",
                value: controls.damping_factor,
            });
        }

        volume("audio.backgroundVolume", self.audio.background_volume)?;
        volume("audio.uiVolume", self.audio.ui_volume)?;
        Ok(())
    }
}

fn unit_factor(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting { field, value })
    }
}

fn volume(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ExhibitConfig::from_json("{}").unwrap();
        assert_eq!(config, ExhibitConfig::default());
        assert!((config.camera.position_lerp - 0.04).abs() < 1e-6);
        assert!((config.audio.background_volume - 0.05).abs() < 1e-6);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let json = r#"{
            "camera": { "maxTransitionTicks": 120 },
            "features": { "kuiperBelt": false },
            "audio": { "enabled": false }
        }"#;
        let config = ExhibitConfig::from_json(json).unwrap();
        assert_eq!(config.camera.max_transition_ticks, 120);
        assert!((config.camera.target_lerp - 0.2).abs() < 1e-6);
        assert!(!config.features.kuiper_belt);
        assert!(config.features.asteroid_belt);
        assert!(!config.audio.enabled);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            r#"{ "camera": { "positionLerp": 0.0 } }"#,
            r#"{ "camera": { "targetLerp": 1.5 } }"#,
            r#"{ "camera": { "convergenceThreshold": -1.0 } }"#,
            r#"{ "camera": { "maxTransitionTicks": 0 } }"#,
            r#"{ "controls": { "minDistance": 50.0, "maxDistance": 10.0 } }"#,
            r#"{ "audio": { "uiVolume": 2.0 } }"#,
        ];
        for json in bad {
            assert!(
                matches!(ExhibitConfig::from_json(json), Err(ConfigError::InvalidSetting { .. })),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            ExhibitConfig::from_json("{ camera: }"),
            Err(ConfigError::JsonError(_))
        ));
    }
}

//! On-disk configuration and the per-tick settings derived from it.
//!
//! The file stores rates per second, the way server owners think about them.
//! [`StaminaSettings`] holds the same values converted to per-tick amounts at
//! the host tick rate, and is what every system reads.

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use stamina_host::DEFAULT_TPS;
use std::path::Path;
use std::{fs, io};
use thiserror::Error;
use tracing::info;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value {value} for `{key}`")]
    InvalidValue { key: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StaminaConfig {
    pub max_stamina: f64,
    pub glide_drain_per_second: f64,
    pub rocket_cost: f64,
    pub regen_per_second: f64,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max_stamina: 60.0,
            glide_drain_per_second: 1.0,
            rocket_cost: 10.0,
            regen_per_second: 0.3,
        }
    }
}

impl StaminaConfig {
    /// Reads `config.json` from `dir`, writing the defaults there first when
    /// the file does not exist yet.
    pub fn load_or_create(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save(&path)?;
                info!("Wrote default stamina config to {}", path.display());
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct StaminaSettings {
    pub max_stamina: f64,
    pub glide_drain_per_tick: f64,
    pub rocket_cost: f64,
    pub regen_per_tick: f64,
}

impl StaminaSettings {
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(0.0, self.max_stamina)
    }
}

impl Default for StaminaSettings {
    fn default() -> Self {
        let tps = DEFAULT_TPS.get() as f64;
        let config = StaminaConfig::default();
        Self {
            max_stamina: config.max_stamina,
            glide_drain_per_tick: config.glide_drain_per_second / tps,
            rocket_cost: config.rocket_cost,
            regen_per_tick: config.regen_per_second / tps,
        }
    }
}

impl TryFrom<StaminaConfig> for StaminaSettings {
    type Error = ConfigError;

    fn try_from(config: StaminaConfig) -> Result<Self, Self::Error> {
        if !config.max_stamina.is_finite() || config.max_stamina <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "max-stamina",
                value: config.max_stamina,
            });
        }
        let rates = [
            ("glide-drain-per-second", config.glide_drain_per_second),
            ("rocket-cost", config.rocket_cost),
            ("regen-per-second", config.regen_per_second),
        ];
        for (key, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { key, value });
            }
        }

        let tps = DEFAULT_TPS.get() as f64;
        Ok(Self {
            max_stamina: config.max_stamina,
            glide_drain_per_tick: config.glide_drain_per_second / tps,
            rocket_cost: config.rocket_cost,
            regen_per_tick: config.regen_per_second / tps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_convert_to_per_tick() {
        let settings = StaminaSettings::try_from(StaminaConfig::default()).unwrap();
        assert_eq!(settings, StaminaSettings::default());
        assert_eq!(settings.max_stamina, 60.0);
        assert!((settings.glide_drain_per_tick - 0.05).abs() < 1e-12);
        assert!((settings.regen_per_tick - 0.015).abs() < 1e-12);
        assert_eq!(settings.rocket_cost, 10.0);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config: StaminaConfig = serde_json::from_str(r#"{ "max-stamina": 100.0 }"#).unwrap();
        assert_eq!(config.max_stamina, 100.0);
        assert_eq!(config.rocket_cost, 10.0);
        assert_eq!(config.regen_per_second, 0.3);
    }

    #[test]
    fn rejects_non_positive_max() {
        let config = StaminaConfig {
            max_stamina: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            StaminaSettings::try_from(config),
            Err(ConfigError::InvalidValue {
                key: "max-stamina",
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_rate() {
        let config = StaminaConfig {
            regen_per_second: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            StaminaSettings::try_from(config),
            Err(ConfigError::InvalidValue {
                key: "regen-per-second",
                ..
            })
        ));
    }

    #[test]
    fn writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("plugins").join("ElytraStamina");

        let config = StaminaConfig::load_or_create(&data_dir).unwrap();
        assert_eq!(config, StaminaConfig::default());

        let written = fs::read_to_string(data_dir.join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("\"glide-drain-per-second\""));
        let reread: StaminaConfig = serde_json::from_str(&written).unwrap();
        assert_eq!(reread, config);
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "max-stamina": 30.0, "rocket-cost": 5.0 }"#,
        )
        .unwrap();

        let config = StaminaConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config.max_stamina, 30.0);
        assert_eq!(config.rocket_cost, 5.0);
        assert_eq!(config.glide_drain_per_second, 1.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "max-stamina: 60").unwrap();
        assert!(matches!(
            StaminaConfig::load_or_create(dir.path()),
            Err(ConfigError::Json(_))
        ));
    }
}

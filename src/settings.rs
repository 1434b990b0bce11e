//! Session settings
//!
//! Timing and round tuning for a game. Persisted in LocalStorage on the web,
//! read from an optional JSON file natively.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HUMANS, SIM_DT};
use crate::error::ConfigError;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Human-controlled actors (the remaining slots are computer-controlled)
    pub human_players: u8,
    /// Scheduled rounds before the game ends
    pub max_rounds: u32,

    // === Countdown ===
    /// Discrete countdown ticks before each roll
    pub countdown_ticks: u32,
    /// Seconds between countdown ticks
    pub countdown_interval: f32,

    // === Die roll ===
    /// Shortest spin (seconds)
    pub spin_min: f32,
    /// Longest spin (seconds)
    pub spin_max: f32,
    /// Wait between flicker faces at the start of a spin
    pub flicker_min_interval: f32,
    /// Wait between flicker faces at the end of a spin
    pub flicker_max_interval: f32,

    // === Resolution ===
    /// Pause between the die stopping and jailing
    pub resolve_delay: f32,
    /// Pause after jailing before the next round (lets presentation settle)
    pub settle_delay: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            human_players: 1,
            max_rounds: 10,

            countdown_ticks: 3,
            countdown_interval: 1.0,

            spin_min: 3.0,
            spin_max: 9.0,
            flicker_min_interval: 0.05,
            flicker_max_interval: 0.5,

            resolve_delay: 0.5,
            settle_delay: 2.0,
        }
    }
}

impl Settings {
    /// Check every field; a bad value is a configuration fault
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.human_players == 0 || self.human_players > MAX_HUMANS {
            return Err(ConfigError::HumanPlayers {
                max: MAX_HUMANS,
                value: self.human_players,
            });
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        for (field, value) in [
            ("countdown_interval", self.countdown_interval),
            ("flicker_min_interval", self.flicker_min_interval),
            ("flicker_max_interval", self.flicker_max_interval),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        // Timed steps shorter than one tick would pile up inside a single tick
        for (field, value) in [
            ("countdown_interval", self.countdown_interval),
            ("flicker_min_interval", self.flicker_min_interval),
        ] {
            if value < SIM_DT {
                return Err(ConfigError::BelowMinimum {
                    field,
                    min: SIM_DT,
                    value,
                });
            }
        }
        for (field, value) in [
            ("spin_min", self.spin_min),
            ("resolve_delay", self.resolve_delay),
            ("settle_delay", self.settle_delay),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.spin_min > self.spin_max {
            return Err(ConfigError::InvertedRange {
                field: "spin",
                min: self.spin_min,
                max: self.spin_max,
            });
        }
        if self.flicker_min_interval > self.flicker_max_interval {
            return Err(ConfigError::InvertedRange {
                field: "flicker interval",
                min: self.flicker_min_interval,
                max: self.flicker_max_interval,
            });
        }
        Ok(())
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "corners_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "human_players": 2, "max_rounds": 4 }"#).unwrap();
        assert_eq!(settings.human_players, 2);
        assert_eq!(settings.max_rounds, 4);
        assert_eq!(settings.countdown_ticks, 3);
        assert_eq!(settings.spin_max, 9.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let settings = Settings {
            human_players: 3,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::HumanPlayers { value: 3, .. })
        ));

        let settings = Settings {
            spin_min: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvertedRange { field: "spin", .. })
        ));

        let settings = Settings {
            max_rounds: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::NoRounds)));
    }

    #[test]
    fn test_garbage_json_is_a_parse_error() {
        assert!(matches!(
            Settings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_sub_tick_intervals() {
        let settings = Settings {
            countdown_ticks: 0,
            flicker_min_interval: 1e-7,
            flicker_max_interval: 1e-7,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::BelowMinimum {
                field: "flicker_min_interval",
                ..
            })
        ));

        let settings = Settings {
            countdown_interval: 0.001,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::BelowMinimum {
                field: "countdown_interval",
                ..
            })
        ));

        // One tick is the shortest accepted step
        let settings = Settings {
            countdown_interval: SIM_DT,
            flicker_min_interval: SIM_DT,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_errors_keep_their_source() {
        use std::error::Error;

        let err = Settings::from_json("{ \"max_rounds\": \"ten\" }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.source().is_some());

        let path = std::path::Path::new("/nonexistent/corners/settings.json");
        let err = Settings::load_from_path(path).unwrap_err();
        let ConfigError::Io { path: reported, .. } = &err else {
            panic!("expected an io error, got {:?}", err);
        };
        assert_eq!(reported, path);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("settings.json"));
    }
}

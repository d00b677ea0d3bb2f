//! Player preferences
//!
//! Persisted separately from the session: a JSON file on native targets,
//! LocalStorage in the browser.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::Path};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(format!("unknown quality preset '{other}'")),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Hit explosions
    pub particles: bool,
    /// Draw the tracked skeleton over the video
    pub show_skeleton: bool,

    // === Accessibility ===
    /// Reduced motion (no audio-driven size pulsing)
    pub reduced_motion: bool,

    /// Fixed RNG seed (None = host picks one per session)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_skeleton: true,
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Whether render sizes follow the music (respects reduced_motion)
    pub fn pulse_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_pulse_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings unreadable ({e}), using defaults"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> crate::Result<()> {
        let json = serde_json::to_string(self)?;
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("LocalStorage rejected settings");
            } else {
                log::info!("Settings saved");
            }
        }
        Ok(())
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Like `load_from`, but a missing or unreadable file gives defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Settings at {} unusable ({e}), using defaults",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_preset_particle_caps() {
        assert_eq!(Settings::from_preset(QualityPreset::Low).max_particles(), 100);
        assert_eq!(Settings::default().max_particles(), 500);
        let off = Settings {
            particles: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(off.max_particles(), 0);
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!("HIGH".parse::<QualityPreset>(), Ok(QualityPreset::High));
        assert_eq!("med".parse::<QualityPreset>(), Ok(QualityPreset::Medium));
        assert!("ultra".parse::<QualityPreset>().is_err());
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"reduced_motion": true}"#).unwrap();
        assert!(settings.reduced_motion);
        assert!(!settings.pulse_enabled());
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_file_round_trip_and_errors() {
        let dir = std::env::temp_dir().join(format!("neon-pulse-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let settings = Settings {
            seed: Some(99),
            ..Settings::from_preset(QualityPreset::Low)
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(Error::SettingsFormat(_))));
        assert!(matches!(
            Settings::load_from(dir.join("missing.json")),
            Err(Error::SettingsIo(_))
        ));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unusable_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("neon-pulse-fallback-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        assert_eq!(Settings::load_or_default(dir.join("missing.json")), Settings::default());

        let corrupt = dir.join("corrupt.json");
        fs::write(&corrupt, "{ broken").unwrap();
        assert_eq!(Settings::load_or_default(&corrupt), Settings::default());

        let good = dir.join("good.json");
        fs::write(&good, r#"{"quality": "High", "seed": 5}"#).unwrap();
        let loaded = Settings::load_or_default(&good);
        assert_eq!(loaded.quality, QualityPreset::High);
        assert_eq!(loaded.seed, Some(5));

        fs::remove_dir_all(&dir).unwrap();
    }
}

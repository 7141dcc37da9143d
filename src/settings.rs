//! Runtime settings
//!
//! Chosen variant and how much decoration to draw. Read from a JSON file on
//! native builds and from the page query string on the web. Nothing here
//! touches the simulation, so the same seed plays out identically on every
//! preset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{collector, shooter};

/// Which of the two games to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Galaxy Star Collector: drop the ball, sweep the stars
    #[default]
    Collector,
    /// Galactic Star Collector: fly, shoot, collect
    Shooter,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Collector => "collector",
            Variant::Shooter => "shooter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "collector" | "drop" | "galaxy" => Some(Variant::Collector),
            "shooter" | "galactic" => Some(Variant::Shooter),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Variant::Collector => "GALAXY STAR COLLECTOR",
            Variant::Shooter => "GALACTIC STAR COLLECTOR",
        }
    }

    /// Logical canvas size in pixels
    pub fn canvas_size(&self) -> (f32, f32) {
        match self {
            Variant::Collector => (collector::WIDTH, collector::HEIGHT),
            Variant::Shooter => (shooter::WIDTH, shooter::HEIGHT),
        }
    }
}

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

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum explosion particles drawn per frame
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Share of the background starfield that gets drawn (0-1)
    pub fn starfield_fraction(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }

    /// Whether to render the nebula clouds
    pub fn nebula_enabled(&self) -> bool {
        matches!(self, QualityPreset::High)
    }

    /// Whether star trails are worth drawing at all
    pub fn trails_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Star trails
    pub trails: bool,
    /// Explosion particles
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    /// Fixed RNG seed; a random one is drawn when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Collector,
            quality: QualityPreset::Medium,
            trails: true,
            particles: true,
            show_fps: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({}, {})",
            path.display(),
            settings.variant.as_str(),
            settings.quality.as_str()
        );
        Ok(settings)
    }

    /// Apply `key=value` pairs from a URL query string such as
    /// `?variant=shooter&quality=high&seed=7`. Unknown keys and bad values
    /// are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "variant" | "game" => {
                    if let Some(v) = Variant::from_str(value) {
                        settings.variant = v;
                    }
                }
                "quality" => {
                    if let Some(q) = QualityPreset::from_str(value) {
                        settings.quality = q;
                    }
                }
                "seed" => settings.seed = value.parse().ok(),
                "fps" => settings.show_fps = value == "1" || value == "true",
                _ => log::debug!("Ignoring query parameter {}", key),
            }
        }
        settings
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective trail toggle (respects the preset)
    pub fn draw_trails(&self) -> bool {
        self.trails && self.quality.trails_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"variant": "shooter", "seed": 42}"#).unwrap();
        assert_eq!(settings.variant, Variant::Shooter);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.trails);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{variant:").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Settings::load("/nonexistent/star-collector.json").unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
        assert!(err.to_string().contains("star-collector.json"));
    }

    #[test]
    fn test_query_string() {
        let settings = Settings::from_query("?variant=shooter&quality=low&seed=9&junk");
        assert_eq!(settings.variant, Variant::Shooter);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.seed, Some(9));
        assert!(!settings.draw_trails());

        let fallback = Settings::from_query("variant=pong");
        assert_eq!(fallback.variant, Variant::Collector);
    }

    #[test]
    fn test_particle_cap() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), 500);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_canvas_sizes() {
        assert_eq!(Variant::Collector.canvas_size(), (800.0, 600.0));
        assert_eq!(Variant::Shooter.canvas_size(), (1000.0, 700.0));
    }
}

//! Configuration structures for LaserSketch
//!
//! Provides configuration for SVG import normalization, bounding box
//! sampling and the artboard.
//!
//! Supports:
//! - TOML and JSON configuration files, chosen by extension
//! - Missing sections and fields falling back to defaults
//! - Validation of all numeric settings

use std::path::{Path, PathBuf};

use lasersketch_core::PX_TO_MM;
use lasersketch_designer::{BoundsOptions, ImportMode, NormalizeOptions, MIN_CURVE_SAMPLES};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// SVG import settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Width a fresh import is fitted into, in mm
    pub target_width: f64,
    /// Height a fresh import is fitted into, in mm
    pub target_height: f64,
    /// Millimetres per CSS pixel for unitless documents
    pub px_to_mm: f64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            target_width: 1000.0,
            target_height: 1000.0,
            px_to_mm: PX_TO_MM,
        }
    }
}

impl ImportSettings {
    pub fn to_options(&self, mode: ImportMode) -> NormalizeOptions {
        NormalizeOptions {
            mode,
            target_width: self.target_width,
            target_height: self.target_height,
            px_to_mm: self.px_to_mm,
        }
    }
}

/// Bounding box settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsSettings {
    /// Subdivisions per cubic segment
    pub curve_samples: usize,
    /// Seed boxes with control handle coordinates
    pub include_handles: bool,
}

impl Default for BoundsSettings {
    fn default() -> Self {
        Self {
            curve_samples: MIN_CURVE_SAMPLES,
            include_handles: true,
        }
    }
}

impl From<&BoundsSettings> for BoundsOptions {
    fn from(settings: &BoundsSettings) -> Self {
        BoundsOptions {
            samples: settings.curve_samples,
            include_handles: settings.include_handles,
        }
    }
}

/// Artboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtboardSettings {
    /// Artboard width in mm
    pub width: f64,
    /// Artboard height in mm
    pub height: f64,
}

impl Default for ArtboardSettings {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Import normalization
    pub import: ImportSettings,
    /// Bounding box calculation
    pub bounds: BoundsSettings,
    /// Artboard size
    pub artboard: ArtboardSettings,
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<platform config dir>/lasersketch/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("No config or home directory".to_string())
            })?;
        path.push("lasersketch");
        path.push("config.toml");
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load config from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = Format::from_path(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::SaveError(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = [
            ("import.target_width", self.import.target_width),
            ("import.target_height", self.import.target_height),
            ("import.px_to_mm", self.import.px_to_mm),
            ("artboard.width", self.artboard.width),
            ("artboard.height", self.artboard.height),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)));
            }
        }

        if self.bounds.curve_samples < MIN_CURVE_SAMPLES {
            return Err(SettingsError::invalid(
                "bounds.curve_samples",
                format!("must be at least {}", MIN_CURVE_SAMPLES),
            ));
        }

        Ok(())
    }

    pub fn bounds_options(&self) -> BoundsOptions {
        BoundsOptions::from(&self.bounds)
    }

    pub fn normalize_options(&self, mode: ImportMode) -> NormalizeOptions {
        self.import.to_options(mode)
    }
}

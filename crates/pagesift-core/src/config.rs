// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PageSiftError, Result};
use crate::types::Sensitivity;

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Settings for the blank-page analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Render scale used for scoring, relative to full page size.
    pub render_scale: f32,
    /// Render scale used for removed-page preview thumbnails.
    pub thumbnail_scale: f32,
    /// A pixel whose R, G and B are all at or above this is "white".
    pub white_cutoff: u8,
    /// Sensitivity applied when the caller does not pass one.
    pub default_sensitivity: Sensitivity,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            render_scale: 0.2,
            thumbnail_scale: 0.1,
            white_cutoff: 245,
            default_sensitivity: Sensitivity::default(),
        }
    }
}

/// Settings for written output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write PNG thumbnails of pages classified blank next to the output.
    pub write_thumbnails: bool,
    /// Resolution assumed for page images when assembling them into a PDF.
    pub raster_dpi: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_thumbnails: false,
            raster_dpi: 150.0,
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load the configuration at `path` if it exists, otherwise defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject values no renderer can honour.
    pub fn validate(&self) -> Result<()> {
        for (name, scale) in [
            ("analysis.render_scale", self.analysis.render_scale),
            ("analysis.thumbnail_scale", self.analysis.thumbnail_scale),
        ] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(PageSiftError::Config(format!(
                    "{name} must be a positive number, got {scale}"
                )));
            }
        }
        if !self.output.raster_dpi.is_finite() || self.output.raster_dpi <= 0.0 {
            return Err(PageSiftError::Config(format!(
                "output.raster_dpi must be a positive number, got {}",
                self.output.raster_dpi
            )));
        }
        Ok(())
    }
}

/// Default location of the configuration file.
///
/// Uses `$XDG_CONFIG_HOME/pagesift`, then `$HOME/.config/pagesift`.
pub fn default_config_path() -> PathBuf {
    config_dir().join("pagesift").join(CONFIG_FILE)
}

fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    PathBuf::from(".")
}

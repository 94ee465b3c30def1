//! Configuration file handling
//!
//! Every tunable of the tasting flow (selection bounds, rating scale, banding
//! table, step count, catalog source) lives in one JSON document. Missing
//! sections fall back to the defaults, so `{}` is a valid configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::CupNoteError;
use crate::rating::{RatingScale, ValueBands};
use crate::selection::SelectionBounds;
use crate::types::WizardStep;

/// Rating section of the configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub scale: RatingScale,
    pub bands: ValueBands,
}

/// Application configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub selection: SelectionBounds,
    pub rating: RatingConfig,
    pub total_steps: usize,
    /// Custom flavor catalog; the built-in wheel is used when unset
    pub catalog_path: Option<PathBuf>,
    /// How many flavors the result summary calls out
    pub primary_flavors: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            selection: SelectionBounds::default(),
            rating: RatingConfig::default(),
            total_steps: WizardStep::TOTAL_STEPS,
            catalog_path: None,
            primary_flavors: 3,
        }
    }
}

impl AppConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.selection
            .validate()
            .context("Invalid selection bounds")?;
        self.rating.scale.validate().context("Invalid rating scale")?;
        self.rating.bands.validate().context("Invalid banding table")?;

        let scale = &self.rating.scale;
        if !(scale.minimum..=scale.maximum).contains(&scale.default_value) {
            return Err(CupNoteError::config(format!(
                "Default rating {} lies outside [{}, {}]",
                scale.default_value, scale.minimum, scale.maximum
            ))
            .into());
        }

        if self.total_steps == 0 {
            return Err(CupNoteError::config("The wizard needs at least one step").into());
        }

        if self.primary_flavors == 0 {
            return Err(CupNoteError::config("At least one primary flavor must be shown").into());
        }

        if let Some(path) = &self.catalog_path {
            if path.as_os_str().is_empty() {
                return Err(CupNoteError::config("Catalog path must not be empty when set").into());
            }
        }

        Ok(())
    }

    /// The configured catalog, or the built-in one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load_from_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

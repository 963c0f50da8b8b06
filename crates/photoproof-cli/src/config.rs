//! # Driver Configuration
//!
//! Optional YAML file carrying the camera admin's genesis credits:
//!
//! ```yaml
//! bounds:
//!   identity: 1
//!   crop: 1
//!   rotate: 4
//!   brightness: 2
//! ```
//!
//! Missing keys fall back to [`ProvenanceBounds::default`]. Unknown keys are
//! rejected so a typo cannot silently grant default credits.

use std::path::Path;

use anyhow::{Context, Result};
use photoproof_core::ProvenanceBounds;
use serde::{Deserialize, Serialize};

/// Top-level driver configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Genesis provenance credits stamped by the camera.
    pub bounds: ProvenanceBounds,
}

impl DriverConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("invalid driver configuration")
    }

    /// Read and parse a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

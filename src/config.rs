//! Processing configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::resample::DEFAULT_INTERVAL_MS;

/// Minimum raw points a series needs before the session is worth modeling.
pub const DEFAULT_MIN_POINTS: usize = 100;

/// Tunables for a batch run.
///
/// Loaded from an optional TOML file; missing fields fall back to the
/// defaults, and CLI flags override individual fields on top of that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Regular-grid sampling interval in milliseconds.
    pub interval_ms: i64,
    /// Minimum raw points both series need for a session to be kept.
    pub min_points: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

impl Config {
    /// Read a config file, failing on unknown keys so typos surface early.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

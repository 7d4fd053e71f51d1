//! Export configuration, persisted as a JSON file.
//!
//! Missing files fall back to defaults; malformed files are an error so a typo
//! never silently resets playlist headers.

pub mod models;

pub use models::*;

use crate::types::errors::{ExportError, ExportResult};
use std::fs;
use std::path::Path;

impl ExportConfig {
    /// Load the config from `path`, or defaults when the file doesn't exist.
    pub fn load(path: &Path) -> ExportResult<Self> {
        if !path.exists() {
            log::info!(
                "No export config at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            ExportError::Config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Write the config atomically: `.tmp` first, then rename over `path`.
    pub fn save(&self, path: &Path) -> ExportResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

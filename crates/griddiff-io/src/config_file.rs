//! TOML configuration loading for the comparison engine.
//!
//! Recognized surface, all optional:
//!
//! ```toml
//! [networks-diff]
//! generic-threshold = 0.1
//! voltage-threshold = 0.5
//! filter-diff = true
//! ```
//!
//! A missing file, a missing table or a missing key falls back to defaults;
//! `voltage-threshold` defaults to `generic-threshold` when absent.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use griddiff_core::{config::FILTER_DIFF_DEFAULT, config::THRESHOLD_DEFAULT, DiffConfig};
use griddiff_core::{DiffError, DiffResult};

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(rename = "networks-diff", default)]
    networks_diff: Option<DiffSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DiffSection {
    #[serde(rename = "generic-threshold")]
    generic_threshold: Option<f64>,
    #[serde(rename = "voltage-threshold")]
    voltage_threshold: Option<f64>,
    #[serde(rename = "filter-diff")]
    filter_diff: Option<bool>,
}

/// Parse a configuration from TOML text.
pub fn parse_config(text: &str) -> DiffResult<DiffConfig> {
    let doc: ConfigDocument =
        toml::from_str(text).map_err(|e| DiffError::Parse(e.to_string()))?;
    let section = doc.networks_diff.unwrap_or_default();
    let generic = section.generic_threshold.unwrap_or(THRESHOLD_DEFAULT);
    let voltage = section.voltage_threshold.unwrap_or(generic);
    let filter = section.filter_diff.unwrap_or(FILTER_DIFF_DEFAULT);
    DiffConfig::new(generic, voltage, filter)
}

/// Load a configuration from a TOML file. A nonexistent path means defaults.
pub fn load_config(path: impl AsRef<Path>) -> DiffResult<DiffConfig> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("no configuration at {}, using defaults", path.display());
        return Ok(DiffConfig::default());
    }
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

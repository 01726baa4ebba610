//! Optional TOML configuration for the `slots` CLI.
//!
//! ```toml
//! [grid]
//! healthcare_minutes = 30
//! cleaning_minutes = 60
//!
//! [defaults]
//! domain = "cleaning"
//! ```
//!
//! Every key is optional; missing keys fall back to built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::{Domain, GridPolicy};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Grid step per domain.
    pub grid: GridPolicy,
    pub defaults: Defaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    /// Domain used when `--domain` is not given.
    pub domain: Domain,
}

/// Load the config file at `path`, or the built-in defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

//! Migration configuration.
//!
//! There is very little to configure: how many photos go on each page and how
//! strictly images are paired with thumbnails. Values come from three layers,
//! later ones winning:
//!
//! ```text
//! stock defaults
//!   └── <gallery>/gallery-migrate.toml   (optional)
//!         └── command-line flags
//! ```
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//! photos_per_page = 25      # at least 1
//! pairing = "legacy"        # or "resync"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::pairing::PairingMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file inside the gallery directory.
pub const CONFIG_FILENAME: &str = "gallery-migrate.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrateConfig {
    /// Number of `<img>` tags per `gallery_NN` file.
    pub photos_per_page: usize,
    /// How to handle an image that is not followed by its thumbnail.
    pub pairing: PairingMode,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            photos_per_page: 25,
            pairing: PairingMode::Legacy,
        }
    }
}

impl MigrateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.photos_per_page == 0 {
            return Err(ConfigError::Validation(
                "photos_per_page must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos_per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairing: Option<PairingMode>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(MigrateConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read the gallery's config file as a raw TOML value.
///
/// `Ok(None)` when there is no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge the layers in order, deserialize, and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<MigrateConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: MigrateConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config for a gallery directory.
pub fn load_config(dir: &Path, overrides: &ConfigOverrides) -> Result<MigrateConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let file = load_raw_config(dir)?;
    let flags = toml::Value::try_from(overrides)?;
    resolve_config(base, file.into_iter().chain(std::iter::once(flags)))
}

/// A fully-commented stock config file. Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# gallery-migrate configuration
# ============================
# Place this file in the gallery directory as gallery-migrate.toml.
# All settings are optional; values shown are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Number of <img> tags written to each gallery_NN page file (at least 1).
photos_per_page = 25

# How images are matched with thumbnails after sorting.
#   "legacy" - take names two at a time. An image without a thumbnail is
#              dropped together with the name after it, so one stray file
#              shifts every later pair. Matches the old export tooling.
#   "resync" - drop only the unmatched name and continue from the next one.
pairing = "legacy"
"##
}

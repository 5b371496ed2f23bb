//! Gallery configuration module.
//!
//! Handles loading, validating, and merging a `config.toml` file. A config
//! file is optional: stock defaults apply to every key it leaves out, and
//! command-line flags override both.
//!
//! ```text
//! stock defaults  ←  config.toml (--config)  ←  CLI flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! label = "gallery"         # Output subfolder and page title
//! extensions = ["jpg", ".JPG", ".tiff", ".TIF", "png"]
//! resize_percent = 75       # Resized copy, percent of original (> 0)
//! thumbnail_edge = 128      # Thumbnail bounding box in pixels (> 0)
//! quality = 90              # JPEG quality (1-100)
//! html_filename = "index.html"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Name of the output subfolder, also used in the page title.
    pub label: String,
    /// Extensions of files to consider, in any case, with or without dot.
    pub extensions: Vec<String>,
    /// Scale of the resized copy, in percent of each dimension.
    pub resize_percent: u32,
    /// Longest edge of a thumbnail, in pixels.
    pub thumbnail_edge: u32,
    /// JPEG encoding quality.
    pub quality: u32,
    /// File name of the gallery page inside the output subfolder.
    pub html_filename: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            label: "gallery".to_string(),
            extensions: ["jpg", ".JPG", ".tiff", ".TIF", "png"]
                .into_iter()
                .map(String::from)
                .collect(),
            resize_percent: 75,
            thumbnail_edge: 128,
            quality: 90,
            html_filename: "index.html".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize_percent == 0 {
            return Err(ConfigError::Validation(
                "resize_percent must be greater than 0".into(),
            ));
        }
        if self.thumbnail_edge == 0 {
            return Err(ConfigError::Validation(
                "thumbnail_edge must be greater than 0".into(),
            ));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if !is_plain_name(&self.label) {
            return Err(ConfigError::Validation(format!(
                "label must be a plain folder name, got {:?}",
                self.label
            )));
        }
        if !is_plain_name(&self.html_filename) {
            return Err(ConfigError::Validation(format!(
                "html_filename must be a plain file name, got {:?}",
                self.html_filename
            )));
        }
        Ok(())
    }
}

/// Non-empty, single path component, not `.` or `..`.
fn is_plain_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed != "."
        && trimmed != ".."
        && !trimmed.contains(['/', '\\'])
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults: {e}")))
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

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the gallery config.
///
/// Without a path the stock defaults are used. With one, the file must exist;
/// its values are merged on top of the defaults, unknown keys are rejected,
/// and the result is validated.
pub fn load_config(path: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# thumb-gal configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override them.
# Unknown keys will cause an error.

# Name of the subfolder created inside the output directory. Also used in the
# gallery page title ("<label> Gallery").
label = "gallery"

# File extensions to pick up while walking the source folder. Case and the
# leading dot do not matter: "jpg", ".JPG" and "Jpg" are the same entry.
extensions = ["jpg", ".JPG", ".tiff", ".TIF", "png"]

# Size of the resized copy, in percent of the original width and height.
resize_percent = 75

# Thumbnails fit inside a square of this many pixels. Smaller images are
# copied at their original size, never enlarged.
thumbnail_edge = 128

# JPEG encoding quality (1 = worst, 100 = best). PNG, TIFF and WebP outputs
# are lossless and ignore this.
quality = 90

# File name of the generated gallery page. It is rewritten on every run.
html_filename = "index.html"
"##
}

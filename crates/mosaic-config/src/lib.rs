//! Mosaic configuration.
//!
//! TOML-based configuration with validation. Every section has defaults,
//! so a partial (or missing) config file works out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    LogLevel, LoggingConfig, MosaicConfig, PushConfig, ServerConfig, SyncConfig,
    CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use mosaic_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default file is created from a commented template when missing.
/// A config that parses but fails validation is still returned; the
/// problems are logged.
pub fn load_config(path: Option<&Path>) -> Result<MosaicConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &MosaicConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

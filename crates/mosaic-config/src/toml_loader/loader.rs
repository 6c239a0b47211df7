//! Reading the config file, or seeding one at the platform default path.

use crate::schema::MosaicConfig;
use crate::validation;
use mosaic_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::template::default_config_toml;

/// Load config from a specific TOML file path.
///
/// Missing fields take their defaults. Values that fail validation are
/// clamped back into range and a warning is logged.
pub fn load_from_path(path: &Path) -> Result<MosaicConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| io_failure("read", path, e))?;

    let mut config: MosaicConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}; clamping to valid ranges");
        validation::clamp_to_ranges(&mut config);
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/mosaic/config.toml`
/// On macOS: `~/Library/Application Support/mosaic/config.toml`
///
/// A missing file is created from the commented template and defaults are returned.
pub fn load_default() -> Result<MosaicConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(MosaicConfig::default())
        }
        other => other,
    }
}

/// `<config dir>/mosaic/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("mosaic").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_failure("create directory for", path, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_failure("write", path, e))?;
    info!("created default config at {}", path.display());
    Ok(())
}

fn io_failure(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("failed to {action} {}: {e}", path.display()))
}

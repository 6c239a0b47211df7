//! Full configuration validation.
//!
//! Each section has its own check; errors are collected into a single
//! `ConfigError`.

mod helpers;
mod sections;


use crate::schema::MosaicConfig;
use mosaic_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MosaicConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_server(&mut errors, config);
    sections::validate_sync(&mut errors, config);
    sections::validate_push(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Bring every out-of-range value back into its valid range.
///
/// Numbers are clamped to the nearest bound; URLs with the wrong scheme
/// fall back to the section default. A clamped config always validates.
pub fn clamp_to_ranges(config: &mut MosaicConfig) {
    sections::clamp_server(config);
    sections::clamp_sync(config);
    sections::clamp_push(config);
}

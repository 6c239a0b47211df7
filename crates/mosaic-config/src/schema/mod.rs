//! Configuration schema types for Mosaic.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod server;
mod sync;
mod system;

pub use server::*;
pub use sync::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    pub server: ServerConfig,
    pub sync: SyncConfig,
    pub push: PushConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

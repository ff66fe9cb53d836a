//! Configuration schema types for the Makeshift bot.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Server ids default to zero ("unset") and are rejected by validation.

mod guild;
mod lifecycle;
mod relay;
mod system;

pub use guild::*;
pub use lifecycle::*;
pub use relay::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub guild: GuildConfig,
    pub lifecycle: LifecycleConfig,
    pub relay: RelayConfig,
    pub logging: LoggingConfig,
}

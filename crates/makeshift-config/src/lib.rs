//! Makeshift bot configuration.
//!
//! TOML-based configuration with full validation. Every section has
//! defaults so partial configs work, but the server ids under `[guild]`
//! must be filled in before the bot can run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use makeshift_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{BotConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{load_default, load_from_path};

use makeshift_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a documented default file if none exists; that file fails
/// validation until the server ids are filled in.
pub fn load_config() -> Result<BotConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BotConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

//! Core TOML config loading: read from path or platform default.

use crate::schema::BotConfig;
use makeshift_common::ConfigError;
use std::path::Path;
use tracing::info;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. The result is not validated;
/// callers that are about to run the bot should call
/// [`crate::validation::validate`].
pub fn load_from_path(path: &Path) -> Result<BotConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: BotConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/makeshift/config.toml`, unless `MAKESHIFT_CONFIG`
/// names another file.
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<BotConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(BotConfig::default())
        }
        Err(e) => Err(e),
    }
}

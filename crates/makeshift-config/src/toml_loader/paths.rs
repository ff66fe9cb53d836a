//! Where the config file lives, and writing the first one.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use makeshift_common::ConfigError;
use tracing::{debug, info};

use super::template::default_config_toml;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "MAKESHIFT_CONFIG";

/// `$MAKESHIFT_CONFIG` if set, else `<config dir>/makeshift/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(std::env::var_os(CONFIG_PATH_ENV), dirs::config_dir())
}

fn resolve_config_path(
    explicit: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let dir = config_dir.ok_or_else(|| {
        ConfigError::ParseError(format!(
            "no platform config directory; set {CONFIG_PATH_ENV}"
        ))
    })?;
    Ok(dir.join("makeshift").join("config.toml"))
}

/// Write the documented default config to `path`.
///
/// An existing file is left untouched, so two processes starting at once
/// cannot clobber a config someone already edited.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_error = |action: &str, target: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("failed to {action} {}: {e}", target.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| io_error("create config directory", parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "config already exists, not overwriting");
            return Ok(());
        }
        Err(e) => return Err(io_error("create", path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_error("write default config to", path, e))?;

    info!(path = %path.display(), "created default config");
    Ok(())
}

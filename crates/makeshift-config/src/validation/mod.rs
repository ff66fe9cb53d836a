//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod guild;
mod helpers;
mod misc;


use crate::schema::BotConfig;
use makeshift_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BotConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    guild::validate_guild(&mut errors, config);
    misc::validate_lifecycle(&mut errors, config);
    misc::validate_relay(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

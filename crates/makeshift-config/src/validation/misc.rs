//! Validation for the lifecycle and relay sections.

use crate::schema::BotConfig;

use super::helpers::{require_id, validate_range};

/// Platform limit on channel name length.
const MAX_CHANNEL_NAME_LEN: usize = 100;

pub(crate) fn validate_lifecycle(errors: &mut Vec<String>, config: &BotConfig) {
    let lifecycle = &config.lifecycle;
    validate_range(
        errors,
        "lifecycle.grace_period_secs",
        lifecycle.grace_period_secs,
        1,
        3600,
    );

    for (i, name) in lifecycle.channel_names.iter().enumerate() {
        let len = name.trim().chars().count();
        if len == 0 || len > MAX_CHANNEL_NAME_LEN {
            errors.push(format!(
                "lifecycle.channel_names[{i}] must be 1-{MAX_CHANNEL_NAME_LEN} characters"
            ));
        }
    }

    if let Some(role) = lifecycle.voice_role_id {
        require_id(errors, "lifecycle.voice_role_id", role.get());
    }
}

pub(crate) fn validate_relay(errors: &mut Vec<String>, config: &BotConfig) {
    if let Some(webhook) = config.relay.webhook_id {
        require_id(errors, "relay.webhook_id", webhook.get());
    }
}

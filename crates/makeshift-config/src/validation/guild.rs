//! Validation for the `[guild]` section.

use std::collections::HashSet;

use crate::schema::BotConfig;

use super::helpers::require_id;

pub(crate) fn validate_guild(errors: &mut Vec<String>, config: &BotConfig) {
    let guild = &config.guild;
    let channels = [
        ("guild.lobby_channel_id", guild.lobby_channel_id.get()),
        ("guild.afk_channel_id", guild.afk_channel_id.get()),
        ("guild.voice_category_id", guild.voice_category_id.get()),
        ("guild.archive_channel_id", guild.archive_channel_id.get()),
    ];

    require_id(errors, "guild.id", guild.id.get());
    for (name, raw) in channels {
        require_id(errors, name, raw);
    }

    let mut seen = HashSet::new();
    for (name, raw) in channels {
        if raw != 0 && !seen.insert(raw) {
            errors.push(format!("{name} = {raw} is used for more than one role"));
        }
    }
}

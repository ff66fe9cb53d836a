//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Makeshift bot configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Every id under [guild] must be set before the bot will start.

[guild]
id = 0
lobby_channel_id = 0
afk_channel_id = 0
voice_category_id = 0
archive_channel_id = 0

[lifecycle]
# grace_period_secs = 30      # 1-3600
# voice_role_id = 0           # role held while connected to voice
# channel_names = ["Dojo", "Nerding Grounds"]

[relay]
# enabled = true
# webhook_id = 0              # shared relay webhook; per-channel webhooks when unset
# thread_auto_archive = "one_day"   # one_hour, one_day, three_days, one_week

[logging]
# level = "INFO"              # TRACE, DEBUG, INFO, WARNING, ERROR
# json = false
"##
    .to_string()
}

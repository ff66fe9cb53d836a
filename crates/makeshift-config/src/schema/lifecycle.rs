//! Voice channel lifecycle settings.

use makeshift_common::RoleId;
use serde::{Deserialize, Serialize};

/// Name used for spawned channels when `channel_names` is empty.
pub const DEFAULT_CHANNEL_NAME: &str = "Talk";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Seconds an empty channel lingers before deletion (valid range: 1-3600).
    pub grace_period_secs: u64,
    /// Pool of names picked at random for lobby-spawned channels.
    pub channel_names: Vec<String>,
    /// Role granted while a member is connected to voice. Disabled when unset.
    pub voice_role_id: Option<RoleId>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 30,
            channel_names: default_channel_names(),
            voice_role_id: None,
        }
    }
}

fn default_channel_names() -> Vec<String> {
    [
        "Akkad n' Chill",
        "The Nuthouse",
        "Nerding Grounds",
        "Do Emojis work here? 🤔",
        "Your ad here!",
        "I'm out of ideas...",
        "Fresh Memes!",
        "Midlife crisis",
        "asdf",
        "Very creative channel name",
        "Who even reads these?",
        "Not the Lobby",
        "Makeshift relay",
        "Dojo",
        "Stale Memes!",
        "Disappointments Inc.",
        "Boomers anonymous",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

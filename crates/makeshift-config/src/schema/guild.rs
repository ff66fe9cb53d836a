//! Server-level ids: which guild is managed and its special channels.

use makeshift_common::{ChannelId, GuildId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildConfig {
    /// The managed server. Events from any other guild are ignored.
    pub id: GuildId,
    /// Joining this voice channel spawns a new personal channel.
    pub lobby_channel_id: ChannelId,
    pub afk_channel_id: ChannelId,
    /// Category that lobby-spawned channels are created under.
    pub voice_category_id: ChannelId,
    /// Text channel whose threads archive voice-channel chat.
    pub archive_channel_id: ChannelId,
}

impl GuildConfig {
    /// Channels that are never auto-deleted.
    pub fn protected_channels(&self) -> [ChannelId; 2] {
        [self.lobby_channel_id, self.afk_channel_id]
    }

    pub fn is_protected(&self, channel: ChannelId) -> bool {
        self.protected_channels().contains(&channel)
    }
}

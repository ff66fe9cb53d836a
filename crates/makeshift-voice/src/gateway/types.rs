//! Platform objects returned by, and passed to, the [`Gateway`](super::Gateway).

use makeshift_common::{ChannelId, GuildId, MemberId, ThreadId, WebhookId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Voice,
    Text,
    Category,
    Thread,
}

/// Maximum number of members allowed in a voice channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLimit {
    #[default]
    Unbounded,
    Limited(u32),
}

impl UserLimit {
    /// Nobody may join. Used to close the join race right before deletion.
    pub const FROZEN: UserLimit = UserLimit::Limited(0);
}

/// Live snapshot of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub guild_id: GuildId,
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: Option<ChannelId>,
    /// Members currently connected (voice channels only).
    #[serde(default)]
    pub member_count: usize,
    #[serde(default)]
    pub user_limit: UserLimit,
}

impl Channel {
    pub fn is_empty(&self) -> bool {
        self.member_count == 0
    }
}

/// Permission bits granted to the member who requested a spawned channel.
pub mod permissions {
    pub const MANAGE_CHANNELS: u64 = 1 << 4;
    pub const CONNECT: u64 = 1 << 20;
    pub const MOVE_MEMBERS: u64 = 1 << 24;

    pub const CHANNEL_OWNER: u64 = MANAGE_CHANNELS | CONNECT | MOVE_MEMBERS;
}

/// Request to create a voice channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoiceChannel {
    pub guild_id: GuildId,
    pub name: String,
    pub parent_id: ChannelId,
    /// Member given owner permissions on the new channel.
    pub owner: Option<MemberId>,
    pub owner_allow: u64,
    /// Audit-log reason.
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id: ThreadId,
    pub parent_id: ChannelId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub id: WebhookId,
    /// Channel the webhook currently posts into.
    pub channel_id: ChannelId,
}

/// A message sent through a webhook under a borrowed identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookMessage {
    pub content: String,
    pub username: String,
    pub avatar_url: Option<String>,
    /// Post into this thread of the webhook's channel instead of the channel itself.
    pub thread_id: Option<ThreadId>,
}

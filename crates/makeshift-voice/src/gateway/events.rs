//! Narrow event payloads delivered by the gateway adapter.
//!
//! Only the fields the controllers read are modelled. Both events are
//! serde-tagged so an adapter can bridge them as JSON.

use makeshift_common::{ChannelId, GuildId, MemberId, MessageId, RoleId, WebhookId};
use serde::{Deserialize, Serialize};

use super::types::ChannelKind;

/// A member's voice connection at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceState {
    pub guild_id: GuildId,
    pub member_id: MemberId,
    pub channel_id: Option<ChannelId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: MemberId,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

impl MemberSnapshot {
    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }
}

/// Voice-state-update: the member's connection before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceStateChange {
    pub guild_id: GuildId,
    pub member: MemberSnapshot,
    pub old: VoiceState,
    pub new: VoiceState,
}

impl VoiceStateChange {
    /// Same channel before and after (mute, deafen, video toggles).
    pub fn is_same_channel(&self) -> bool {
        self.old.channel_id == self.new.channel_id
    }

    pub fn disconnected(&self) -> bool {
        self.new.channel_id.is_none()
    }
}

/// Where a message was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: ChannelId,
    pub kind: ChannelKind,
    /// Parent text channel for threads, category otherwise.
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: MemberId,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

/// Message-create event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedMessage {
    pub id: MessageId,
    pub guild_id: Option<GuildId>,
    pub channel: ChannelRef,
    pub author: Author,
    /// Set when a webhook (such as the relay itself) posted the message.
    #[serde(default)]
    pub webhook_id: Option<WebhookId>,
    pub content: String,
}

impl PostedMessage {
    /// Authored by a relay mechanism rather than a person.
    pub fn is_automated(&self) -> bool {
        self.webhook_id.is_some() || self.author.bot
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GatewayEvent {
    VoiceStateUpdate(VoiceStateChange),
    MessageCreate(PostedMessage),
}

impl GatewayEvent {
    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            GatewayEvent::VoiceStateUpdate(change) => Some(change.guild_id),
            GatewayEvent::MessageCreate(message) => message.guild_id,
        }
    }
}

//! The capability surface this crate consumes from the chat platform.
//!
//! An adapter owns the real-time connection and REST client; it feeds
//! [`GatewayEvent`]s to the [`Dispatcher`](crate::Dispatcher) and implements
//! [`Gateway`] for the controllers to act on the server.

mod events;
mod types;

use async_trait::async_trait;
use makeshift_common::{ChannelId, GatewayError, GuildId, MemberId, RoleId, WebhookId};
use makeshift_config::schema::ThreadAutoArchive;

pub use events::{
    Author, ChannelRef, GatewayEvent, MemberSnapshot, PostedMessage, VoiceState,
    VoiceStateChange,
};
pub use types::{
    permissions, Channel, ChannelKind, NewVoiceChannel, Thread, UserLimit, Webhook,
    WebhookMessage,
};

pub type GatewayResult<T> = Result<T, GatewayError>;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch live channel state. `Ok(None)` when the channel does not exist.
    async fn fetch_channel(&self, id: ChannelId) -> GatewayResult<Option<Channel>>;

    async fn create_voice_channel(&self, request: NewVoiceChannel) -> GatewayResult<Channel>;

    async fn move_member(
        &self,
        guild: GuildId,
        member: MemberId,
        channel: ChannelId,
    ) -> GatewayResult<()>;

    async fn set_channel_user_limit(&self, channel: ChannelId, limit: UserLimit)
        -> GatewayResult<()>;

    async fn delete_channel(&self, channel: ChannelId) -> GatewayResult<()>;

    /// Open a public thread in `channel`. Adapters pass
    /// [`ThreadAutoArchive::minutes`] as the platform's auto-archive duration.
    async fn create_thread(
        &self,
        channel: ChannelId,
        name: &str,
        auto_archive: ThreadAutoArchive,
    ) -> GatewayResult<Thread>;

    /// A webhook bound to `channel`, created on first use.
    async fn fetch_or_create_webhook(&self, channel: ChannelId) -> GatewayResult<Webhook>;

    async fn fetch_webhook(&self, id: WebhookId) -> GatewayResult<Option<Webhook>>;

    /// Re-point a webhook at another channel.
    async fn move_webhook(&self, webhook: &Webhook, channel: ChannelId) -> GatewayResult<Webhook>;

    async fn send_as_webhook(&self, webhook: &Webhook, message: WebhookMessage)
        -> GatewayResult<()>;

    /// The voice channel the member is connected to right now.
    async fn member_voice_channel(
        &self,
        guild: GuildId,
        member: MemberId,
    ) -> GatewayResult<Option<ChannelId>>;

    async fn add_member_role(&self, guild: GuildId, member: MemberId, role: RoleId)
        -> GatewayResult<()>;

    async fn remove_member_role(
        &self,
        guild: GuildId,
        member: MemberId,
        role: RoleId,
    ) -> GatewayResult<()>;
}

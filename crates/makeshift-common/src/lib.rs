pub mod errors;
pub mod id;

pub use errors::{ConfigError, GatewayError, MakeshiftError};
pub use id::{
    new_correlation_id, ChannelId, GuildId, MemberId, MessageId, RoleId, ThreadId, WebhookId,
};

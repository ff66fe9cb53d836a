use serde::{Deserialize, Serialize};
use std::fmt;

/// Short hex id used to correlate the log lines of one handled event.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u64 {
                self.0
            }

            /// Zero is never a valid platform id; config uses it as "unset".
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

snowflake_id!(
    /// A server (guild).
    GuildId
);
snowflake_id!(
    /// Any channel: voice, text, category.
    ChannelId
);
snowflake_id!(
    /// A thread inside a text channel.
    ThreadId
);
snowflake_id!(MemberId);
snowflake_id!(RoleId);
snowflake_id!(WebhookId);
snowflake_id!(MessageId);

impl From<ThreadId> for ChannelId {
    /// Threads are channels on the platform and share the id space.
    fn from(thread: ThreadId) -> Self {
        ChannelId(thread.0)
    }
}

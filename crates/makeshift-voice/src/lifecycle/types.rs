//! Types for the lifecycle controller.

use chrono::{DateTime, Utc};
use makeshift_common::ChannelId;

/// A voice channel this process created from the lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedChannel {
    pub id: ChannelId,
    pub parent_id: ChannelId,
    pub created_at: DateTime<Utc>,
}

/// How a deferred cleanup cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted,
    /// The channel was already gone.
    Vanished,
    /// A newer cycle for the same channel took over.
    Superseded,
    /// Someone joined before the channel could be deleted.
    Reoccupied,
    /// A gateway call failed; the channel is left for a later cycle.
    Failed,
}

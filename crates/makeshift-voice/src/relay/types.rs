//! Types for the relay router.

use chrono::{DateTime, SecondsFormat, Utc};
use makeshift_common::{ChannelId, ThreadId};
use makeshift_config::schema::GuildConfig;

use crate::gateway::{ChannelKind, ChannelRef};

/// Which way a posted message travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Posted in a voice channel's text chat; copy into its archive thread.
    ToArchive { voice: ChannelId },
    /// Posted in an archive thread; copy back into the linked voice channel.
    FromThread { thread: ThreadId },
    /// Posted in the archive channel itself; copy into the poster's voice channel.
    FromArchiveRoot,
    Unrelated,
}

impl Route {
    pub fn classify(guild: &GuildConfig, channel: &ChannelRef) -> Self {
        let archive = guild.archive_channel_id;
        match channel.kind {
            ChannelKind::Voice => Route::ToArchive { voice: channel.id },
            ChannelKind::Thread if channel.parent_id == Some(archive) => Route::FromThread {
                thread: ThreadId(channel.id.get()),
            },
            _ if channel.id == archive => Route::FromArchiveRoot,
            _ => Route::Unrelated,
        }
    }
}

/// How handling one posted message ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Not a message the relay handles.
    Ignored,
    /// Relayable, but there was nowhere to deliver it.
    Dropped,
    Relayed,
    Failed,
}

/// `Archive of <channel> @<ISO-8601 UTC with millis>`
pub fn archive_thread_name(voice: ChannelId, at: DateTime<Utc>) -> String {
    format!(
        "Archive of {voice} @{}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

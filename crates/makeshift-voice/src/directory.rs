//! Channel directory: the voice channel ↔ archive thread links.
//!
//! Each voice channel maps to at most one thread and each thread to at
//! most one voice channel. Linking either side again replaces its old
//! partner so the two maps never disagree.

use std::collections::HashMap;

use makeshift_common::{ChannelId, ThreadId};

#[derive(Debug, Default)]
pub struct ChannelDirectory {
    threads_by_channel: HashMap<ChannelId, ThreadId>,
    channels_by_thread: HashMap<ThreadId, ChannelId>,
}

impl ChannelDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a voice channel to its archive thread.
    ///
    /// Returns the thread previously linked to `channel`, if it was a
    /// different one.
    pub fn link(&mut self, channel: ChannelId, thread: ThreadId) -> Option<ThreadId> {
        if let Some(old_channel) = self.channels_by_thread.insert(thread, channel) {
            if old_channel != channel {
                self.threads_by_channel.remove(&old_channel);
            }
        }

        let previous = self.threads_by_channel.insert(channel, thread);
        match previous {
            Some(old_thread) if old_thread != thread => {
                self.channels_by_thread.remove(&old_thread);
                Some(old_thread)
            }
            _ => None,
        }
    }

    pub fn thread_for(&self, channel: ChannelId) -> Option<ThreadId> {
        self.threads_by_channel.get(&channel).copied()
    }

    pub fn channel_for(&self, thread: ThreadId) -> Option<ChannelId> {
        self.channels_by_thread.get(&thread).copied()
    }

    /// Forget a thread (e.g. it was deleted). Returns its voice channel.
    pub fn unlink_thread(&mut self, thread: ThreadId) -> Option<ChannelId> {
        let channel = self.channels_by_thread.remove(&thread)?;
        self.threads_by_channel.remove(&channel);
        Some(channel)
    }

    pub fn len(&self) -> usize {
        self.threads_by_channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads_by_channel.is_empty()
    }
}

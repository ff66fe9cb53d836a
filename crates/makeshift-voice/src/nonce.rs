//! Nonce ledger for deferred channel deletion.
//!
//! Every time a channel becomes a deletion candidate its counter is bumped
//! and the new value is captured by the scheduled cleanup. The cleanup may
//! only delete if the counter still holds that value when it wakes up.
//! Entries are never removed, so a value is never handed out twice.

use std::collections::HashMap;

use makeshift_common::ChannelId;

#[derive(Debug, Default)]
pub struct NonceLedger {
    counters: HashMap<ChannelId, u64>,
}

impl NonceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the channel's counter and return the new value.
    pub fn bump(&mut self, channel: ChannelId) -> u64 {
        let counter = self.counters.entry(channel).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Current value; zero if the channel was never a candidate.
    pub fn current(&self, channel: ChannelId) -> u64 {
        self.counters.get(&channel).copied().unwrap_or(0)
    }

    /// Whether a cleanup holding `nonce` is still the latest for `channel`.
    pub fn is_current(&self, channel: ChannelId, nonce: u64) -> bool {
        self.current(channel) == nonce
    }
}

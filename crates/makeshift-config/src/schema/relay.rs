//! Voice-channel ↔ archive-thread relay settings.

use makeshift_common::WebhookId;
use serde::{Deserialize, Serialize};

/// How long an idle archive thread stays open before the platform archives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadAutoArchive {
    OneHour,
    #[default]
    OneDay,
    ThreeDays,
    OneWeek,
}

impl ThreadAutoArchive {
    /// Duration in minutes, the unit the platform's thread-creation call
    /// takes. Adapters implementing `Gateway::create_thread` send this.
    pub fn minutes(self) -> u32 {
        match self {
            ThreadAutoArchive::OneHour => 60,
            ThreadAutoArchive::OneDay => 1440,
            ThreadAutoArchive::ThreeDays => 4320,
            ThreadAutoArchive::OneWeek => 10080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub enabled: bool,
    /// Shared relay webhook, re-pointed at whichever channel it delivers to.
    /// When unset, one webhook per destination channel is used.
    pub webhook_id: Option<WebhookId>,
    pub thread_auto_archive: ThreadAutoArchive,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webhook_id: None,
            thread_auto_archive: ThreadAutoArchive::OneDay,
        }
    }
}

//! Impersonation identity attached to relayed messages.

use crate::gateway::{Author, WebhookMessage};
use makeshift_common::ThreadId;

/// Webhook usernames are limited to this many characters.
pub const MAX_WEBHOOK_USERNAME_LEN: usize = 80;

const FALLBACK_NAME: &str = "Unknown member";

/// Display name and avatar a relayed copy is posted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Impersonation {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl Impersonation {
    pub fn of(author: &Author) -> Self {
        let trimmed = author.display_name.trim();
        let display_name = if trimmed.is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            trimmed.chars().take(MAX_WEBHOOK_USERNAME_LEN).collect()
        };
        Self {
            display_name,
            avatar_url: author.avatar_url.clone(),
        }
    }

    /// Build the webhook payload carrying `content` under this identity.
    pub fn message(&self, content: &str, thread_id: Option<ThreadId>) -> WebhookMessage {
        WebhookMessage {
            content: content.to_string(),
            username: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
            thread_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use makeshift_common::MemberId;

    fn author(name: &str) -> Author {
        Author {
            id: MemberId(5),
            display_name: name.to_string(),
            avatar_url: Some("https://cdn.example/a.png".into()),
            bot: false,
        }
    }

    #[test]
    fn copies_name_and_avatar() {
        let who = Impersonation::of(&author("Mira"));
        assert_eq!(who.display_name, "Mira");
        assert_eq!(who.avatar_url.as_deref(), Some("https://cdn.example/a.png"));
    }

    #[test]
    fn truncates_long_names() {
        let who = Impersonation::of(&author(&"é".repeat(120)));
        assert_eq!(who.display_name.chars().count(), MAX_WEBHOOK_USERNAME_LEN);
    }

    #[test]
    fn blank_name_falls_back() {
        let who = Impersonation::of(&author("   "));
        assert_eq!(who.display_name, FALLBACK_NAME);
    }

    #[test]
    fn message_targets_thread() {
        let who = Impersonation::of(&author("Mira"));
        let msg = who.message("hello", Some(ThreadId(9)));
        assert_eq!(msg.content, "hello");
        assert_eq!(msg.username, "Mira");
        assert_eq!(msg.thread_id, Some(ThreadId(9)));
    }
}

//! Relay router — direction, lazy archive threads and webhook delivery.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use makeshift_common::{ChannelId, ConfigError, MakeshiftError, ThreadId, WebhookId};
use makeshift_config::schema::BotConfig;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{debug, info, warn};

use crate::directory::ChannelDirectory;
use crate::gateway::{Channel, ChannelKind, Gateway, PostedMessage, Webhook, WebhookMessage};
use crate::identity::Impersonation;

use super::types::{archive_thread_name, RelayOutcome, Route};

type PendingThreads = HashMap<ChannelId, Arc<OnceCell<ThreadId>>>;

/// Routes posted messages between voice channels and archive threads.
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct RelayRouter {
    config: Arc<BotConfig>,
    gateway: Arc<dyn Gateway>,
    directory: Arc<RwLock<ChannelDirectory>>,
    /// Thread creations in flight, one cell per voice channel.
    pending: Arc<Mutex<PendingThreads>>,
    /// Per-channel webhooks, used when no shared webhook is configured.
    webhooks: Arc<RwLock<HashMap<ChannelId, Webhook>>>,
    /// Held from re-pointing the shared webhook until the send completes.
    shared_webhook: Arc<Mutex<()>>,
}

impl RelayRouter {
    pub fn new(config: Arc<BotConfig>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            config,
            gateway,
            directory: Arc::new(RwLock::new(ChannelDirectory::new())),
            pending: Arc::new(Mutex::new(HashMap::new())),
            webhooks: Arc::new(RwLock::new(HashMap::new())),
            shared_webhook: Arc::new(Mutex::new(())),
        }
    }

    /// Handle a message-create event.
    pub async fn on_message_posted(&self, message: &PostedMessage) -> RelayOutcome {
        if !self.should_handle(message) {
            return RelayOutcome::Ignored;
        }

        let route = Route::classify(&self.config.guild, &message.channel);
        let result = match route {
            Route::ToArchive { voice } => self.relay_to_archive(voice, message).await,
            Route::FromThread { thread } => self.relay_from_thread(thread, message).await,
            Route::FromArchiveRoot => self.relay_from_archive_root(message).await,
            Route::Unrelated => return RelayOutcome::Ignored,
        };

        match result {
            Ok(outcome) => {
                debug!(message = %message.id, ?route, ?outcome, "Message handled");
                outcome
            }
            Err(e) => {
                warn!(message = %message.id, ?route, error = %e, "Relay failed");
                RelayOutcome::Failed
            }
        }
    }

    fn should_handle(&self, message: &PostedMessage) -> bool {
        self.config.relay.enabled
            && message.guild_id == Some(self.config.guild.id)
            && !message.is_automated()
            && !message.content.trim().is_empty()
    }

    // -----------------------------------------------------------------------
    // Directions
    // -----------------------------------------------------------------------

    async fn relay_to_archive(
        &self,
        voice: ChannelId,
        message: &PostedMessage,
    ) -> Result<RelayOutcome, MakeshiftError> {
        let thread = self.archive_thread_for(voice).await?;
        let payload = Impersonation::of(&message.author).message(&message.content, Some(thread));

        match self
            .deliver(self.config.guild.archive_channel_id, payload)
            .await
        {
            Ok(()) => Ok(RelayOutcome::Relayed),
            Err(MakeshiftError::Gateway(e)) if e.is_not_found() => {
                self.forget_thread_if_gone(thread).await;
                Err(e.into())
            }
            Err(e) => Err(e),
        }
    }

    async fn relay_from_thread(
        &self,
        thread: ThreadId,
        message: &PostedMessage,
    ) -> Result<RelayOutcome, MakeshiftError> {
        let Some(voice) = self.directory.read().await.channel_for(thread) else {
            debug!(thread = %thread, "Thread is not linked to a voice channel");
            return Ok(RelayOutcome::Dropped);
        };

        let current = self
            .gateway
            .member_voice_channel(self.config.guild.id, message.author.id)
            .await?;
        if current != Some(voice) {
            debug!(
                member = %message.author.id,
                channel = %voice,
                "Poster is not in the linked voice channel"
            );
            return Ok(RelayOutcome::Dropped);
        }

        let payload = Impersonation::of(&message.author).message(&message.content, None);
        self.deliver(voice, payload).await?;
        Ok(RelayOutcome::Relayed)
    }

    async fn relay_from_archive_root(
        &self,
        message: &PostedMessage,
    ) -> Result<RelayOutcome, MakeshiftError> {
        let Some(voice) = self
            .gateway
            .member_voice_channel(self.config.guild.id, message.author.id)
            .await?
        else {
            debug!(member = %message.author.id, "Poster is not in a voice channel");
            return Ok(RelayOutcome::Dropped);
        };

        let payload = Impersonation::of(&message.author).message(&message.content, None);
        self.deliver(voice, payload).await?;
        Ok(RelayOutcome::Relayed)
    }

    // -----------------------------------------------------------------------
    // Archive threads
    // -----------------------------------------------------------------------

    /// The archive thread linked to `voice`, creating it on first use.
    ///
    /// Concurrent callers for the same voice channel share one creation.
    async fn archive_thread_for(&self, voice: ChannelId) -> Result<ThreadId, MakeshiftError> {
        if let Some(thread) = self.directory.read().await.thread_for(voice) {
            return Ok(thread);
        }

        let cell = {
            let mut pending = self.pending.lock().await;
            // A creation may have finished while we waited for the lock.
            if let Some(thread) = self.directory.read().await.thread_for(voice) {
                return Ok(thread);
            }
            pending.entry(voice).or_default().clone()
        };

        let result = cell
            .get_or_try_init(|| self.create_archive_thread(voice))
            .await
            .copied();

        let mut pending = self.pending.lock().await;
        if pending
            .get(&voice)
            .is_some_and(|current| Arc::ptr_eq(current, &cell))
        {
            pending.remove(&voice);
        }
        result
    }

    async fn create_archive_thread(&self, voice: ChannelId) -> Result<ThreadId, MakeshiftError> {
        let archive = self.fetch_archive_channel().await?;
        let name = archive_thread_name(voice, Utc::now());
        let thread = self
            .gateway
            .create_thread(archive.id, &name, self.config.relay.thread_auto_archive)
            .await?;

        // Linked before the pending cell is released so later callers find it.
        if let Some(stale) = self.directory.write().await.link(voice, thread.id) {
            debug!(channel = %voice, thread = %stale, "Replaced stale archive thread");
        }
        info!(channel = %voice, thread = %thread.id, name = %thread.name, "Archive thread created");
        Ok(thread.id)
    }

    async fn fetch_archive_channel(&self) -> Result<Channel, MakeshiftError> {
        let id = self.config.guild.archive_channel_id;
        match self.gateway.fetch_channel(id).await? {
            Some(channel) if channel.kind == ChannelKind::Text => Ok(channel),
            Some(channel) => Err(ConfigError::Misconfigured {
                what: "archive channel",
                reason: format!("channel {id} is a {:?} channel", channel.kind),
            }
            .into()),
            None => Err(ConfigError::Misconfigured {
                what: "archive channel",
                reason: format!("channel {id} does not exist"),
            }
            .into()),
        }
    }

    /// Drop the link to a thread that no longer exists so the next message
    /// starts a fresh one.
    async fn forget_thread_if_gone(&self, thread: ThreadId) {
        match self.gateway.fetch_channel(thread.into()).await {
            Ok(None) => {
                if let Some(voice) = self.directory.write().await.unlink_thread(thread) {
                    info!(channel = %voice, thread = %thread, "Archive thread gone, link dropped");
                }
            }
            Ok(Some(_)) => {}
            Err(e) => warn!(thread = %thread, error = %e, "Failed to check archive thread"),
        }
    }

    // -----------------------------------------------------------------------
    // Delivery
    // -----------------------------------------------------------------------

    async fn deliver(
        &self,
        channel: ChannelId,
        message: WebhookMessage,
    ) -> Result<(), MakeshiftError> {
        match self.config.relay.webhook_id {
            Some(id) => self.deliver_shared(id, channel, message).await,
            None => self.deliver_per_channel(channel, message).await,
        }
    }

    async fn deliver_shared(
        &self,
        id: WebhookId,
        channel: ChannelId,
        message: WebhookMessage,
    ) -> Result<(), MakeshiftError> {
        let _guard = self.shared_webhook.lock().await;

        let Some(mut webhook) = self.gateway.fetch_webhook(id).await? else {
            return Err(ConfigError::Misconfigured {
                what: "relay webhook",
                reason: format!("webhook {id} does not exist"),
            }
            .into());
        };
        if webhook.channel_id != channel {
            webhook = self.gateway.move_webhook(&webhook, channel).await?;
            debug!(webhook = %id, channel = %channel, "Re-pointed relay webhook");
        }

        self.gateway.send_as_webhook(&webhook, message).await?;
        Ok(())
    }

    async fn deliver_per_channel(
        &self,
        channel: ChannelId,
        message: WebhookMessage,
    ) -> Result<(), MakeshiftError> {
        let cached = self.webhooks.read().await.get(&channel).cloned();
        let webhook = match cached {
            Some(webhook) => webhook,
            None => {
                let webhook = self.gateway.fetch_or_create_webhook(channel).await?;
                self.webhooks
                    .write()
                    .await
                    .insert(channel, webhook.clone());
                webhook
            }
        };

        match self.gateway.send_as_webhook(&webhook, message).await {
            Ok(()) => Ok(()),
            Err(e) => {
                if e.is_not_found() {
                    self.webhooks.write().await.remove(&channel);
                }
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub async fn linked_thread(&self, voice: ChannelId) -> Option<ThreadId> {
        self.directory.read().await.thread_for(voice)
    }

    pub async fn linked_channel(&self, thread: ThreadId) -> Option<ChannelId> {
        self.directory.read().await.channel_for(thread)
    }
}

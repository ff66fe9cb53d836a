//! Lifecycle controller — lobby spawning, role sync and deferred deletion.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use makeshift_common::{ChannelId, ConfigError, GatewayError, MakeshiftError};
use makeshift_config::schema::BotConfig;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Instrument};

use crate::gateway::{
    permissions, Channel, ChannelKind, Gateway, NewVoiceChannel, UserLimit, VoiceStateChange,
};
use crate::nonce::NonceLedger;

use super::naming::pick_channel_name;
use super::types::{CleanupOutcome, TrackedChannel};

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Reacts to voice-state transitions. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct LifecycleController {
    config: Arc<BotConfig>,
    gateway: Arc<dyn Gateway>,
    ledger: Arc<RwLock<NonceLedger>>,
    /// Channels spawned from the lobby that have not been deleted yet.
    tracked: Arc<RwLock<HashMap<ChannelId, TrackedChannel>>>,
}

impl LifecycleController {
    pub fn new(config: Arc<BotConfig>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            config,
            gateway,
            ledger: Arc::new(RwLock::new(NonceLedger::new())),
            tracked: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn grace_period(&self) -> Duration {
        Duration::from_secs(self.config.lifecycle.grace_period_secs)
    }

    /// Handle a voice-state-update.
    ///
    /// Returns the cleanup cycles this event started; dropping the handles
    /// does not cancel them.
    pub async fn on_voice_state_change(
        &self,
        change: &VoiceStateChange,
    ) -> Vec<JoinHandle<CleanupOutcome>> {
        let guild = &self.config.guild;
        if change.guild_id != guild.id || change.is_same_channel() {
            return Vec::new();
        }

        self.sync_voice_role(change).await;

        let mut cycles = Vec::new();
        if change.new.channel_id == Some(guild.lobby_channel_id) {
            if let Some(orphan) = self.spawn_personal_channel(change).await {
                cycles.extend(self.schedule_cleanup(Some(orphan)).await);
            }
        }

        cycles.extend(self.schedule_cleanup(change.old.channel_id).await);
        cycles
    }

    /// Create a channel under the voice category and move the member in.
    ///
    /// Returns the new channel's id if it was created but the move failed,
    /// so the caller can queue the empty orphan for cleanup.
    async fn spawn_personal_channel(&self, change: &VoiceStateChange) -> Option<ChannelId> {
        let member = &change.member;
        let channel = match self.create_personal_channel(change).await {
            Ok(channel) => channel,
            Err(e) => {
                warn!(member = %member.id, error = %e, "Failed to create voice channel");
                return None;
            }
        };

        match self
            .gateway
            .move_member(change.guild_id, member.id, channel.id)
            .await
        {
            Ok(()) => {
                info!(
                    member = %member.id,
                    channel = %channel.id,
                    name = %channel.name,
                    "Moved member into new voice channel"
                );
                None
            }
            Err(e) => {
                warn!(
                    member = %member.id,
                    channel = %channel.id,
                    error = %e,
                    "Failed to move member, leaving channel for cleanup"
                );
                Some(channel.id)
            }
        }
    }

    async fn create_personal_channel(
        &self,
        change: &VoiceStateChange,
    ) -> Result<Channel, MakeshiftError> {
        let category = self.fetch_category().await?;
        let member = &change.member;

        let request = NewVoiceChannel {
            guild_id: change.guild_id,
            name: pick_channel_name(&self.config.lifecycle.channel_names),
            parent_id: category.id,
            owner: Some(member.id),
            owner_allow: permissions::CHANNEL_OWNER,
            reason: Some(format!(
                "Requested by {} ({})",
                member.id, member.display_name
            )),
        };
        let channel = self.gateway.create_voice_channel(request).await?;

        self.tracked.write().await.insert(
            channel.id,
            TrackedChannel {
                id: channel.id,
                parent_id: category.id,
                created_at: Utc::now(),
            },
        );
        debug!(channel = %channel.id, name = %channel.name, "Voice channel created");
        Ok(channel)
    }

    async fn fetch_category(&self) -> Result<Channel, MakeshiftError> {
        let id = self.config.guild.voice_category_id;
        match self.gateway.fetch_channel(id).await? {
            Some(channel) if channel.kind == ChannelKind::Category => Ok(channel),
            Some(channel) => Err(ConfigError::Misconfigured {
                what: "voice category",
                reason: format!("channel {id} is a {:?} channel", channel.kind),
            }
            .into()),
            None => Err(ConfigError::Misconfigured {
                what: "voice category",
                reason: format!("channel {id} does not exist"),
            }
            .into()),
        }
    }

    /// Grant the voice role on connect and take it away on disconnect.
    async fn sync_voice_role(&self, change: &VoiceStateChange) {
        let Some(role) = self.config.lifecycle.voice_role_id else {
            return;
        };
        let member = &change.member;

        let (result, action) = if change.new.channel_id.is_some() && !member.has_role(role) {
            (
                self.gateway
                    .add_member_role(change.guild_id, member.id, role)
                    .await,
                "granted",
            )
        } else if change.disconnected() && member.has_role(role) {
            (
                self.gateway
                    .remove_member_role(change.guild_id, member.id, role)
                    .await,
                "revoked",
            )
        } else {
            return;
        };

        match result {
            Ok(()) => debug!(member = %member.id, role = %role, action, "Voice role updated"),
            Err(e) => warn!(member = %member.id, role = %role, error = %e, "Voice role update failed"),
        }
    }

    // -----------------------------------------------------------------------
    // Deferred deletion
    // -----------------------------------------------------------------------

    /// Queue an empty, unprotected channel for deletion after the grace period.
    ///
    /// Returns `None` when the channel is not a candidate. Otherwise the
    /// channel's nonce has been bumped and the returned task resolves once
    /// the cycle has deleted the channel or given up.
    pub async fn schedule_cleanup(
        &self,
        channel: Option<ChannelId>,
    ) -> Option<JoinHandle<CleanupOutcome>> {
        let channel_id = channel?;
        if self.config.guild.is_protected(channel_id) {
            return None;
        }

        let channel = match self.gateway.fetch_channel(channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                debug!(channel = %channel_id, "Previous channel already gone");
                self.untrack(channel_id).await;
                return None;
            }
            Err(e) => {
                warn!(channel = %channel_id, error = %e, "Failed to fetch channel for cleanup");
                return None;
            }
        };
        if channel.kind != ChannelKind::Voice || !channel.is_empty() {
            return None;
        }

        let nonce = self.ledger.write().await.bump(channel_id);
        debug!(channel = %channel_id, nonce, "Channel queued for deletion");

        let this = self.clone();
        let grace = self.grace_period();
        let task = async move {
            tokio::time::sleep(grace).await;
            match this.run_cleanup(channel_id, nonce).await {
                Ok(CleanupOutcome::Deleted) => {
                    this.untrack(channel_id).await;
                    info!(channel = %channel_id, nonce, "Deleted empty voice channel");
                    CleanupOutcome::Deleted
                }
                Ok(CleanupOutcome::Vanished) => {
                    this.untrack(channel_id).await;
                    debug!(channel = %channel_id, nonce, "Channel vanished before cleanup");
                    CleanupOutcome::Vanished
                }
                Ok(outcome) => {
                    debug!(channel = %channel_id, nonce, ?outcome, "Cleanup cycle stopped");
                    outcome
                }
                Err(e) => {
                    warn!(channel = %channel_id, nonce, error = %e, "Cleanup cycle failed");
                    CleanupOutcome::Failed
                }
            }
        };
        Some(tokio::spawn(task.in_current_span()))
    }

    async fn run_cleanup(
        &self,
        channel_id: ChannelId,
        nonce: u64,
    ) -> Result<CleanupOutcome, GatewayError> {
        let Some(channel) = self.gateway.fetch_channel(channel_id).await? else {
            return Ok(CleanupOutcome::Vanished);
        };
        if !channel.is_empty() {
            return Ok(CleanupOutcome::Reoccupied);
        }
        if !self.ledger.read().await.is_current(channel_id, nonce) {
            return Ok(CleanupOutcome::Superseded);
        }

        // A frozen limit can only be left over from an interrupted cycle.
        let original_limit = match channel.user_limit {
            UserLimit::FROZEN => UserLimit::Unbounded,
            limit => limit,
        };

        match self
            .gateway
            .set_channel_user_limit(channel_id, UserLimit::FROZEN)
            .await
        {
            Ok(()) => {}
            Err(e) if e.is_not_found() => return Ok(CleanupOutcome::Vanished),
            Err(e) => return Err(e),
        }

        let result = self.delete_if_still_empty(channel_id, original_limit).await;
        if result.is_err() {
            // Never leave a live channel frozen.
            if let Err(e) = self
                .gateway
                .set_channel_user_limit(channel_id, original_limit)
                .await
            {
                warn!(channel = %channel_id, error = %e, "Failed to unfreeze channel");
            }
        }
        result
    }

    /// Re-check occupancy under freeze, then delete or unfreeze.
    async fn delete_if_still_empty(
        &self,
        channel_id: ChannelId,
        original_limit: UserLimit,
    ) -> Result<CleanupOutcome, GatewayError> {
        match self.gateway.fetch_channel(channel_id).await? {
            None => return Ok(CleanupOutcome::Vanished),
            Some(channel) if !channel.is_empty() => {
                self.gateway
                    .set_channel_user_limit(channel_id, original_limit)
                    .await?;
                return Ok(CleanupOutcome::Reoccupied);
            }
            Some(_) => {}
        }

        match self.gateway.delete_channel(channel_id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => return Ok(CleanupOutcome::Vanished),
            Err(e) => return Err(e),
        }
        Ok(CleanupOutcome::Deleted)
    }

    /// Forget a spawned channel once it no longer exists.
    async fn untrack(&self, channel_id: ChannelId) {
        if self.tracked.write().await.remove(&channel_id).is_some() {
            debug!(channel = %channel_id, "Stopped tracking channel");
        }
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Latest deletion nonce handed out for a channel.
    pub async fn current_nonce(&self, channel: ChannelId) -> u64 {
        self.ledger.read().await.current(channel)
    }

    /// Channels spawned from the lobby that still exist as far as we know.
    pub async fn tracked_channels(&self) -> Vec<TrackedChannel> {
        let mut channels: Vec<TrackedChannel> =
            self.tracked.read().await.values().cloned().collect();
        channels.sort_by_key(|c| c.created_at);
        channels
    }
}

//! In-memory [`Gateway`] and fixtures shared by the controller tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use makeshift_common::{
    ChannelId, GatewayError, GuildId, MemberId, MessageId, RoleId, ThreadId, WebhookId,
};
use makeshift_config::schema::{BotConfig, ThreadAutoArchive};

use crate::gateway::{
    Author, Channel, ChannelKind, ChannelRef, Gateway, GatewayResult, MemberSnapshot,
    NewVoiceChannel, PostedMessage, Thread, UserLimit, VoiceState, VoiceStateChange, Webhook,
    WebhookMessage,
};

pub(crate) const GUILD: GuildId = GuildId(1);
pub(crate) const LOBBY: ChannelId = ChannelId(10);
pub(crate) const AFK: ChannelId = ChannelId(11);
pub(crate) const CATEGORY: ChannelId = ChannelId(12);
pub(crate) const ARCHIVE: ChannelId = ChannelId(13);

pub(crate) fn test_config() -> BotConfig {
    let mut config = BotConfig::default();
    config.guild.id = GUILD;
    config.guild.lobby_channel_id = LOBBY;
    config.guild.afk_channel_id = AFK;
    config.guild.voice_category_id = CATEGORY;
    config.guild.archive_channel_id = ARCHIVE;
    config
}

/// A webhook delivery as the fake saw it.
#[derive(Debug, Clone)]
pub(crate) struct Delivery {
    pub webhook: WebhookId,
    /// Channel the webhook pointed at when the message was sent.
    pub channel: ChannelId,
    pub message: WebhookMessage,
}

#[derive(Default)]
pub(crate) struct FakeState {
    pub channels: HashMap<ChannelId, Channel>,
    pub voice: HashMap<MemberId, ChannelId>,
    pub roles: HashMap<MemberId, HashSet<RoleId>>,
    pub threads: Vec<Thread>,
    pub webhooks: HashMap<WebhookId, Webhook>,
    pub deliveries: Vec<Delivery>,
    pub created: Vec<NewVoiceChannel>,
    pub deleted: Vec<ChannelId>,
    pub limits: Vec<(ChannelId, UserLimit)>,
    pub moves: Vec<(MemberId, ChannelId)>,
    /// Operation names that fail with an HTTP 500.
    pub failing: HashSet<&'static str>,
    /// Member that slips into a channel the moment it is frozen.
    pub join_on_freeze: Option<MemberId>,
    /// Delete the channel right after it is frozen.
    pub vanish_on_freeze: bool,
    /// Delete this channel just before the named operation runs.
    pub vanish_before: Option<(&'static str, ChannelId)>,
    next_id: u64,
}

impl FakeState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    fn check(&self, op: &'static str) -> GatewayResult<()> {
        if self.failing.contains(op) {
            return Err(GatewayError::Http {
                status: 500,
                message: format!("{op} failed"),
            });
        }
        Ok(())
    }

    fn remove(&mut self, id: ChannelId) {
        self.channels.remove(&id);
        self.voice.retain(|_, c| *c != id);
    }

    fn vanish_hook(&mut self, op: &'static str) {
        if let Some((hooked, id)) = self.vanish_before {
            if hooked == op {
                self.vanish_before = None;
                self.remove(id);
            }
        }
    }

    fn occupancy(&self, channel: ChannelId) -> usize {
        self.voice.values().filter(|c| **c == channel).count()
    }

    pub fn deliveries_to(&self, channel: ChannelId) -> Vec<&Delivery> {
        self.deliveries
            .iter()
            .filter(|d| d.channel == channel)
            .collect()
    }
}

#[derive(Default)]
pub(crate) struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    /// A server with the lobby, AFK, category and archive channels in place.
    pub fn new() -> Arc<Self> {
        let fake = Self::default();
        fake.add_channel(CATEGORY, ChannelKind::Category, None);
        fake.add_channel(LOBBY, ChannelKind::Voice, Some(CATEGORY));
        fake.add_channel(AFK, ChannelKind::Voice, None);
        fake.add_channel(ARCHIVE, ChannelKind::Text, None);
        Arc::new(fake)
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn add_channel(&self, id: ChannelId, kind: ChannelKind, parent_id: Option<ChannelId>) {
        self.state().channels.insert(
            id,
            Channel {
                id,
                guild_id: GUILD,
                name: format!("channel-{id}"),
                kind,
                parent_id,
                member_count: 0,
                user_limit: UserLimit::Unbounded,
            },
        );
    }

    pub fn add_voice_channel(&self, id: ChannelId) {
        self.add_channel(id, ChannelKind::Voice, Some(CATEGORY));
    }

    pub fn join(&self, member: MemberId, channel: ChannelId) {
        self.state().voice.insert(member, channel);
    }

    pub fn leave(&self, member: MemberId) {
        self.state().voice.remove(&member);
    }

    /// Delete a channel behind the bot's back.
    pub fn remove_channel(&self, id: ChannelId) {
        self.state().remove(id);
    }

    pub fn fail(&self, op: &'static str) {
        self.state().failing.insert(op);
    }

    pub fn heal(&self, op: &'static str) {
        self.state().failing.remove(op);
    }

    pub fn exists(&self, id: ChannelId) -> bool {
        self.state().channels.contains_key(&id)
    }

    pub fn user_limit(&self, id: ChannelId) -> Option<UserLimit> {
        self.state().channels.get(&id).map(|c| c.user_limit)
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn fetch_channel(&self, id: ChannelId) -> GatewayResult<Option<Channel>> {
        tokio::task::yield_now().await;
        let state = self.state();
        state.check("fetch_channel")?;
        Ok(state.channels.get(&id).cloned().map(|mut channel| {
            channel.member_count = state.occupancy(id);
            channel
        }))
    }

    async fn create_voice_channel(&self, request: NewVoiceChannel) -> GatewayResult<Channel> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("create_voice_channel")?;
        let id = ChannelId(state.next_id());
        let channel = Channel {
            id,
            guild_id: request.guild_id,
            name: request.name.clone(),
            kind: ChannelKind::Voice,
            parent_id: Some(request.parent_id),
            member_count: 0,
            user_limit: UserLimit::Unbounded,
        };
        state.channels.insert(id, channel.clone());
        state.created.push(request);
        Ok(channel)
    }

    async fn move_member(
        &self,
        _guild: GuildId,
        member: MemberId,
        channel: ChannelId,
    ) -> GatewayResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("move_member")?;
        if !state.channels.contains_key(&channel) {
            return Err(GatewayError::NotFound(format!("channel {channel}")));
        }
        state.voice.insert(member, channel);
        state.moves.push((member, channel));
        Ok(())
    }

    async fn set_channel_user_limit(
        &self,
        channel: ChannelId,
        limit: UserLimit,
    ) -> GatewayResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("set_channel_user_limit")?;
        state.vanish_hook("set_channel_user_limit");
        let Some(entry) = state.channels.get_mut(&channel) else {
            return Err(GatewayError::NotFound(format!("channel {channel}")));
        };
        entry.user_limit = limit;
        state.limits.push((channel, limit));
        if limit == UserLimit::FROZEN {
            if let Some(member) = state.join_on_freeze.take() {
                state.voice.insert(member, channel);
            }
            if std::mem::take(&mut state.vanish_on_freeze) {
                state.remove(channel);
            }
        }
        Ok(())
    }

    async fn delete_channel(&self, channel: ChannelId) -> GatewayResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("delete_channel")?;
        state.vanish_hook("delete_channel");
        if state.channels.remove(&channel).is_none() {
            return Err(GatewayError::NotFound(format!("channel {channel}")));
        }
        state.voice.retain(|_, c| *c != channel);
        state.deleted.push(channel);
        Ok(())
    }

    async fn create_thread(
        &self,
        channel: ChannelId,
        name: &str,
        _auto_archive: ThreadAutoArchive,
    ) -> GatewayResult<Thread> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("create_thread")?;
        if !state.channels.contains_key(&channel) {
            return Err(GatewayError::NotFound(format!("channel {channel}")));
        }
        let id = state.next_id();
        let thread = Thread {
            id: ThreadId(id),
            parent_id: channel,
            name: name.to_string(),
        };
        state.channels.insert(
            ChannelId(id),
            Channel {
                id: ChannelId(id),
                guild_id: GUILD,
                name: name.to_string(),
                kind: ChannelKind::Thread,
                parent_id: Some(channel),
                member_count: 0,
                user_limit: UserLimit::Unbounded,
            },
        );
        state.threads.push(thread.clone());
        Ok(thread)
    }

    async fn fetch_or_create_webhook(&self, channel: ChannelId) -> GatewayResult<Webhook> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("fetch_or_create_webhook")?;
        if let Some(hook) = state.webhooks.values().find(|w| w.channel_id == channel) {
            return Ok(hook.clone());
        }
        let hook = Webhook {
            id: WebhookId(state.next_id()),
            channel_id: channel,
        };
        state.webhooks.insert(hook.id, hook.clone());
        Ok(hook)
    }

    async fn fetch_webhook(&self, id: WebhookId) -> GatewayResult<Option<Webhook>> {
        tokio::task::yield_now().await;
        let state = self.state();
        state.check("fetch_webhook")?;
        Ok(state.webhooks.get(&id).cloned())
    }

    async fn move_webhook(&self, webhook: &Webhook, channel: ChannelId) -> GatewayResult<Webhook> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("move_webhook")?;
        let Some(entry) = state.webhooks.get_mut(&webhook.id) else {
            return Err(GatewayError::NotFound(format!("webhook {}", webhook.id)));
        };
        entry.channel_id = channel;
        Ok(entry.clone())
    }

    async fn send_as_webhook(
        &self,
        webhook: &Webhook,
        message: WebhookMessage,
    ) -> GatewayResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("send_as_webhook")?;
        let Some(current) = state.webhooks.get(&webhook.id).cloned() else {
            return Err(GatewayError::NotFound(format!("webhook {}", webhook.id)));
        };
        if let Some(thread) = message.thread_id {
            if !state.channels.contains_key(&ChannelId::from(thread)) {
                return Err(GatewayError::NotFound(format!("thread {thread}")));
            }
        }
        state.deliveries.push(Delivery {
            webhook: current.id,
            channel: current.channel_id,
            message,
        });
        Ok(())
    }

    async fn member_voice_channel(
        &self,
        _guild: GuildId,
        member: MemberId,
    ) -> GatewayResult<Option<ChannelId>> {
        tokio::task::yield_now().await;
        let state = self.state();
        state.check("member_voice_channel")?;
        Ok(state.voice.get(&member).copied())
    }

    async fn add_member_role(
        &self,
        _guild: GuildId,
        member: MemberId,
        role: RoleId,
    ) -> GatewayResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("add_member_role")?;
        state.roles.entry(member).or_default().insert(role);
        Ok(())
    }

    async fn remove_member_role(
        &self,
        _guild: GuildId,
        member: MemberId,
        role: RoleId,
    ) -> GatewayResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        state.check("remove_member_role")?;
        if let Some(roles) = state.roles.get_mut(&member) {
            roles.remove(&role);
        }
        Ok(())
    }
}

pub(crate) fn member(id: MemberId) -> MemberSnapshot {
    MemberSnapshot {
        id,
        display_name: format!("member-{id}"),
        avatar_url: Some(format!("https://cdn.example/{id}.png")),
        roles: Vec::new(),
    }
}

/// A voice-state-update moving `who` from `old` to `new`.
pub(crate) fn voice_change(
    who: MemberId,
    old: Option<ChannelId>,
    new: Option<ChannelId>,
) -> VoiceStateChange {
    let state = |channel_id| VoiceState {
        guild_id: GUILD,
        member_id: who,
        channel_id,
    };
    VoiceStateChange {
        guild_id: GUILD,
        member: member(who),
        old: state(old),
        new: state(new),
    }
}

/// A message posted by a human member.
pub(crate) fn posted(who: MemberId, channel: ChannelRef, content: &str) -> PostedMessage {
    PostedMessage {
        id: MessageId(5000),
        guild_id: Some(GUILD),
        channel,
        author: Author {
            id: who,
            display_name: format!("member-{who}"),
            avatar_url: Some(format!("https://cdn.example/{who}.png")),
            bot: false,
        },
        webhook_id: None,
        content: content.to_string(),
    }
}

pub(crate) fn in_voice(channel: ChannelId) -> ChannelRef {
    ChannelRef {
        id: channel,
        kind: ChannelKind::Voice,
        parent_id: Some(CATEGORY),
    }
}

pub(crate) fn in_thread(thread: ThreadId) -> ChannelRef {
    ChannelRef {
        id: ChannelId::from(thread),
        kind: ChannelKind::Thread,
        parent_id: Some(ARCHIVE),
    }
}

pub(crate) fn in_archive_root() -> ChannelRef {
    ChannelRef {
        id: ARCHIVE,
        kind: ChannelKind::Text,
        parent_id: None,
    }
}

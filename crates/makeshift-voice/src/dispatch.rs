//! Event dispatcher: fans gateway events out to the controllers.
//!
//! Each event runs in its own task so a slow gateway call never holds up
//! the events behind it. Ordering between tasks is not preserved.

use std::sync::Arc;

use makeshift_common::new_correlation_id;
use makeshift_config::schema::BotConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, trace, Instrument};

use crate::gateway::{Gateway, GatewayEvent};
use crate::lifecycle::LifecycleController;
use crate::relay::RelayRouter;

#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<BotConfig>,
    lifecycle: LifecycleController,
    relay: RelayRouter,
}

impl Dispatcher {
    pub fn new(config: Arc<BotConfig>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            lifecycle: LifecycleController::new(config.clone(), gateway.clone()),
            relay: RelayRouter::new(config.clone(), gateway),
            config,
        }
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    pub fn relay(&self) -> &RelayRouter {
        &self.relay
    }

    /// Handle one event on a new task.
    pub fn dispatch(&self, event: GatewayEvent) -> JoinHandle<()> {
        let span = info_span!("event", cid = %new_correlation_id(), kind = event_kind(&event));
        let this = self.clone();
        tokio::spawn(async move { this.handle(event).await }.instrument(span))
    }

    /// Dispatch events until the sender side closes.
    pub async fn run(self, mut events: mpsc::Receiver<GatewayEvent>) {
        info!(guild = %self.config.guild.id, "Dispatcher started");
        while let Some(event) = events.recv().await {
            self.dispatch(event);
        }
        info!("Event stream closed, dispatcher stopping");
    }

    async fn handle(&self, event: GatewayEvent) {
        if event.guild_id() != Some(self.config.guild.id) {
            trace!("Event for another guild");
            return;
        }

        match event {
            GatewayEvent::VoiceStateUpdate(change) => {
                let cycles = self.lifecycle.on_voice_state_change(&change).await;
                if !cycles.is_empty() {
                    debug!(cycles = cycles.len(), "Cleanup scheduled");
                }
            }
            GatewayEvent::MessageCreate(message) => {
                self.relay.on_message_posted(&message).await;
            }
        }
    }
}

fn event_kind(event: &GatewayEvent) -> &'static str {
    match event {
        GatewayEvent::VoiceStateUpdate(_) => "voice_state_update",
        GatewayEvent::MessageCreate(_) => "message_create",
    }
}

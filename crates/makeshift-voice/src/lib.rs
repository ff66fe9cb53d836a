//! Voice automation for the Makeshift server.
//!
//! Two independent controllers driven by gateway events:
//! - [`LifecycleController`] spawns a personal voice channel for whoever
//!   joins the lobby and deletes channels that stay empty for the grace
//!   period.
//! - [`RelayRouter`] mirrors a voice channel's text chat into an archive
//!   thread and relays replies back, posting under the author's identity.
//!
//! The platform itself sits behind the [`Gateway`] trait. An adapter feeds
//! [`GatewayEvent`]s into a [`Dispatcher`].

pub mod directory;
pub mod dispatch;
pub mod gateway;
pub mod identity;
pub mod lifecycle;
pub mod logging;
pub mod nonce;
pub mod relay;

#[cfg(test)]
mod testing;

pub use directory::ChannelDirectory;
pub use dispatch::Dispatcher;
pub use gateway::{Gateway, GatewayEvent, GatewayResult};
pub use identity::Impersonation;
pub use lifecycle::{CleanupOutcome, LifecycleController, TrackedChannel};
pub use logging::init_tracing;
pub use nonce::NonceLedger;
pub use relay::{RelayOutcome, RelayRouter, Route};

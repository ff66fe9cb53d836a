//! Voice channel lifecycle.
//!
//! Spawns a personal voice channel whenever someone joins the lobby and
//! deletes channels that stay empty for the grace period. Deletion is
//! deferred and guarded by a per-channel nonce plus a freeze/re-check so
//! out-of-order or duplicate voice events never remove an occupied or
//! reused channel.

mod controller;
mod naming;
mod types;


pub use controller::LifecycleController;
pub use naming::pick_channel_name;
pub use types::{CleanupOutcome, TrackedChannel};

//! Voice ↔ archive thread relay.
//!
//! Messages typed in a voice channel's chat are copied into a thread of the
//! archive channel (created on first use); replies in that thread, or in the
//! archive channel itself, are copied back into the voice channel. Copies go
//! out through a webhook under the author's name and avatar, and anything a
//! webhook or bot posted is skipped so the relay never echoes itself.

mod router;
mod types;


pub use router::RelayRouter;
pub use types::{archive_thread_name, RelayOutcome, Route};

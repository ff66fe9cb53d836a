use makeshift_config::schema::DEFAULT_CHANNEL_NAME;
use rand::seq::SliceRandom;

/// Pick a random name for a spawned channel.
pub fn pick_channel_name(pool: &[String]) -> String {
    pool.choose(&mut rand::thread_rng())
        .map(|name| name.trim().to_string())
        .unwrap_or_else(|| DEFAULT_CHANNEL_NAME.to_string())
}

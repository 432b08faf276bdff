//! Streaming module
//!
//! Periodically generates synthetic transactions while the user has
//! streaming switched on, and the controls that configure it.

mod endpoints;
mod streamer;

use std::time::Duration;

pub use endpoints::{toggle_streaming_endpoint, update_settings_endpoint};
pub use streamer::Streamer;

/// The shortest refresh interval the user can pick, in seconds.
pub const MIN_REFRESH_SECS: u64 = 1;
/// The longest refresh interval the user can pick, in seconds.
pub const MAX_REFRESH_SECS: u64 = 10;
/// The refresh interval used until the user picks one, in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 3;

/// The user controlled settings for streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingSettings {
    /// How often a transaction is generated and the dashboard refreshed.
    ///
    /// Always within [MIN_REFRESH_SECS] and [MAX_REFRESH_SECS].
    pub refresh_secs: u64,
    /// Whether the transaction table is written to CSV after each change.
    pub persist: bool,
}

impl StreamingSettings {
    /// Create settings with `refresh_secs` clamped to the allowed range.
    pub fn new(refresh_secs: u64, persist: bool) -> Self {
        Self {
            refresh_secs: refresh_secs.clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS),
            persist,
        }
    }

    /// The refresh interval as a [Duration].
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

impl Default for StreamingSettings {
    fn default() -> Self {
        Self {
            refresh_secs: DEFAULT_REFRESH_SECS,
            persist: false,
        }
    }
}

//! Client configuration surface.

use serde::{Deserialize, Serialize};

/// Daemon endpoint dialed when none is configured.
const DEFAULT_ENDPOINT: &str = "127.0.0.1:50051";

/// Options bundled with one [`Client`](crate::client::Client).
///
/// None of these change behavior yet. They document the shape the future
/// transport will consume: which daemon feeds to source and where to reach
/// the daemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Whether to source events from the live game feed.
    pub live_enabled: bool,
    /// Whether to source events from the client-UI feed.
    pub lcu_enabled: bool,
    /// Transport address the future `connect()` will dial.
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            live_enabled: true,
            lcu_enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

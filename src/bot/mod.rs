//! Bot service contract observed and driven by the session controller.
//!
//! The controller never caches connection state; every read goes through
//! [`BotService::connection_state`] so the service stays the single owner of
//! the value. State transitions are announced on a watch channel whose payload
//! is advisory only — observers re-query on each wakeup.

use async_trait::async_trait;
use std::fmt;
use tokio::sync::watch;

use crate::error::BotError;

pub mod client;

pub use client::BotClient;

/// Tri-state connection status owned by the bot service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        };
        f.write_str(label)
    }
}

/// Receiver half of the connection-state-changed notification.
pub type StateChanges = watch::Receiver<ConnectionState>;

/// Lifecycle surface of the bot process as seen by the console.
#[async_trait]
pub trait BotService: Send + Sync {
    /// Replace the in-memory credential used by the next `start`.
    fn set_credential(&self, token: &str);

    /// Gate inbound command handling for the next session.
    fn set_commands_enabled(&self, enabled: bool);

    /// Current connection state.
    fn connection_state(&self) -> ConnectionState;

    /// Subscribe to state-change notifications.
    fn state_changes(&self) -> StateChanges;

    /// Run one gateway session to completion: connect, authenticate, hold the
    /// connection until `stop` or the peer closes, then tear down.
    async fn start(&self) -> Result<(), BotError>;

    /// Ask the active session to shut down. Fire-and-forget; the resulting
    /// transition arrives on the state channel.
    fn stop(&self);
}

#[cfg(test)]
mod tests {
    use super::ConnectionState;

    #[test]
    fn connection_state_display_labels() {
        assert_eq!(ConnectionState::Disconnected.to_string(), "disconnected");
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
    }
}

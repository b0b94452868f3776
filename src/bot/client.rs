//! Line-oriented TCP gateway client backing [`BotService`] in the binary.
//!
//! Wire protocol: connect, send `AUTH <token>`, expect an `OK` ack line, then
//! hold the connection reading lines until [`BotService::stop`] or EOF. Every
//! session ends in `Disconnected`, whatever the cause, so failures always
//! surface on the state channel.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::{watch, Notify};
use tracing::debug;

use crate::bot::{BotService, ConnectionState, StateChanges};
use crate::error::BotError;

/// Gateway client with interior mutability so the console can share one
/// handle between the menu loop, the state watcher, and detached starts.
pub struct BotClient {
    gateway: String,
    credential: Mutex<String>,
    commands_enabled: AtomicBool,
    state: watch::Sender<ConnectionState>,
    shutdown: Notify,
}

impl BotClient {
    pub fn new(gateway: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            gateway: gateway.into(),
            credential: Mutex::new(String::new()),
            commands_enabled: AtomicBool::new(false),
            state,
            shutdown: Notify::new(),
        }
    }

    /// Gateway address this client connects to.
    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    fn set_state(&self, next: ConnectionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            debug!(%previous, %next, "connection state changed");
        }
    }

    async fn run_session(&self, token: &str) -> Result<(), BotError> {
        // Register for shutdown before connecting so a stop issued at any
        // point after `start` is observed.
        let shutdown = self.shutdown.notified();
        tokio::pin!(shutdown);

        let stream = TcpStream::connect(&self.gateway).await?;
        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();

        write_half.write_all(format!("AUTH {token}\n").as_bytes()).await?;
        write_half.flush().await?;

        let ack = lines
            .next_line()
            .await?
            .ok_or_else(|| BotError::Protocol("gateway closed before auth ack".to_string()))?;
        if ack.trim() != "OK" {
            return Err(BotError::AuthRejected(ack));
        }

        self.set_state(ConnectionState::Connected);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    debug!("stop requested, closing gateway session");
                    return Ok(());
                }
                line = lines.next_line() => match line? {
                    Some(line) => self.handle_line(&line),
                    // Peer closed the connection.
                    None => return Ok(()),
                },
            }
        }
    }

    fn handle_line(&self, line: &str) {
        if !self.commands_enabled.load(Ordering::Relaxed) {
            return;
        }
        // Command semantics live in the bot engine; the console only keeps
        // the session alive.
        debug!(len = line.len(), "gateway line received");
    }
}

#[async_trait]
impl BotService for BotClient {
    fn set_credential(&self, token: &str) {
        let mut credential = self.credential.lock().unwrap_or_else(|e| e.into_inner());
        *credential = token.to_string();
    }

    fn set_commands_enabled(&self, enabled: bool) {
        self.commands_enabled.store(enabled, Ordering::Relaxed);
    }

    fn connection_state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    fn state_changes(&self) -> StateChanges {
        self.state.subscribe()
    }

    async fn start(&self) -> Result<(), BotError> {
        let token = {
            let credential = self.credential.lock().unwrap_or_else(|e| e.into_inner());
            credential.clone()
        };
        if token.is_empty() {
            return Err(BotError::MissingCredential);
        }

        self.set_state(ConnectionState::Connecting);
        let result = self.run_session(&token).await;
        self.set_state(ConnectionState::Disconnected);
        result
    }

    fn stop(&self) {
        self.shutdown.notify_waiters();
    }
}

//! Shared test fixtures: temp dirs, scripted input, and mock collaborators.
//!
//! Kept tiny and reusable so individual test modules don't rebuild ad-hoc
//! fixtures for the same seams.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::{watch, Notify};

use crate::bot::{BotService, ConnectionState, StateChanges};
use crate::console::input::ConsoleInput;
use crate::error::BotError;
use crate::submenu::SubMenu;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("botctl-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Cloneable in-memory sink for the render actor.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Scripted console input: queued lines and keypresses consumed in order.
pub struct ScriptedInput {
    lines: VecDeque<String>,
    keys: VecDeque<char>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str], keys: &[char]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            keys: keys.iter().copied().collect(),
        }
    }

    pub fn remaining_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }
}

impl ConsoleInput for ScriptedInput {
    fn read_line(&mut self) -> io::Result<String> {
        self.lines.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted lines exhausted")
        })
    }

    fn read_key(&mut self) -> io::Result<Option<char>> {
        self.keys
            .pop_front()
            .map(Some)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "scripted keys exhausted"))
    }
}

/// Recording [`BotService`] double with an externally drivable state.
pub struct MockBot {
    state: watch::Sender<ConnectionState>,
    credentials: Mutex<Vec<String>>,
    commands_enabled: AtomicBool,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    start_entered: Notify,
    complete_start: bool,
}

impl MockBot {
    /// A mock whose `start` resolves immediately with `Ok(())`.
    pub fn new(initial: ConnectionState) -> Arc<Self> {
        Arc::new(Self::build(initial, true))
    }

    /// A mock whose `start` records the call and then never completes.
    pub fn with_pending_start(initial: ConnectionState) -> Arc<Self> {
        Arc::new(Self::build(initial, false))
    }

    fn build(initial: ConnectionState, complete_start: bool) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            credentials: Mutex::new(Vec::new()),
            commands_enabled: AtomicBool::new(false),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            start_entered: Notify::new(),
            complete_start,
        }
    }

    /// Drive a state transition, notifying subscribers.
    pub fn set_state(&self, next: ConnectionState) {
        self.state.send_replace(next);
    }

    /// Resolves once `start` has been entered at least once.
    pub async fn started(&self) {
        self.start_entered.notified().await;
    }

    pub fn credentials(&self) -> Vec<String> {
        self.credentials
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn commands_enabled(&self) -> bool {
        self.commands_enabled.load(Ordering::Relaxed)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::Relaxed)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BotService for MockBot {
    fn set_credential(&self, token: &str) {
        self.credentials
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(token.to_string());
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
        self.start_calls.fetch_add(1, Ordering::Relaxed);
        // Permit-style wakeup so a waiter registered later still sees it.
        self.start_entered.notify_one();
        if !self.complete_start {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::Relaxed);
    }
}

/// [`SubMenu`] double that counts invocations.
#[derive(Default)]
pub struct CountingSubMenu {
    calls: AtomicUsize,
}

impl CountingSubMenu {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SubMenu for CountingSubMenu {
    async fn run(&self, _input: &mut dyn ConsoleInput) -> io::Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

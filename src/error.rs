//! Unified error types for the console controller.

use std::fmt;

// ---------------------------------------------------------------------------
// SettingsError
// ---------------------------------------------------------------------------

/// Errors when reading or persisting the settings file.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    /// The settings file exists but is not valid TOML.
    Parse(toml::de::Error),
    /// In-memory settings could not be rendered back to TOML.
    Format(toml::ser::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "toml: {e}"),
            Self::Format(e) => write!(f, "toml: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Format(e)
    }
}

// ---------------------------------------------------------------------------
// BotError
// ---------------------------------------------------------------------------

/// Errors from the bot gateway session.
#[derive(Debug)]
pub enum BotError {
    /// `start` was called with no credential configured.
    MissingCredential,
    /// Socket-level failure while connecting or holding the session.
    Io(std::io::Error),
    /// The gateway refused the supplied credential.
    AuthRejected(String),
    /// The gateway sent something outside the line protocol.
    Protocol(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "no bot token configured"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::AuthRejected(reply) => write!(f, "gateway rejected credential: {reply}"),
            Self::Protocol(msg) => write!(f, "gateway protocol error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<std::io::Error> for BotError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

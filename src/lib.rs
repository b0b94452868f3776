//! botctl — interactive console controller for a long-running chat bot.
//!
//! The crate hosts the menu-driven session controller: it renders the menu,
//! overlays live connection state, guards credential entry behind an explicit
//! confirmation, and drives the bot's connection lifecycle. The bot engine
//! itself is behind the [`bot::BotService`] trait; persisted settings are a
//! small TOML key-value file; the server sub-menu is an opaque async workflow
//! entered only while connected.
//!
//! # Quick start
//!
//! ```no_run
//! use botctl::bot::{BotClient, BotService};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let bot = Arc::new(BotClient::new("127.0.0.1:7700"));
//! bot.set_credential("my-token");
//! bot.start().await.unwrap();
//! # }
//! ```

pub mod bot;
pub mod console;
pub mod error;
pub mod headless;
pub mod settings;
pub mod submenu;
#[cfg(test)]
pub mod testsupport;

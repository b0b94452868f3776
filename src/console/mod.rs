//! Interactive session controller: menu loop, dispatch, credential entry.
//!
//! Each iteration redraws the menu, overlays the connection-state indicator,
//! blocks for one line of input, and dispatches the parsed choice. Unparsable
//! input is reported and then dispatched anyway; the sentinel lands in the
//! unknown-option branch. No error escapes the loop — every handler returns
//! control regardless of outcome, and only the Exit action (or loss of the
//! input stream) ends the session.

pub mod input;
pub mod menu;
pub mod render;

use std::io;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::bot::{BotService, ConnectionState};
use crate::console::input::ConsoleInput;
use crate::console::menu::MenuChoice;
use crate::console::render::{Frame, RenderHandle};
use crate::settings::{self, SettingsStore};
use crate::submenu::SubMenu;

/// Collaborator handles assembled once at startup and threaded through the
/// loop; nothing here is global.
pub struct Session {
    pub bot: Arc<dyn BotService>,
    pub settings: SettingsStore,
    pub submenu: Arc<dyn SubMenu>,
    pub renderer: RenderHandle,
}

/// Outcome of dispatching one menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Spawn the watcher that mirrors bot state changes onto the indicator row,
/// independent of whatever the main loop is blocked on.
pub fn spawn_state_watcher(bot: Arc<dyn BotService>, renderer: RenderHandle) -> JoinHandle<()> {
    let mut changes = bot.state_changes();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            // The channel payload is advisory; always re-query the service.
            renderer.post(Frame::StateLine(bot.connection_state()));
        }
    })
}

/// Run the interactive loop until the operator picks Exit.
///
/// Returns early with an error only when the input stream itself dies (for
/// example stdin closing); the caller exits the process either way.
pub async fn run_session(
    session: &mut Session,
    input: &mut dyn ConsoleInput,
) -> io::Result<()> {
    loop {
        session.renderer.draw(Frame::Menu).await;
        session
            .renderer
            .draw(Frame::StateLine(session.bot.connection_state()))
            .await;
        session
            .renderer
            .draw(Frame::Prompt(menu::ENTER_MENU_NUMBER.to_string()))
            .await;

        let line = input.read_line()?;
        let choice = match line.trim().parse::<i64>() {
            Ok(n) => MenuChoice::from_number(n),
            Err(_) => {
                session
                    .renderer
                    .draw(Frame::Line(menu::CHOICE_NOT_A_NUMBER.to_string()))
                    .await;
                MenuChoice::Unknown
            }
        };

        if dispatch(session, input, choice).await? == Flow::Exit {
            return Ok(());
        }
    }
}

async fn dispatch(
    session: &mut Session,
    input: &mut dyn ConsoleInput,
    choice: MenuChoice,
) -> io::Result<Flow> {
    match choice {
        MenuChoice::SetCredential => set_credential(session, input).await?,
        MenuChoice::ToggleConnection => toggle_connection(session, input).await?,
        MenuChoice::Exit => return Ok(Flow::Exit),
        MenuChoice::SubMenu => open_submenu(session, input).await?,
        MenuChoice::Unknown => {
            session
                .renderer
                .draw(Frame::Line(menu::UNKNOWN_OPTION.to_string()))
                .await;
            wait_any_key(session, input).await?;
        }
    }
    Ok(Flow::Continue)
}

/// Guarded credential entry: prompt, echo, confirm, and only then persist.
///
/// The prompt+echo cycle repeats until the operator confirms with `y`; there
/// is no cancel path. An empty token is accepted through the flow.
async fn set_credential(session: &mut Session, input: &mut dyn ConsoleInput) -> io::Result<()> {
    let token = loop {
        session.renderer.draw(Frame::Clear).await;
        session
            .renderer
            .draw(Frame::Prompt(menu::ENTER_TOKEN.to_string()))
            .await;
        let token = input.read_line()?;

        session.renderer.draw(Frame::Clear).await;
        session
            .renderer
            .draw(Frame::Line(menu::token_confirm_line(&token)))
            .await;
        session
            .renderer
            .draw(Frame::Line(menu::YES_NO_PROMPT.to_string()))
            .await;
        if let Some('y' | 'Y') = input.read_key()? {
            break token;
        }
    };

    // Two-phase persistence: the save must follow the write or the value is
    // lost on restart.
    session.settings.set(settings::TOKEN_KEY, &token);
    if let Err(e) = session.settings.save() {
        session
            .renderer
            .draw(Frame::Line(format!("failed to save settings: {e}")))
            .await;
        wait_any_key(session, input).await?;
    }
    session.bot.set_credential(&token);
    Ok(())
}

async fn toggle_connection(session: &mut Session, input: &mut dyn ConsoleInput) -> io::Result<()> {
    match session.bot.connection_state() {
        ConnectionState::Connected => {
            session.bot.stop();
            wait_any_key(session, input).await?;
        }
        ConnectionState::Disconnected => {
            let token = session
                .settings
                .get(settings::TOKEN_KEY)
                .unwrap_or_default()
                .to_string();
            session.bot.set_credential(&token);
            session.bot.set_commands_enabled(true);

            // Intentionally detached: the loop keeps rendering while the
            // session runs. Failures land on the state channel; the error
            // itself is only logged here.
            let bot = Arc::clone(&session.bot);
            tokio::spawn(async move {
                if let Err(e) = bot.start().await {
                    warn!("bot start failed: {e}");
                }
            });
            wait_any_key(session, input).await?;
        }
        // Mid-transition: neither branch applies, the menu simply redraws.
        ConnectionState::Connecting => {}
    }
    Ok(())
}

async fn open_submenu(session: &mut Session, input: &mut dyn ConsoleInput) -> io::Result<()> {
    if session.bot.connection_state() == ConnectionState::Connected {
        let submenu = Arc::clone(&session.submenu);
        submenu.run(input).await?;
    } else {
        session
            .renderer
            .draw(Frame::Line(menu::BOT_IS_NOT_RUNNING.to_string()))
            .await;
        wait_any_key(session, input).await?;
    }
    Ok(())
}

async fn wait_any_key(session: &mut Session, input: &mut dyn ConsoleInput) -> io::Result<()> {
    session
        .renderer
        .draw(Frame::Line(menu::ANY_KEY_TO_CONTINUE.to_string()))
        .await;
    input.read_key()?;
    Ok(())
}

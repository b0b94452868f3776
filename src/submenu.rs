//! Server-scoped sub-menu workflow, opaque to the session controller.
//!
//! The controller only guards entry (connected sessions only) and awaits the
//! workflow to completion; everything rendered here is this module's concern.

use async_trait::async_trait;
use std::io;
use std::sync::Arc;

use crate::bot::BotService;
use crate::console::input::ConsoleInput;
use crate::console::menu;
use crate::console::render::{Frame, RenderHandle};

/// Async workflow entered from menu action 4 while connected.
#[async_trait]
pub trait SubMenu: Send + Sync {
    /// Run the workflow to completion.
    async fn run(&self, input: &mut dyn ConsoleInput) -> io::Result<()>;
}

/// Minimal server view: gateway endpoint plus live connection state.
pub struct ServerMenu {
    bot: Arc<dyn BotService>,
    renderer: RenderHandle,
    gateway: String,
}

impl ServerMenu {
    pub fn new(bot: Arc<dyn BotService>, renderer: RenderHandle, gateway: String) -> Self {
        Self {
            bot,
            renderer,
            gateway,
        }
    }
}

#[async_trait]
impl SubMenu for ServerMenu {
    async fn run(&self, input: &mut dyn ConsoleInput) -> io::Result<()> {
        self.renderer.draw(Frame::Clear).await;
        self.renderer
            .draw(Frame::Line("Server menu".to_string()))
            .await;
        self.renderer
            .draw(Frame::Line(format!("gateway: {}", self.gateway)))
            .await;
        self.renderer
            .draw(Frame::Line(format!(
                "state:   {}",
                self.bot.connection_state()
            )))
            .await;
        self.renderer
            .draw(Frame::Line(menu::ANY_KEY_TO_CONTINUE.to_string()))
            .await;
        input.read_key()?;
        Ok(())
    }
}

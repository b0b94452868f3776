//! Single-owner console rendering actor.
//!
//! Two logical flows write to the terminal: the session loop and the
//! connection-state watcher. All writes funnel through one task fed by a
//! channel, so cursor save/restore sequences from the two flows never
//! interleave. Loop-driven frames are acknowledged before input blocks;
//! watcher frames are posted without waiting.

use crossterm::cursor::{MoveTo, RestorePosition, SavePosition};
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::bot::ConnectionState;
use crate::console::menu;

/// One unit of console output processed by the render actor.
#[derive(Debug)]
pub enum Frame {
    /// Clear the screen and draw the header plus the options block.
    Menu,
    /// Clear the screen only.
    Clear,
    /// Right-aligned connection-state indicator on row 0.
    StateLine(ConnectionState),
    /// One plain line with trailing newline.
    Line(String),
    /// Prompt text left on the current line, no newline.
    Prompt(String),
}

struct Envelope {
    frame: Frame,
    done: Option<oneshot::Sender<()>>,
}

/// Handle for submitting frames to the render actor.
#[derive(Clone)]
pub struct RenderHandle {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl RenderHandle {
    /// Draw a frame and wait until it reached the sink.
    pub async fn draw(&self, frame: Frame) {
        let (done_tx, done_rx) = oneshot::channel();
        if self
            .tx
            .send(Envelope {
                frame,
                done: Some(done_tx),
            })
            .is_err()
        {
            return;
        }
        let _ = done_rx.await;
    }

    /// Post a frame without waiting for it to be drawn.
    pub fn post(&self, frame: Frame) {
        let _ = self.tx.send(Envelope { frame, done: None });
    }
}

/// Spawn the render actor writing to stdout.
pub fn spawn(color: bool) -> RenderHandle {
    spawn_with_sink(color, Box::new(io::stdout()))
}

/// Spawn the render actor with an injected sink (tests use a shared buffer).
pub(crate) fn spawn_with_sink(color: bool, mut sink: Box<dyn Write + Send>) -> RenderHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();
    tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            if let Err(e) = write_frame(&mut sink, color, &envelope.frame) {
                warn!("console write failed: {e}");
            }
            if let Some(done) = envelope.done {
                let _ = done.send(());
            }
        }
    });
    RenderHandle { tx }
}

fn write_frame<W: Write>(sink: &mut W, color: bool, frame: &Frame) -> io::Result<()> {
    match frame {
        Frame::Clear => {
            sink.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        }
        Frame::Menu => {
            sink.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
            if color {
                sink.queue(PrintStyledContent(menu::HEADER.with(Color::Magenta)))?;
            } else {
                sink.queue(Print(menu::HEADER))?;
            }
            sink.queue(Print("\n\n\n"))?
                .queue(Print(menu::MAIN_MENU_OPTIONS))?
                .queue(Print("\n"))?;
        }
        Frame::StateLine(state) => {
            let msg = state_message(*state);
            let (column, text) = state_line_span(terminal_width(), msg);
            sink.queue(SavePosition)?
                .queue(MoveTo(0, 0))?
                .queue(Clear(ClearType::CurrentLine))?
                .queue(MoveTo(column, 0))?;
            if color {
                let tint = if *state == ConnectionState::Connected {
                    Color::Green
                } else {
                    Color::DarkGrey
                };
                sink.queue(PrintStyledContent(text.with(tint)))?;
            } else {
                sink.queue(Print(text))?;
            }
            sink.queue(RestorePosition)?;
        }
        Frame::Line(text) => {
            sink.queue(Print(text))?.queue(Print("\n"))?;
        }
        Frame::Prompt(text) => {
            sink.queue(Print(text))?;
        }
    }
    sink.flush()
}

/// Indicator text for the fixed-position state line.
pub(crate) fn state_message(state: ConnectionState) -> &'static str {
    if state == ConnectionState::Connected {
        menu::BOT_IS_RUNNING
    } else {
        menu::BOT_IS_NOT_RUNNING
    }
}

/// Column and visible text for the right-aligned indicator, clipped to width.
pub(crate) fn state_line_span(width: u16, msg: &str) -> (u16, String) {
    let columns = width as usize;
    if columns == 0 {
        return (0, String::new());
    }
    let visible = msg.chars().count();
    if visible >= columns {
        return (0, msg.chars().take(columns).collect());
    }
    ((columns - visible) as u16, msg.to_string())
}

fn terminal_width() -> u16 {
    terminal::size().map(|(w, _)| w).unwrap_or(80)
}

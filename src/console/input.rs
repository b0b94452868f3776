//! Blocking console input seam.
//!
//! The session loop owns exactly one read at a time, so the trait is
//! deliberately synchronous. Tests substitute a scripted implementation.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use std::io::{self, IsTerminal};

/// Blocking input source for the session loop.
pub trait ConsoleInput: Send {
    /// Read one line, without the trailing newline.
    fn read_line(&mut self) -> io::Result<String>;

    /// Wait for one keypress; `None` when the key has no character.
    fn read_key(&mut self) -> io::Result<Option<char>>;
}

/// Stdin-backed input used by the binary.
pub struct StdInput;

impl ConsoleInput for StdInput {
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_key(&mut self) -> io::Result<Option<char>> {
        if !io::stdin().is_terminal() {
            // Line-buffered fallback: consume one line, use its first char.
            let line = self.read_line()?;
            return Ok(line.chars().next());
        }

        terminal::enable_raw_mode()?;
        let key = next_key_press();
        terminal::disable_raw_mode()?;
        key
    }
}

fn next_key_press() -> io::Result<Option<char>> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            return Ok(match key.code {
                KeyCode::Char(c) => Some(c),
                _ => None,
            });
        }
    }
}

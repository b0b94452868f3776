//! Menu text surface and choice mapping.
//!
//! The strings here are a stable contract with operators and wrapper scripts;
//! change them deliberately.

pub const HEADER: &str = "\
 _           _        _   _
| |__   ___ | |_  ___| |_| |
| '_ \\ / _ \\| __|/ __| __| |
| |_) | (_) | |_| (__| |_| |
|_.__/ \\___/ \\__|\\___|\\__|_|";

pub const MAIN_MENU_OPTIONS: &str = "\
1. Set the bot token
2. Start / stop the bot
3. Exit
4. Server menu";

pub const ENTER_MENU_NUMBER: &str = "Please enter a menu number: ";
pub const CHOICE_NOT_A_NUMBER: &str = "That choice is not a number.";
pub const UNKNOWN_OPTION: &str = "Unknown option selected.";
pub const ENTER_TOKEN: &str = "Enter the bot token: ";
pub const YES_NO_PROMPT: &str = "Press [y] to confirm, any other key to retry.";
pub const BOT_IS_RUNNING: &str = "bot is running";
pub const BOT_IS_NOT_RUNNING: &str = "bot is not running";
pub const ANY_KEY_TO_CONTINUE: &str = "Press any key to continue...";

/// One menu action, selected per loop iteration and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SetCredential,
    ToggleConnection,
    Exit,
    SubMenu,
    /// Anything outside 1..=4, including unparsable input.
    Unknown,
}

impl MenuChoice {
    /// Map a parsed menu number to its action.
    pub fn from_number(n: i64) -> Self {
        match n {
            1 => Self::SetCredential,
            2 => Self::ToggleConnection,
            3 => Self::Exit,
            4 => Self::SubMenu,
            _ => Self::Unknown,
        }
    }
}

/// Echo line shown before the credential confirmation prompt.
pub fn token_confirm_line(token: &str) -> String {
    format!("Is \"{token}\" the correct token?")
}

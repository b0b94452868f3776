//! CLI argument parsing via clap.

use clap::Parser;

/// Interactive console controller for a long-running chat bot.
#[derive(Debug, Parser)]
#[command(name = "botctl", version)]
pub struct Args {
    /// Start the bot immediately and skip the interactive menu.
    #[arg(long = "headless")]
    pub headless: bool,

    /// Bot token for --headless runs (the interactive menu uses the stored
    /// setting instead).
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Path to the settings file (default: ~/.config/botctl/settings.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

//! CLI entry point for botctl.

mod cli;

use botctl::bot::{BotClient, BotService};
use botctl::console::input::StdInput;
use botctl::console::{render, spawn_state_watcher, Session};
use botctl::headless::{run_headless, HeadlessOutcome};
use botctl::settings::{self, SettingsStore};
use botctl::submenu::ServerMenu;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    // Silent unless RUST_LOG asks for output, so log lines never fight the
    // menu surface.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings_path = args
        .config
        .clone()
        .map(PathBuf::from)
        .or_else(settings::default_settings_path)
        .unwrap_or_else(|| PathBuf::from("settings.toml"));
    let settings = match SettingsStore::open(&settings_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "warning: failed to read {}: {e}",
                settings_path.display()
            );
            SettingsStore::empty(&settings_path)
        }
    };

    let gateway = settings
        .get(settings::GATEWAY_KEY)
        .unwrap_or(settings::DEFAULT_GATEWAY)
        .to_string();
    let bot = Arc::new(BotClient::new(gateway.clone()));

    if args.headless {
        match run_headless(args.token.as_deref(), bot.as_ref()).await {
            HeadlessOutcome::MissingToken => {
                println!("Headless mode requires a token. Pass --token <TOKEN>.");
                // Exits 0 by long-standing convention even though nothing ran.
                process::exit(0);
            }
            HeadlessOutcome::Finished(Ok(())) => process::exit(0),
            HeadlessOutcome::Finished(Err(e)) => {
                eprintln!("bot session ended with error: {e}");
                process::exit(1);
            }
        }
    }

    let color = !args.no_color;
    let renderer = render::spawn(color);
    let bot: Arc<dyn BotService> = bot;
    spawn_state_watcher(Arc::clone(&bot), renderer.clone());

    let submenu = Arc::new(ServerMenu::new(
        Arc::clone(&bot),
        renderer.clone(),
        gateway,
    ));
    let mut session = Session {
        bot,
        settings,
        submenu,
        renderer,
    };

    if let Err(e) = botctl::console::run_session(&mut session, &mut StdInput).await {
        warn!("session input ended unexpectedly: {e}");
    }
    // Immediate teardown: an active connection is not shut down gracefully.
    process::exit(0);
}

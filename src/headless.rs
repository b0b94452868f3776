//! Headless startup path: start the bot immediately, no menu.

use tracing::debug;

use crate::bot::BotService;
use crate::error::BotError;

/// How a headless launch resolved.
#[derive(Debug)]
pub enum HeadlessOutcome {
    /// No token was supplied; the service was never touched.
    MissingToken,
    /// The gateway session ran to completion.
    Finished(Result<(), BotError>),
}

/// Assign the supplied token and await the bot session to completion.
///
/// Unlike the interactive toggle action, the start here is awaited: the
/// process has nothing else to do while the session runs.
pub async fn run_headless(token: Option<&str>, bot: &dyn BotService) -> HeadlessOutcome {
    let Some(token) = token else {
        return HeadlessOutcome::MissingToken;
    };
    debug!("starting bot in headless mode");
    bot.set_credential(token);
    HeadlessOutcome::Finished(bot.start().await)
}

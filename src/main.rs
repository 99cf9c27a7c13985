//! StarPulse CLI entry point.

use clap::Parser;

use starpulse::cli::{AppContext, Cli};
use starpulse::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let ctx = match AppContext::load(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(err) => starpulse::cli::handle_error(err, cli.json),
    };

    // Held for the whole run so buffered file logs are flushed on exit.
    let _logger = match LoggerImpl::init(&ctx.config.logging) {
        Ok(logger) => logger,
        Err(err) => starpulse::cli::handle_error(err, cli.json),
    };

    if let Err(err) = starpulse::cli::dispatch(&ctx, cli.command, cli.json).await {
        starpulse::cli::handle_error(err, cli.json);
    }
}

//! Command-line interface
//!
//! Every subcommand drives the same [`SearchController`](crate::services::SearchController)
//! the interactive session uses, so the CLI sees the debounce, progress and
//! cancellation behavior exactly as an embedding UI would.

pub mod commands;
pub mod context;
pub mod display;
pub mod output;
pub mod progress;
pub mod types;

pub use context::AppContext;
pub use types::{Cli, Commands, HistoryCommands};

use anyhow::Result;

/// Run the parsed command against a loaded context.
pub async fn dispatch(ctx: &AppContext, command: Commands, json_mode: bool) -> Result<()> {
    match command {
        Commands::Search { name } => commands::search::execute(ctx, &name, json_mode).await,
        Commands::Suggest { partial } => commands::suggest::execute(ctx, &partial, json_mode).await,
        Commands::History(command) => commands::history::execute(ctx, command, json_mode).await,
        Commands::Interactive => commands::interactive::execute(ctx, json_mode).await,
    }
}

/// Report a command failure and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

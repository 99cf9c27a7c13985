//! `starpulse suggest <PARTIAL>`

use anyhow::Result;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::display::render_suggestions;
use crate::cli::output::{output, CommandOutput};
use crate::services::SearchController;

#[derive(Debug, Serialize)]
pub struct SuggestionsOutput {
    pub query: String,
    pub suggestions: Vec<String>,
}

impl CommandOutput for SuggestionsOutput {
    fn to_human(&self) -> String {
        render_suggestions(&self.suggestions)
    }
}

pub async fn execute(ctx: &AppContext, partial: &str, json_mode: bool) -> Result<()> {
    let controller = ctx.controller().await?;
    let suggestions = collect_suggestions(&controller, partial, ctx.config.search.min_query_chars).await;
    controller.close().await;

    output(
        &SuggestionsOutput { query: partial.trim().to_string(), suggestions },
        json_mode,
    );
    Ok(())
}

/// Type `partial` into the controller and wait out the debounce.
///
/// Queries shorter than `min_chars` never reach the backend.
pub async fn collect_suggestions(
    controller: &SearchController,
    partial: &str,
    min_chars: usize,
) -> Vec<String> {
    if partial.trim().chars().count() < min_chars {
        return Vec::new();
    }

    let mut updates = controller.subscribe();
    controller.update_query(partial);
    updates
        .wait_for(|snapshot| snapshot.suggestions_visible)
        .await
        .map(|snapshot| snapshot.suggestions.clone())
        .unwrap_or_default()
}

//! `starpulse search <NAME>`

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::Arc;

use crate::cli::context::AppContext;
use crate::cli::display::render_profile;
use crate::cli::output::{output, CommandOutput};
use crate::cli::progress::SearchProgress;
use crate::domain::models::rank::rank_title;
use crate::domain::models::ProfileRecord;
use crate::services::{ControllerSnapshot, RequestToken, SearchController};

/// Profile plus its derived rank, as printed by `search` and `history show`.
#[derive(Debug, Serialize)]
pub struct ProfileOutput {
    pub rank: &'static str,
    pub profile: Arc<ProfileRecord>,
}

impl ProfileOutput {
    pub fn new(profile: Arc<ProfileRecord>) -> Self {
        Self { rank: rank_title(profile.popularity_rating), profile }
    }
}

impl CommandOutput for ProfileOutput {
    fn to_human(&self) -> String {
        render_profile(&self.profile)
    }
}

/// How a single search ended.
#[derive(Debug)]
pub enum SearchOutcome {
    Found(Arc<ProfileRecord>),
    Failed(String),
    Cancelled,
}

pub async fn execute(ctx: &AppContext, name: &str, json_mode: bool) -> Result<()> {
    let controller = ctx.controller().await?;
    let progress = if json_mode { SearchProgress::hidden() } else { SearchProgress::new(name.trim()) };

    let outcome = run_search(&controller, name, &progress).await?;
    progress.finish();
    controller.close().await;

    match outcome {
        SearchOutcome::Found(profile) => {
            output(&ProfileOutput::new(profile), json_mode);
            Ok(())
        }
        SearchOutcome::Failed(message) => Err(anyhow!(message)),
        SearchOutcome::Cancelled => Err(anyhow!("Search cancelled")),
    }
}

/// Submit `name` and follow snapshots until the search resolves.
///
/// Ctrl-C cancels the search through the controller.
pub async fn run_search(
    controller: &SearchController,
    name: &str,
    progress: &SearchProgress,
) -> Result<SearchOutcome> {
    let mut updates = controller.subscribe();
    let token = controller.submit_search(name)?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        if let Some(outcome) = resolve(&updates.borrow_and_update(), token, progress) {
            return Ok(outcome);
        }
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    return Ok(SearchOutcome::Cancelled);
                }
            }
            _ = &mut ctrl_c => {
                controller.cancel_search();
                return Ok(SearchOutcome::Cancelled);
            }
        }
    }
}

fn resolve(
    snapshot: &ControllerSnapshot,
    token: RequestToken,
    progress: &SearchProgress,
) -> Option<SearchOutcome> {
    if snapshot.token != token {
        return Some(SearchOutcome::Cancelled);
    }
    progress.update(&snapshot.loading);
    if let Some(profile) = &snapshot.result {
        return Some(SearchOutcome::Found(Arc::clone(profile)));
    }
    if let Some(message) = &snapshot.error {
        return Some(SearchOutcome::Failed(message.clone()));
    }
    None
}

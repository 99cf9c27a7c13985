//! `starpulse history list|show`

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::Arc;

use super::search::ProfileOutput;
use crate::cli::context::AppContext;
use crate::cli::display::render_history;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::HistoryCommands;
use crate::domain::models::rank::rank_title;
use crate::domain::models::ProfileRecord;

#[derive(Debug, Serialize)]
pub struct HistoryEntryOutput {
    pub name: String,
    pub display_name: String,
    pub popularity_rating: f64,
    pub rank: &'static str,
}

impl From<&ProfileRecord> for HistoryEntryOutput {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            name: record.name.clone(),
            display_name: record.display_name().to_string(),
            popularity_rating: record.popularity_rating,
            rank: rank_title(record.popularity_rating),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryListOutput {
    pub entries: Vec<HistoryEntryOutput>,
    pub total: usize,
    #[serde(skip)]
    records: Vec<Arc<ProfileRecord>>,
}

impl HistoryListOutput {
    pub fn new(records: &[Arc<ProfileRecord>]) -> Self {
        Self {
            entries: records.iter().map(|r| HistoryEntryOutput::from(r.as_ref())).collect(),
            total: records.len(),
            records: records.to_vec(),
        }
    }
}

impl CommandOutput for HistoryListOutput {
    fn to_human(&self) -> String {
        render_history(&self.records)
    }
}

pub async fn execute(ctx: &AppContext, command: HistoryCommands, json_mode: bool) -> Result<()> {
    let history = ctx.history().await?;

    match command {
        HistoryCommands::List => {
            output(&HistoryListOutput::new(history.entries()), json_mode);
        }
        HistoryCommands::Show { name } => {
            let record = history
                .find(name.trim())
                .cloned()
                .ok_or_else(|| anyhow!("No stored profile for '{}'", name.trim()))?;
            output(&ProfileOutput::new(record), json_mode);
        }
    }

    Ok(())
}

//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use std::sync::Arc;

use crate::cli::output::truncate;
use crate::domain::models::rank::{rank_title, RANK_TIERS};
use crate::domain::models::ProfileRecord;

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Numbered history table, most recent first.
pub fn render_history(entries: &[Arc<ProfileRecord>]) -> String {
    if entries.is_empty() {
        return "No history yet.".to_string();
    }

    let mut table = list_table(&["#", "name", "rating", "rank"]);
    for (index, record) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(truncate(record.display_name(), 32)),
            Cell::new(format!("{:.1}", record.popularity_rating)).set_alignment(CellAlignment::Right),
            Cell::new(rank_title(record.popularity_rating)),
        ]);
    }

    let noun = if entries.len() == 1 { "profile" } else { "profiles" };
    format!("{} {noun}:\n{table}", style(entries.len()).bold())
}

/// Numbered suggestion list; indices match `:pick N`.
pub fn render_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return "No suggestions.".to_string();
    }
    suggestions
        .iter()
        .enumerate()
        .map(|(index, name)| format!("  {} {name}", style(format!("{}.", index + 1)).dim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rank table with the band containing `rating` highlighted.
pub fn render_rank_table(rating: f64) -> String {
    let mut table = list_table(&["range", "title"]);
    let current = rank_title(rating);
    for tier in RANK_TIERS.iter().rev() {
        let range = format!("{:.0} - {:.0}", tier.min, tier.max.min(10.0));
        if tier.title == current {
            table.add_row(vec![
                Cell::new(format!("{range} <")),
                Cell::new(tier.title).fg(Color::Yellow).add_attribute(Attribute::Bold),
            ]);
        } else {
            table.add_row(vec![Cell::new(range), Cell::new(tier.title)]);
        }
    }
    table.to_string()
}

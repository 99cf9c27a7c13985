//! Profile rendering: overview card and per-section detail views.

use comfy_table::Cell;
use console::style;
use std::sync::Arc;

use super::table::{list_table, render_history, render_rank_table};
use crate::domain::models::rank::rank_title;
use crate::domain::models::{DetailSection, ProfileRecord};

/// A builder for key-value detail views.
struct DetailView {
    title: String,
    blocks: Vec<Block>,
}

struct Block {
    header: Option<String>,
    fields: Vec<(String, String)>,
    items: Vec<String>,
    text: Option<String>,
}

impl Block {
    fn new(header: Option<String>) -> Self {
        Self { header, fields: vec![], items: vec![], text: None }
    }
}

impl DetailView {
    fn new(title: &str) -> Self {
        Self { title: title.to_string(), blocks: vec![Block::new(None)] }
    }

    fn field(mut self, key: &str, value: &str) -> Self {
        if !value.trim().is_empty() {
            if let Some(block) = self.blocks.last_mut() {
                block.fields.push((key.to_string(), value.to_string()));
            }
        }
        self
    }

    fn field_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    fn section(mut self, header: &str) -> Self {
        self.blocks.push(Block::new(Some(header.to_string())));
        self
    }

    fn item(mut self, text: impl Into<String>) -> Self {
        if let Some(block) = self.blocks.last_mut() {
            block.items.push(text.into());
        }
        self
    }

    fn text(mut self, text: &str) -> Self {
        if let Some(block) = self.blocks.last_mut() {
            block.text = Some(text.trim().to_string());
        }
        self
    }

    fn render(&self) -> String {
        let mut lines = vec![style(&self.title).bold().to_string()];
        let key_width = self
            .blocks
            .iter()
            .flat_map(|b| b.fields.iter())
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(12);

        for block in &self.blocks {
            if let Some(header) = &block.header {
                lines.push(String::new());
                lines.push(style(header).bold().underlined().to_string());
            }
            for (key, value) in &block.fields {
                lines.push(format!("  {:<key_width$}  {value}", style(key).dim()));
            }
            if let Some(text) = &block.text {
                lines.extend(text.lines().map(|l| format!("  {l}")));
            }
            for item in &block.items {
                lines.push(format!("  - {item}"));
            }
        }

        lines.join("\n")
    }
}

fn colorize_rating(rating: f64) -> String {
    let text = format!("{rating:.1}");
    match rating {
        r if r >= 9.0 => style(text).magenta().bold().to_string(),
        r if r >= 7.0 => style(text).green().bold().to_string(),
        r if r >= 4.0 => style(text).yellow().to_string(),
        _ => style(text).red().to_string(),
    }
}

/// Overview card shown when a profile is displayed.
pub fn render_profile(record: &ProfileRecord) -> String {
    let title = match record.original_name.as_deref().filter(|n| !n.trim().is_empty()) {
        Some(original) if original != record.display_name() => {
            format!("{} ({original})", record.display_name())
        }
        _ => record.display_name().to_string(),
    };

    let mut view = DetailView::new(&title)
        .field(
            "Fame index",
            &format!("{} / 10  {}", colorize_rating(record.popularity_rating), rank_title(record.popularity_rating)),
        )
        .field("Nationality", &record.basic_info.nationality)
        .field("Age", &record.basic_info.age);

    if !record.tags.is_empty() {
        view = view.field("Tags", &record.tags.join(", "));
    }

    let stats = &record.total_stats;
    view = view
        .field_opt("Views", stats.views.as_deref())
        .field_opt("Sales", stats.sales.as_deref())
        .field_opt("Followers", stats.followers.as_deref())
        .field_opt("Awards", stats.awards.as_deref());

    view = view.section("Why this rating").text(&record.rating_justification);

    let sections = DetailSection::ALL
        .iter()
        .map(DetailSection::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}\n\n{}", view.render(), style(format!("Sections: {sections}")).dim())
}

/// Detail view of one section of `record`.
pub fn render_section(
    record: &ProfileRecord,
    section: DetailSection,
    history: &[Arc<ProfileRecord>],
) -> String {
    let name = record.display_name();
    match section {
        DetailSection::Basic => {
            let info = &record.basic_info;
            DetailView::new(&format!("{name}: basic information"))
                .field("Name", &record.name)
                .field_opt("Original name", record.original_name.as_deref())
                .field_opt("Stage name", record.stage_name.as_deref())
                .field("Birth date", &info.birth_date)
                .field("Age", &info.age)
                .field("Gender", &info.gender)
                .field("Nationality", &info.nationality)
                .field("Spouse", &info.spouse)
                .field_opt("Height", info.height.as_deref())
                .field_opt("Blood type", info.blood_type.as_deref())
                .field_opt("Facebook", record.social_links.facebook.as_deref())
                .field_opt("Twitter", record.social_links.twitter.as_deref())
                .field_opt("Instagram", record.social_links.instagram.as_deref())
                .render()
        }
        DetailSection::Growth => DetailView::new(&format!("{name}: growth background"))
            .text(&record.growth_background)
            .render(),
        DetailSection::Story => DetailView::new(&format!("{name}: career story"))
            .text(&record.career_story)
            .render(),
        DetailSection::Others => DetailView::new(&format!("{name}: other notes"))
            .text(&record.others)
            .render(),
        DetailSection::Rating => DetailView::new(&format!("{name}: fame index"))
            .field("Rating", &colorize_rating(record.popularity_rating))
            .field("Rank", rank_title(record.popularity_rating))
            .section("Justification")
            .text(&record.rating_justification)
            .render(),
        DetailSection::Stats => {
            let stats = &record.total_stats;
            DetailView::new(&format!("{name}: total stats"))
                .field_opt("Views", stats.views.as_deref())
                .field_opt("Sales", stats.sales.as_deref())
                .field_opt("Followers", stats.followers.as_deref())
                .field_opt("Awards", stats.awards.as_deref())
                .render()
        }
        DetailSection::Works => {
            let mut table = list_table(&["year", "title", "role", "stats"]);
            for work in &record.works {
                table.add_row(vec![
                    Cell::new(&work.year),
                    Cell::new(&work.title),
                    Cell::new(work.role.as_deref().unwrap_or("-")),
                    Cell::new(work.stats.as_deref().unwrap_or("-")),
                ]);
            }
            format!("{}\n{table}", style(format!("{name}: works")).bold())
        }
        DetailSection::Famous => record
            .famous_works
            .iter()
            .fold(DetailView::new(&format!("{name}: famous works")), |view, work| {
                view.item(format!("{}  {}", work.title, style(&work.youtube_url).cyan()))
            })
            .render(),
        DetailSection::Media => {
            let media = &record.featured_media;
            let view = DetailView::new(&format!("{name}: featured {}", media.kind.as_str()))
                .field("Title", &media.title)
                .field("Released", &media.release_date)
                .field("People", &media.related_people.join(", "))
                .section("About")
                .text(&media.description);
            view.render()
        }
        DetailSection::Related => record
            .related_celebrities
            .iter()
            .fold(DetailView::new(&format!("{name}: related people")), |view, person| {
                view.item(format!("{} ({})", person.name, person.relationship))
            })
            .render(),
        DetailSection::Awards => record
            .basic_info
            .awards
            .iter()
            .fold(DetailView::new(&format!("{name}: awards")), |view, award| view.item(award.as_str()))
            .render(),
        DetailSection::RankTable => format!(
            "{}\n{}",
            style("Fame index ranks").bold(),
            render_rank_table(record.popularity_rating)
        ),
        DetailSection::History => render_history(history),
    }
}

//! Sections of a displayed profile that can be opened in a detail view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailSection {
    Basic,
    Growth,
    Story,
    Works,
    Famous,
    Others,
    Media,
    Rating,
    Stats,
    Related,
    Awards,
    RankTable,
    History,
}

impl DetailSection {
    pub const ALL: [Self; 13] = [
        Self::Basic,
        Self::Growth,
        Self::Story,
        Self::Works,
        Self::Famous,
        Self::Others,
        Self::Media,
        Self::Rating,
        Self::Stats,
        Self::Related,
        Self::Awards,
        Self::RankTable,
        Self::History,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Growth => "growth",
            Self::Story => "story",
            Self::Works => "works",
            Self::Famous => "famous",
            Self::Others => "others",
            Self::Media => "media",
            Self::Rating => "rating",
            Self::Stats => "stats",
            Self::Related => "related",
            Self::Awards => "awards",
            Self::RankTable => "rank_table",
            Self::History => "history",
        }
    }
}

impl fmt::Display for DetailSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == wanted)
            .ok_or_else(|| format!("Unknown section: {s}"))
    }
}

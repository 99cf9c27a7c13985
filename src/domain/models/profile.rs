//! Profile record returned by the remote profile service.
//!
//! Field names on the wire are camelCase, matching the response schema the
//! backend is asked to follow. Decoding goes through [`ProfileRecord::from_json`]
//! so a structurally valid but semantically broken payload is rejected at the
//! boundary instead of leaking into the controller.

use serde::{Deserialize, Serialize};

use crate::domain::errors::ProfileError;

/// Highest rating the fame index can assign.
pub const MAX_RATING: f64 = 10.0;

/// Structured fame-index profile for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Identity of the subject; history deduplicates on this, case-insensitively.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_name: Option<String>,
    /// Fame index in `0.0..=10.0`.
    pub popularity_rating: f64,
    pub rating_justification: String,
    #[serde(default)]
    pub total_stats: TotalStats,
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub social_links: SocialLinks,
    pub growth_background: String,
    pub career_story: String,
    #[serde(default)]
    pub works: Vec<Work>,
    #[serde(default)]
    pub famous_works: Vec<FamousWork>,
    pub featured_media: FeaturedMedia,
    #[serde(default)]
    pub related_celebrities: Vec<RelatedCelebrity>,
    #[serde(default)]
    pub others: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Aggregate statistics, all free-form summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub age: String,
    pub nationality: String,
    pub gender: String,
    pub spouse: String,
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default)]
    pub awards: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub title: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamousWork {
    pub title: String,
    pub youtube_url: String,
}

/// Kind of the featured media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Album,
    Movie,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Movie => "movie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedMedia {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub description: String,
    pub release_date: String,
    #[serde(default)]
    pub related_people: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCelebrity {
    pub name: String,
    pub relationship: String,
}

impl ProfileRecord {
    /// Decode and validate a backend payload.
    pub fn from_json(text: &str) -> Result<Self, ProfileError> {
        let record: Self = serde_json::from_str(text)
            .map_err(|e| ProfileError::InvalidPayload(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::InvalidPayload(
                "profile name is empty".to_string(),
            ));
        }

        if !self.popularity_rating.is_finite()
            || !(0.0..=MAX_RATING).contains(&self.popularity_rating)
        {
            return Err(ProfileError::InvalidPayload(format!(
                "popularity rating {} is outside 0..={MAX_RATING}",
                self.popularity_rating
            )));
        }

        Ok(())
    }

    /// Name to show first: the stage name when the backend supplied one.
    pub fn display_name(&self) -> &str {
        self.stage_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// Case-insensitive identity comparison used by history deduplication.
    pub fn same_subject(&self, other_name: &str) -> bool {
        self.name.to_lowercase() == other_name.to_lowercase()
    }
}

//! Display tiers derived from a fame-index rating.

use serde::{Deserialize, Serialize};

/// One band of the rank table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankTier {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
    pub title: &'static str,
}

/// Rank table, lowest band first. The top band's upper bound is padded past
/// 10.0 so a perfect score lands in it.
pub const RANK_TIERS: [RankTier; 10] = [
    RankTier { min: 0.0, max: 1.0, title: "Showbiz Scrap" },
    RankTier { min: 1.0, max: 2.0, title: "Seventh-Rate Act" },
    RankTier { min: 2.0, max: 3.0, title: "Sixth-Rate Act" },
    RankTier { min: 3.0, max: 4.0, title: "Fifth-Rate Act" },
    RankTier { min: 4.0, max: 5.0, title: "Fourth-Rate Act" },
    RankTier { min: 5.0, max: 6.0, title: "Third-Rate Act" },
    RankTier { min: 6.0, max: 7.0, title: "Second-Rate Act" },
    RankTier { min: 7.0, max: 8.0, title: "First-Rate Act" },
    RankTier { min: 8.0, max: 9.0, title: "Top-Tier Star" },
    RankTier { min: 9.0, max: 10.1, title: "Cross-Generation Legend" },
];

/// Tier for a rating. Anything at or above 9.0 is a legend; anything that
/// matches no band (negative, NaN) yields `None`.
pub fn tier_for(rating: f64) -> Option<&'static RankTier> {
    RANK_TIERS
        .iter()
        .find(|tier| rating >= tier.min && rating < tier.max)
        .or_else(|| (rating >= 9.0).then(|| &RANK_TIERS[RANK_TIERS.len() - 1]))
}

/// Title for a rating, `"Unknown"` when no tier matches.
pub fn rank_title(rating: f64) -> &'static str {
    tier_for(rating).map_or("Unknown", |tier| tier.title)
}

pub mod config;
pub mod profile;
pub mod rank;
pub mod section;

pub use config::{BackendConfig, CacheConfig, Config, LoggingConfig, SearchConfig};
pub use profile::{
    BasicInfo, FamousWork, FeaturedMedia, MediaKind, ProfileRecord, RelatedCelebrity,
    SocialLinks, TotalStats, Work, MAX_RATING,
};
pub use rank::{rank_title, tier_for, RankTier, RANK_TIERS};
pub use section::DetailSection;

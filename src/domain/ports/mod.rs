//! Port trait definitions (Hexagonal Architecture)
//!
//! Async interfaces the infrastructure adapters implement:
//! - ProfileService: remote profile and suggestion lookups
//! - CacheStore: durable key-value blob storage
//!
//! The search controller depends only on these traits, so tests can drive it
//! with in-process stubs.

pub mod cache_store;
pub mod profile_service;

pub use cache_store::CacheStore;
pub use profile_service::ProfileService;

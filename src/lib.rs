//! StarPulse - fame index lookups for public figures
//!
//! A search request lifecycle controller in front of a generative-language
//! backend: debounced name suggestions, a cancellable profile fetch tagged
//! with a request token, a synthetic progress signal, a short settle delay
//! before results appear, and a bounded history persisted to a cache store.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the port traits
//! - **Service Layer** (`services`): the search controller and its helpers
//! - **Infrastructure Layer** (`infrastructure`): Gemini client, cache stores,
//!   configuration and logging
//! - **CLI Layer** (`cli`): command-line interface and interactive session
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use starpulse::{MemoryCacheStore, SearchConfig, SearchController};
//!
//! let controller = SearchController::load(
//!     service,
//!     Arc::new(MemoryCacheStore::new()),
//!     SearchConfig::default(),
//!     "starpulse_history",
//! )
//! .await;
//! let token = controller.submit_search("Adele")?;
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{CacheError, ControllerError, ProfileError};
pub use domain::models::{Config, DetailSection, LoggingConfig, ProfileRecord, SearchConfig};
pub use domain::ports::{CacheStore, ProfileService};
pub use infrastructure::cache::{FileCacheStore, MemoryCacheStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::gemini::{GeminiClient, GeminiClientConfig};
pub use services::{ControllerSnapshot, LoadingState, RequestToken, SearchController};

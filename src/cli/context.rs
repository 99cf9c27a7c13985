//! Wiring of configuration, backend client and cache store for commands.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::domain::models::Config;
use crate::domain::ports::{CacheStore, ProfileService};
use crate::infrastructure::cache::FileCacheStore;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::gemini::{GeminiClient, GeminiClientConfig};
use crate::services::{History, SearchController};

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub config: Config,
    store: Arc<FileCacheStore>,
}

impl AppContext {
    /// Load configuration from `config_path`, or from `.starpulse/` when unset.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let store = Arc::new(FileCacheStore::new(&config.cache.dir));
        Self { config, store }
    }

    /// Backend client; fails when no API key can be found.
    pub fn profile_service(&self) -> Result<Arc<dyn ProfileService>> {
        let api_key = ConfigLoader::api_key(&self.config)?;
        let client = GeminiClient::new(GeminiClientConfig::from_backend(&self.config.backend, api_key))
            .context("Failed to create Gemini client")?;
        Ok(Arc::new(client))
    }

    /// Controller over the configured backend and cache store.
    pub async fn controller(&self) -> Result<SearchController> {
        let service = self.profile_service()?;
        Ok(self.controller_with(service).await)
    }

    /// Controller over an explicit backend.
    pub async fn controller_with(&self, service: Arc<dyn ProfileService>) -> SearchController {
        SearchController::load(
            service,
            Arc::clone(&self.store) as Arc<dyn CacheStore>,
            self.config.search.clone(),
            self.config.cache.history_key.clone(),
        )
        .await
    }

    /// Persisted history, read without contacting the backend.
    pub async fn history(&self) -> Result<History> {
        let blob = self
            .store
            .get(&self.config.cache.history_key)
            .await
            .with_context(|| format!("Failed to read history from {}", self.store.dir().display()))?;
        Ok(History::load_or_empty(blob.as_deref(), self.config.search.history_capacity))
    }
}

//! Common test utilities for integration tests
//!
//! Provides a scripted profile service, failing cache store and snapshot
//! helpers shared across integration test files.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use starpulse::domain::errors::{CacheError, ProfileError};
use starpulse::{
    CacheStore, ControllerSnapshot, MemoryCacheStore, ProfileRecord, ProfileService,
    SearchConfig, SearchController,
};

pub const HISTORY_KEY: &str = "starpulse_history";

/// Minimal valid profile record.
pub fn record(name: &str, rating: f64) -> ProfileRecord {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "popularityRating": rating,
        "ratingJustification": format!("{name} is widely known"),
        "basicInfo": {
            "age": "40",
            "nationality": "British",
            "gender": "Female",
            "spouse": "None",
            "birthDate": "1988-05-05"
        },
        "growthBackground": "Grew up in London.",
        "careerStory": "Started singing early.",
        "featuredMedia": {
            "title": "25",
            "type": "album",
            "description": "Third studio album.",
            "releaseDate": "2015-11-20"
        }
    }))
    .expect("fixture record should decode")
}

/// History blob for `names`, most recent first.
pub fn history_blob(names: &[&str]) -> String {
    let records: Vec<ProfileRecord> = names.iter().map(|name| record(name, 7.5)).collect();
    serde_json::to_string(&records).expect("history should encode")
}

/// Scripted answer for one subject.
#[derive(Clone)]
pub enum Scripted {
    Found(f64),
    Transport(String),
    Invalid,
}

/// Profile service with per-subject delays and outcomes.
///
/// Unknown subjects resolve immediately with a rating of 5.0. Successful
/// records carry the requested name verbatim.
pub struct StubProfileService {
    profiles: Mutex<HashMap<String, (Duration, Scripted)>>,
    suggestions: Mutex<HashMap<String, Vec<String>>>,
    suggest_delay: Duration,
    fetch_calls: AtomicUsize,
    suggest_calls: Mutex<Vec<String>>,
}

impl StubProfileService {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            suggestions: Mutex::new(HashMap::new()),
            suggest_delay: Duration::from_millis(50),
            fetch_calls: AtomicUsize::new(0),
            suggest_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_profile(self, name: &str, delay_ms: u64, outcome: Scripted) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(name.to_lowercase(), (Duration::from_millis(delay_ms), outcome));
        self
    }

    pub fn with_suggestions(self, partial: &str, names: &[&str]) -> Self {
        self.suggestions.lock().unwrap().insert(
            partial.to_string(),
            names.iter().map(ToString::to_string).collect(),
        );
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn suggest_calls(&self) -> Vec<String> {
        self.suggest_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileService for StubProfileService {
    async fn suggest(&self, partial: &str) -> Vec<String> {
        self.suggest_calls.lock().unwrap().push(partial.to_string());
        tokio::time::sleep(self.suggest_delay).await;
        self.suggestions
            .lock()
            .unwrap()
            .get(partial)
            .cloned()
            .unwrap_or_default()
    }

    async fn fetch_profile(&self, name: &str) -> Result<ProfileRecord, ProfileError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.profiles.lock().unwrap().get(&name.to_lowercase()).cloned();
        let (delay, outcome) = scripted.unwrap_or((Duration::ZERO, Scripted::Found(5.0)));
        tokio::time::sleep(delay).await;
        match outcome {
            Scripted::Found(rating) => Ok(record(name, rating)),
            Scripted::Transport(message) => Err(ProfileError::Transport(message)),
            Scripted::Invalid => Err(ProfileError::InvalidPayload("missing field".to_string())),
        }
    }
}

/// Cache store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(std::io::Error::other("disk unavailable").into())
    }

    async fn set(&self, _key: &str, _value: String) -> Result<(), CacheError> {
        Err(std::io::Error::other("disk full").into())
    }
}

/// In-memory store whose writes take `write_delay` to land.
pub struct SlowStore {
    inner: MemoryCacheStore,
    write_delay: Duration,
}

impl SlowStore {
    pub fn new(write_delay_ms: u64) -> Self {
        Self {
            inner: MemoryCacheStore::new(),
            write_delay: Duration::from_millis(write_delay_ms),
        }
    }
}

#[async_trait]
impl CacheStore for SlowStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        tokio::time::sleep(self.write_delay).await;
        self.inner.set(key, value).await
    }
}

/// Controller over `service` and an in-memory store seeded with `history`.
pub async fn controller_with(
    service: Arc<StubProfileService>,
    store: Arc<dyn CacheStore>,
) -> SearchController {
    SearchController::load(service, store, SearchConfig::default(), HISTORY_KEY).await
}

pub async fn controller(service: Arc<StubProfileService>) -> (SearchController, Arc<MemoryCacheStore>) {
    let store = Arc::new(MemoryCacheStore::new());
    let controller = controller_with(service, Arc::clone(&store) as Arc<dyn CacheStore>).await;
    (controller, store)
}

/// Wait (in virtual time) for the first snapshot satisfying `done`.
pub async fn wait_for(
    controller: &SearchController,
    done: impl FnMut(&ControllerSnapshot) -> bool,
) -> ControllerSnapshot {
    let mut updates = controller.subscribe();
    let snapshot = tokio::time::timeout(Duration::from_secs(600), updates.wait_for(done))
        .await
        .expect("timed out waiting for controller state")
        .expect("controller closed");
    snapshot.clone()
}

/// Names in the snapshot's history, most recent first.
pub fn history_names(snapshot: &ControllerSnapshot) -> Vec<String> {
    snapshot.history.iter().map(|r| r.name.clone()).collect()
}

pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

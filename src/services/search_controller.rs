//! Search request lifecycle controller.
//!
//! Owns the query text, debounced suggestion lookups, the long-running profile
//! fetch, a synthetic progress signal and the recent-results history. The
//! presentation layer reads [`ControllerSnapshot`]s and calls the intent
//! methods; it never mutates state directly.
//!
//! # Staleness
//!
//! Every profile fetch is tagged with the [`RequestToken`] that was current
//! when it started. Completion handlers compare that token with the current
//! one under the state lock and drop the outcome when they differ. Issuing a
//! new search or cancelling bumps the token, which is the only cancellation a
//! superseded fetch ever gets: its network call keeps running and its result
//! is ignored.
//!
//! # Timers
//!
//! The debounce, progress ticker and settle delay each live in their own
//! `Option<ScheduledTask>` slot. Re-arming or clearing a slot aborts the task
//! that was in it, so at most one timer of each kind is ever pending.
//!
//! History writes run in their own tasks. [`SearchController::dispose`] never
//! aborts them; [`SearchController::close`] disposes and then waits for them.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{ControllerError, ProfileError};
use crate::domain::models::{DetailSection, ProfileRecord, SearchConfig};
use crate::domain::ports::{CacheStore, ProfileService};
use crate::services::history::History;
use crate::services::progress::{LoadingState, ProgressModel, COMPLETE};
use crate::services::scheduled_task::ScheduledTask;

/// Identity of the authoritative profile fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ControllerSnapshot {
    pub token: RequestToken,
    pub query: String,
    pub suggestions: Vec<String>,
    pub suggestions_visible: bool,
    pub loading: LoadingState,
    pub result: Option<Arc<ProfileRecord>>,
    pub error: Option<String>,
    pub history: Vec<Arc<ProfileRecord>>,
    pub detail: Option<DetailSection>,
}

impl ControllerSnapshot {
    pub const fn progress(&self) -> f64 {
        self.loading.progress()
    }

    pub const fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }
}

struct Inner {
    token: RequestToken,
    query: String,
    suggestions: Vec<String>,
    suggestions_visible: bool,
    loading: LoadingState,
    result: Option<Arc<ProfileRecord>>,
    error: Option<String>,
    history: History,
    detail: Option<DetailSection>,
    /// Bumped whenever the debounce slot is cleared or re-armed.
    debounce_generation: u64,
    debounce: Option<ScheduledTask>,
    ticker: Option<ScheduledTask>,
    settle: Option<ScheduledTask>,
    fetch: Option<ScheduledTask>,
    /// History writes that may still be running.
    writes: Vec<JoinHandle<()>>,
    disposed: bool,
}

impl Inner {
    fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            token: self.token,
            query: self.query.clone(),
            suggestions: self.suggestions.clone(),
            suggestions_visible: self.suggestions_visible,
            loading: self.loading,
            result: self.result.clone(),
            error: self.error.clone(),
            history: self.history.entries().to_vec(),
            detail: self.detail,
        }
    }

    fn clear_debounce(&mut self) {
        self.debounce_generation += 1;
        self.debounce = None;
    }

    /// Leave the loading phase and release its timers.
    fn stop_loading(&mut self) {
        self.ticker = None;
        self.settle = None;
        self.loading = LoadingState::Idle;
    }
}

struct Shared {
    state: Mutex<Inner>,
    updates: watch::Sender<ControllerSnapshot>,
    service: Arc<dyn ProfileService>,
    store: Arc<dyn CacheStore>,
    config: SearchConfig,
    progress: ProgressModel,
    history_key: String,
    /// Serializes writes of the history blob.
    persist_lock: tokio::sync::Mutex<()>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.updates.send_replace(inner.snapshot());
    }

    fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.config.debounce_ms)
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(self.config.progress_tick_ms.max(1))
    }

    fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.config.settle_delay_ms)
    }
}

/// Single owned controller for one search box.
///
/// Must be created and used inside a Tokio runtime. Dropping the controller
/// disposes it.
pub struct SearchController {
    shared: Arc<Shared>,
}

impl SearchController {
    /// Create a controller and load the persisted history.
    ///
    /// A missing, unreadable or corrupt history blob yields an empty history.
    pub async fn load(
        service: Arc<dyn ProfileService>,
        store: Arc<dyn CacheStore>,
        config: SearchConfig,
        history_key: impl Into<String>,
    ) -> Self {
        let history_key = history_key.into();
        let blob = match store.get(&history_key).await {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, key = %history_key, "Failed to read stored history");
                None
            }
        };
        let history = History::load_or_empty(blob.as_deref(), config.history_capacity);
        debug!(entries = history.len(), "Loaded search history");

        let inner = Inner {
            token: RequestToken::default(),
            query: String::new(),
            suggestions: Vec::new(),
            suggestions_visible: false,
            loading: LoadingState::Idle,
            result: None,
            error: None,
            history,
            detail: None,
            debounce_generation: 0,
            debounce: None,
            ticker: None,
            settle: None,
            fetch: None,
            writes: Vec::new(),
            disposed: false,
        };
        let (updates, _) = watch::channel(inner.snapshot());

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(inner),
                updates,
                service,
                store,
                progress: ProgressModel::from_config(&config),
                config,
                history_key,
                persist_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> ControllerSnapshot {
        self.shared.updates.borrow().clone()
    }

    /// Receiver that observes a new snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn current_token(&self) -> RequestToken {
        self.shared.lock().token
    }

    /// Start a profile fetch for `name`, superseding any fetch in flight.
    ///
    /// Returns immediately with the token the fetch was issued under.
    #[instrument(skip(self))]
    pub fn submit_search(&self, name: &str) -> Result<RequestToken, ControllerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ControllerError::EmptyQuery);
        }

        let mut inner = self.shared.lock();
        if inner.disposed {
            return Err(ControllerError::Disposed);
        }

        inner.token = inner.token.next();
        let token = inner.token;

        inner.stop_loading();
        inner.loading = LoadingState::started();
        inner.result = None;
        inner.error = None;
        inner.detail = None;
        inner.suggestions.clear();
        inner.suggestions_visible = false;
        inner.clear_debounce();
        inner.query = name.to_string();

        inner.ticker = Some(spawn_ticker(&self.shared, token));
        if let Some(previous) = inner.fetch.take() {
            // Superseded fetches finish on their own and are discarded by token.
            previous.detach();
        }
        inner.fetch = Some(ScheduledTask::spawn(run_fetch(
            Arc::clone(&self.shared),
            token,
            name.to_string(),
        )));

        self.shared.publish(&inner);
        info!(%token, subject = %name, "Search started");
        Ok(token)
    }

    /// Submit the suggestion at `index` of the current list.
    pub fn pick_suggestion(&self, index: usize) -> Result<RequestToken, ControllerError> {
        let name = {
            let inner = self.shared.lock();
            inner
                .suggestions
                .get(index)
                .cloned()
                .ok_or(ControllerError::SuggestionOutOfRange {
                    index,
                    len: inner.suggestions.len(),
                })?
        };
        self.submit_search(&name)
    }

    /// Make any in-flight fetch stale and return to idle.
    pub fn cancel_search(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }
        inner.token = inner.token.next();
        inner.stop_loading();
        self.shared.publish(&inner);
        info!(token = %inner.token, "Search cancelled");
    }

    /// Replace the query text and (re)arm the suggestion debounce.
    pub fn update_query(&self, text: &str) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }
        inner.query = text.to_string();
        inner.clear_debounce();

        let trimmed = text.trim();
        if trimmed.chars().count() < self.shared.config.min_query_chars {
            inner.suggestions.clear();
        } else {
            let generation = inner.debounce_generation;
            inner.debounce = Some(ScheduledTask::after(
                self.shared.debounce_delay(),
                run_suggest(Arc::clone(&self.shared), generation, trimmed.to_string()),
            ));
        }

        self.shared.publish(&inner);
    }

    /// Show a stored result without any network call or token change.
    pub fn select_history_entry(&self, record: Arc<ProfileRecord>) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }
        debug!(subject = %record.name, "Showing history entry");
        inner.result = Some(record);
        self.shared.publish(&inner);
    }

    /// Show the history entry at `index`.
    pub fn select_history_index(&self, index: usize) -> Result<(), ControllerError> {
        let record = {
            let inner = self.shared.lock();
            inner
                .history
                .get(index)
                .cloned()
                .ok_or(ControllerError::HistoryOutOfRange {
                    index,
                    len: inner.history.len(),
                })?
        };
        self.select_history_entry(record);
        Ok(())
    }

    pub fn dismiss_error(&self) {
        let mut inner = self.shared.lock();
        if inner.error.take().is_some() {
            self.shared.publish(&inner);
        }
    }

    pub fn hide_suggestions(&self) {
        self.set_suggestions_visible(false);
    }

    pub fn show_suggestions(&self) {
        self.set_suggestions_visible(true);
    }

    fn set_suggestions_visible(&self, visible: bool) {
        let mut inner = self.shared.lock();
        if inner.suggestions_visible != visible {
            inner.suggestions_visible = visible;
            self.shared.publish(&inner);
        }
    }

    /// Open a detail view of the displayed result. No-op without a result.
    pub fn open_detail(&self, section: DetailSection) {
        let mut inner = self.shared.lock();
        if inner.result.is_some() {
            inner.detail = Some(section);
            self.shared.publish(&inner);
        }
    }

    pub fn close_detail(&self) {
        let mut inner = self.shared.lock();
        if inner.detail.take().is_some() {
            self.shared.publish(&inner);
        }
    }

    /// Tear down every timer and the current fetch. Later intents are ignored.
    pub fn dispose(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.token = inner.token.next();
        inner.stop_loading();
        inner.clear_debounce();
        if let Some(fetch) = inner.fetch.take() {
            fetch.cancel();
        }
        self.shared.publish(&inner);
        debug!("Search controller disposed");
    }

    /// Dispose, then wait until every pending history write has finished.
    pub async fn close(&self) {
        self.dispose();
        let writes = std::mem::take(&mut self.shared.lock().writes);
        for write in writes {
            if let Err(e) = write.await {
                warn!(error = %e, "History write task failed");
            }
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn spawn_ticker(shared: &Arc<Shared>, token: RequestToken) -> ScheduledTask {
    let shared = Arc::clone(shared);
    ScheduledTask::spawn(async move {
        let period = shared.tick_period();
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            let mut inner = shared.lock();
            if inner.token != token {
                break;
            }
            let LoadingState::Loading { progress } = inner.loading else {
                break;
            };
            let next = shared.progress.advance(progress);
            if next > progress {
                inner.loading = LoadingState::Loading { progress: next };
                shared.publish(&inner);
            }
        }
    })
}

async fn run_fetch(shared: Arc<Shared>, token: RequestToken, name: String) {
    match shared.service.fetch_profile(&name).await {
        Ok(record) => commit_success(&shared, token, record),
        Err(err) => commit_failure(&shared, token, &err),
    }
}

fn commit_success(shared: &Arc<Shared>, token: RequestToken, record: ProfileRecord) {
    let mut inner = shared.lock();
    if inner.token != token {
        debug!(%token, current = %inner.token, "Discarding stale profile");
        return;
    }

    inner.ticker = None;
    inner.loading = LoadingState::Loading { progress: COMPLETE };

    let record = Arc::new(record);
    inner.history.upsert(Arc::clone(&record));
    inner.writes.retain(|write| !write.is_finished());
    inner
        .writes
        .push(tokio::spawn(persist_history(Arc::clone(shared))));

    let settled = Arc::clone(shared);
    inner.settle = Some(ScheduledTask::after(shared.settle_delay(), async move {
        publish_settled(&settled, token, record);
    }));

    shared.publish(&inner);
    info!(%token, "Profile fetched");
}

fn publish_settled(shared: &Shared, token: RequestToken, record: Arc<ProfileRecord>) {
    let mut inner = shared.lock();
    if inner.token != token {
        debug!(%token, current = %inner.token, "Search superseded during settle delay");
        return;
    }
    inner.loading = LoadingState::Idle;
    inner.result = Some(record);
    shared.publish(&inner);
}

fn commit_failure(shared: &Shared, token: RequestToken, err: &ProfileError) {
    let mut inner = shared.lock();
    if inner.token != token {
        debug!(%token, error = %err, "Discarding stale failure");
        return;
    }
    warn!(%token, error = %err, "Profile fetch failed");
    inner.stop_loading();
    inner.error = Some(err.user_message());
    shared.publish(&inner);
}

/// Write the latest history to the cache store. Failures are logged only.
async fn persist_history(shared: Arc<Shared>) {
    let _guard = shared.persist_lock.lock().await;
    let blob = shared.lock().history.to_blob();
    let blob = match blob {
        Ok(blob) => blob,
        Err(e) => {
            warn!(error = %e, "Failed to encode history");
            return;
        }
    };
    if let Err(e) = shared.store.set(&shared.history_key, blob).await {
        warn!(error = %e, key = %shared.history_key, "Failed to persist history");
    }
}

async fn run_suggest(shared: Arc<Shared>, generation: u64, query: String) {
    let suggestions = shared.service.suggest(&query).await;
    let mut inner = shared.lock();
    // A keystroke that landed while this task was waiting on the lock.
    if inner.disposed || inner.debounce_generation != generation {
        return;
    }
    debug!(count = suggestions.len(), "Suggestions received");
    inner.suggestions = suggestions;
    inner.suggestions_visible = true;
    shared.publish(&inner);
}

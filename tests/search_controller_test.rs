//! Lifecycle tests for the search controller, run in virtual time.

mod common;

use std::sync::Arc;

use common::{
    controller, controller_with, history_blob, history_names, record, sleep_ms, wait_for,
    FailingStore, Scripted, SlowStore, StubProfileService, HISTORY_KEY,
};
use starpulse::domain::errors::BELOW_THRESHOLD_MESSAGE;
use starpulse::{
    CacheStore, ControllerError, DetailSection, LoadingState, MemoryCacheStore, ProfileRecord,
};

fn seeded_store(names: &[&str]) -> Arc<MemoryCacheStore> {
    Arc::new(MemoryCacheStore::with_entry(HISTORY_KEY, history_blob(names)))
}

async fn stored_names(store: &dyn CacheStore) -> Vec<String> {
    let blob = store.get(HISTORY_KEY).await.unwrap().expect("history persisted");
    let records: Vec<ProfileRecord> = serde_json::from_str(&blob).unwrap();
    records.into_iter().map(|r| r.name).collect()
}

#[tokio::test(start_paused = true)]
async fn test_last_submitted_wins_when_older_resolves_later() {
    let service = Arc::new(
        StubProfileService::new()
            .with_profile("Alpha", 3_000, Scripted::Found(6.0))
            .with_profile("Beta", 1_000, Scripted::Found(8.0)),
    );
    let (controller, store) = controller(Arc::clone(&service)).await;

    controller.submit_search("Alpha").unwrap();
    let beta = controller.submit_search("Beta").unwrap();

    let shown = wait_for(&controller, |s| s.result.is_some()).await;
    assert_eq!(shown.result.as_ref().unwrap().name, "Beta");
    assert_eq!(shown.token, beta);

    // Let the superseded fetch finish.
    sleep_ms(5_000).await;
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.result.as_ref().unwrap().name, "Beta");
    assert_eq!(snapshot.loading, LoadingState::Idle);
    assert_eq!(history_names(&snapshot), vec!["Beta"]);
    assert_eq!(stored_names(store.as_ref()).await, vec!["Beta"]);
    assert_eq!(service.fetch_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_last_submitted_wins_when_older_resolves_first() {
    let service = Arc::new(
        StubProfileService::new()
            .with_profile("Alpha", 1_000, Scripted::Found(6.0))
            .with_profile("Beta", 3_000, Scripted::Found(8.0)),
    );
    let (controller, _store) = controller(service).await;

    controller.submit_search("Alpha").unwrap();
    controller.submit_search("Beta").unwrap();

    sleep_ms(2_000).await;
    let snapshot = controller.snapshot();
    assert!(snapshot.result.is_none(), "stale result must not be shown");
    assert!(snapshot.is_loading());
    assert!(snapshot.history.is_empty());

    let shown = wait_for(&controller, |s| s.result.is_some()).await;
    assert_eq!(shown.result.as_ref().unwrap().name, "Beta");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_then_resolve_leaves_idle_without_result() {
    let service = Arc::new(StubProfileService::new().with_profile("Alpha", 2_000, Scripted::Found(6.0)));
    let (controller, store) = controller(service).await;

    let token = controller.submit_search("Alpha").unwrap();
    sleep_ms(500).await;
    controller.cancel_search();
    assert_ne!(controller.current_token(), token);

    sleep_ms(5_000).await;
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.loading, LoadingState::Idle);
    assert!(snapshot.result.is_none());
    assert!(snapshot.error.is_none());
    assert!(snapshot.history.is_empty());
    assert!(store.get(HISTORY_KEY).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_failure_is_not_surfaced() {
    let service = Arc::new(
        StubProfileService::new().with_profile("Alpha", 1_000, Scripted::Transport("boom".to_string())),
    );
    let (controller, _store) = controller(service).await;

    controller.submit_search("Alpha").unwrap();
    controller.cancel_search();
    sleep_ms(2_000).await;

    assert!(controller.snapshot().error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_short_query_clears_suggestions_immediately() {
    let service = Arc::new(StubProfileService::new().with_suggestions("ad", &["Adele", "Adam Levine"]));
    let (controller, _store) = controller(Arc::clone(&service)).await;

    controller.update_query("ad");
    let shown = wait_for(&controller, |s| s.suggestions_visible).await;
    assert_eq!(shown.suggestions, vec!["Adele", "Adam Levine"]);

    controller.update_query("a");
    assert!(controller.snapshot().suggestions.is_empty());

    sleep_ms(2_000).await;
    assert_eq!(service.suggest_calls(), vec!["ad"]);
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_only_query_counts_trimmed_length() {
    let service = Arc::new(StubProfileService::new());
    let (controller, _store) = controller(Arc::clone(&service)).await;

    controller.update_query("   a   ");
    sleep_ms(2_000).await;
    assert!(service.suggest_calls().is_empty());
    assert_eq!(controller.snapshot().query, "   a   ");
}

#[tokio::test(start_paused = true)]
async fn test_debounce_coalesces_keystrokes() {
    let service = Arc::new(StubProfileService::new().with_suggestions("tayl", &["Taylor Swift"]));
    let (controller, _store) = controller(Arc::clone(&service)).await;

    controller.update_query("ta");
    sleep_ms(200).await;
    controller.update_query("tay");
    sleep_ms(200).await;
    controller.update_query("tayl");
    sleep_ms(499).await;
    assert!(service.suggest_calls().is_empty(), "quiet period not over yet");

    let shown = wait_for(&controller, |s| s.suggestions_visible).await;
    assert_eq!(shown.suggestions, vec!["Taylor Swift"]);
    assert_eq!(service.suggest_calls(), vec!["tayl"]);
}

#[tokio::test(start_paused = true)]
async fn test_submit_cancels_pending_debounce() {
    let service = Arc::new(StubProfileService::new().with_suggestions("adel", &["Adele"]));
    let (controller, _store) = controller(Arc::clone(&service)).await;

    controller.update_query("adel");
    controller.submit_search("Adele").unwrap();
    wait_for(&controller, |s| s.result.is_some()).await;
    sleep_ms(1_000).await;

    assert!(service.suggest_calls().is_empty());
    let snapshot = controller.snapshot();
    assert!(!snapshot.suggestions_visible);
    assert_eq!(snapshot.query, "Adele");
}

#[tokio::test(start_paused = true)]
async fn test_hide_and_show_suggestions() {
    let service = Arc::new(StubProfileService::new().with_suggestions("ad", &["Adele"]));
    let (controller, _store) = controller(service).await;

    controller.update_query("ad");
    wait_for(&controller, |s| s.suggestions_visible).await;

    controller.hide_suggestions();
    let snapshot = controller.snapshot();
    assert!(!snapshot.suggestions_visible);
    assert_eq!(snapshot.suggestions, vec!["Adele"]);

    controller.show_suggestions();
    assert!(controller.snapshot().suggestions_visible);
}

#[tokio::test(start_paused = true)]
async fn test_pick_suggestion_submits_it() {
    let service = Arc::new(StubProfileService::new().with_suggestions("ad", &["Adele", "Adam Levine"]));
    let (controller, _store) = controller(service).await;

    assert_eq!(
        controller.pick_suggestion(0),
        Err(ControllerError::SuggestionOutOfRange { index: 0, len: 0 })
    );

    controller.update_query("ad");
    wait_for(&controller, |s| s.suggestions_visible).await;
    controller.pick_suggestion(1).unwrap();

    let snapshot = controller.snapshot();
    assert!(snapshot.is_loading());
    assert_eq!(snapshot.query, "Adam Levine");
    assert!(snapshot.suggestions.is_empty());

    let shown = wait_for(&controller, |s| s.result.is_some()).await;
    assert_eq!(shown.result.as_ref().unwrap().name, "Adam Levine");
}

#[tokio::test(start_paused = true)]
async fn test_history_dedups_case_insensitively() {
    let service = Arc::new(StubProfileService::new());
    let store = seeded_store(&["Adele", "Drake"]);
    let controller = controller_with(service, Arc::clone(&store) as Arc<dyn CacheStore>).await;
    assert_eq!(history_names(&controller.snapshot()), vec!["Adele", "Drake"]);

    controller.submit_search("Drake").unwrap();
    wait_for(&controller, |s| s.result.is_some()).await;
    assert_eq!(history_names(&controller.snapshot()), vec!["Drake", "Adele"]);

    controller.submit_search("ADELE").unwrap();
    let shown = wait_for(&controller, |s| {
        s.result.as_ref().is_some_and(|r| r.name == "ADELE")
    })
    .await;
    assert_eq!(history_names(&shown), vec!["ADELE", "Drake"]);
    assert_eq!(stored_names(store.as_ref()).await, vec!["ADELE", "Drake"]);
}

#[tokio::test(start_paused = true)]
async fn test_history_is_capped_at_ten_most_recent() {
    let service = Arc::new(StubProfileService::new());
    let (controller, store) = controller(service).await;

    let names: Vec<String> = (1..=12).map(|i| format!("Person {i}")).collect();
    for name in &names {
        controller.submit_search(name).unwrap();
        wait_for(&controller, |s| s.result.as_ref().is_some_and(|r| &r.name == name)).await;
    }

    let expected: Vec<String> = names.iter().rev().take(10).cloned().collect();
    assert_eq!(history_names(&controller.snapshot()), expected);
    assert_eq!(stored_names(store.as_ref()).await, expected);
}

#[tokio::test(start_paused = true)]
async fn test_progress_stays_bounded_and_monotonic() {
    let service = Arc::new(StubProfileService::new().with_profile("Alpha", 30_000, Scripted::Found(7.0)));
    let (controller, _store) = controller(service).await;

    controller.submit_search("Alpha").unwrap();
    assert_eq!(controller.snapshot().progress(), 0.0);

    let mut last = 0.0;
    for _ in 0..250 {
        sleep_ms(100).await;
        let snapshot = controller.snapshot();
        if !snapshot.is_loading() {
            break;
        }
        let progress = snapshot.progress();
        assert!((0.0..=100.0).contains(&progress), "progress {progress} out of range");
        assert!(progress >= last, "progress went from {last} to {progress}");
        if snapshot.result.is_none() && progress < 100.0 {
            assert!(progress <= 99.5);
        }
        last = progress;
    }
    assert!(last > 0.0, "ticker should have advanced");
}

#[tokio::test(start_paused = true)]
async fn test_ticker_stops_at_ceiling() {
    let service = Arc::new(StubProfileService::new().with_profile("Slow", 1_000_000, Scripted::Found(7.0)));
    let (controller, _store) = controller(service).await;

    controller.submit_search("Slow").unwrap();
    sleep_ms(700_000).await;

    let snapshot = controller.snapshot();
    assert!(snapshot.is_loading());
    assert!((snapshot.progress() - 99.5).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_progress_resets_on_new_submission() {
    let service = Arc::new(
        StubProfileService::new()
            .with_profile("Alpha", 10_000, Scripted::Found(7.0))
            .with_profile("Beta", 10_000, Scripted::Found(7.0)),
    );
    let (controller, _store) = controller(service).await;

    controller.submit_search("Alpha").unwrap();
    sleep_ms(3_000).await;
    assert!(controller.snapshot().progress() > 0.0);

    controller.submit_search("Beta").unwrap();
    assert_eq!(controller.snapshot().progress(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_success_completes_progress_before_settle() {
    let service = Arc::new(StubProfileService::new().with_profile("Alpha", 1_000, Scripted::Found(7.0)));
    let (controller, _store) = controller(service).await;

    controller.submit_search("Alpha").unwrap();
    let completed = wait_for(&controller, |s| s.progress() >= 100.0).await;
    assert!(completed.is_loading());
    assert!(completed.result.is_none(), "result waits for the settle delay");
    assert_eq!(history_names(&completed), vec!["Alpha"]);

    sleep_ms(599).await;
    assert!(controller.snapshot().result.is_none());

    let shown = wait_for(&controller, |s| s.result.is_some()).await;
    assert_eq!(shown.loading, LoadingState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_settle_delay_rechecks_token() {
    let service = Arc::new(
        StubProfileService::new()
            .with_profile("Alpha", 1_000, Scripted::Found(7.0))
            .with_profile("Beta", 5_000, Scripted::Found(8.0)),
    );
    let (controller, _store) = controller(service).await;

    controller.submit_search("Alpha").unwrap();
    wait_for(&controller, |s| s.progress() >= 100.0).await;

    let beta = controller.submit_search("Beta").unwrap();
    sleep_ms(1_000).await;

    let snapshot = controller.snapshot();
    assert!(snapshot.result.is_none(), "settled Alpha must not surface");
    assert_eq!(snapshot.token, beta);
    assert!(snapshot.is_loading());
    // Alpha was committed to history when it succeeded.
    assert_eq!(history_names(&snapshot), vec!["Alpha"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_settle_discards_result() {
    let service = Arc::new(StubProfileService::new().with_profile("Alpha", 1_000, Scripted::Found(7.0)));
    let (controller, _store) = controller(service).await;

    controller.submit_search("Alpha").unwrap();
    wait_for(&controller, |s| s.progress() >= 100.0).await;
    controller.cancel_search();
    sleep_ms(1_000).await;

    let snapshot = controller.snapshot();
    assert!(snapshot.result.is_none());
    assert_eq!(snapshot.loading, LoadingState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_failure_surfaces_message_and_keeps_history() {
    let service = Arc::new(
        StubProfileService::new()
            .with_profile("Nobody", 500, Scripted::Transport("quota exhausted".to_string()))
            .with_profile("Garbage", 500, Scripted::Invalid),
    );
    let store = seeded_store(&["Adele"]);
    let controller = controller_with(service, store as Arc<dyn CacheStore>).await;

    controller.submit_search("Nobody").unwrap();
    let failed = wait_for(&controller, |s| s.error.is_some()).await;
    assert_eq!(failed.error.as_deref(), Some("quota exhausted"));
    assert_eq!(failed.loading, LoadingState::Idle);
    assert!(failed.result.is_none());
    assert_eq!(history_names(&failed), vec!["Adele"]);

    controller.dismiss_error();
    assert!(controller.snapshot().error.is_none());

    controller.submit_search("Garbage").unwrap();
    let failed = wait_for(&controller, |s| s.error.is_some()).await;
    assert_eq!(failed.error.as_deref(), Some(BELOW_THRESHOLD_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn test_submission_clears_previous_error_and_result() {
    let service = Arc::new(
        StubProfileService::new()
            .with_profile("Nobody", 100, Scripted::Transport("nope".to_string()))
            .with_profile("Alpha", 1_000, Scripted::Found(7.0)),
    );
    let (controller, _store) = controller(service).await;

    controller.submit_search("Nobody").unwrap();
    wait_for(&controller, |s| s.error.is_some()).await;

    controller.submit_search("Alpha").unwrap();
    let snapshot = controller.snapshot();
    assert!(snapshot.error.is_none());
    assert!(snapshot.result.is_none());
    assert_eq!(snapshot.progress(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_empty_submission_is_rejected() {
    let service = Arc::new(StubProfileService::new());
    let (controller, _store) = controller(Arc::clone(&service)).await;
    let before = controller.current_token();

    assert_eq!(controller.submit_search("   "), Err(ControllerError::EmptyQuery));
    assert_eq!(controller.current_token(), before);
    assert_eq!(controller.snapshot().loading, LoadingState::Idle);
    assert_eq!(service.fetch_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_corrupted_history_loads_empty() {
    let service = Arc::new(StubProfileService::new());
    let store = Arc::new(MemoryCacheStore::with_entry(HISTORY_KEY, "{not json"));
    let controller = controller_with(service, Arc::clone(&store) as Arc<dyn CacheStore>).await;
    assert!(controller.snapshot().history.is_empty());

    controller.submit_search("Adele").unwrap();
    wait_for(&controller, |s| s.result.is_some()).await;
    assert_eq!(stored_names(store.as_ref()).await, vec!["Adele"]);
}

#[tokio::test(start_paused = true)]
async fn test_select_history_entry_skips_backend() {
    let service = Arc::new(StubProfileService::new());
    let store = seeded_store(&["Adele", "Drake"]);
    let controller = controller_with(Arc::clone(&service), store as Arc<dyn CacheStore>).await;
    let before = controller.current_token();

    controller.select_history_index(1).unwrap();
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.result.as_ref().unwrap().name, "Drake");
    assert_eq!(snapshot.token, before);
    assert_eq!(snapshot.loading, LoadingState::Idle);

    controller.select_history_entry(Arc::new(record("Elsewhere", 3.0)));
    assert_eq!(controller.snapshot().result.as_ref().unwrap().name, "Elsewhere");

    assert_eq!(
        controller.select_history_index(5),
        Err(ControllerError::HistoryOutOfRange { index: 5, len: 2 })
    );
    assert_eq!(controller.current_token(), before);
    assert_eq!(service.fetch_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_persistence_failure_does_not_block_display() {
    let service = Arc::new(StubProfileService::new());
    let controller = controller_with(service, Arc::new(FailingStore)).await;
    assert!(controller.snapshot().history.is_empty());

    controller.submit_search("Adele").unwrap();
    let shown = wait_for(&controller, |s| s.result.is_some()).await;
    assert_eq!(shown.result.as_ref().unwrap().name, "Adele");
    assert_eq!(history_names(&shown), vec!["Adele"]);
    assert!(shown.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_detail_view_requires_result() {
    let service = Arc::new(StubProfileService::new());
    let (controller, _store) = controller(service).await;

    controller.open_detail(DetailSection::Story);
    assert!(controller.snapshot().detail.is_none());

    controller.submit_search("Adele").unwrap();
    wait_for(&controller, |s| s.result.is_some()).await;
    controller.open_detail(DetailSection::Story);
    assert_eq!(controller.snapshot().detail, Some(DetailSection::Story));

    controller.close_detail();
    assert!(controller.snapshot().detail.is_none());

    controller.open_detail(DetailSection::Works);
    controller.submit_search("Drake").unwrap();
    assert!(controller.snapshot().detail.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_dispose_stops_everything() {
    let service = Arc::new(
        StubProfileService::new()
            .with_profile("Alpha", 2_000, Scripted::Found(7.0))
            .with_suggestions("ad", &["Adele"]),
    );
    let (controller, store) = controller(Arc::clone(&service)).await;

    controller.update_query("ad");
    controller.submit_search("Alpha").unwrap();
    controller.dispose();

    assert_eq!(controller.submit_search("Beta"), Err(ControllerError::Disposed));
    sleep_ms(5_000).await;

    let snapshot = controller.snapshot();
    assert!(snapshot.result.is_none());
    assert_eq!(snapshot.loading, LoadingState::Idle);
    assert!(store.get(HISTORY_KEY).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_dispose_after_success_keeps_history_write() {
    let service = Arc::new(StubProfileService::new().with_profile("Adele", 200, Scripted::Found(9.0)));
    let store = Arc::new(SlowStore::new(1_000));
    let controller = controller_with(service, Arc::clone(&store) as Arc<dyn CacheStore>).await;

    controller.submit_search("Adele").unwrap();
    let shown = wait_for(&controller, |s| s.result.is_some()).await;
    assert_eq!(history_names(&shown), vec!["Adele"]);
    controller.dispose();

    sleep_ms(10_000).await;
    assert_eq!(stored_names(store.as_ref()).await, vec!["Adele"]);
}

#[tokio::test(start_paused = true)]
async fn test_close_waits_for_history_write() {
    let service = Arc::new(StubProfileService::new().with_profile("Adele", 200, Scripted::Found(9.0)));
    let store = Arc::new(SlowStore::new(1_000));
    let controller = controller_with(service, Arc::clone(&store) as Arc<dyn CacheStore>).await;

    controller.submit_search("Adele").unwrap();
    wait_for(&controller, |s| s.result.is_some()).await;
    controller.close().await;

    assert_eq!(stored_names(store.as_ref()).await, vec!["Adele"]);
    assert_eq!(controller.submit_search("Drake"), Err(ControllerError::Disposed));
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_observe_changes() {
    let service = Arc::new(StubProfileService::new().with_profile("Alpha", 1_000, Scripted::Found(7.0)));
    let (controller, _store) = controller(service).await;
    let mut updates = controller.subscribe();

    let token = controller.submit_search("Alpha").unwrap();
    updates.changed().await.unwrap();
    let seen = updates.borrow_and_update().clone();
    assert_eq!(seen.token, token);
    assert!(seen.is_loading());
}

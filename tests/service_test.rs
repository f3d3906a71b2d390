// End-to-end service tests against an in-memory GameApi stub.
//
// The stub stands in for the remote game API; virtual (paused) time drives
// the per-character clocks and the auto-gather supervisor deterministically.

use artifex::api::{ActionAck, ApiError, GameApi, RosterCharacter, BLOCKED_STATUS};
use artifex::config::ArtifexConfig;
use artifex::notify::Severity;
use artifex::service::CharacterService;
use artifex::state::CharacterSnapshot;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Stub API ─────────────────────────────────────────────────────────────────

/// Offline stub: fetches fail, actions succeed with scripted cooldowns.
struct StubApi {
    gather_calls: AtomicUsize,
    /// Cooldown returned by each successful gather
    gather_cooldown: u32,
    /// Reject with 497 once this many gathers have gone through
    gather_blocked_after: Option<usize>,
    move_cooldown: u32,
}

impl StubApi {
    fn new() -> Self {
        Self {
            gather_calls: AtomicUsize::new(0),
            gather_cooldown: 0,
            gather_blocked_after: None,
            move_cooldown: 10,
        }
    }

    fn gather_count(&self) -> usize {
        self.gather_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameApi for StubApi {
    async fn fetch_roster(&self) -> Result<Vec<RosterCharacter>, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }

    async fn fetch_character(&self, _name: &str) -> Result<CharacterSnapshot, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }

    async fn move_character(&self, _: &str, _: i32, _: i32) -> Result<ActionAck, ApiError> {
        Ok(ActionAck {
            cooldown_seconds: self.move_cooldown,
        })
    }

    async fn gather(&self, _: &str) -> Result<ActionAck, ApiError> {
        let served = self.gather_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.gather_blocked_after {
            if served >= limit {
                return Err(ApiError::Blocked {
                    status: BLOCKED_STATUS,
                });
            }
        }
        Ok(ActionAck {
            cooldown_seconds: self.gather_cooldown,
        })
    }

    async fn craft(&self, _: &str, _: &str, _: i32) -> Result<ActionAck, ApiError> {
        Ok(ActionAck { cooldown_seconds: 5 })
    }
}

fn service_with(stub: Arc<StubApi>) -> CharacterService {
    CharacterService::new(stub, ArtifexConfig::default())
}

/// Let spawned tasks run at the current virtual instant.
async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn offline_initialize_seeds_demo_roster() {
    let service = service_with(Arc::new(StubApi::new()));
    let mut notifications = service.subscribe_notifications();
    let mut roster_events = service.subscribe_roster();

    service.initialize().await;

    let mut names = service.character_names();
    names.sort();
    assert_eq!(names, vec!["Goober", "Izzy", "pancake"]);

    let pancake = service.character("pancake").unwrap();
    assert_eq!(pancake.level, 10);
    assert_eq!((pancake.x, pancake.y), (100, 200));

    // The failed roster fetch surfaced exactly one error notification
    let mut severities = Vec::new();
    while let Ok(n) = notifications.try_recv() {
        severities.push((n.severity, n.title));
    }
    assert_eq!(
        severities,
        vec![(Severity::Error, "Fetch Characters".to_string())]
    );

    // Observers heard about the roster even though the fetch failed
    assert!(roster_events.try_recv().is_ok());

    service.shutdown();
}

#[tokio::test(start_paused = true)]
async fn move_cooldown_counts_down_and_unlocks() {
    let service = service_with(Arc::new(StubApi::new()));
    service.initialize().await;

    assert!(!service.is_action_locked("pancake"));

    service.trigger_move("pancake", 5, 5).await.unwrap();
    assert!(service.is_action_locked("pancake"));
    assert_eq!(service.cooldown_progress("pancake"), 0.0);

    // Countdown removes one second every two virtual seconds
    tokio::time::sleep(Duration::from_millis(8100)).await;
    settle().await;
    assert!(service.is_action_locked("pancake"));
    assert!((service.cooldown_progress("pancake") - 0.4).abs() < 1e-9);

    tokio::time::sleep(Duration::from_millis(12_000)).await;
    settle().await;
    assert!(!service.is_action_locked("pancake"));
    assert_eq!(service.cooldown_progress("pancake"), 1.0);

    service.shutdown();
}

#[tokio::test(start_paused = true)]
async fn auto_gather_fires_immediately_then_uses_fallback_delay() {
    let stub = Arc::new(StubApi::new()); // gather_cooldown = 0: no usable cooldown
    let service = service_with(Arc::clone(&stub));
    service.initialize().await;

    assert!(service.toggle_auto_gather("pancake"));
    settle().await;

    // First gather goes out with no initial wait
    assert_eq!(stub.gather_count(), 1);

    // Next iterations are paced by the 1s fallback delay
    tokio::time::sleep(Duration::from_millis(1050)).await;
    settle().await;
    assert_eq!(stub.gather_count(), 2);

    tokio::time::sleep(Duration::from_millis(1050)).await;
    settle().await;
    assert_eq!(stub.gather_count(), 3);

    service.shutdown();
}

#[tokio::test(start_paused = true)]
async fn toggling_off_stops_dispatching() {
    let stub = Arc::new(StubApi::new());
    let service = service_with(Arc::clone(&stub));
    service.initialize().await;

    service.toggle_auto_gather("pancake");
    settle().await;
    assert!(service.auto_gather_enabled("pancake"));

    // Turn it off while the loop sleeps between iterations
    assert!(!service.toggle_auto_gather("pancake"));
    let count_at_toggle_off = stub.gather_count();

    tokio::time::sleep(Duration::from_secs(10)).await;
    settle().await;

    assert_eq!(stub.gather_count(), count_at_toggle_off);
    assert!(!service.auto_gather_enabled("pancake"));

    service.shutdown();
}

#[tokio::test(start_paused = true)]
async fn blocked_gather_disables_auto_and_stops_loop() {
    let stub = Arc::new(StubApi {
        gather_calls: AtomicUsize::new(0),
        gather_cooldown: 0,
        gather_blocked_after: Some(2),
        move_cooldown: 10,
    });
    let service = service_with(Arc::clone(&stub));
    service.initialize().await;

    service.toggle_auto_gather("pancake");
    settle().await;

    // Two successes one fallback-delay apart, then the 497 rejection
    tokio::time::sleep(Duration::from_secs(5)).await;
    settle().await;

    assert_eq!(stub.gather_count(), 3);
    assert!(!service.auto_gather_enabled("pancake"));

    // The loop is gone: nothing further is dispatched
    tokio::time::sleep(Duration::from_secs(10)).await;
    settle().await;
    assert_eq!(stub.gather_count(), 3);

    service.shutdown();
}

#[tokio::test(start_paused = true)]
async fn auto_gather_waits_out_returned_cooldowns() {
    let stub = Arc::new(StubApi {
        gather_calls: AtomicUsize::new(0),
        gather_cooldown: 5,
        gather_blocked_after: None,
        move_cooldown: 10,
    });
    let service = service_with(Arc::clone(&stub));
    service.initialize().await;

    service.toggle_auto_gather("pancake");
    settle().await;
    assert_eq!(stub.gather_count(), 1);

    // The loop sleeps the full 5s cooldown, not the 1s fallback
    tokio::time::sleep(Duration::from_millis(1500)).await;
    settle().await;
    assert_eq!(stub.gather_count(), 1);

    tokio::time::sleep(Duration::from_millis(4000)).await;
    settle().await;
    assert_eq!(stub.gather_count(), 2);

    service.shutdown();
}

#[tokio::test(start_paused = true)]
async fn transport_failure_on_single_fetch_swaps_in_demo_data() {
    let service = service_with(Arc::new(StubApi::new()));
    service.initialize().await;

    let before = service.character("pancake").unwrap();
    assert_eq!(before.account, ""); // seeded row, never fully fetched

    service.fetch_character_data("pancake").await;

    let after = service.character("pancake").unwrap();
    assert_eq!(after.account, "demo_account");
    // Demo data keeps the last known position
    assert_eq!((after.x, after.y), (100, 200));
    assert_eq!(after.inventory.len(), 6);

    // Reproducible within the run
    service.fetch_character_data("pancake").await;
    let again = service.character("pancake").unwrap();
    assert_eq!(after, again);

    service.shutdown();
}

#[tokio::test(start_paused = true)]
async fn cooldowns_are_independent_across_characters() {
    let service = service_with(Arc::new(StubApi::new()));
    service.initialize().await;

    service.trigger_move("pancake", 1, 1).await.unwrap();

    assert!(service.is_action_locked("pancake"));
    assert!(!service.is_action_locked("Izzy"));
    assert!(!service.is_action_locked("Goober"));

    service.shutdown();
}

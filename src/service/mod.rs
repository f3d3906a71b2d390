// Service facade for the presentation layer

use crate::action::{ActionDispatcher, AutoGather};
use crate::api::{ApiError, GameApi};
use crate::config::ArtifexConfig;
use crate::fallback;
use crate::notify::{Notification, Notifier, Severity};
use crate::scheduler::Scheduler;
use crate::state::{CharacterSnapshot, CooldownChanged, Roster, RosterChanged};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::info;

/// Front door for everything the presentation layer needs.
///
/// Owns the roster, the per-character clock pairs, the action dispatcher and
/// the auto-gather supervisor. Every method is safe to call concurrently;
/// no failure here is fatal to the process.
pub struct CharacterService {
    api: Arc<dyn GameApi>,
    roster: Arc<Roster>,
    scheduler: Scheduler,
    dispatcher: ActionDispatcher,
    auto: AutoGather,
    notifier: Notifier,
    config: ArtifexConfig,
}

impl CharacterService {
    pub fn new(api: Arc<dyn GameApi>, config: ArtifexConfig) -> Self {
        let roster = Arc::new(Roster::new());
        let notifier = Notifier::new();
        let scheduler = Scheduler::new(
            Arc::clone(&api),
            Arc::clone(&roster),
            config.scheduler.clone(),
        );
        let dispatcher = ActionDispatcher::new(
            Arc::clone(&api),
            Arc::clone(&roster),
            notifier.clone(),
        );
        let auto = AutoGather::new(
            dispatcher.clone(),
            Arc::clone(&roster),
            Duration::from_millis(config.auto.fallback_delay_ms),
        );
        Self {
            api,
            roster,
            scheduler,
            dispatcher,
            auto,
            notifier,
            config,
        }
    }

    /// Seed the demo roster, start its clocks, then pull the live roster.
    pub async fn initialize(&self) {
        for demo in &self.config.roster.demo_characters {
            let snapshot = CharacterSnapshot {
                name: demo.name.clone(),
                level: demo.level,
                x: demo.x,
                y: demo.y,
                ..Default::default()
            };
            if self.roster.ensure(snapshot) {
                self.scheduler.ensure_clocks(&demo.name);
            }
        }
        self.fetch_all_characters().await;
    }

    /// Refresh the roster from the remote source.
    ///
    /// Known characters get position patches, new ones are created together
    /// with their clock pair. Characters are never removed; a failed fetch
    /// falls back to the demo roster so the cached view stays populated.
    pub async fn fetch_all_characters(&self) {
        match self.api.fetch_roster().await {
            Ok(entries) => {
                for entry in entries {
                    if self.roster.contains(&entry.name) {
                        self.roster.patch_position(&entry.name, entry.x, entry.y);
                    } else {
                        let snapshot = CharacterSnapshot {
                            name: entry.name.clone(),
                            x: entry.x,
                            y: entry.y,
                            ..Default::default()
                        };
                        self.roster.ensure(snapshot);
                        self.scheduler.ensure_clocks(&entry.name);
                    }
                }
            }
            Err(ApiError::ExpiredToken) => {
                self.notifier.notify(
                    Severity::Warning,
                    "Authentication",
                    "Token is expired. Using demo characters.",
                );
                self.seed_missing_demo_characters();
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Error,
                    "Fetch Characters",
                    format!("API Error: {}", err),
                );
                self.seed_missing_demo_characters();
            }
        }
        // Observers always hear back, even when the fetch failed
        self.roster.announce_all();
    }

    /// Replace `name`'s snapshot with a full remote record.
    ///
    /// An expired credential or an unreachable remote swaps in synthetic demo
    /// data instead, so the cached snapshot is never left stale-and-wrong.
    pub async fn fetch_character_data(&self, name: &str) {
        match self.api.fetch_character(name).await {
            Ok(snapshot) => {
                self.roster.replace_snapshot(snapshot);
                self.scheduler.ensure_clocks(name);
            }
            Err(ApiError::ExpiredToken) => {
                self.notifier.notify(
                    Severity::Warning,
                    "Authentication",
                    "Token is expired. Using demo character data.",
                );
                self.apply_demo_snapshot(name);
            }
            Err(err @ ApiError::Transport(_)) => {
                self.notifier.notify(
                    Severity::Error,
                    "Fetch Character Data",
                    format!("Error: {}", err),
                );
                self.apply_demo_snapshot(name);
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Error,
                    "Fetch Character Data",
                    format!("Failed: {}", err),
                );
            }
        }
        // Observers always hear back, even when nothing was replaced
        self.roster.announce_all();
    }

    /// Fallback path: make sure every configured demo character exists, with
    /// synthetic data for any the roster has never seen.
    fn seed_missing_demo_characters(&self) {
        for demo in &self.config.roster.demo_characters {
            if !self.roster.contains(&demo.name) {
                let mut snapshot = fallback::demo_snapshot(&demo.name);
                snapshot.level = demo.level;
                snapshot.x = demo.x;
                snapshot.y = demo.y;
                self.roster.ensure(snapshot);
                self.scheduler.ensure_clocks(&demo.name);
            }
        }
    }

    // Demo data keeps the last known position
    fn apply_demo_snapshot(&self, name: &str) {
        let mut snapshot = fallback::demo_snapshot(name);
        if let Some(existing) = self.roster.snapshot(name) {
            snapshot.x = existing.x;
            snapshot.y = existing.y;
        }
        self.roster.replace_snapshot(snapshot);
        self.scheduler.ensure_clocks(name);
    }

    /// Move `name` to `(x, y)`.
    pub async fn trigger_move(&self, name: &str, x: i32, y: i32) -> Result<u32, ApiError> {
        self.dispatcher.dispatch_move(name, x, y).await
    }

    /// Gather at `name`'s current position.
    pub async fn trigger_gather(&self, name: &str) -> Result<u32, ApiError> {
        self.dispatcher.dispatch_gather(name).await
    }

    /// Craft `quantity` of item `code` with `name`.
    pub async fn trigger_craft(
        &self,
        name: &str,
        code: &str,
        quantity: i32,
    ) -> Result<u32, ApiError> {
        self.dispatcher.dispatch_craft(name, code, quantity).await
    }

    /// Flip auto-gather for `name`; returns the new flag value.
    pub fn toggle_auto_gather(&self, name: &str) -> bool {
        self.auto.toggle(name)
    }

    pub fn auto_gather_enabled(&self, name: &str) -> bool {
        self.roster.auto_gather_enabled(name)
    }

    /// True while `name`'s cooldown is still running.
    pub fn is_action_locked(&self, name: &str) -> bool {
        self.roster.is_action_locked(name)
    }

    /// Elapsed cooldown fraction in [0, 1].
    pub fn cooldown_progress(&self, name: &str) -> f64 {
        self.roster.cooldown(name).1
    }

    pub fn character_names(&self) -> Vec<String> {
        self.roster.names()
    }

    pub fn character(&self, name: &str) -> Option<CharacterSnapshot> {
        self.roster.snapshot(name)
    }

    pub fn subscribe_roster(&self) -> broadcast::Receiver<RosterChanged> {
        self.roster.subscribe_roster()
    }

    pub fn subscribe_cooldowns(&self) -> broadcast::Receiver<CooldownChanged> {
        self.roster.subscribe_cooldowns()
    }

    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// Stop every background task. Called once at process shutdown.
    pub fn shutdown(&self) {
        self.auto.shutdown();
        self.scheduler.shutdown();
        info!("Character service stopped");
    }
}

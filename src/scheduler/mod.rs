// Per-character clock pairs

use crate::api::GameApi;
use crate::config::SchedulerConfig;
use crate::state::Roster;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};

/// The pair of perpetual clocks backing one character.
struct ClockHandles {
    position: JoinHandle<()>,
    countdown: JoinHandle<()>,
}

/// Spawns and owns the per-character clock pairs.
///
/// Each character gets one position-refresh clock and one cooldown-countdown
/// clock, created when the character first becomes known and aborted only at
/// shutdown. Characters never share a timer, so a slow fetch for one never
/// stalls another.
pub struct Scheduler {
    api: Arc<dyn GameApi>,
    roster: Arc<Roster>,
    config: SchedulerConfig,
    clocks: DashMap<String, ClockHandles>,
}

impl Scheduler {
    pub fn new(api: Arc<dyn GameApi>, roster: Arc<Roster>, config: SchedulerConfig) -> Self {
        Self {
            api,
            roster,
            config,
            clocks: DashMap::new(),
        }
    }

    /// Start the clock pair for `name` if it isn't running yet.
    pub fn ensure_clocks(&self, name: &str) {
        if self.clocks.contains_key(name) {
            return;
        }
        // entry() so two concurrent callers can't double-spawn
        self.clocks.entry(name.to_string()).or_insert_with(|| {
            debug!(character = %name, "Starting clock pair");
            ClockHandles {
                position: self.spawn_position_clock(name),
                countdown: self.spawn_countdown_clock(name),
            }
        });
    }

    fn spawn_position_clock(&self, name: &str) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let roster = Arc::clone(&self.roster);
        let period = Duration::from_millis(self.config.position_refresh_ms);
        let name = name.to_string();

        tokio::spawn(async move {
            let mut timer = interval(period);
            timer.tick().await; // consume the immediate first tick
            loop {
                timer.tick().await;
                match api.fetch_character(&name).await {
                    Ok(snapshot) => roster.patch_position(&name, snapshot.x, snapshot.y),
                    Err(err) => {
                        // Cached position stays as-is; the next tick retries
                        debug!(character = %name, error = %err, "Position refresh failed");
                    }
                }
            }
        })
    }

    fn spawn_countdown_clock(&self, name: &str) -> JoinHandle<()> {
        let roster = Arc::clone(&self.roster);
        let period = Duration::from_millis(self.config.cooldown_tick_ms);
        let step = self.config.cooldown_decrement_seconds;
        let name = name.to_string();

        tokio::spawn(async move {
            let mut timer = interval(period);
            timer.tick().await;
            loop {
                timer.tick().await;
                roster.tick_cooldown(&name, step);
            }
        })
    }

    /// Number of characters with a running clock pair.
    pub fn clock_count(&self) -> usize {
        self.clocks.len()
    }

    /// Abort every clock (process shutdown).
    pub fn shutdown(&self) {
        for entry in self.clocks.iter() {
            entry.value().position.abort();
            entry.value().countdown.abort();
        }
        self.clocks.clear();
        info!("Character clocks stopped");
    }
}

use crate::action::ActionDispatcher;
use crate::api::ApiError;
use crate::state::Roster;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Per-character auto-gather supervisor.
///
/// Each enabled character runs one loop task: gather, wait out the returned
/// cooldown, re-check the flag, repeat. The flag is only observed at
/// iteration boundaries; an in-flight gather always completes. The loop
/// returns to idle when the flag is cleared or the server rejects the gather
/// as blocked.
pub struct AutoGather {
    dispatcher: ActionDispatcher,
    roster: Arc<Roster>,
    fallback_delay: Duration,
    loops: Arc<DashMap<String, JoinHandle<()>>>,
}

impl AutoGather {
    pub fn new(dispatcher: ActionDispatcher, roster: Arc<Roster>, fallback_delay: Duration) -> Self {
        Self {
            dispatcher,
            roster,
            fallback_delay,
            loops: Arc::new(DashMap::new()),
        }
    }

    /// Flip the character's flag; an off→on transition starts the loop.
    /// Returns the new flag value.
    pub fn toggle(&self, name: &str) -> bool {
        let enabled = self.roster.toggle_auto_gather(name);
        if enabled {
            self.spawn_loop(name);
        }
        enabled
    }

    fn spawn_loop(&self, name: &str) {
        // A still-live loop from a fast off→on flip keeps serving the
        // character; don't start a second one.
        if let Some(existing) = self.loops.get(name) {
            if !existing.is_finished() {
                return;
            }
        }

        let dispatcher = self.dispatcher.clone();
        let roster = Arc::clone(&self.roster);
        let loops = Arc::clone(&self.loops);
        let fallback_delay = self.fallback_delay;
        let name = name.to_string();
        let key = name.clone();

        let handle = tokio::spawn(async move {
            info!(character = %name, "Auto-gather started");
            loop {
                if !roster.auto_gather_enabled(&name) {
                    break;
                }
                match dispatcher.dispatch_gather(&name).await {
                    // The dispatcher already cleared the flag; skip the wait
                    Err(ApiError::Blocked { .. }) => break,
                    Ok(_) => {}
                    Err(err) => {
                        debug!(character = %name, error = %err, "Gather failed, looping continues");
                    }
                }
                let (remaining, _) = roster.cooldown(&name);
                let delay = if remaining > 0 {
                    Duration::from_secs(u64::from(remaining))
                } else {
                    fallback_delay
                };
                tokio::time::sleep(delay).await;
            }
            info!(character = %name, "Auto-gather stopped");
            loops.remove(&name);
        });

        self.loops.insert(key, handle);
    }

    /// Abort every running loop (process shutdown).
    pub fn shutdown(&self) {
        for entry in self.loops.iter() {
            entry.value().abort();
        }
        self.loops.clear();
    }
}

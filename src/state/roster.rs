use crate::state::character::CharacterSnapshot;
use crate::state::cooldown::CooldownState;
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

/// Broadcast when a snapshot is created or updated.
///
/// `character` is None for bulk changes (a full roster refresh); consumers
/// re-read through the accessors either way.
#[derive(Clone, Debug, Serialize)]
pub struct RosterChanged {
    pub character: Option<String>,
}

/// Broadcast on every effective cooldown mutation.
#[derive(Clone, Debug, Serialize)]
pub struct CooldownChanged {
    pub character: String,
    pub remaining_seconds: u32,
    pub progress: f64,
}

/// Per-character row: snapshot, cooldown, and the auto-gather flag live and
/// die together, so a character known to the roster always has cooldown
/// state and vice versa.
struct CharacterEntry {
    snapshot: CharacterSnapshot,
    cooldown: CooldownState,
    auto_gather: bool,
}

impl CharacterEntry {
    fn new(snapshot: CharacterSnapshot) -> Self {
        Self {
            snapshot,
            cooldown: CooldownState::default(),
            auto_gather: false,
        }
    }
}

/// In-memory roster of known characters.
///
/// Rows are keyed by character name and never removed; all mutation is
/// per-row, so operations on different characters never contend.
pub struct Roster {
    entries: DashMap<String, CharacterEntry>,
    roster_tx: broadcast::Sender<RosterChanged>,
    cooldown_tx: broadcast::Sender<CooldownChanged>,
}

impl Roster {
    pub fn new() -> Self {
        let (roster_tx, _) = broadcast::channel(256);
        let (cooldown_tx, _) = broadcast::channel(1024);
        Self {
            entries: DashMap::new(),
            roster_tx,
            cooldown_tx,
        }
    }

    /// Insert a character if absent. Returns true when newly created.
    ///
    /// An existing row is left untouched; use `replace_snapshot` to
    /// overwrite.
    pub fn ensure(&self, snapshot: CharacterSnapshot) -> bool {
        let name = snapshot.name.clone();
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries
            .insert(name.clone(), CharacterEntry::new(snapshot));
        let _ = self.roster_tx.send(RosterChanged {
            character: Some(name),
        });
        true
    }

    /// Replace a character's snapshot wholesale, creating the row if needed.
    /// Cooldown state and the auto-gather flag survive the replacement.
    pub fn replace_snapshot(&self, snapshot: CharacterSnapshot) {
        let name = snapshot.name.clone();
        match self.entries.get_mut(&name) {
            Some(mut entry) => entry.snapshot = snapshot,
            None => {
                self.entries
                    .insert(name.clone(), CharacterEntry::new(snapshot));
            }
        }
        let _ = self.roster_tx.send(RosterChanged {
            character: Some(name),
        });
    }

    /// Position-only patch from the refresh clock. Unknown names are ignored.
    pub fn patch_position(&self, name: &str, x: i32, y: i32) {
        if let Some(mut entry) = self.entries.get_mut(name) {
            entry.snapshot.x = x;
            entry.snapshot.y = y;
        } else {
            return;
        }
        let _ = self.roster_tx.send(RosterChanged {
            character: Some(name.to_string()),
        });
    }

    /// Tell subscribers the roster changed without naming one character.
    pub fn announce_all(&self) {
        let _ = self.roster_tx.send(RosterChanged { character: None });
    }

    pub fn snapshot(&self, name: &str) -> Option<CharacterSnapshot> {
        self.entries.get(name).map(|entry| entry.snapshot.clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Start a fresh cooldown for `name`, called once per successful action.
    pub fn reset_cooldown(&self, name: &str, total_seconds: u32) {
        let state = match self.entries.get_mut(name) {
            Some(mut entry) => {
                entry.cooldown.reset(total_seconds);
                entry.cooldown
            }
            None => {
                warn!(character = %name, "Cooldown reset for unknown character");
                return;
            }
        };
        let _ = self.cooldown_tx.send(CooldownChanged {
            character: name.to_string(),
            remaining_seconds: state.remaining_seconds,
            progress: state.progress(),
        });
    }

    /// Countdown step from the per-character clock.
    ///
    /// Broadcasts only when the state actually changed; a tick on an expired
    /// cooldown is silent.
    pub fn tick_cooldown(&self, name: &str, step: u32) {
        let state = match self.entries.get_mut(name) {
            Some(mut entry) => {
                if !entry.cooldown.tick(step) {
                    return;
                }
                entry.cooldown
            }
            None => return,
        };
        let _ = self.cooldown_tx.send(CooldownChanged {
            character: name.to_string(),
            remaining_seconds: state.remaining_seconds,
            progress: state.progress(),
        });
    }

    /// Read `(remaining_seconds, progress)`; `(0, 0.0)` for unknown names.
    pub fn cooldown(&self, name: &str) -> (u32, f64) {
        self.entries
            .get(name)
            .map(|entry| (entry.cooldown.remaining_seconds, entry.cooldown.progress()))
            .unwrap_or((0, 0.0))
    }

    /// True while the character's cooldown is running.
    pub fn is_action_locked(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .map(|entry| entry.cooldown.is_locked())
            .unwrap_or(false)
    }

    /// Flip the auto-gather flag; returns the new value.
    pub fn toggle_auto_gather(&self, name: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(mut entry) => {
                entry.auto_gather = !entry.auto_gather;
                entry.auto_gather
            }
            None => {
                warn!(character = %name, "Auto-gather toggle for unknown character");
                false
            }
        }
    }

    pub fn set_auto_gather(&self, name: &str, enabled: bool) {
        if let Some(mut entry) = self.entries.get_mut(name) {
            entry.auto_gather = enabled;
        }
    }

    pub fn auto_gather_enabled(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .map(|entry| entry.auto_gather)
            .unwrap_or(false)
    }

    /// Subscribe to snapshot/roster changes.
    pub fn subscribe_roster(&self) -> broadcast::Receiver<RosterChanged> {
        self.roster_tx.subscribe()
    }

    /// Subscribe to cooldown/progress changes.
    pub fn subscribe_cooldowns(&self) -> broadcast::Receiver<CooldownChanged> {
        self.cooldown_tx.subscribe()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

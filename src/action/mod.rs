// Remote action dispatch and the auto-gather supervisor

mod auto;

pub use auto::AutoGather;

use crate::api::{ApiError, GameApi};
use crate::notify::{Notifier, Severity};
use crate::state::Roster;
use std::sync::Arc;

/// Executes remote actions and applies the returned cooldowns.
///
/// Every dispatch issues exactly one remote request and emits exactly one
/// notification; only a success touches the cooldown tracker.
#[derive(Clone)]
pub struct ActionDispatcher {
    api: Arc<dyn GameApi>,
    roster: Arc<Roster>,
    notifier: Notifier,
}

impl ActionDispatcher {
    pub fn new(api: Arc<dyn GameApi>, roster: Arc<Roster>, notifier: Notifier) -> Self {
        Self {
            api,
            roster,
            notifier,
        }
    }

    /// Move `name` to `(x, y)`. Returns the applied cooldown in seconds.
    pub async fn dispatch_move(&self, name: &str, x: i32, y: i32) -> Result<u32, ApiError> {
        match self.api.move_character(name, x, y).await {
            Ok(ack) => {
                self.roster.reset_cooldown(name, ack.cooldown_seconds);
                self.notifier.notify(
                    Severity::Success,
                    "Move Action",
                    format!("{} move success", name),
                );
                Ok(ack.cooldown_seconds)
            }
            Err(err) => {
                self.notifier
                    .notify(Severity::Error, "Move Action", format!("{}: {}", name, err));
                Err(err)
            }
        }
    }

    /// Gather at the character's current position.
    ///
    /// A `Blocked` rejection also turns the character's auto-gather flag off
    /// before the failure is reported.
    pub async fn dispatch_gather(&self, name: &str) -> Result<u32, ApiError> {
        match self.api.gather(name).await {
            Ok(ack) => {
                self.roster.reset_cooldown(name, ack.cooldown_seconds);
                self.notifier.notify(
                    Severity::Success,
                    "Gather Action",
                    format!("{}: {}s", name, ack.cooldown_seconds),
                );
                Ok(ack.cooldown_seconds)
            }
            Err(err) => {
                if matches!(err, ApiError::Blocked { .. }) {
                    self.roster.set_auto_gather(name, false);
                }
                self.notifier.notify(
                    Severity::Error,
                    "Gather Action",
                    format!("{}: {}", name, err),
                );
                Err(err)
            }
        }
    }

    /// Craft `quantity` of item `code`.
    pub async fn dispatch_craft(
        &self,
        name: &str,
        code: &str,
        quantity: i32,
    ) -> Result<u32, ApiError> {
        match self.api.craft(name, code, quantity).await {
            Ok(ack) => {
                self.roster.reset_cooldown(name, ack.cooldown_seconds);
                self.notifier.notify(
                    Severity::Success,
                    "Craft Action",
                    format!("{} craft success", name),
                );
                Ok(ack.cooldown_seconds)
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Error,
                    "Craft Action",
                    format!("{}: {}", name, err),
                );
                Err(err)
            }
        }
    }
}

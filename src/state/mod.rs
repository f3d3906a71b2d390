// Character roster, snapshots, and cooldown tracking

mod character;
mod cooldown;
mod roster;

pub use character::{CharacterSnapshot, InventoryItem};
pub use cooldown::CooldownState;
pub use roster::{CooldownChanged, Roster, RosterChanged};

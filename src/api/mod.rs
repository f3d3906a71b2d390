// Artifacts MMO API client

mod client;
mod error;
mod types;

pub use client::HttpGameApi;
pub use error::{ApiError, BLOCKED_STATUS};
pub use types::{ActionAck, RosterCharacter};

use crate::state::CharacterSnapshot;
use async_trait::async_trait;

/// Remote game API surface.
///
/// One production implementation (`HttpGameApi`) talks to the Artifacts MMO
/// HTTP API; tests substitute in-memory stubs.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Fetch the account's character roster (name and position only).
    async fn fetch_roster(&self) -> Result<Vec<RosterCharacter>, ApiError>;

    /// Fetch the full record for a single character.
    async fn fetch_character(&self, name: &str) -> Result<CharacterSnapshot, ApiError>;

    /// Move a character to the given map coordinates.
    async fn move_character(&self, name: &str, x: i32, y: i32) -> Result<ActionAck, ApiError>;

    /// Gather the resource at the character's current position.
    async fn gather(&self, name: &str) -> Result<ActionAck, ApiError>;

    /// Craft `quantity` of the item `code`.
    async fn craft(&self, name: &str, code: &str, quantity: i32) -> Result<ActionAck, ApiError>;
}

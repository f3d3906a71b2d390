use serde::Deserialize;

/// Envelope every API payload arrives in: `{ "data": ... }`.
#[derive(Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Slim roster entry; the rest of the record is ignored until a full fetch.
#[derive(Clone, Debug, Deserialize)]
pub struct RosterCharacter {
    pub name: String,
    pub x: i32,
    pub y: i32,
}

/// Acknowledgement of a successful action.
#[derive(Clone, Copy, Debug)]
pub struct ActionAck {
    /// Cooldown the server applied, in seconds.
    pub cooldown_seconds: u32,
}

/// Wire shape of an action response: `{ "cooldown": { "remaining_seconds": n } }`.
#[derive(Deserialize)]
pub(crate) struct ActionPayload {
    pub cooldown: CooldownPayload,
}

#[derive(Deserialize)]
pub(crate) struct CooldownPayload {
    pub remaining_seconds: u32,
}

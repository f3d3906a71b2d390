/// HTTP status the server uses to reject an action as blocked/forbidden.
///
/// A gather that comes back with this status also turns auto-gather off for
/// the character.
pub const BLOCKED_STATUS: u16 = 497;

/// Categorized remote failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The bearer token is expired or invalid.
    ExpiredToken,
    /// The server refused the action outright.
    Blocked { status: u16 },
    /// Any other non-2xx response.
    Remote { status: u16, message: String },
    /// Connection, timeout, or payload-decode failure.
    Transport(String),
}

impl ApiError {
    /// Classify a non-success HTTP response from status and body text.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == BLOCKED_STATUS {
            ApiError::Blocked { status }
        } else if status == 401 || body.contains("Token is expired") {
            ApiError::ExpiredToken
        } else {
            // Bodies can be arbitrarily large error pages; keep a prefix
            let message: String = body.trim().chars().take(200).collect();
            ApiError::Remote { status, message }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::ExpiredToken => write!(f, "authentication token is expired"),
            ApiError::Blocked { status } => {
                write!(f, "action blocked by server (status {})", status)
            }
            ApiError::Remote { status, message } => {
                write!(f, "remote error {}: {}", status, message)
            }
            ApiError::Transport(message) => write!(f, "transport error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

//! Error taxonomy for query building and execution

use alexandria_core::TransportError;

use crate::entity::EntityKind;

/// Errors surfaced by queries, lookups and pagination.
///
/// Validation failures (`InvalidQuery`, `OffsetExceeded`) are raised before
/// any request is sent. A failed request never yields a partial page.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Single lookup whose identifier matches no entity
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Malformed filter / group_by / sort / paging combination
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// `page * per_page` past the API's result offset ceiling
    #[error("page {page} with per_page {per_page} is past the 10000 result offset limit")]
    OffsetExceeded { page: u32, per_page: u32 },

    /// Non-2xx response from the API
    #[error("API error {status}: {message}")]
    Remote { status: u16, message: String },

    /// Network-level failure (no response received)
    #[error("transport error: {0}")]
    Transport(TransportError),

    /// Response body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),

    /// Client settings that cannot be used (e.g. an unparsable base URL)
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// HTTP status, for errors caused by an API response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Status { status, body } => Self::Remote {
                status,
                message: remote_message(&body),
            },
            other => Self::Transport(other),
        }
    }
}

/// Human-readable message from an API error body.
///
/// OpenAlex answers errors with `{"error": "...", "message": "..."}`; anything
/// else is passed through, shortened.
fn remote_message(body: &str) -> String {
    const MAX_LEN: usize = 200;

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let field = |name: &str| value.get(name).and_then(|v| v.as_str()).map(str::to_string);
        match (field("error"), field("message")) {
            (Some(error), Some(message)) => return format!("{error}: {message}"),
            (Some(text), None) | (None, Some(text)) => return text,
            (None, None) => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.len() <= MAX_LEN {
        return trimmed.to_string();
    }
    let mut end = MAX_LEN;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

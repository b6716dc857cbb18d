use thiserror::Error;

/// Errors surfaced to consumers of [`crate::ScaffoldingClientV1`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("HTTP {status}")]
    Http {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl ScaffoldingError {
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether a retry can reasonably succeed: transport failures and 5xx.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Internal(_) => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Message suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(message) => non_empty_or(message, "Invalid request"),
            Self::Unauthorized => "Unauthorized. Please log in again.".to_owned(),
            Self::Forbidden => "You do not have permission to view this identity.".to_owned(),
            Self::NotFound(message) => non_empty_or(message, "Identity not found"),
            Self::Internal(_) => "Internal server error. Please try again later.".to_owned(),
            Self::Http { status, message } => match message.as_deref() {
                Some(m) if !m.is_empty() => m.to_owned(),
                _ => format!("Error: {status} {}", reason_phrase(*status)),
            },
            Self::Transport(detail) => format!("Network error: {detail}"),
        }
    }
}

fn non_empty_or(message: &str, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_owned()
    } else {
        message.to_owned()
    }
}

fn reason_phrase(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

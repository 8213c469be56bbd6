//! Crate-wide error kinds
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with NotFound/Validation/Provider/Storage kinds

use thiserror::Error;

/// Errors surfaced by the conversation core. Nothing is swallowed: every
/// failed lookup, rejected message, provider failure, or storage fault
/// reaches the caller as one of these kinds.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown character or session identifier
    #[error("not found: {0}")]
    NotFound(String),

    /// Rejected input, e.g. an empty message
    #[error("validation failed: {0}")]
    Validation(String),

    /// External AI provider failure (timeout, rate limit, malformed
    /// response). Not retried by this core.
    #[error("provider call failed: {0}")]
    Provider(String),

    /// Persistence backend failure
    #[error("storage backend failed: {0}")]
    Storage(#[from] sqlite::Error),
}

impl Error {
    /// Convenience constructor for unknown-session lookups
    pub fn session_not_found(id: impl std::fmt::Display) -> Self {
        Error::NotFound(format!("session {id}"))
    }

    /// Convenience constructor for unknown-character lookups
    pub fn character_not_found(id: &str) -> Self {
        Error::NotFound(format!("character '{id}'"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_id() {
        let err = Error::character_not_found("socrates");
        assert_eq!(err.to_string(), "not found: character 'socrates'");
    }

    #[test]
    fn test_validation_display() {
        let err = Error::Validation("message text is empty".to_string());
        assert!(err.to_string().contains("validation failed"));
    }
}

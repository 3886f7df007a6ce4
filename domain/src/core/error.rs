//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message text must not be empty")]
    EmptyMessage,

    #[error("Invalid client id: {0}")]
    InvalidClientId(String),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_display() {
        let error = DomainError::EmptyMessage;
        assert_eq!(error.to_string(), "Message text must not be empty");
    }
}

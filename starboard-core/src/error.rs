//! Error types for Starboard domain operations

use thiserror::Error;

/// Domain validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("score {value} is out of range, expected 1..=5")]
    ScoreOutOfRange { value: i32 },

    #[error("model version label must not be empty")]
    EmptyVersionLabel,

    #[error("user id must not be empty")]
    EmptyUserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::ScoreOutOfRange { value: 7 };
        assert_eq!(err.to_string(), "score 7 is out of range, expected 1..=5");
    }
}

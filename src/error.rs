//! Error types for the rate limiting engine.
//!
//! The taxonomy mirrors how the decision gateway and HTTP surface need to
//! react: [`RateLimiterError::KeyUnknown`] and [`RateLimiterError::RateLimited`]
//! are expected outcomes of `decide()` and carry their own HTTP status;
//! everything else is either a caller mistake ([`RateLimiterError::BadInput`])
//! or a store failure that the gateway recovers from locally.

use thiserror::Error;

/// Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, RateLimiterError>;

/// Top-level error for rate limiting operations.
#[derive(Debug, Error)]
pub enum RateLimiterError {
    /// The request's API key is not registered with the system.
    #[error("unknown api key")]
    KeyUnknown,

    /// An admin or load-test request had a missing or invalid field.
    #[error("bad input: {0}")]
    BadInput(String),

    /// The request was legitimately blocked by the configured algorithm.
    #[error("rate limit exceeded")]
    RateLimited {
        /// The algorithm that produced the block.
        algorithm: crate::algorithm::AlgorithmKind,
    },

    /// The config store failed to complete an operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A programming error that should be unreachable given the engine's
    /// total algorithms.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised by a [`crate::store::ConfigStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying backend failed to complete a read or write.
    #[error("{message}")]
    OperationFailed {
        /// Human-readable description.
        message: String,
        /// Whether retrying the same operation might succeed.
        retryable: bool,
    },

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Build an [`StoreError::OperationFailed`].
    pub fn operation_failed(message: impl Into<String>, retryable: bool) -> Self {
        Self::OperationFailed {
            message: message.into(),
            retryable,
        }
    }

    /// Whether this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::OperationFailed { retryable: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_retryable() {
        let err = StoreError::operation_failed("timeout", true);
        assert!(err.is_retryable());

        let err = StoreError::NotFound("k".into());
        assert!(!err.is_retryable());
    }

    #[test]
    fn key_unknown_displays() {
        assert_eq!(RateLimiterError::KeyUnknown.to_string(), "unknown api key");
    }

    #[test]
    fn bad_input_carries_message() {
        let err = RateLimiterError::BadInput("maxRequests must be positive".into());
        assert_eq!(err.to_string(), "bad input: maxRequests must be positive");
    }
}

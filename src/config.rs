//! Rate limit configuration records.
//!
//! A [`RateLimitConfig`] is the persisted, per-apiKey policy: which
//! algorithm to enforce and its `(max_requests, window_seconds)`
//! parameters. Inserting a new config for an apiKey supersedes the
//! previous one — the [`crate::registry::LimiterRegistry`] resolves the
//! most recent by `created_at` and replaces any live instance whose
//! parameters have drifted from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::AlgorithmKind;
use crate::error::{RateLimiterError, Result};

/// A persisted rate-limit policy for one API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    pub id: Uuid,
    pub api_key: String,
    pub algorithm: AlgorithmKind,
    pub max_requests: u64,
    pub window_seconds: f64,
    pub created_at: DateTime<Utc>,
}

impl RateLimitConfig {
    /// Build a config with a fresh id and the current timestamp.
    ///
    /// Panics if `max_requests` is zero or `window_seconds` is non-positive;
    /// use [`RateLimitConfig::try_new`] to validate admin-supplied input
    /// instead.
    pub fn new(api_key: String, algorithm: AlgorithmKind, max_requests: u64, window_seconds: f64) -> Self {
        Self::try_new(api_key, algorithm, max_requests, window_seconds)
            .expect("max_requests and window_seconds must be positive")
    }

    /// Build a config, rejecting non-positive `max_requests`/`window_seconds`
    /// as [`RateLimiterError::BadInput`] (the admin-request validation path).
    pub fn try_new(
        api_key: String,
        algorithm: AlgorithmKind,
        max_requests: u64,
        window_seconds: f64,
    ) -> Result<Self> {
        if max_requests == 0 {
            return Err(RateLimiterError::BadInput("maxRequests must be a positive integer".into()));
        }
        if !(window_seconds > 0.0) {
            return Err(RateLimiterError::BadInput("windowSeconds must be a positive number".into()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            api_key,
            algorithm,
            max_requests,
            window_seconds,
            created_at: Utc::now(),
        })
    }

    /// The default policy synthesized for a key with no stored config:
    /// Token Bucket, 100 requests per 60 seconds.
    pub fn default_for(api_key: String) -> Self {
        Self::new(api_key, AlgorithmKind::TokenBucket, 100, 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_zero_max_requests() {
        let err = RateLimitConfig::try_new("k".into(), AlgorithmKind::TokenBucket, 0, 60.0).unwrap_err();
        assert!(matches!(err, RateLimiterError::BadInput(_)));
    }

    #[test]
    fn try_new_rejects_non_positive_window() {
        let err = RateLimitConfig::try_new("k".into(), AlgorithmKind::TokenBucket, 10, 0.0).unwrap_err();
        assert!(matches!(err, RateLimiterError::BadInput(_)));
    }

    #[test]
    fn default_for_is_token_bucket_100_per_60() {
        let cfg = RateLimitConfig::default_for("k".into());
        assert_eq!(cfg.algorithm, AlgorithmKind::TokenBucket);
        assert_eq!(cfg.max_requests, 100);
        assert_eq!(cfg.window_seconds, 60.0);
    }
}

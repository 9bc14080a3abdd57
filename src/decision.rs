//! Decision and request-log types produced by the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::AlgorithmKind;

/// The outcome of one `decide()` call, returned to the HTTP surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub allowed: bool,
    pub algorithm: AlgorithmKind,
    pub remaining_quota: u64,
    pub timestamp: f64,
}

/// An append-only record of one decision, fed to both the Config Store's
/// log sink and the Analytics Aggregator's ring buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLog {
    pub id: Uuid,
    pub api_key: String,
    pub endpoint: String,
    pub allowed: bool,
    pub timestamp: DateTime<Utc>,
    pub algorithm: AlgorithmKind,
    pub remaining_quota: u64,
}

impl RequestLog {
    /// Build a log entry for one decision.
    pub fn new(api_key: String, endpoint: String, decision: Decision) -> Self {
        Self {
            id: Uuid::new_v4(),
            api_key,
            endpoint,
            allowed: decision.allowed,
            timestamp: Utc::now(),
            algorithm: decision.algorithm,
            remaining_quota: decision.remaining_quota,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_mirrors_the_decision_it_was_built_from() {
        let decision = Decision {
            allowed: true,
            algorithm: AlgorithmKind::TokenBucket,
            remaining_quota: 4,
            timestamp: 12.5,
        };
        let log = RequestLog::new("key".into(), "/protected/test".into(), decision);
        assert_eq!(log.api_key, "key");
        assert_eq!(log.endpoint, "/protected/test");
        assert!(log.allowed);
        assert_eq!(log.remaining_quota, 4);
        assert_eq!(log.algorithm, AlgorithmKind::TokenBucket);
    }
}

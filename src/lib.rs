//! Multi-tenant API rate limiting engine.
//!
//! `tenant_ratelimit` provides:
//!
//! - **Four decision algorithms**: Token Bucket, Leaky Bucket, Fixed Window,
//!   and Sliding Window Counter, selected per API key.
//! - **A per-key instance registry** (`DashMap` + `parking_lot`) that creates,
//!   reuses, and replaces live limiter state as configuration changes.
//! - **A pluggable Config Store**: an async trait for API keys, configs, and
//!   the request log, with an in-memory reference implementation.
//! - **An analytics aggregator** for dashboard-facing totals and recent
//!   decisions.
//! - **A load driver** for generating paced synthetic traffic against a
//!   configured policy.
//! - **An HTTP surface** (feature `server`, on by default) exposing all of
//!   the above over `axum`.
//!
//! # Quick start
//!
//! ```
//! # tokio_test::block_on(async {
//! use std::sync::Arc;
//! use tenant_ratelimit::algorithm::AlgorithmKind;
//! use tenant_ratelimit::analytics::Analytics;
//! use tenant_ratelimit::apikey::ApiKeyRecord;
//! use tenant_ratelimit::clock::SystemClock;
//! use tenant_ratelimit::config::RateLimitConfig;
//! use tenant_ratelimit::gateway::Gateway;
//! use tenant_ratelimit::store::{ConfigStore, InMemoryStore};
//!
//! let store = Arc::new(InMemoryStore::new());
//! let record = ApiKeyRecord::new("acme".into());
//! store.put_api_key(record.clone()).await.unwrap();
//! store
//!     .put_config(RateLimitConfig::new(record.api_key.clone(), AlgorithmKind::TokenBucket, 5, 60.0))
//!     .await
//!     .unwrap();
//!
//! let gateway = Gateway::new(store, Arc::new(Analytics::new()), Arc::new(SystemClock::new()));
//! let decision = gateway.decide(&record.api_key, "/protected/test").await.unwrap();
//! assert!(decision.allowed);
//! # });
//! ```

pub mod algorithm;
pub mod analytics;
pub mod apikey;
pub mod clock;
pub mod config;
pub mod decision;
pub mod error;
pub mod gateway;
pub mod load;
pub mod registry;
pub mod store;

#[cfg(feature = "server")]
pub mod http;

#[cfg(feature = "server")]
pub mod settings;

pub use algorithm::{AlgorithmKind, LimiterInstance};
pub use analytics::Analytics;
pub use apikey::ApiKeyRecord;
pub use clock::{Clock, SystemClock, VirtualClock};
pub use config::RateLimitConfig;
pub use decision::{Decision, RequestLog};
pub use error::{RateLimiterError, Result, StoreError};
pub use gateway::Gateway;
pub use registry::LimiterRegistry;
pub use store::ConfigStore;

#[cfg(feature = "server")]
pub use settings::RateLimiterSettings;

/// Convenient re-exports for constructing a gateway end to end.
pub mod prelude {
    pub use crate::algorithm::AlgorithmKind;
    pub use crate::analytics::Analytics;
    pub use crate::apikey::ApiKeyRecord;
    pub use crate::clock::{Clock, SystemClock, VirtualClock};
    pub use crate::config::RateLimitConfig;
    pub use crate::decision::{Decision, RequestLog};
    pub use crate::error::{RateLimiterError, Result};
    pub use crate::gateway::Gateway;
    pub use crate::store::{ConfigStore, InMemoryStore};
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::algorithm::AlgorithmKind;
    use crate::analytics::Analytics;
    use crate::apikey::ApiKeyRecord;
    use crate::clock::SystemClock;
    use crate::config::RateLimitConfig;
    use crate::gateway::Gateway;
    use crate::store::{ConfigStore, InMemoryStore};

    #[tokio::test]
    async fn end_to_end_decision_through_a_freshly_assembled_engine() {
        let store = Arc::new(InMemoryStore::new());
        let record = ApiKeyRecord::new("acme".into());
        store.put_api_key(record.clone()).await.unwrap();
        store
            .put_config(RateLimitConfig::new(record.api_key.clone(), AlgorithmKind::TokenBucket, 2, 60.0))
            .await
            .unwrap();

        let gateway = Gateway::new(store, Arc::new(Analytics::new()), Arc::new(SystemClock::new()));

        let first = gateway.decide(&record.api_key, "/protected/test").await.unwrap();
        let second = gateway.decide(&record.api_key, "/protected/test").await.unwrap();
        let third = gateway.decide(&record.api_key, "/protected/test").await.unwrap();

        assert!(first.allowed);
        assert!(second.allowed);
        assert!(!third.allowed);
    }
}

//! The Decision Gateway: the single entry point that turns an
//! `(apiKey, endpoint)` pair into an allow/block decision.
//!
//! Composes the [`crate::registry::LimiterRegistry`], the [`crate::clock::Clock`],
//! the [`crate::store::ConfigStore`], and the [`crate::analytics::Analytics`]
//! aggregator. Holding any per-instance mutex only for the duration of
//! `allow_at` keeps the hot path lock-lean; the store append and the
//! analytics record both happen after the mutex is released.

use std::sync::Arc;

use tracing::warn;

use crate::analytics::Analytics;
use crate::clock::Clock;
use crate::config::RateLimitConfig;
use crate::decision::{Decision, RequestLog};
use crate::error::{RateLimiterError, Result};
use crate::registry::{LimiterRegistry, Resolved};
use crate::store::ConfigStore;

/// Coordinates a single `decide()` call end to end.
pub struct Gateway<S: ConfigStore> {
    store: Arc<S>,
    registry: LimiterRegistry,
    analytics: Arc<Analytics>,
    clock: Arc<dyn Clock>,
}

impl<S: ConfigStore> Gateway<S> {
    /// Assemble a gateway over a store, a fresh registry, and a clock.
    pub fn new(store: Arc<S>, analytics: Arc<Analytics>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            registry: LimiterRegistry::new(),
            analytics,
            clock,
        }
    }

    /// Decide whether one request from `api_key` against `endpoint` is
    /// allowed.
    ///
    /// 1. Reject unknown API keys.
    /// 2. Resolve (or synthesize the default Token Bucket) config for the key.
    /// 3. Run the decision under the instance's own mutex.
    /// 4. Log the decision to the store (best-effort) and to analytics.
    pub async fn decide(&self, api_key: &str, endpoint: &str) -> Result<Decision> {
        let record = self
            .store
            .find_api_key(api_key)
            .await?
            .ok_or(RateLimiterError::KeyUnknown)?;

        let stored_config = self.store.latest_config_for(&record.api_key).await?;
        let now = self.clock.now();

        let (allowed, remaining, algorithm) = match self.registry.get_or_create(&record.api_key, stored_config.as_ref(), now) {
            Resolved::Instance(instance) => {
                let mut guard = instance.lock();
                let (allowed, remaining) = guard.allow_at(now);
                (allowed, remaining, guard.kind())
            }
            Resolved::NotConfigured => {
                let default_config = RateLimitConfig::default_for(record.api_key.clone());
                let algorithm = default_config.algorithm;
                let resolved = self.registry.get_or_create(&record.api_key, Some(&default_config), now);
                let Resolved::Instance(instance) = resolved else {
                    return Err(RateLimiterError::Internal(
                        "registry returned NotConfigured immediately after seeding a default config".into(),
                    ));
                };
                let (allowed, remaining) = instance.lock().allow_at(now);
                (allowed, remaining, algorithm)
            }
        };

        let decision = Decision {
            allowed,
            algorithm,
            remaining_quota: remaining,
            timestamp: now,
        };

        let log = RequestLog::new(record.api_key.clone(), endpoint.to_string(), decision);
        self.analytics.record(log.clone());
        if let Err(err) = self.store.append_log(log).await {
            warn!(api_key = %record.api_key, error = %err, "failed to append request log to config store");
        }

        Ok(decision)
    }

    /// Reset all live limiter state, analytics counters, and the durable log.
    /// Stored API keys and configs are left untouched.
    pub async fn reset(&self) -> Result<()> {
        self.registry.reset();
        self.analytics.reset();
        self.store.delete_all_logs().await
    }

    /// Direct access to the analytics aggregator, e.g. for the dashboard
    /// endpoints.
    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// Direct access to the config store, e.g. for admin endpoints that
    /// manage API keys and configs directly.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct access to the clock, e.g. for the load driver to pace itself
    /// against the same time source the gateway uses.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

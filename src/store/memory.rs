//! In-memory reference implementation of [`ConfigStore`].
//!
//! Backed by `DashMap` for the keyed collections, the same choice the
//! teacher crate makes for its `MemoryStorage`, plus a `parking_lot`-guarded
//! `VecDeque` for the append-only log — a separate, larger buffer from the
//! Analytics Aggregator's small dashboard ring (see the data model: the
//! request log is owned by both the store and the aggregator, independently).

use std::collections::VecDeque;

use dashmap::DashMap;
use parking_lot::Mutex;

use super::ConfigStore;
use crate::apikey::ApiKeyRecord;
use crate::config::RateLimitConfig;
use crate::decision::RequestLog;
use crate::error::Result;

/// Default cap on the durable log buffer before the oldest entries are
/// evicted to bound memory growth.
const DEFAULT_LOG_CAPACITY: usize = 10_000;

/// In-memory `ConfigStore`. Suitable for tests and for running the engine
/// standalone without wiring in a real document store.
pub struct InMemoryStore {
    api_keys: DashMap<String, ApiKeyRecord>,
    configs: DashMap<uuid::Uuid, RateLimitConfig>,
    logs: Mutex<VecDeque<RequestLog>>,
    log_capacity: usize,
}

impl InMemoryStore {
    /// Create a store with the default log capacity.
    pub fn new() -> Self {
        Self::with_log_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Create a store with a custom log buffer capacity.
    pub fn with_log_capacity(log_capacity: usize) -> Self {
        Self {
            api_keys: DashMap::new(),
            configs: DashMap::new(),
            logs: Mutex::new(VecDeque::with_capacity(log_capacity.min(1024))),
            log_capacity,
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for InMemoryStore {
    async fn put_api_key(&self, record: ApiKeyRecord) -> Result<()> {
        self.api_keys.insert(record.api_key.clone(), record);
        Ok(())
    }

    async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>> {
        let mut records: Vec<_> = self.api_keys.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }

    async fn find_api_key(&self, api_key: &str) -> Result<Option<ApiKeyRecord>> {
        Ok(self.api_keys.get(api_key).map(|r| r.value().clone()))
    }

    async fn put_config(&self, record: RateLimitConfig) -> Result<()> {
        self.configs.insert(record.id, record);
        Ok(())
    }

    async fn list_configs(&self) -> Result<Vec<RateLimitConfig>> {
        let mut records: Vec<_> = self.configs.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }

    async fn latest_config_for(&self, api_key: &str) -> Result<Option<RateLimitConfig>> {
        Ok(self
            .configs
            .iter()
            .filter(|r| r.api_key == api_key)
            .max_by_key(|r| r.created_at)
            .map(|r| r.value().clone()))
    }

    async fn append_log(&self, record: RequestLog) -> Result<()> {
        let mut logs = self.logs.lock();
        if logs.len() >= self.log_capacity {
            logs.pop_front();
        }
        logs.push_back(record);
        Ok(())
    }

    async fn recent_logs(&self, limit: usize) -> Result<Vec<RequestLog>> {
        let logs = self.logs.lock();
        Ok(logs.iter().rev().take(limit).cloned().collect())
    }

    async fn count_logs(&self) -> Result<usize> {
        Ok(self.logs.lock().len())
    }

    async fn delete_all_logs(&self) -> Result<()> {
        self.logs.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmKind;

    #[tokio::test]
    async fn api_keys_round_trip() {
        let store = InMemoryStore::new();
        let record = ApiKeyRecord::new("acme".into());
        store.put_api_key(record.clone()).await.unwrap();

        let found = store.find_api_key(&record.api_key).await.unwrap();
        assert_eq!(found, Some(record.clone()));
        assert_eq!(store.list_api_keys().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn latest_config_wins() {
        let store = InMemoryStore::new();
        let older = RateLimitConfig::new("k".into(), AlgorithmKind::TokenBucket, 10, 60.0);
        store.put_config(older.clone()).await.unwrap();

        // Construct a strictly later config (created_at is `Utc::now()` at
        // construction time, so the second call is later than the first).
        let newer = RateLimitConfig::new("k".into(), AlgorithmKind::FixedWindow, 5, 30.0);
        store.put_config(newer.clone()).await.unwrap();

        let latest = store.latest_config_for("k").await.unwrap().unwrap();
        assert_eq!(latest.algorithm, AlgorithmKind::FixedWindow);
    }

    #[tokio::test]
    async fn log_buffer_evicts_oldest_when_full() {
        let store = InMemoryStore::with_log_capacity(2);
        for i in 0..3 {
            let log = RequestLog::new(
                "k".into(),
                "/protected/test".into(),
                crate::decision::Decision {
                    allowed: true,
                    algorithm: AlgorithmKind::TokenBucket,
                    remaining_quota: i,
                    timestamp: i as f64,
                },
            );
            store.append_log(log).await.unwrap();
        }
        assert_eq!(store.count_logs().await.unwrap(), 2);
        let recent = store.recent_logs(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].remaining_quota, 2);
        assert_eq!(recent[1].remaining_quota, 1);
    }

    #[tokio::test]
    async fn delete_all_logs_clears_buffer() {
        let store = InMemoryStore::new();
        store
            .append_log(RequestLog::new(
                "k".into(),
                "/x".into(),
                crate::decision::Decision {
                    allowed: true,
                    algorithm: AlgorithmKind::TokenBucket,
                    remaining_quota: 1,
                    timestamp: 0.0,
                },
            ))
            .await
            .unwrap();
        store.delete_all_logs().await.unwrap();
        assert_eq!(store.count_logs().await.unwrap(), 0);
    }
}

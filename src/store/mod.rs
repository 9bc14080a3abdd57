//! The Config Store interface: API-key records, rate-limit configs, and the
//! append-only request log, as consumed by the rest of the engine.
//!
//! The core depends only on the [`ConfigStore`] trait — in production a
//! caller substitutes a document-store-backed implementation. This crate
//! ships [`memory::InMemoryStore`] so the engine builds, runs, and is
//! tested standalone.

mod memory;

pub use memory::InMemoryStore;

use std::future::Future;

use crate::apikey::ApiKeyRecord;
use crate::config::RateLimitConfig;
use crate::decision::RequestLog;
use crate::error::Result;

/// Persistence trait for API-key records, rate-limit configs, and the
/// request log. Methods return `impl Future + Send` rather than boxing via
/// `#[async_trait]`, so a caller's own store adapter pays no extra
/// allocation per call.
pub trait ConfigStore: Send + Sync + 'static {
    /// Persist a newly created API key.
    fn put_api_key(&self, record: ApiKeyRecord) -> impl Future<Output = Result<()>> + Send;

    /// List all registered API keys, oldest first.
    fn list_api_keys(&self) -> impl Future<Output = Result<Vec<ApiKeyRecord>>> + Send;

    /// Look up a record by its opaque token.
    fn find_api_key(&self, api_key: &str) -> impl Future<Output = Result<Option<ApiKeyRecord>>> + Send;

    /// Persist a newly inserted rate-limit config. Does not delete or
    /// mutate earlier configs for the same `api_key` — superseding is a
    /// read-time concern (see `latest_config_for`).
    fn put_config(&self, record: RateLimitConfig) -> impl Future<Output = Result<()>> + Send;

    /// List all stored configs, oldest first.
    fn list_configs(&self) -> impl Future<Output = Result<Vec<RateLimitConfig>>> + Send;

    /// The most recently inserted config for `api_key`, if any.
    fn latest_config_for(&self, api_key: &str) -> impl Future<Output = Result<Option<RateLimitConfig>>> + Send;

    /// Append one decision to the durable log.
    fn append_log(&self, record: RequestLog) -> impl Future<Output = Result<()>> + Send;

    /// The most recent `limit` log entries, newest first.
    fn recent_logs(&self, limit: usize) -> impl Future<Output = Result<Vec<RequestLog>>> + Send;

    /// Total number of logged decisions.
    fn count_logs(&self) -> impl Future<Output = Result<usize>> + Send;

    /// Clear the durable log (part of the admin "reset stats" operation).
    fn delete_all_logs(&self) -> impl Future<Output = Result<()>> + Send;
}

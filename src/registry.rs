//! Per-tenant limiter registry.
//!
//! Maps an API key to the single live [`LimiterInstance`] enforcing its
//! policy. Reads are the hot path (every decision resolves through here),
//! writes are cold (first creation, reconfiguration, reset) — a read-mostly
//! shape that reaches for `dashmap` + `parking_lot`: the map itself is a
//! concurrent `DashMap` (sharded internal locking, no single global writer
//! lock), and each instance carries its own `parking_lot::Mutex` so a
//! decision never blocks on any other key's decision.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::algorithm::LimiterInstance;
use crate::config::RateLimitConfig;

/// Outcome of resolving a key against the registry.
pub enum Resolved {
    /// A live instance is ready to decide against (created, reused, or
    /// replaced as needed).
    Instance(Arc<Mutex<LimiterInstance>>),
    /// No [`RateLimitConfig`] exists for this key.
    NotConfigured,
}

/// Owns the live per-key algorithm instances.
///
/// Invariant: for every key present in the map, the instance's parameters
/// equal the most recent stored config for that key (enforced by
/// `get_or_create`'s replace-on-drift check).
pub struct LimiterRegistry {
    instances: DashMap<String, Arc<Mutex<LimiterInstance>>>,
}

impl LimiterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            instances: DashMap::new(),
        }
    }

    /// Resolve `api_key`'s live instance, consulting `config` for the most
    /// recent stored configuration (or `None` if unconfigured).
    ///
    /// If an instance already exists but no longer matches `config`'s
    /// parameters, it is replaced — old state is discarded, matching the
    /// "reconfiguration resets" semantics recorded in the design notes.
    pub fn get_or_create(&self, api_key: &str, config: Option<&RateLimitConfig>, now: f64) -> Resolved {
        let Some(config) = config else {
            return Resolved::NotConfigured;
        };

        if let Some(existing) = self.instances.get(api_key) {
            if existing.lock().matches(config) {
                return Resolved::Instance(Arc::clone(&existing));
            }
        }

        let fresh = Arc::new(Mutex::new(LimiterInstance::from_config(config, now)));
        self.instances.insert(api_key.to_string(), Arc::clone(&fresh));
        Resolved::Instance(fresh)
    }

    /// Discard all live instances. Subsequent decisions recreate them from
    /// the then-current stored configs.
    pub fn reset(&self) {
        self.instances.clear();
    }

    /// Number of keys currently holding a live instance.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the registry currently holds no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for LimiterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Environment-driven configuration for the HTTP surface and its
//! supporting services.
//!
//! Read once at startup with [`RateLimiterSettings::from_env`]. All
//! variables are optional and fall back to sane defaults so the binary runs
//! standalone with no `.env` file.

use std::env;
use std::net::SocketAddr;

use crate::error::{RateLimiterError, Result};

const ENV_PREFIX: &str = "RATE_LIMITER_";

/// Runtime configuration for `tenant-ratelimit-server`.
#[derive(Debug, Clone)]
pub struct RateLimiterSettings {
    /// Address the HTTP server binds to.
    pub bind_address: SocketAddr,
    /// Capacity of the Analytics Aggregator's recent-decisions ring.
    pub analytics_ring_capacity: usize,
    /// Capacity of the Config Store's durable log buffer.
    pub log_buffer_capacity: usize,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or
    /// `"tenant_ratelimit=debug,tower_http=info"`.
    pub log_filter: String,
}

impl RateLimiterSettings {
    /// Read settings from the process environment, applying the
    /// `RATE_LIMITER_` prefix to every variable. Does not load a `.env`
    /// file itself — callers typically call `dotenvy::dotenv().ok()`
    /// before this.
    pub fn from_env() -> Result<Self> {
        let bind_address = env_var("BIND_ADDRESS")
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| RateLimiterError::BadInput(format!("invalid {ENV_PREFIX}BIND_ADDRESS: {e}")))?;

        let analytics_ring_capacity = parse_usize("ANALYTICS_RING_CAPACITY", 100)?;
        let log_buffer_capacity = parse_usize("LOG_BUFFER_CAPACITY", 10_000)?;
        let log_filter = env_var("LOG_FILTER").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            bind_address,
            analytics_ring_capacity,
            log_buffer_capacity,
            log_filter,
        })
    }
}

impl Default for RateLimiterSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".parse().expect("valid default address"),
            analytics_ring_capacity: 100,
            log_buffer_capacity: 10_000,
            log_filter: "info".to_string(),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}{name}")).ok()
}

fn parse_usize(name: &str, default: usize) -> Result<usize> {
    match env_var(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| RateLimiterError::BadInput(format!("invalid {ENV_PREFIX}{name}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize tests that touch
    // them so they don't race each other.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in ["BIND_ADDRESS", "ANALYTICS_RING_CAPACITY", "LOG_BUFFER_CAPACITY", "LOG_FILTER"] {
            // SAFETY: serialized by ENV_LOCK, no other thread touches these vars.
            unsafe { env::remove_var(format!("{ENV_PREFIX}{key}")) };
        }
    }

    #[test]
    fn defaults_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        let settings = RateLimiterSettings::from_env().unwrap();
        assert_eq!(settings.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(settings.analytics_ring_capacity, 100);
        assert_eq!(settings.log_buffer_capacity, 10_000);
        assert_eq!(settings.log_filter, "info");
        clear_env();
    }

    #[test]
    fn reads_overrides_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        // SAFETY: serialized by ENV_LOCK, no other thread touches these vars.
        unsafe {
            env::set_var(format!("{ENV_PREFIX}BIND_ADDRESS"), "0.0.0.0:9090");
            env::set_var(format!("{ENV_PREFIX}ANALYTICS_RING_CAPACITY"), "250");
        }
        let settings = RateLimiterSettings::from_env().unwrap();
        assert_eq!(settings.bind_address.to_string(), "0.0.0.0:9090");
        assert_eq!(settings.analytics_ring_capacity, 250);
        clear_env();
    }

    #[test]
    fn rejects_malformed_bind_address() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        // SAFETY: serialized by ENV_LOCK, no other thread touches these vars.
        unsafe { env::set_var(format!("{ENV_PREFIX}BIND_ADDRESS"), "not-an-address") };
        let err = RateLimiterSettings::from_env().unwrap_err();
        assert!(matches!(err, RateLimiterError::BadInput(_)));
        clear_env();
    }
}

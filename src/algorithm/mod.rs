//! Rate limiting decision algorithms.
//!
//! Each algorithm owns its own small piece of per-key state and exposes a
//! single `allow_at(now) -> (bool, remaining)` operation. [`LimiterInstance`]
//! is the tagged variant the registry actually stores; algorithms never
//! reach for wall-clock time or shared storage themselves, which is what
//! keeps the decision path CPU-only (see the crate's concurrency model).
//!
//! # Algorithm comparison
//!
//! | Algorithm | Burst | Best for |
//! |-----------|-------|----------|
//! | Token Bucket | Full capacity after a quiet period | Bursty traffic |
//! | Leaky Bucket | None, constant admission rate | Smoothing |
//! | Fixed Window | Up to 2x at window boundaries | Simple quotas |
//! | Sliding Window | Up to ~2x-1 at boundaries | General purpose |

mod fixed_window;
mod leaky_bucket;
mod sliding_window;
mod token_bucket;

pub use fixed_window::FixedWindowState;
pub use leaky_bucket::LeakyBucketState;
pub use sliding_window::SlidingWindowState;
pub use token_bucket::TokenBucketState;

use serde::{Deserialize, Serialize};

use crate::config::RateLimitConfig;

/// The four algorithm variants a [`RateLimitConfig`] may select.
///
/// Serializes to the lowercase snake_case tags the HTTP surface and
/// dashboard expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    /// Token Bucket: refills continuously, allows bursts up to capacity.
    TokenBucket,
    /// Leaky Bucket: admits at a constant rate via a bounded queue.
    LeakyBucket,
    /// Fixed Window: resets a counter at fixed boundaries.
    FixedWindow,
    /// Sliding Window Counter: weighted blend of the current and previous window.
    SlidingWindow,
}

impl AlgorithmKind {
    /// The wire tag used in JSON and log entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenBucket => "token_bucket",
            Self::LeakyBucket => "leaky_bucket",
            Self::FixedWindow => "fixed_window",
            Self::SlidingWindow => "sliding_window",
        }
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The live, per-key algorithm state the [`crate::registry::LimiterRegistry`]
/// hands out. One instance enforces one tenant's policy.
#[derive(Debug, Clone)]
pub enum LimiterInstance {
    TokenBucket(TokenBucketState),
    LeakyBucket(LeakyBucketState),
    FixedWindow(FixedWindowState),
    SlidingWindow(SlidingWindowState),
}

impl LimiterInstance {
    /// Construct a fresh instance from a stored configuration, at `now`.
    pub fn from_config(config: &RateLimitConfig, now: f64) -> Self {
        match config.algorithm {
            AlgorithmKind::TokenBucket => {
                Self::TokenBucket(TokenBucketState::new(config.max_requests, config.window_seconds, now))
            }
            AlgorithmKind::LeakyBucket => {
                Self::LeakyBucket(LeakyBucketState::new(config.max_requests, config.window_seconds, now))
            }
            AlgorithmKind::FixedWindow => {
                Self::FixedWindow(FixedWindowState::new(config.max_requests, config.window_seconds, now))
            }
            AlgorithmKind::SlidingWindow => {
                Self::SlidingWindow(SlidingWindowState::new(config.max_requests, config.window_seconds, now))
            }
        }
    }

    /// The algorithm tag this instance is enforcing.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::TokenBucket(_) => AlgorithmKind::TokenBucket,
            Self::LeakyBucket(_) => AlgorithmKind::LeakyBucket,
            Self::FixedWindow(_) => AlgorithmKind::FixedWindow,
            Self::SlidingWindow(_) => AlgorithmKind::SlidingWindow,
        }
    }

    /// Whether this instance's parameters match a given configuration, i.e.
    /// whether it can keep serving that config without being replaced.
    pub fn matches(&self, config: &RateLimitConfig) -> bool {
        match self {
            Self::TokenBucket(s) => {
                config.algorithm == AlgorithmKind::TokenBucket
                    && s.capacity() == config.max_requests
                    && s.window_seconds() == config.window_seconds
            }
            Self::LeakyBucket(s) => {
                config.algorithm == AlgorithmKind::LeakyBucket
                    && s.capacity() == config.max_requests
                    && s.window_seconds() == config.window_seconds
            }
            Self::FixedWindow(s) => {
                config.algorithm == AlgorithmKind::FixedWindow
                    && s.max_requests() == config.max_requests
                    && s.window_seconds() == config.window_seconds
            }
            Self::SlidingWindow(s) => {
                config.algorithm == AlgorithmKind::SlidingWindow
                    && s.max_requests() == config.max_requests
                    && s.window_seconds() == config.window_seconds
            }
        }
    }

    /// Run one decision at time `now`, returning `(allowed, remaining)`.
    pub fn allow_at(&mut self, now: f64) -> (bool, u64) {
        match self {
            Self::TokenBucket(s) => s.allow_at(now),
            Self::LeakyBucket(s) => s.allow_at(now),
            Self::FixedWindow(s) => s.allow_at(now),
            Self::SlidingWindow(s) => s.allow_at(now),
        }
    }
}

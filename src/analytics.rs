//! In-memory analytics aggregation for the live dashboard.
//!
//! Counters and a bounded ring of recent decisions, guarded by a single
//! mutex acquired only after any per-instance mutex has already been
//! released (see the crate's concurrency model) so dashboard reads never
//! contend with the decision hot path for longer than a counter increment.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use serde::Serialize;

use crate::algorithm::AlgorithmKind;
use crate::decision::RequestLog;

const ALL_ALGORITHMS: [AlgorithmKind; 4] = [
    AlgorithmKind::TokenBucket,
    AlgorithmKind::LeakyBucket,
    AlgorithmKind::FixedWindow,
    AlgorithmKind::SlidingWindow,
];

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    total: u64,
    allowed: u64,
    blocked: u64,
}

impl Tally {
    fn record(&mut self, allowed: bool) {
        self.total += 1;
        if allowed {
            self.allowed += 1;
        } else {
            self.blocked += 1;
        }
    }

    fn success_rate(&self) -> f64 {
        success_rate(self.allowed, self.total)
    }
}

fn success_rate(allowed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (allowed as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}

struct State {
    overall: Tally,
    per_algorithm: HashMap<AlgorithmKind, Tally>,
    recent: VecDeque<RequestLog>,
    ring_capacity: usize,
}

/// Process-wide decision counters plus a bounded ring of recent logs.
pub struct Analytics {
    state: Mutex<State>,
}

/// Per-algorithm totals, as exposed by [`Summary`].
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmStats {
    pub total: u64,
    pub allowed: u64,
    pub blocked: u64,
    pub success_rate: f64,
}

/// Aggregate view returned by `/analytics/summary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_requests: u64,
    pub allowed_requests: u64,
    pub blocked_requests: u64,
    pub success_rate: f64,
    pub algorithm_stats: HashMap<AlgorithmKind, AlgorithmStats>,
}

impl Analytics {
    /// Create an aggregator with the default ring capacity (100).
    pub fn new() -> Self {
        Self::with_ring_capacity(100)
    }

    /// Create an aggregator with a custom ring capacity. Must be at least 1.
    pub fn with_ring_capacity(ring_capacity: usize) -> Self {
        let ring_capacity = ring_capacity.max(1);
        Self {
            state: Mutex::new(State {
                overall: Tally::default(),
                per_algorithm: HashMap::new(),
                recent: VecDeque::with_capacity(ring_capacity),
                ring_capacity,
            }),
        }
    }

    /// Record one decision: updates totals, per-algorithm totals, and the
    /// recent-logs ring (evicting the oldest entry if full).
    pub fn record(&self, log: RequestLog) {
        let mut state = self.state.lock();
        state.overall.record(log.allowed);
        state.per_algorithm.entry(log.algorithm).or_default().record(log.allowed);

        if state.recent.len() >= state.ring_capacity {
            state.recent.pop_front();
        }
        state.recent.push_back(log);
    }

    /// Aggregate totals and per-algorithm stats, including algorithms that
    /// have never been used (reported as all-zero).
    pub fn summary(&self) -> Summary {
        let state = self.state.lock();
        let mut algorithm_stats = HashMap::new();
        for kind in ALL_ALGORITHMS {
            let tally = state.per_algorithm.get(&kind).copied().unwrap_or_default();
            algorithm_stats.insert(
                kind,
                AlgorithmStats {
                    total: tally.total,
                    allowed: tally.allowed,
                    blocked: tally.blocked,
                    success_rate: tally.success_rate(),
                },
            );
        }

        Summary {
            total_requests: state.overall.total,
            allowed_requests: state.overall.allowed,
            blocked_requests: state.overall.blocked,
            success_rate: state.overall.success_rate(),
            algorithm_stats,
        }
    }

    /// The most recent `limit` logs, newest first.
    pub fn recent(&self, limit: usize) -> Vec<RequestLog> {
        let state = self.state.lock();
        state.recent.iter().rev().take(limit).cloned().collect()
    }

    /// Zero all counters and clear the ring. Does not touch the registry or
    /// the durable log — the gateway composes those resets at the call site.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.overall = Tally::default();
        state.per_algorithm.clear();
        state.recent.clear();
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}

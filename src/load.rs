//! Load Driver: generates a paced synthetic request stream against the
//! Decision Gateway, for exercising a configured policy in real time.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;

use crate::error::{RateLimiterError, Result};
use crate::gateway::Gateway;
use crate::store::ConfigStore;

/// Parameters for one load-test run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestRequest {
    pub api_key: String,
    pub endpoint: String,
    pub requests_per_second: u32,
    pub duration_seconds: u32,
}

impl LoadTestRequest {
    fn validate(&self) -> Result<()> {
        if self.requests_per_second == 0 {
            return Err(RateLimiterError::BadInput("requestsPerSecond must be a positive integer".into()));
        }
        if self.duration_seconds == 0 {
            return Err(RateLimiterError::BadInput("durationSeconds must be a positive integer".into()));
        }
        Ok(())
    }
}

/// Outcome of one load-test run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestResult {
    pub total_requests: u64,
    pub allowed: u64,
    pub blocked: u64,
    pub success_rate: f64,
    pub actual_duration: f64,
    pub requests_per_second: u32,
}

/// Drive `request` against `gateway` at a fixed pace, summarizing the
/// outcome. Paced with a real-time ticker (`tokio::time::interval`), not the
/// injectable [`crate::clock::Clock`] — this is wall-clock throughput
/// generation, not something a test wants to fast-forward through.
pub async fn run<S: ConfigStore>(gateway: &Gateway<S>, request: LoadTestRequest) -> Result<LoadTestResult> {
    request.validate()?;

    let period = Duration::from_secs_f64(1.0 / request.requests_per_second as f64);
    let total_ticks = (request.requests_per_second as u64) * (request.duration_seconds as u64);

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut total_requests = 0u64;
    let mut allowed = 0u64;
    let started = tokio::time::Instant::now();

    for _ in 0..total_ticks {
        ticker.tick().await;
        match gateway.decide(&request.api_key, &request.endpoint).await {
            Ok(decision) => {
                total_requests += 1;
                if decision.allowed {
                    allowed += 1;
                }
            }
            Err(RateLimiterError::KeyUnknown) => return Err(RateLimiterError::KeyUnknown),
            Err(err) => return Err(err),
        }
    }

    let blocked = total_requests - allowed;
    Ok(LoadTestResult {
        total_requests,
        allowed,
        blocked,
        success_rate: success_rate(allowed, total_requests),
        actual_duration: started.elapsed().as_secs_f64(),
        requests_per_second: request.requests_per_second,
    })
}

/// Two-decimal success rate, matching the Analytics Aggregator's rounding.
fn success_rate(allowed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (allowed as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}

/// Shared handle passed to the HTTP layer so it can reach a gateway without
/// knowing its concrete store type at the routing layer.
pub type SharedGateway<S> = Arc<Gateway<S>>;

//! HTTP surface: a thin `axum` binding from the route table to the
//! Decision Gateway, Config Store, and Load Driver.
//!
//! All JSON bodies other than `/protected/test` and its error responses use
//! camelCase field names (via `#[serde(rename_all = "camelCase")]` on the
//! domain types); the two exceptions keep the snake_case shape a dashboard
//! polling `/protected/test` directly expects.

mod error_response;

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::algorithm::AlgorithmKind;
use crate::apikey::ApiKeyRecord;
use crate::config::RateLimitConfig;
use crate::decision::RequestLog;
use crate::error::{RateLimiterError, Result};
use crate::gateway::Gateway;
use crate::load::{self, LoadTestRequest, LoadTestResult};
use crate::store::ConfigStore;

/// Shared application state handed to every handler.
pub struct AppState<S: ConfigStore> {
    pub gateway: Arc<Gateway<S>>,
}

impl<S: ConfigStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// Build the full router for a gateway over store type `S`. Every route is
/// served under the `/api` prefix.
pub fn router<S: ConfigStore>(gateway: Arc<Gateway<S>>) -> Router {
    let state = AppState { gateway };

    let api = Router::new()
        .route("/api-keys", post(create_api_key::<S>).get(list_api_keys::<S>))
        .route("/rate-limit-configs", post(create_config::<S>).get(list_configs::<S>))
        .route("/protected/test", get(protected_test::<S>))
        .route("/analytics/summary", get(analytics_summary::<S>))
        .route("/analytics/recent-logs", get(analytics_recent_logs::<S>))
        .route("/load-test", post(run_load_test::<S>))
        .route("/system-status", get(system_status::<S>))
        .route("/reset-stats", delete(reset_stats::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Router::new().nest("/api", api)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateApiKeyRequest {
    name: String,
}

async fn create_api_key<S: ConfigStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<ApiKeyRecord>)> {
    if body.name.trim().is_empty() {
        return Err(RateLimiterError::BadInput("name must not be empty".into()));
    }
    let record = ApiKeyRecord::new(body.name);
    state.gateway.store().put_api_key(record.clone()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_api_keys<S: ConfigStore>(State(state): State<AppState<S>>) -> Result<Json<Vec<ApiKeyRecord>>> {
    Ok(Json(state.gateway.store().list_api_keys().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateConfigRequest {
    api_key: String,
    algorithm: AlgorithmKind,
    max_requests: u64,
    window_seconds: f64,
}

async fn create_config<S: ConfigStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<CreateConfigRequest>,
) -> Result<(StatusCode, Json<RateLimitConfig>)> {
    if state.gateway.store().find_api_key(&body.api_key).await?.is_none() {
        return Err(RateLimiterError::KeyUnknown);
    }
    let config = RateLimitConfig::try_new(body.api_key, body.algorithm, body.max_requests, body.window_seconds)?;
    state.gateway.store().put_config(config.clone()).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

async fn list_configs<S: ConfigStore>(State(state): State<AppState<S>>) -> Result<Json<Vec<RateLimitConfig>>> {
    Ok(Json(state.gateway.store().list_configs().await?))
}

#[derive(Debug, Deserialize)]
struct ProtectedTestQuery {
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ProtectedTestResponse {
    success: bool,
    remaining_quota: u64,
    algorithm: AlgorithmKind,
    timestamp: f64,
}

async fn protected_test<S: ConfigStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<ProtectedTestQuery>,
) -> Result<Json<ProtectedTestResponse>> {
    let decision = state.gateway.decide(&query.api_key, "/protected/test").await?;
    if !decision.allowed {
        return Err(RateLimiterError::RateLimited {
            algorithm: decision.algorithm,
        });
    }
    Ok(Json(ProtectedTestResponse {
        success: true,
        remaining_quota: decision.remaining_quota,
        algorithm: decision.algorithm,
        timestamp: decision.timestamp,
    }))
}

async fn analytics_summary<S: ConfigStore>(
    State(state): State<AppState<S>>,
) -> Json<crate::analytics::Summary> {
    Json(state.gateway.analytics().summary())
}

#[derive(Debug, Deserialize)]
struct RecentLogsQuery {
    limit: Option<usize>,
}

async fn analytics_recent_logs<S: ConfigStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<RecentLogsQuery>,
) -> Json<Vec<RequestLog>> {
    Json(state.gateway.analytics().recent(query.limit.unwrap_or(100)))
}

async fn run_load_test<S: ConfigStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<LoadTestRequest>,
) -> Result<Json<LoadTestResult>> {
    Ok(Json(load::run(&state.gateway, body).await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SystemStatus {
    status: &'static str,
    active_api_keys: usize,
    active_configs: usize,
    total_requests_logged: usize,
}

async fn system_status<S: ConfigStore>(State(state): State<AppState<S>>) -> Result<Json<SystemStatus>> {
    let store = state.gateway.store();
    Ok(Json(SystemStatus {
        status: "operational",
        active_api_keys: store.list_api_keys().await?.len(),
        active_configs: store.list_configs().await?.len(),
        total_requests_logged: store.count_logs().await?,
    }))
}

#[derive(Debug, Serialize)]
struct ResetStatsResponse {
    status: &'static str,
}

async fn reset_stats<S: ConfigStore>(State(state): State<AppState<S>>) -> Result<Json<ResetStatsResponse>> {
    state.gateway.reset().await?;
    Ok(Json(ResetStatsResponse { status: "ok" }))
}

impl IntoResponse for RateLimiterError {
    fn into_response(self) -> axum::response::Response {
        error_response::into_response(&self)
    }
}

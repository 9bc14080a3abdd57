//! Maps [`RateLimiterError`] onto HTTP status codes and JSon error bodies.
//!
//! `/protected/test`'s failure modes keep the snake_case `detail` shape the
//! spec calls for; other endpoints get a generic `{"detail": "..."}` body at
//! the appropriate status.

use axum::http::StatusCode;
use axum::response::{IntoResponse as _, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{RateLimiterError, StoreError};

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Serialize)]
struct RateLimitedBody {
    detail: &'static str,
    remaining_quota: u64,
    algorithm: crate::algorithm::AlgorithmKind,
}

pub(super) fn into_response(err: &RateLimiterError) -> Response {
    match err {
        RateLimiterError::KeyUnknown => {
            (StatusCode::UNAUTHORIZED, Json(ErrorBody { detail: err.to_string() })).into_response()
        }
        RateLimiterError::BadInput(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorBody { detail: message.clone() })).into_response()
        }
        RateLimiterError::RateLimited { algorithm } => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(RateLimitedBody {
                detail: "Rate limit exceeded",
                remaining_quota: 0,
                algorithm: *algorithm,
            }),
        )
            .into_response(),
        RateLimiterError::Store(store_err) => {
            let status = match store_err {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(ErrorBody { detail: err.to_string() })).into_response()
        }
        RateLimiterError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { detail: err.to_string() })).into_response()
        }
    }
}

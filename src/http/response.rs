//! Response mapping.
//!
//! Every handler funnels its `ProxyResult` through [`respond`], which
//! records metrics, logs failures with full detail and renders the JSON
//! body the caller sees.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Instant;

use crate::error::ProxyResult;
use crate::observability::metrics;

/// Convert a handler result into an HTTP response.
pub fn respond<T: Serialize>(
    route: &'static str,
    start: Instant,
    expose_error_details: bool,
    result: ProxyResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            metrics::record_request(route, StatusCode::OK.as_u16(), start);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!(route, status = status.as_u16(), error = %e, retryable = e.is_retryable(), "Request failed");
            } else {
                tracing::info!(route, status = status.as_u16(), error = %e, "Request rejected");
            }
            metrics::record_request(route, status.as_u16(), start);
            e.into_response_with(expose_error_details)
        }
    }
}

//! Error taxonomy shared by the token manager, the forwarder and the HTTP surface.
//!
//! # Status Mapping
//! ```text
//! BadRequest        → 400 {error}
//! UpstreamGraphql   → 400 {errors}   (verbatim from upstream)
//! TokenAcquisition  → 500 {error, details?}
//! UpstreamTransport → 500 {error, details?}
//! ```
//!
//! # Design Decisions
//! - No variant ever carries client credentials
//! - `details` are best-effort diagnostics copied from the upstream body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that terminate a single proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Caller input was missing or malformed. No network call was made.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The client-credentials exchange failed.
    #[error("Token acquisition failed{}", status_suffix(.status))]
    TokenAcquisition {
        /// Upstream HTTP status, absent for network failures.
        status: Option<u16>,
        /// Upstream error body, if one could be read.
        body: Option<Value>,
    },

    /// The GraphQL endpoint answered 2xx but reported semantic errors.
    #[error("GraphQL error: {}", first_message(.0))]
    UpstreamGraphql(Vec<Value>),

    /// Network failure, timeout, non-2xx or undecodable upstream response.
    #[error("Upstream transport error: {message}")]
    UpstreamTransport {
        message: String,
        status: Option<u16>,
        details: Option<Value>,
        timed_out: bool,
    },
}

/// Result type for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

fn first_message(errors: &[Value]) -> String {
    errors
        .first()
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

impl ProxyError {
    /// HTTP status this error surfaces as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest(_) | ProxyError::UpstreamGraphql(_) => StatusCode::BAD_REQUEST,
            ProxyError::TokenAcquisition { .. } | ProxyError::UpstreamTransport { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether a caller may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProxyError::UpstreamTransport { timed_out, status, .. } => {
                *timed_out || status.is_none() || status.is_some_and(|s| s >= 500)
            }
            ProxyError::TokenAcquisition { status, .. } => status.is_none_or(|s| s >= 500),
            _ => false,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::BadRequest(_) => "bad_request",
            ProxyError::TokenAcquisition { .. } => "token_acquisition",
            ProxyError::UpstreamGraphql(_) => "graphql",
            ProxyError::UpstreamTransport { .. } => "transport",
        }
    }

    /// Build a transport error from a reqwest failure.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        ProxyError::UpstreamTransport {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
            details: None,
            timed_out: err.is_timeout(),
        }
    }

    /// Render the JSON body returned to callers.
    ///
    /// With `expose_details` off, 500-class bodies only carry the generic
    /// `error` field.
    pub fn to_body(&self, expose_details: bool) -> Value {
        match self {
            ProxyError::BadRequest(message) => json!({ "error": message }),
            ProxyError::UpstreamGraphql(errors) => json!({ "errors": errors }),
            ProxyError::TokenAcquisition { body, .. } => {
                with_details("Failed to authenticate with upstream", body, expose_details)
            }
            ProxyError::UpstreamTransport { details, timed_out, .. } => {
                let message = if *timed_out {
                    "Upstream request timed out"
                } else {
                    "Upstream request failed"
                };
                with_details(message, details, expose_details)
            }
        }
    }

    /// Response honouring a disclosure setting.
    pub fn into_response_with(self, expose_details: bool) -> Response {
        (self.status_code(), Json(self.to_body(expose_details))).into_response()
    }
}

/// Best-effort conversion of an upstream body into a diagnostic value.
///
/// JSON bodies are kept as-is, anything else becomes a string, and blank
/// bodies yield `None`.
pub(crate) fn diagnostic_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

fn with_details(message: &str, details: &Option<Value>, expose: bool) -> Value {
    match details {
        Some(d) if expose => json!({ "error": message, "details": d }),
        _ => json!({ "error": message }),
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        self.into_response_with(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ProxyError::UpstreamGraphql(vec![]).status_code(), StatusCode::BAD_REQUEST);
        let err = ProxyError::TokenAcquisition { status: Some(401), body: None };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_graphql_errors_verbatim() {
        let errors = vec![json!({ "message": "X", "path": ["listCustomer"] })];
        let err = ProxyError::UpstreamGraphql(errors.clone());
        assert_eq!(err.to_body(false), json!({ "errors": errors }));
        assert_eq!(err.to_string(), "GraphQL error: X");
    }

    #[test]
    fn test_details_disclosure() {
        let err = ProxyError::UpstreamTransport {
            message: "status 502".into(),
            status: Some(502),
            details: Some(json!({ "reason": "bad gateway" })),
            timed_out: false,
        };
        assert_eq!(err.to_body(true)["details"]["reason"], "bad gateway");
        assert!(err.to_body(false).get("details").is_none());
        assert_eq!(err.to_body(false)["error"], "Upstream request failed");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_diagnostic_body() {
        assert_eq!(diagnostic_body("  "), None);
        assert_eq!(
            diagnostic_body(r#"{"error":"invalid_client"}"#),
            Some(json!({ "error": "invalid_client" }))
        );
        assert_eq!(diagnostic_body("nope"), Some(Value::String("nope".into())));
    }

    #[test]
    fn test_token_error_display() {
        let err = ProxyError::TokenAcquisition { status: Some(401), body: None };
        assert_eq!(err.to_string(), "Token acquisition failed (status 401)");
        assert!(!err.is_retryable());
    }
}

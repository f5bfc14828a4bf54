//! Request handling helpers.
//!
//! # Responsibilities
//! - Attach a request ID (UUID v4) as early as possible
//! - Open a tracing span per request carrying that ID
//! - Decode and default pagination/search parameters

use axum::{body::Body, http::Request};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::Span;

use crate::error::{ProxyError, ProxyResult};
use crate::graphql::operations::{Pagination, StringFilter};

/// Header carrying the correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Default page size for customer listings.
pub const CUSTOMER_PAGE_SIZE: u32 = 20;

/// Default page size for order listings.
pub const ORDER_PAGE_SIZE: u32 = 50;

/// Layer that assigns a UUID request ID when the caller sent none.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer that echoes the request ID on the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Span for one inbound request.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// `?page=&limit=` parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    /// Resolve to a pagination input, defaulting `page` to 1.
    pub fn pagination(&self, default_limit: u32) -> ProxyResult<Pagination> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(default_limit);
        if page == 0 || limit == 0 {
            return Err(ProxyError::BadRequest(
                "page and limit must be positive integers".to_string(),
            ));
        }
        Ok(Pagination { page, limit })
    }
}

/// `GET /api/customers` parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub id: Option<String>,
}

impl CustomerListParams {
    /// Paging part of the parameters.
    pub fn paging(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }

    /// Search term, ignoring blanks.
    pub fn search(&self) -> Option<String> {
        non_blank(&self.search)
    }

    /// Exact-id filter, ignoring blanks.
    pub fn id_filter(&self) -> Option<StringFilter> {
        non_blank(&self.id).map(StringFilter::eq)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PageParams::default();
        assert_eq!(params.pagination(CUSTOMER_PAGE_SIZE).unwrap(), Pagination { page: 1, limit: 20 });
        assert_eq!(params.pagination(ORDER_PAGE_SIZE).unwrap(), Pagination { page: 1, limit: 50 });
    }

    #[test]
    fn test_zero_page_rejected() {
        let params = PageParams { page: Some(0), limit: None };
        assert!(matches!(params.pagination(20), Err(ProxyError::BadRequest(_))));
    }

    #[test]
    fn test_blank_filters_dropped() {
        let params = CustomerListParams {
            search: Some("  ".into()),
            id: Some("c-1".into()),
            ..Default::default()
        };
        assert_eq!(params.search(), None);
        assert_eq!(params.id_filter(), Some(StringFilter::eq("c-1")));
    }
}

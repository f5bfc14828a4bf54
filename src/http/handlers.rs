//! Route handlers for the generic and typed surfaces.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use crate::error::{ProxyError, ProxyResult};
use crate::graphql::operations::{
    Customer, ListCustomersVariables, ListOrdersVariables, Order, Page, StringFilter,
};
use crate::graphql::{ForwardRequest, ListCustomers, ListOrders};
use crate::http::request::{CustomerListParams, PageParams, CUSTOMER_PAGE_SIZE, ORDER_PAGE_SIZE};
use crate::http::response::respond;
use crate::http::server::AppState;

/// `POST /api/ikas`
pub async fn proxy_query(
    State(state): State<AppState>,
    payload: Result<Json<ForwardRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let result = forward_query(&state, payload).await;
    respond("proxy", start, state.expose_error_details, result)
}

async fn forward_query(
    state: &AppState,
    payload: Result<Json<ForwardRequest>, JsonRejection>,
) -> ProxyResult<Value> {
    let Json(request) = payload.map_err(|e| ProxyError::BadRequest(e.body_text()))?;
    state.forwarder.forward(&request).await
}

/// `GET /api/customers`
pub async fn list_customers(
    State(state): State<AppState>,
    params: Result<Query<CustomerListParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = fetch_customers(&state, params).await;
    respond("customers", start, state.expose_error_details, result)
}

async fn fetch_customers(
    state: &AppState,
    params: Result<Query<CustomerListParams>, QueryRejection>,
) -> ProxyResult<Page<Customer>> {
    let Query(params) = params.map_err(|e| ProxyError::BadRequest(e.body_text()))?;

    let variables = ListCustomersVariables {
        pagination: params.paging().pagination(CUSTOMER_PAGE_SIZE)?,
        search: params.search(),
        id: params.id_filter(),
    };

    let mut page = state
        .forwarder
        .execute::<ListCustomers>(&variables)
        .await?
        .list_customer;

    for customer in &mut page.data {
        if let Some(attributes) = customer.attributes.as_mut() {
            state.attributes.label(attributes);
        }
    }

    Ok(page)
}

/// `GET /api/orders/customer/{customer_id}`
pub async fn list_customer_orders(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = fetch_orders(&state, customer_id, params).await;
    respond("orders", start, state.expose_error_details, result)
}

async fn fetch_orders(
    state: &AppState,
    customer_id: String,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ProxyResult<Page<Order>> {
    let Query(params) = params.map_err(|e| ProxyError::BadRequest(e.body_text()))?;

    if customer_id.trim().is_empty() {
        return Err(ProxyError::BadRequest("customerId is required".to_string()));
    }

    let variables = ListOrdersVariables {
        pagination: params.pagination(ORDER_PAGE_SIZE)?,
        customer_id: StringFilter::eq(customer_id),
    };

    let data = state.forwarder.execute::<ListOrders>(&variables).await?;
    Ok(data.list_order)
}

#[derive(Serialize)]
struct TokenHealth {
    cached: bool,
    expires_in_secs: Option<u64>,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.forwarder.tokens().snapshot().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "token": TokenHealth {
            cached: snapshot.cached,
            expires_in_secs: snapshot.expires_in.map(|d| d.as_secs()),
        },
        "attributes": state.attributes.len(),
    }))
}

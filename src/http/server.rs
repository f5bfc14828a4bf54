//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the upstream HTTP client, token manager and forwarder
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, limits, timeout)
//! - Serve until the shutdown signal fires

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::attributes::AttributeCatalog;
use crate::config::schema::CorsConfig;
use crate::config::BffConfig;
use crate::graphql::QueryForwarder;
use crate::http::handlers;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::startup::spawn_attribute_prefetch;
use crate::token::{ClientCredentialsExchange, IdentityExchange, TokenManager};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<QueryForwarder>,
    pub attributes: Arc<AttributeCatalog>,
    pub expose_error_details: bool,
}

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("no store URL configured")]
    MissingStore,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// HTTP server for the BFF.
pub struct HttpServer {
    router: Router,
    config: BffConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a server that exchanges the configured client credentials.
    pub fn new(config: BffConfig) -> Result<Self, ServerError> {
        let client = build_client(&config)?;
        let token_url = config.upstream.token_url().ok_or(ServerError::MissingStore)?;
        let exchange = ClientCredentialsExchange::new(
            client.clone(),
            token_url,
            config.upstream.client_id.clone(),
            config.upstream.client_secret.clone(),
            Duration::from_secs(config.timeouts.upstream_secs),
        );
        Self::assemble(config, client, Arc::new(exchange))
    }

    /// Create a server around a caller-supplied identity exchange.
    pub fn with_exchange(
        config: BffConfig,
        exchange: Arc<dyn IdentityExchange>,
    ) -> Result<Self, ServerError> {
        let client = build_client(&config)?;
        Self::assemble(config, client, exchange)
    }

    fn assemble(
        config: BffConfig,
        client: reqwest::Client,
        exchange: Arc<dyn IdentityExchange>,
    ) -> Result<Self, ServerError> {
        let tokens = Arc::new(TokenManager::new(exchange));
        let forwarder = Arc::new(QueryForwarder::new(
            client,
            config.upstream.graphql_url.clone(),
            tokens,
            Duration::from_secs(config.timeouts.upstream_secs),
        ));

        let state = AppState {
            forwarder,
            attributes: Arc::new(AttributeCatalog::new()),
            expose_error_details: config.security.expose_error_details,
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run top to bottom on the way in.
    #[allow(deprecated)]
    fn build_router(config: &BffConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(propagate_request_id_layer())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(cors_layer(&config.cors))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .route("/api/ikas", post(handlers::proxy_query))
            .route("/api/customers", get(handlers::list_customers))
            .route("/api/orders/customer/{customer_id}", get(handlers::list_customer_orders))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            graphql_url = %self.config.upstream.graphql_url,
            "HTTP server starting"
        );

        spawn_attribute_prefetch(&self.state, self.config.upstream.prefetch_attributes);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn build_client(config: &BffConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .user_agent(concat!("ikas-bff/", env!("CARGO_PKG_VERSION")))
        .build()
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}

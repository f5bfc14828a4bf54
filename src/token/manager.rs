//! Cached bearer token with lazy refresh.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::error::ProxyResult;
use crate::observability::metrics;
use crate::token::exchange::IdentityExchange;

/// Milliseconds of validity kept per second of advertised lifetime.
///
/// Tokens are treated as expired once 90% of their lifetime has elapsed.
pub const LIFETIME_MILLIS_PER_SEC: u64 = 900;

/// The single cached token.
#[derive(Debug, Default)]
struct TokenState {
    access_token: Option<String>,
    expires_at: Option<Instant>,
}

impl TokenState {
    fn valid_token(&self, now: Instant) -> Option<&str> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some(token),
            _ => None,
        }
    }
}

/// Read-only view of the cache for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub cached: bool,
    pub expires_in: Option<Duration>,
}

/// Owns the bearer token and refreshes it through an [`IdentityExchange`].
///
/// Refreshes are single-flight: callers that find the token expired queue
/// on `refresh`, and everyone after the first reuses the fresh token.
pub struct TokenManager {
    exchange: Arc<dyn IdentityExchange>,
    state: RwLock<TokenState>,
    refresh: Mutex<()>,
}

impl TokenManager {
    /// Create a manager with an empty cache.
    pub fn new(exchange: Arc<dyn IdentityExchange>) -> Self {
        Self {
            exchange,
            state: RwLock::new(TokenState::default()),
            refresh: Mutex::new(()),
        }
    }

    /// Return a valid bearer token, exchanging credentials if needed.
    ///
    /// A failed exchange leaves the cached state untouched.
    pub async fn get_token(&self) -> ProxyResult<String> {
        if let Some(token) = self.state.read().await.valid_token(Instant::now()) {
            return Ok(token.to_string());
        }

        let _flight = self.refresh.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(token) = self.state.read().await.valid_token(Instant::now()) {
            return Ok(token.to_string());
        }

        tracing::info!("Access token missing or expired, requesting a new one");

        let grant = match self.exchange.exchange().await {
            Ok(grant) => grant,
            Err(e) => {
                metrics::record_token_refresh(false);
                return Err(e);
            }
        };

        let lifetime = Duration::from_millis(grant.expires_in.saturating_mul(LIFETIME_MILLIS_PER_SEC));
        let mut state = self.state.write().await;
        state.access_token = Some(grant.access_token.clone());
        state.expires_at = Some(Instant::now() + lifetime);

        metrics::record_token_refresh(true);
        tracing::info!(
            expires_in_secs = grant.expires_in,
            usable_for_ms = lifetime.as_millis() as u64,
            "Access token refreshed"
        );

        Ok(grant.access_token)
    }

    /// Describe the cache without revealing the token.
    pub async fn snapshot(&self) -> TokenSnapshot {
        let state = self.state.read().await;
        let now = Instant::now();
        let expires_in = state
            .valid_token(now)
            .and(state.expires_at)
            .map(|at| at.saturating_duration_since(now));
        TokenSnapshot {
            cached: state.access_token.is_some(),
            expires_in,
        }
    }
}

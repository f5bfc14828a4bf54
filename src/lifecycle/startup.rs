//! Startup tasks that run alongside the listener.

use crate::http::server::AppState;

/// Load the customer attribute catalog.
///
/// Failures are logged and swallowed: the catalog stays empty and
/// customer listings carry raw attribute ids.
pub async fn prime_attribute_catalog(state: AppState) {
    tracing::info!("Fetching customer attribute definitions");
    if let Err(e) = state.attributes.refresh(&state.forwarder).await {
        tracing::error!(error = %e, "Could not load customer attributes at startup, continuing without labels");
    }
}

/// Spawn [`prime_attribute_catalog`] if enabled.
pub fn spawn_attribute_prefetch(state: &AppState, enabled: bool) {
    if !enabled {
        tracing::debug!("Attribute prefetch disabled");
        return;
    }
    tokio::spawn(prime_attribute_catalog(state.clone()));
}

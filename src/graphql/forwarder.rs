//! Forwards GraphQL documents to the upstream API with a bearer token.
//!
//! # Outcome Mapping
//! ```text
//! query missing/blank            → BadRequest (no token, no upstream call)
//! token exchange failed          → TokenAcquisition
//! network error / timeout / !2xx → UpstreamTransport (body kept as details)
//! 2xx with non-empty `errors`    → UpstreamGraphql (verbatim)
//! 2xx otherwise                  → body without `errors`
//! ```

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{diagnostic_body, ProxyError, ProxyResult};
use crate::graphql::operations::Operation;
use crate::graphql::types::{ForwardRequest, GraphqlEnvelope, GraphqlPayload};
use crate::observability::metrics;
use crate::token::TokenManager;

/// Submits queries upstream on behalf of the browser client.
pub struct QueryForwarder {
    client: reqwest::Client,
    graphql_url: String,
    tokens: Arc<TokenManager>,
    timeout: Duration,
}

impl QueryForwarder {
    pub fn new(
        client: reqwest::Client,
        graphql_url: String,
        tokens: Arc<TokenManager>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            graphql_url,
            tokens,
            timeout,
        }
    }

    /// The token manager this forwarder draws from.
    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Forward a free-form query and return the upstream body.
    pub async fn forward(&self, request: &ForwardRequest) -> ProxyResult<Value> {
        let query = request.validated_query()?;
        let envelope = self.submit("ad-hoc", query, request.variables.as_ref()).await?;
        Ok(envelope.into_body())
    }

    /// Run a typed operation and decode its `data`.
    pub async fn execute<O: Operation>(&self, variables: &O::Variables) -> ProxyResult<O::Data> {
        let data = self.submit(O::NAME, O::QUERY, Some(variables)).await?.into_data();

        serde_json::from_value(data).map_err(|e| {
            tracing::error!(operation = O::NAME, error = %e, "Upstream data did not match the expected shape");
            metrics::record_upstream_error("decode");
            ProxyError::UpstreamTransport {
                message: format!("unexpected {} response: {}", O::NAME, e),
                status: None,
                details: None,
                timed_out: false,
            }
        })
    }

    async fn submit<V>(&self, operation: &str, query: &str, variables: Option<&V>) -> ProxyResult<GraphqlEnvelope>
    where
        V: Serialize + Sync,
    {
        let token = self.tokens.get_token().await.inspect_err(|e| {
            tracing::error!(operation, error = %e, "Could not obtain upstream access token");
            metrics::record_upstream_error(e.kind());
        })?;

        let payload = GraphqlPayload { query, variables };

        let response = self
            .client
            .post(&self.graphql_url)
            .timeout(self.timeout)
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_failure(operation, &e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_failure(operation, &e))?;

        if !status.is_success() {
            let details = diagnostic_body(&text);
            tracing::error!(
                operation,
                status = status.as_u16(),
                details = ?details,
                "GraphQL endpoint returned an error status"
            );
            metrics::record_upstream_error("transport");
            return Err(ProxyError::UpstreamTransport {
                message: format!("GraphQL endpoint returned {}", status),
                status: Some(status.as_u16()),
                details,
                timed_out: false,
            });
        }

        let envelope: GraphqlEnvelope = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(operation, error = %e, "GraphQL endpoint returned invalid JSON");
            metrics::record_upstream_error("transport");
            ProxyError::UpstreamTransport {
                message: format!("invalid JSON from GraphQL endpoint: {}", e),
                status: Some(status.as_u16()),
                details: diagnostic_body(&text),
                timed_out: false,
            }
        })?;

        envelope.check().inspect_err(|e| {
            if let ProxyError::UpstreamGraphql(errors) = e {
                let errors = Value::Array(errors.clone());
                tracing::warn!(
                    operation,
                    errors = %errors,
                    "GraphQL API reported errors"
                );
                metrics::record_upstream_error("graphql");
            }
        })
    }

    fn transport_failure(&self, operation: &str, err: &reqwest::Error) -> ProxyError {
        let error = ProxyError::from_transport(err);
        tracing::error!(
            operation,
            graphql_url = %self.graphql_url,
            error = %err,
            timed_out = err.is_timeout(),
            "GraphQL request failed"
        );
        metrics::record_upstream_error("transport");
        error
    }
}

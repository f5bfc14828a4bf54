//! Wire types for the GraphQL forwarding contract.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProxyError, ProxyResult};

/// Inbound payload of the generic proxy surface.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForwardRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
}

impl ForwardRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            variables: None,
        }
    }

    /// The query text, or `BadRequest` when absent or blank.
    pub fn validated_query(&self) -> ProxyResult<&str> {
        match self.query.as_deref() {
            Some(q) if !q.trim().is_empty() => Ok(q),
            _ => Err(ProxyError::BadRequest("GraphQL query is required".to_string())),
        }
    }
}

/// Body sent to the upstream GraphQL endpoint.
#[derive(Debug, Serialize)]
pub struct GraphqlPayload<'a, V: Serialize> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a V>,
}

/// Upstream response envelope.
#[derive(Debug, Default, Deserialize)]
pub struct GraphqlEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<Value>>,
    /// Remaining top-level members, e.g. `extensions`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GraphqlEnvelope {
    /// Fail with the verbatim GraphQL errors when any are present.
    pub fn check(mut self) -> ProxyResult<Self> {
        match self.errors.take() {
            Some(errors) if !errors.is_empty() => Err(ProxyError::UpstreamGraphql(errors)),
            _ => Ok(self),
        }
    }

    /// Just the `data` member.
    pub fn into_data(self) -> Value {
        self.data.unwrap_or(Value::Null)
    }

    /// The upstream body minus `errors`.
    pub fn into_body(self) -> Value {
        let mut body = self.extra;
        body.insert("data".to_string(), self.data.unwrap_or(Value::Null));
        Value::Object(body)
    }
}

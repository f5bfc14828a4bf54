//! Client-credentials exchange against the store's identity endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::error::{diagnostic_body, ProxyError, ProxyResult};

/// Decoded identity endpoint response.
#[derive(Clone, Deserialize)]
pub struct TokenGrant {
    /// Bearer token for the GraphQL API.
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Something that can trade credentials for a bearer token.
#[async_trait]
pub trait IdentityExchange: Send + Sync {
    async fn exchange(&self) -> ProxyResult<TokenGrant>;
}

/// OAuth2 client-credentials grant over HTTP.
pub struct ClientCredentialsExchange {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    timeout: Duration,
}

impl ClientCredentialsExchange {
    pub fn new(
        client: reqwest::Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            token_url,
            client_id,
            client_secret,
            timeout,
        }
    }
}

#[async_trait]
impl IdentityExchange for ClientCredentialsExchange {
    async fn exchange(&self) -> ProxyResult<TokenGrant> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .timeout(self.timeout)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    token_url = %self.token_url,
                    error = %e,
                    timed_out = e.is_timeout(),
                    "Identity endpoint unreachable"
                );
                ProxyError::TokenAcquisition { status: None, body: None }
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let body = diagnostic_body(&text);
            tracing::error!(
                token_url = %self.token_url,
                status = status.as_u16(),
                body = ?body,
                "Identity endpoint rejected client credentials"
            );
            return Err(ProxyError::TokenAcquisition {
                status: Some(status.as_u16()),
                body,
            });
        }

        serde_json::from_str::<TokenGrant>(&text).map_err(|e| {
            tracing::error!(error = %e, "Identity endpoint returned an undecodable grant");
            ProxyError::TokenAcquisition {
                status: Some(status.as_u16()),
                body: None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_decoding() {
        let grant: TokenGrant =
            serde_json::from_str(r#"{"access_token":"abc","expires_in":3600,"token_type":"bearer"}"#)
                .unwrap();
        assert_eq!(grant.access_token, "abc");
        assert_eq!(grant.expires_in, 3600);
        assert!(!format!("{:?}", grant).contains("abc"));
    }
}

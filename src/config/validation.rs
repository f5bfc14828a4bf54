//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that credentials and the store are configured
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BffConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::BffConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Missing(&'static str),

    #[error("{field} is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request_secs}) must exceed twice timeouts.upstream_secs ({upstream_secs})")]
    RequestTimeoutTooShort { request_secs: u64, upstream_secs: u64 },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &BffConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let upstream = &config.upstream;
    if upstream.client_id.trim().is_empty() {
        errors.push(ValidationError::Missing("upstream.client_id"));
    }
    if upstream.client_secret.trim().is_empty() {
        errors.push(ValidationError::Missing("upstream.client_secret"));
    }

    match upstream.token_url() {
        None => errors.push(ValidationError::Missing("upstream.store_url or upstream.store_name")),
        Some(url) if Url::parse(&url).is_err() => errors.push(ValidationError::InvalidUrl {
            field: "upstream.store_url",
            value: url,
        }),
        Some(_) => {}
    }

    if Url::parse(&upstream.graphql_url).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "upstream.graphql_url",
            value: upstream.graphql_url.clone(),
        });
    }

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("timeouts.connect_secs", timeouts.connect_secs),
        ("timeouts.upstream_secs", timeouts.upstream_secs),
        ("timeouts.request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    // A request may spend one upstream timeout on the token and one on the query.
    if timeouts.upstream_secs > 0 && timeouts.request_secs <= timeouts.upstream_secs.saturating_mul(2) {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: timeouts.request_secs,
            upstream_secs: timeouts.upstream_secs,
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> BffConfig {
        let mut config = BffConfig::default();
        config.upstream.store_name = Some("acme".into());
        config.upstream.client_id = "id".into();
        config.upstream.client_secret = "secret".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = BffConfig::default();
        config.timeouts.upstream_secs = 0;
        config.upstream.graphql_url = "not a url".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::Missing("upstream.client_id")));
        assert!(errors.contains(&ValidationError::Missing("upstream.client_secret")));
        assert!(errors.contains(&ValidationError::Missing("upstream.store_url or upstream.store_name")));
        assert!(errors.contains(&ValidationError::ZeroTimeout("timeouts.upstream_secs")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidUrl { field: "upstream.graphql_url", .. })));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_bad_bind_address() {
        let mut config = valid_config();
        config.listener.bind_address = "localhost".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("listener.bind_address"));
    }

    #[test]
    fn test_request_timeout_must_cover_token_and_query() {
        let mut config = valid_config();
        config.timeouts.upstream_secs = 15;
        config.timeouts.request_secs = 30;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::RequestTimeoutTooShort {
                request_secs: 30,
                upstream_secs: 15,
            }]
        );

        config.timeouts.request_secs = 31;
        assert!(validate_config(&config).is_ok());
    }
}

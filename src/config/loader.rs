//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::BffConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<BffConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: BffConfig = toml::from_str(&content)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build configuration from defaults and the process environment only.
pub fn from_env() -> Result<BffConfig, ConfigError> {
    let mut config = BffConfig::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply recognized environment variables on top of `config`.
///
/// `PORT` only replaces the port of the bind address; `BIND_ADDRESS`
/// replaces the whole address and wins over `PORT`.
pub fn apply_env_overrides<F>(config: &mut BffConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(port) = var("PORT") {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port.trim());
    }
    if let Some(address) = var("BIND_ADDRESS") {
        config.listener.bind_address = address;
    }
    if let Some(url) = var("STORE_URL") {
        config.upstream.store_url = Some(url);
    }
    if let Some(name) = var("IKAS_STORE_NAME") {
        config.upstream.store_name = Some(name);
    }
    if let Some(url) = var("GRAPHQL_API_URL") {
        config.upstream.graphql_url = url;
    }
    if let Some(id) = var("CLIENT_ID") {
        config.upstream.client_id = id;
    }
    if let Some(secret) = var("CLIENT_SECRET") {
        config.upstream.client_secret = secret;
    }
    if let Some(level) = var("LOG_LEVEL") {
        config.observability.log_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BffConfig::default();
        apply_env_overrides(
            &mut config,
            lookup(&[
                ("PORT", "4000"),
                ("IKAS_STORE_NAME", "acme"),
                ("CLIENT_ID", "id"),
                ("CLIENT_SECRET", "secret"),
            ]),
        );

        assert_eq!(config.listener.bind_address, "0.0.0.0:4000");
        assert_eq!(config.upstream.store_name.as_deref(), Some("acme"));
        assert_eq!(config.upstream.client_id, "id");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut config = BffConfig::default();
        config.upstream.client_id = "from-file".into();
        apply_env_overrides(&mut config, lookup(&[("CLIENT_ID", "  ")]));
        assert_eq!(config.upstream.client_id, "from-file");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("ikas_bff_config_{}.toml", std::process::id()));
        fs::write(
            &path,
            r#"
[listener]
bind_address = "127.0.0.1:3100"

[upstream]
store_url = "https://acme.myikas.com"
client_id = "id"
client_secret = "secret"
prefetch_attributes = false

[timeouts]
upstream_secs = 5
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.timeouts.upstream_secs, 5);
        assert_eq!(config.timeouts.connect_secs, 5);
        assert!(!config.upstream.prefetch_attributes);

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::Missing("upstream.client_id"),
            ValidationError::ZeroTimeout("timeouts.request_secs"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: upstream.client_id must not be empty, timeouts.request_secs must be greater than zero"
        );
    }
}

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (PORT, STORE_URL, CLIENT_ID, ...)
//!     → validation.rs (semantic checks)
//!     → BffConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BffConfig;
pub use schema::ListenerConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;

//! ikas backend-for-frontend proxy library.
//!
//! Holds the platform's client credentials on the server, caches the
//! resulting bearer token and forwards GraphQL calls for the browser.

pub mod attributes;
pub mod config;
pub mod error;
pub mod graphql;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod token;

pub use config::schema::BffConfig;
pub use error::{ProxyError, ProxyResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! Token lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! get_token()
//!     → cached and now < expires_at → return cached token
//!     → otherwise (single-flight):
//!         exchange.rs (client_credentials POST to the store)
//!         → expires_at = now + expires_in * 0.9
//!         → return new token
//! ```
//!
//! # Design Decisions
//! - One token per process, held only in memory
//! - The exchange is a trait so tests can substitute it
//! - Failures never clear or overwrite the cached token

pub mod exchange;
pub mod manager;

pub use exchange::{ClientCredentialsExchange, IdentityExchange, TokenGrant};
pub use manager::{TokenManager, TokenSnapshot};

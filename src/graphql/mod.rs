//! GraphQL forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! ForwardRequest / typed Operation
//!     → forwarder.rs (validate, get token, POST upstream)
//!     → types.rs (envelope → data | errors)
//!     → operations.rs (decode typed data)
//! ```

pub mod forwarder;
pub mod operations;
pub mod types;

pub use forwarder::QueryForwarder;
pub use operations::{ListCustomerAttributes, ListCustomers, ListOrders, Operation};
pub use types::ForwardRequest;

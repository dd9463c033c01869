//! Common wire types and errors shared across `routeloom` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
pub use protocol::{ErrorResponse, HealthResponse};

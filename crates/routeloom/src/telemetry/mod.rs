//! Structured logging for the loader and the server it builds.
//!
//! Events are emitted as JSON lines. `RUST_LOG` takes precedence over the
//! configured level when set.

pub mod init;

pub use init::init;

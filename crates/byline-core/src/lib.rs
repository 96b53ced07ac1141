//! Domain layer for the byline client.
//!
//! This crate holds the session lifecycle, the query submission state
//! machine, and the status poller, together with the gateway traits that
//! decouple them from the HTTP and storage implementations in
//! `byline-client` and `byline-infrastructure`.

pub mod error;
pub mod health;
pub mod query;
pub mod session;
pub mod timer;

// Re-export common error type
pub use error::{BylineError, Result};

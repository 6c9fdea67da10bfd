//! Resilience patterns for service clients
//!
//! Retry with exponential backoff, restricted to the error classes a caller
//! chooses to treat as transient.

mod retry;

pub use retry::{RetryConfig, RetryExecutor};

//! Service-specific client implementations
//!
//! This module contains client implementations for specific external services.

mod common;
pub mod openai;

pub use common::{build_http_client, UserAgent};

//! Validator functions and utilities
//!
//! Each validator takes the field path first so the returned error can name it.

pub mod collection;
pub mod string;
pub mod url;

// Re-export all validators for convenience
pub use collection::*;
pub use string::*;
pub use url::*;

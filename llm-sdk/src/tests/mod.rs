//! Unit tests for the LLM SDK
//!
//! This module contains tests for various components of the SDK.

pub mod error_tests;
pub mod openai_mock_tests;

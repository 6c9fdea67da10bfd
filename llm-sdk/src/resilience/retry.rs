//! Retry with exponential backoff for rate-limited calls
//!
//! This module provides a retry mechanism with configurable exponential backoff.
//! Only rate-limit and quota failures are retried; every other error is
//! returned after the first attempt. The loop is explicit: an attempt counter plus the delay computed by
//! [`backoff::ExponentialBackoff`].

use std::fmt;
use std::future::Future;
use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};

use crate::error::Result;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 means no retries)
    pub max_retries: u32,

    /// Initial backoff duration
    pub initial_interval: Duration,

    /// Maximum backoff duration
    pub max_interval: Duration,

    /// Multiplier for backoff between retries
    pub multiplier: f64,

    /// Randomization applied to each interval (0.0 gives exact doubling)
    pub randomization_factor: f64,

    /// Maximum total time to spend retrying
    pub max_elapsed_time: Option<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_interval: Duration::from_millis(2000),
            max_interval: Duration::from_secs(30),
            multiplier: 2.0,
            randomization_factor: 0.0,
            max_elapsed_time: None,
        }
    }
}

impl fmt::Display for RetryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RetryConfig {{ max_retries: {}, initial_interval: {:?}, max_interval: {:?}, multiplier: {}, randomization_factor: {}, max_elapsed_time: {:?} }}",
            self.max_retries,
            self.initial_interval,
            self.max_interval,
            self.multiplier,
            self.randomization_factor,
            self.max_elapsed_time
        )
    }
}

impl RetryConfig {
    /// Total number of attempts this policy allows (initial call plus retries)
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Build the exponential backoff described by this configuration
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_interval)
            .with_max_interval(self.max_interval)
            .with_multiplier(self.multiplier)
            .with_randomization_factor(self.randomization_factor)
            .with_max_elapsed_time(self.max_elapsed_time)
            .build()
    }
}

/// Executor for retry operations with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    /// Retry configuration
    config: RetryConfig,
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl RetryExecutor {
    /// Create a new retry executor with the specified configuration
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Execute a fallible operation with retries according to the configuration
    ///
    /// The operation is called once, then again after each computed delay while
    /// the error qualifies and the retry budget lasts. Dropping the returned
    /// future aborts both the in-flight attempt and any pending sleep.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut backoff = self.config.backoff();
        let mut attempts: u32 = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() && attempts < self.config.max_retries => {
                    match backoff.next_backoff() {
                        Some(delay) => {
                            attempts += 1;
                            log::warn!(
                                "Operation rate limited, retrying in {:?} (retry {}/{}): {}",
                                delay,
                                attempts,
                                self.config.max_retries,
                                err
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            // Max elapsed time exceeded
                            return Err(err.with_context_value("attempts", attempts + 1));
                        }
                    }
                }
                Err(err) => {
                    if attempts > 0 {
                        return Err(err.with_context_value("attempts", attempts + 1));
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Get the current retry configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_without_jitter() {
        let config = RetryConfig {
            initial_interval: Duration::from_millis(2000),
            ..RetryConfig::default()
        };
        let mut backoff = config.backoff();
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(2000)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(4000)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(8000)));
    }

    #[test]
    fn test_backoff_respects_max_interval() {
        let config = RetryConfig {
            initial_interval: Duration::from_secs(20),
            max_interval: Duration::from_secs(30),
            ..RetryConfig::default()
        };
        let mut backoff = config.backoff();
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(20)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_max_attempts() {
        assert_eq!(RetryConfig::default().max_attempts(), 3);
        let none = RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        };
        assert_eq!(none.max_attempts(), 1);
    }
}

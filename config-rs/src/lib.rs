//! config-rs/lib.rs
//! Shared configuration utilities for consistent environment handling
//! Provides typed getters over `.env` files and process environment variables

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Placeholder value shipped in sample `.env` files; never a real credential.
pub const PLACEHOLDER_API_KEY: &str = "your-openai-api-key-here";

/// Load variables from a `.env` file in the working directory, if one exists.
///
/// Returns `true` when a file was found and loaded. Variables already present
/// in the process environment are not overwritten.
pub fn load_dotenv() -> bool {
    match dotenv::dotenv() {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(_) => false,
    }
}

/// Read an environment variable and parse it, falling back to `default`
///
/// # Arguments
/// * `name` - The variable name (e.g., "LLM_MAX_RETRIES")
/// * `default` - The value to use when the variable is unset or unparsable
pub fn get_env_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Invalid value in {}, using default", name);
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a string variable, treating empty values as unset
pub fn get_env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a string variable with a default
pub fn get_env_string_or(name: &str, default: &str) -> String {
    get_env_string(name).unwrap_or_else(|| default.to_string())
}

/// Read a comma separated list; blank entries are dropped
///
/// # Returns
/// The parsed list, or `default` when the variable is unset or contains no entries
pub fn get_env_list(name: &str, default: &[&str]) -> Vec<String> {
    let parsed: Vec<String> = get_env_string(name)
        .map(|raw| {
            raw.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if parsed.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}

/// Read a duration expressed in milliseconds
pub fn get_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(get_env_var(name, default_ms))
}

/// Read a duration expressed in seconds
pub fn get_duration_secs(name: &str, default_secs: u64) -> Duration {
    Duration::from_secs(get_env_var(name, default_secs))
}

/// Read an optional duration in seconds; unset, zero or invalid values yield `None`
pub fn get_optional_duration_secs(name: &str) -> Option<Duration> {
    get_env_string(name)
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

/// Returns true when the value is a usable credential
///
/// Empty strings and the sample-file placeholders (`your-...`) are rejected.
pub fn is_real_credential(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != PLACEHOLDER_API_KEY && !value.starts_with("your-")
}

/// Look up the first usable credential among the given variable names
///
/// # Arguments
/// * `names` - Candidate variable names in priority order (e.g., `["LLM_API_KEY", "OPENAI_API_KEY"]`)
///
/// # Returns
/// The trimmed credential, or `None` when every candidate is unset or a placeholder
pub fn get_credential(names: &[&str]) -> Option<String> {
    for name in names {
        if let Some(value) = get_env_string(name) {
            if is_real_credential(&value) {
                return Some(value);
            }
            log::warn!("{} is set to a placeholder value, ignoring it", name);
        }
    }
    None
}

//! Environment variable parsing utilities.
//!
//! Used to layer `ABI_FUZZ_*` overrides on top of configuration defaults
//! without repeating the usual boilerplate:
//!
//! ```ignore
//! std::env::var("VAR_NAME")
//!     .ok()
//!     .and_then(|v| v.parse::<usize>().ok())
//!     .unwrap_or(default_value)
//! ```
//!
//! # Example
//!
//! ```
//! use abi_fuzz_types::env_utils::{env_override, env_var};
//!
//! let max_rounds: Option<usize> = env_var("ABI_FUZZ_DOC_MAX_ROUNDS");
//!
//! let mut bias = 0.5_f64;
//! env_override("ABI_FUZZ_DOC_BIAS", &mut bias);
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Overwrite `slot` with the parsed value of `key`, if set and parseable.
///
/// Returns whether an override was applied.
pub fn env_override<T: FromStr>(key: &str, slot: &mut T) -> bool {
    match env_var(key) {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

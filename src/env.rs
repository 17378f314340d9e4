//! Environment variable access with value coercion.
//!
//! Configuration for this crate comes from process environment variables
//! (most importantly `DEBUG`). Values are coerced the same way regardless of
//! the caller: the literal string `null` becomes [`EnvValue::Null`], common
//! boolean spellings become [`EnvValue::Bool`], everything else is returned
//! verbatim as [`EnvValue::Str`]. An unset variable is not an error; the
//! provided default is returned instead.

use std::env;

/// A coerced environment variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    /// The variable was set to the literal string `null`.
    Null,
    /// The variable was set to `true`/`false`/`1`/`0` (case-insensitive).
    Bool(bool),
    /// Any other value, returned verbatim.
    Str(String),
}

impl EnvValue {
    /// Returns the boolean value, or `None` if this is not a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnvValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string value, or `None` if this is not a plain string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Reads the environment variable `key`, returning `default` when unset.
///
/// Coercion rules:
/// - literal `"null"` → [`EnvValue::Null`]
/// - `"true"` / `"1"` → [`EnvValue::Bool(true)`], `"false"` / `"0"` →
///   [`EnvValue::Bool(false)`] (case-insensitive)
/// - anything else → [`EnvValue::Str`] with the raw value
pub fn env_value(key: &str, default: EnvValue) -> EnvValue {
    let Ok(value) = env::var(key) else {
        return default;
    };

    if value == "null" {
        return EnvValue::Null;
    }

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => EnvValue::Bool(true),
        "false" | "0" => EnvValue::Bool(false),
        _ => EnvValue::Str(value),
    }
}

/// Reads a boolean environment variable, returning `default` when the
/// variable is unset or does not coerce to a boolean.
pub fn env_bool(key: &str, default: bool) -> bool {
    env_value(key, EnvValue::Bool(default))
        .as_bool()
        .unwrap_or(default)
}

/// Whether debug mode is enabled (`DEBUG` environment variable).
pub fn debug_enabled() -> bool {
    env_bool("DEBUG", false)
}

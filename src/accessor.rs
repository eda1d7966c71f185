//! Typed environment accessor.
//!
//! Every operation follows the same four steps:
//!
//! 1. look the key up in the store,
//! 2. return the fallback if the key is absent or set to the empty string,
//! 3. parse the raw value with the type's parse rule,
//! 4. return the parsed value, or the fallback if parsing failed.
//!
//! None of this can fail outwardly. A misspelled key or a malformed value
//! silently yields the fallback; enable `trace` level logging for this crate
//! to see which lookups fell back and why.

use chrono::Duration;
use tracing::trace;

use crate::duration::parse_duration;
use crate::errors::{LookupError, ParseError};
use crate::parse::{parse_bool, parse_int, split_list};
use crate::source::{ReadEnv, SystemEnv};

/// Reads typed values from an environment store.
///
/// [`Env::system`] reads the process environment. Holds no state of its own:
/// each call re-reads the store, so changes are observed on the next call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Env<S = SystemEnv> {
    source: S,
}

impl Env<SystemEnv> {
    pub const fn system() -> Self {
        Self { source: SystemEnv }
    }
}

impl<S: ReadEnv> Env<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The raw value as-is. Only the absent/empty check applies.
    pub fn string(&self, key: &str, fallback: String) -> String {
        self.resolve(key, fallback, |raw| Ok(raw.to_string()))
    }

    /// A base-10 signed integer.
    pub fn int(&self, key: &str, fallback: isize) -> isize {
        self.resolve(key, fallback, parse_int)
    }

    /// `true`/`false` in any case, or `1`/`0`.
    pub fn bool(&self, key: &str, fallback: bool) -> bool {
        self.resolve(key, fallback, parse_bool)
    }

    /// A duration expression such as `1h30m`, see [`parse_duration`].
    pub fn duration(&self, key: &str, fallback: Duration) -> Duration {
        self.resolve(key, fallback, parse_duration)
    }

    /// A comma separated list, items trimmed and empty items dropped.
    ///
    /// The fallback is only used when the variable is absent or empty. A value
    /// made only of separators, such as `","`, yields an empty list.
    pub fn string_slice(&self, key: &str, fallback: Vec<String>) -> Vec<String> {
        self.resolve(key, fallback, |raw| Ok(split_list(raw)))
    }

    fn resolve<T, F>(&self, key: &str, fallback: T, parse: F) -> T
    where
        F: FnOnce(&str) -> Result<T, ParseError>,
    {
        match self.try_resolve(key, parse) {
            Ok(value) => value,
            Err(err) => {
                trace!(key, kind = err.kind(), "using fallback");
                fallback
            }
        }
    }

    fn try_resolve<T, F>(&self, key: &str, parse: F) -> Result<T, LookupError>
    where
        F: FnOnce(&str) -> Result<T, ParseError>,
    {
        let raw = self.source.var_os(key).ok_or(LookupError::Absent)?;
        if raw.is_empty() {
            return Err(LookupError::Empty);
        }
        let raw = raw.into_string().map_err(|_| ParseError::NotUnicode)?;
        Ok(parse(&raw)?)
    }
}

/// Reads `key` from the process environment as a string.
///
/// Returns `fallback` if the variable is unset or empty.
pub fn get_string(key: &str, fallback: impl Into<String>) -> String {
    Env::system().string(key, fallback.into())
}

/// Reads `key` from the process environment as an integer.
///
/// Returns `fallback` if the variable is unset, empty or not an integer.
pub fn get_int(key: &str, fallback: isize) -> isize {
    Env::system().int(key, fallback)
}

/// Reads `key` from the process environment as a boolean.
///
/// Returns `fallback` if the variable is unset, empty or not a boolean.
pub fn get_bool(key: &str, fallback: bool) -> bool {
    Env::system().bool(key, fallback)
}

/// Reads `key` from the process environment as a duration.
///
/// Returns `fallback` if the variable is unset, empty or malformed.
pub fn get_duration(key: &str, fallback: Duration) -> Duration {
    Env::system().duration(key, fallback)
}

/// Reads `key` from the process environment as a comma separated list.
///
/// Returns `fallback` if the variable is unset or empty.
pub fn get_string_slice(key: &str, fallback: Vec<String>) -> Vec<String> {
    Env::system().string_slice(key, fallback)
}

//! Read-only access to an environment variable store.
//!
//! Production code reads the process environment through [`SystemEnv`].
//! Tests can use [`InMemoryEnv`] (with `cfg(test)` or the `test-support`
//! feature) so they never touch the global process environment.

use std::env;
use std::ffi::OsString;
use std::sync::Arc;

#[cfg(any(test, feature = "test-support"))]
use std::collections::HashMap;
#[cfg(any(test, feature = "test-support"))]
use std::sync::RwLock;

/// The single read primitive the accessors depend on.
///
/// Returns `None` when `key` is not present. Implementations must not cache:
/// every call reflects the store's current state.
///
/// Does **not** require `Send + Sync`. Add the bounds at your call site.
#[cfg_attr(test, mockall::automock)]
pub trait ReadEnv {
    fn var_os(&self, key: &str) -> Option<OsString>;
}

impl<T: ReadEnv + ?Sized> ReadEnv for &T {
    #[inline]
    fn var_os(&self, key: &str) -> Option<OsString> {
        (**self).var_os(key)
    }
}

impl<T: ReadEnv + ?Sized> ReadEnv for Arc<T> {
    #[inline]
    fn var_os(&self, key: &str) -> Option<OsString> {
        (**self).var_os(key)
    }
}

/// Zero-sized type, delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var_os(&self, key: &str) -> Option<OsString> {
        // `std::env::var_os` may panic on keys the platform can never hold.
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        env::var_os(key)
    }
}

/// Won't touch the global process environment.
///
/// Backed by a `RwLock` so a single instance can be shared between threads.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct InMemoryEnv {
    vars: RwLock<HashMap<String, OsString>>,
}

#[cfg(any(test, feature = "test-support"))]
impl InMemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with_var(self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<OsString>) {
        self.vars
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }

    pub fn clear(&self) {
        self.vars
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ReadEnv for InMemoryEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.vars
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_env_delegation() {
        let std_result = std::env::var_os("PATH");
        let provider_result = SystemEnv.var_os("PATH");
        assert_eq!(std_result, provider_result);
    }

    #[test]
    fn test_system_env_missing_key() {
        assert_eq!(SystemEnv.var_os("ENVGET_SOURCE_NONEXISTENT_12345"), None);
    }

    #[test]
    fn test_system_env_unrepresentable_keys_are_absent() {
        assert_eq!(SystemEnv.var_os(""), None);
        assert_eq!(SystemEnv.var_os("A=B"), None);
        assert_eq!(SystemEnv.var_os("A\0B"), None);
    }

    #[test]
    fn test_in_memory_env_set_and_get() {
        let env = InMemoryEnv::new();
        env.set("TEST_VAR", "test_value");

        assert_eq!(env.var_os("TEST_VAR"), Some(OsString::from("test_value")));
    }

    #[test]
    fn test_in_memory_env_remove_and_clear() {
        let env = InMemoryEnv::new()
            .with_var("TEST_VAR_1", "value1")
            .with_var("TEST_VAR_2", "value2");

        env.remove("TEST_VAR_1");
        assert_eq!(env.var_os("TEST_VAR_1"), None);
        assert!(env.var_os("TEST_VAR_2").is_some());

        env.clear();
        assert_eq!(env.var_os("TEST_VAR_2"), None);
    }

    #[test]
    fn test_in_memory_env_keys_are_case_sensitive() {
        let env = InMemoryEnv::new().with_var("Key", "v");

        assert!(env.var_os("Key").is_some());
        assert_eq!(env.var_os("KEY"), None);
    }

    #[test]
    fn test_reference_and_arc_delegate() {
        fn read<E: ReadEnv>(env: E, key: &str) -> Option<OsString> {
            env.var_os(key)
        }

        let env = Arc::new(InMemoryEnv::new().with_var("K", "v"));
        assert_eq!(read(&*env, "K"), Some(OsString::from("v")));
        assert_eq!(read(env.clone(), "K"), Some(OsString::from("v")));
    }
}

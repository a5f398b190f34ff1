//! Guards for mutating the process environment in tests.
//!
//! Every mutation takes a global re-entrant lock and returns an
//! [`EnvVarGuard`] that puts the previous value back when dropped. Tests
//! that set several variables should hold an [`EnvScope`] so the whole batch
//! is applied and restored without interleaving with other tests.
//!
//! ```
//! use cascade_config_test_helpers::env;
//!
//! let _scope = env::scope([("APP_PORT", Some("9000")), ("APP_USER", None)]);
//! assert_eq!(std::env::var("APP_PORT").ok().as_deref(), Some("9000"));
//! assert!(std::env::var("APP_USER").is_err());
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

fn replace(key: &str, value: Option<&OsStr>) {
    let _guard = ENV_MUTEX.lock();
    // SAFETY: every mutation in this crate holds `ENV_MUTEX`.
    unsafe {
        match value {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }
}

/// Restores one environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        replace(&self.key, self.original.as_deref());
    }
}

fn mutate(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    replace(&key, value);
    EnvVarGuard { key, original }
}

/// Sets `key` to `value` until the guard is dropped.
///
/// ```
/// use cascade_config_test_helpers::env;
/// let _g = env::set_var("CASCADE_DOC_SET", "bar");
/// assert_eq!(std::env::var("CASCADE_DOC_SET").ok().as_deref(), Some("bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    mutate(key.into(), Some(value.as_ref()))
}

/// Removes `key` until the guard is dropped.
pub fn remove_var<K: Into<String>>(key: K) -> EnvVarGuard {
    mutate(key.into(), None)
}

/// Holds the environment lock together with a batch of guards.
///
/// Guards are restored in reverse order before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Applies every `(key, value)` pair, removing keys whose value is `None`,
/// and holds the lock until the scope is dropped.
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let lock = ENV_MUTEX.lock();
    let guards = vars
        .into_iter()
        .map(|(key, value)| match value {
            Some(v) => set_var(key, v),
            None => remove_var(key),
        })
        .collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}

#[cfg(test)]
mod tests;

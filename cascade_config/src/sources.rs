//! Captured process arguments and environment.

use std::collections::BTreeMap;
use std::ffi::OsString;

use figment::providers::Env;

/// Arguments and environment variables consulted by one resolution.
///
/// Capturing both up front keeps resolution free of global state, so tests
/// and independent resolutions never observe each other.
///
/// ```
/// use cascade_config::Sources;
/// let sources = Sources::from_args(["app", "--port", "8080"]).with_env("PORT", "9090");
/// assert_eq!(sources.var("PORT"), Some("9090"));
/// assert_eq!(sources.args().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sources {
    args: Vec<OsString>,
    env: BTreeMap<String, String>,
}

impl Sources {
    /// Captures `std::env::args_os` and the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_args(std::env::args_os()).with_process_env()
    }

    /// Uses `args` (program name first) and an empty environment.
    #[must_use]
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
        }
    }

    /// Adds or replaces one environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Adds every variable of the process environment with a Unicode name
    /// and value, keeping names case sensitive.
    #[must_use]
    pub fn with_process_env(mut self) -> Self {
        self.env.extend(
            Env::raw()
                .lowercase(false)
                .iter()
                .map(|(key, value)| (key.as_str().to_owned(), value)),
        );
        self
    }

    /// Arguments, program name first.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Looks up an environment variable by its exact name.
    #[must_use]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }
}

//! Duration type accepting several serialized shapes.
//!
//! Configuration files write durations in whatever shape is convenient, so
//! decoding tries, in order:
//!
//! 1. a duration literal such as `"5m"` or `"1h30m"`;
//! 2. a whole number of seconds;
//! 3. a fractional number of seconds;
//! 4. a raw `{ secs, nanos }` duration as produced by serializing
//!    [`std::time::Duration`].
//!
//! Encoding always writes the literal form.
//!
//! Spans are unsigned: negative literals such as `"-5m"` and negative
//! numbers of seconds are rejected.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A span of time decoded from a literal, a number of seconds, or a raw duration.
///
/// ```
/// use cascade_config::Duration;
/// let d: Duration = "1h30m".parse().expect("literal parses");
/// assert_eq!(d.as_secs(), 5400);
/// assert_eq!(d.to_string(), "1h 30m");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(std::time::Duration);

/// Shapes a serialized duration may take, tried in declaration order.
#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Literal(String),
    Seconds(u64),
    FractionalSeconds(f64),
    Raw(std::time::Duration),
}

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Self = Self(std::time::Duration::ZERO);

    /// Wraps a standard library duration.
    #[must_use]
    pub const fn new(inner: std::time::Duration) -> Self {
        Self(inner)
    }

    /// Whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(std::time::Duration::from_secs(secs))
    }

    /// Returns the wrapped standard library duration.
    #[must_use]
    pub const fn into_inner(self) -> std::time::Duration {
        self.0
    }

    /// Converts a fractional number of seconds.
    ///
    /// # Errors
    ///
    /// Fails for negative, non-finite or overflowing inputs.
    pub fn try_from_secs_f64(secs: f64) -> Result<Self, String> {
        std::time::Duration::try_from_secs_f64(secs)
            .map(Self)
            .map_err(|err| format!("invalid number of seconds {secs}: {err}"))
    }

    fn from_repr(repr: Repr) -> Result<Self, String> {
        match repr {
            Repr::Literal(text) => text.parse(),
            Repr::Seconds(secs) => Ok(Self::from_secs(secs)),
            Repr::FractionalSeconds(secs) => Self::try_from_secs_f64(secs),
            Repr::Raw(inner) => Ok(Self(inner)),
        }
    }
}

impl FromStr for Duration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        humantime::parse_duration(s.trim())
            .map(Self)
            .map_err(|err| format!("invalid duration {s:?}: {err}"))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_zero() {
            return f.write_str("0s");
        }
        write!(f, "{}", humantime::format_duration(self.0))
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(inner: std::time::Duration) -> Self {
        Self(inner)
    }
}

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = Repr::deserialize(deserializer)
            .map_err(|_| D::Error::custom("unsupported duration format"))?;
        Self::from_repr(repr).map_err(D::Error::custom)
    }
}

//! Per-field failures collected during one resolution.

use std::fmt;

use super::CascadeError;

/// Failures of a single resolution, keyed by the dotted field name and kept
/// in binding order.
///
/// Resolution keeps going after a field fails to decode or is found missing,
/// so the caller sees every offending field at once. A lone failure is
/// reported as itself; only two or more are wrapped in
/// [`CascadeError::Aggregate`].
///
/// # Examples
///
/// ```
/// use cascade_config::{CascadeError, Field, Kind, ParseOptions, Program, Schema, Sources};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Db {
///     user: String,
///     database: String,
/// }
///
/// let schema = Schema::new()
///     .field(Field::leaf("user", Kind::String))
///     .field(Field::leaf("database", Kind::String));
/// let err = cascade_config::resolve(
///     &Program::new("db"),
///     &mut Db::default(),
///     &schema,
///     &ParseOptions::env_only(),
///     &Sources::from_args(["db"]),
/// )
/// .err();
/// let Some(CascadeError::Aggregate(failures)) = err.as_deref() else {
///     panic!("expected both fields to fail");
/// };
/// assert_eq!(failures.fields().collect::<Vec<_>>(), ["user", "database"]);
/// ```
#[derive(Debug)]
pub struct AggregatedErrors {
    entries: Vec<(String, CascadeError)>,
}

impl AggregatedErrors {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records the failure of `field`.
    pub(crate) fn push(&mut self, field: impl Into<String>, error: CascadeError) {
        self.entries.push((field.into(), error));
    }

    /// `None` when nothing failed, the failure itself when exactly one field
    /// failed, and [`CascadeError::Aggregate`] otherwise.
    pub(crate) fn into_error(mut self) -> Option<CascadeError> {
        if self.entries.len() > 1 {
            return Some(CascadeError::Aggregate(Box::new(self)));
        }
        self.entries.pop().map(|(_, error)| error)
    }

    /// Names of the failing fields.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }

    /// The failures, one per field.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &CascadeError> {
        self.entries.iter().map(|(_, error)| error)
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.fields().collect();
        write!(
            f,
            "{} fields failed to resolve ({})",
            fields.len(),
            fields.join(", ")
        )?;
        for error in self.iter() {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

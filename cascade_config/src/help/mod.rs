//! Entry points that parse arguments, honour help requests and resolve.
//!
//! Help is rendered by clap from the bindings: one long flag per binding,
//! grouped under its category, with its environment variable, default and
//! required marker in the description. A help request short-circuits before
//! any required value is checked.

mod command;

use serde::{Serialize, de::DeserializeOwned};
use tracing::info;

use crate::error::{SchemaError, is_display_request};
use crate::options::ParseOptions;
use crate::resolve::{Report, resolve_bindings, write_back};
use crate::schema::Schema;
use crate::sources::Sources;
use crate::walk::{Binding, bindings_for, serialize_destination};
use crate::{CascadeError, CascadeResult, CascadeResultExt};

/// Name and descriptions of the program shown in help output.
///
/// ```
/// use cascade_config::Program;
/// let program = Program::new("forwarder")
///     .usage("forward media links")
///     .description("Downloads media and forwards it to a chat.");
/// assert_eq!(program.name(), "forwarder");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    name: String,
    usage: Option<String>,
    description: Option<String>,
    version: Option<String>,
}

impl Program {
    /// Creates a program description with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the one-line summary.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Sets the longer description shown by `--help`.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Enables `--version` with the given version string.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Program name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of a resolution that did not fail.
#[derive(Debug)]
pub enum Outcome {
    /// Help or version output was requested. The destination is untouched;
    /// callers print the carried message and exit successfully.
    Help(Box<clap::Error>),
    /// Every leaf was resolved and written to the destination.
    Resolved(Report),
}

impl Outcome {
    /// Whether help or version output was requested.
    #[must_use]
    pub const fn is_help(&self) -> bool {
        matches!(self, Self::Help(_))
    }

    /// The report of a completed resolution.
    #[must_use]
    pub const fn report(&self) -> Option<&Report> {
        match self {
            Self::Resolved(report) => Some(report),
            Self::Help(_) => None,
        }
    }

    /// Rendered help text, when help was requested.
    #[must_use]
    pub fn help_text(&self) -> Option<String> {
        match self {
            Self::Help(err) => Some(err.render().to_string()),
            Self::Resolved(_) => None,
        }
    }
}

fn reject_version_flag(program: &Program, bindings: &[Binding]) -> Result<(), SchemaError> {
    if program.version.is_none() {
        return Ok(());
    }
    bindings
        .iter()
        .find(|b| b.flag.as_deref() == Some("version"))
        .map_or(Ok(()), |b| {
            Err(SchemaError::ReservedFlag {
                field: b.name.clone(),
                key: "version".to_owned(),
            })
        })
}

/// Parses the arguments in `sources` against `schema` and resolves `dest`.
///
/// Returns [`Outcome::Help`] when help was requested, regardless of missing
/// required values; `dest` is left untouched in that case. Otherwise every
/// leaf of `dest` is overwritten with the value of the highest-priority
/// layer that supplies one.
///
/// Flags take their value as `--key value` or `--key=value`, except bool
/// flags: a bare `--verbose` sets `true` and a value must be attached with
/// `=`, as in `--verbose=false`. In `--verbose false` the `false` is an
/// extra positional argument and shows up in [`Report::trailing_args`].
///
/// # Errors
///
/// * [`CascadeError::Schema`] for structural problems, before any source is
///   consulted.
/// * [`CascadeError::CliParsing`] for unknown flags or malformed arguments.
/// * [`CascadeError::Decode`], [`CascadeError::MissingRequired`] or an
///   [`CascadeError::Aggregate`] of them when fields fail to resolve.
/// * [`CascadeError::Gathering`] when `dest` cannot be serialized or rebuilt.
pub fn resolve<T>(
    program: &Program,
    dest: &mut T,
    schema: &Schema,
    options: &ParseOptions,
    sources: &Sources,
) -> CascadeResult<Outcome>
where
    T: Serialize + DeserializeOwned,
{
    let base = serialize_destination(dest)?;
    let bindings = bindings_for(&base, schema, options).into_cascade()?;
    reject_version_flag(program, &bindings).into_cascade()?;

    let matches = match command::build(program, &bindings).try_get_matches_from(sources.args()) {
        Ok(matches) => matches,
        Err(err) if is_display_request(&err) => {
            info!(program = %program.name, "help requested");
            return Ok(Outcome::Help(Box::new(err)));
        }
        Err(err) => return Err(CascadeError::from(err).into()),
    };

    let flags = command::flag_values(&matches, &bindings);
    let resolved = resolve_bindings(&bindings, &flags, sources)?;
    write_back(dest, &base, &resolved)?;
    Ok(Outcome::Resolved(Report::new(resolved, command::trailing(&matches))))
}

/// Like [`resolve`], but prints help and exits with status 0 when it was
/// requested.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_or_exit<T>(
    program: &Program,
    dest: &mut T,
    schema: &Schema,
    options: &ParseOptions,
    sources: &Sources,
) -> CascadeResult<Report>
where
    T: Serialize + DeserializeOwned,
{
    match resolve(program, dest, schema, options, sources)? {
        Outcome::Help(err) => err.exit(),
        Outcome::Resolved(report) => Ok(report),
    }
}

#[cfg(test)]
mod tests;

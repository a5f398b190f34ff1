//! Layer precedence for each binding and write-back into the destination.
//!
//! For every binding the first layer that supplies a value wins:
//! command-line flag, environment variable, the binding's default (a trusted
//! base value or the declared literal), then the zero value. Decode failures
//! and missing required values are collected across all bindings and
//! reported together.

mod report;
mod writer;

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::CascadeError;
use crate::error::AggregatedErrors;
use crate::sources::Sources;
use crate::value::Scalar;
use crate::walk::{Binding, DefaultOrigin};

pub use report::{Report, ResolvedField};
pub(crate) use writer::write_back;

/// Raw command-line values per flag key, in the order given.
pub(crate) type FlagValues = BTreeMap<String, Vec<String>>;

/// The layer that supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A command-line flag.
    Cli,
    /// An environment variable.
    Env,
    /// The value already present in the destination.
    Base,
    /// The literal declared on the field.
    Default,
    /// Nothing supplied a value.
    Zero,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cli => "command line",
            Self::Env => "environment",
            Self::Base => "base value",
            Self::Default => "declared default",
            Self::Zero => "zero value",
        })
    }
}

impl From<DefaultOrigin> for SourceKind {
    fn from(origin: DefaultOrigin) -> Self {
        match origin {
            DefaultOrigin::Base => Self::Base,
            DefaultOrigin::Declared => Self::Default,
        }
    }
}

/// Resolves every binding, failing with all decode and missing-value
/// errors at once.
pub(crate) fn resolve_bindings(
    bindings: &[Binding],
    flags: &FlagValues,
    sources: &Sources,
) -> Result<Vec<ResolvedField>, CascadeError> {
    let mut resolved = Vec::with_capacity(bindings.len());
    let mut errors = AggregatedErrors::new();
    for binding in bindings {
        match resolve_one(binding, flags, sources) {
            Ok(field) => resolved.push(field),
            Err(err) => {
                warn!(field = %binding.name, error = %err, "configuration field failed to resolve");
                errors.push(binding.name.clone(), err);
            }
        }
    }
    errors.into_error().map_or(Ok(resolved), Err)
}

fn resolve_one(
    binding: &Binding,
    flags: &FlagValues,
    sources: &Sources,
) -> Result<ResolvedField, CascadeError> {
    let (value, source) = select(binding, flags, sources)?;
    if binding.required && value.is_zero() {
        return Err(CascadeError::MissingRequired {
            field: binding.name.clone(),
            flag: binding.flag.clone(),
            env: binding.env.clone(),
        });
    }
    debug!(field = %binding.name, %source, "resolved configuration field");
    Ok(ResolvedField {
        name: binding.name.clone(),
        path: binding.path.clone(),
        source,
        value,
    })
}

fn select(
    binding: &Binding,
    flags: &FlagValues,
    sources: &Sources,
) -> Result<(Scalar, SourceKind), CascadeError> {
    let decode_error = |source_kind, message| CascadeError::Decode {
        field: binding.name.clone(),
        source_kind,
        message,
    };

    if let Some(raw) = binding.flag.as_deref().and_then(|key| flags.get(key)) {
        let value = parse_flag_values(binding, raw)
            .map_err(|message| decode_error(SourceKind::Cli, message))?;
        return Ok((value, SourceKind::Cli));
    }
    if let Some(raw) = binding.env.as_deref().and_then(|key| sources.var(key)) {
        let value = binding
            .kind
            .parse_literal(raw)
            .map_err(|message| decode_error(SourceKind::Env, message))?;
        return Ok((value, SourceKind::Env));
    }
    Ok(binding.default.as_ref().map_or_else(
        || (binding.kind.zero(), SourceKind::Zero),
        |(value, origin)| (value.clone(), SourceKind::from(*origin)),
    ))
}

/// Repeated list flags accumulate; for other kinds the last occurrence wins.
fn parse_flag_values(binding: &Binding, raw: &[String]) -> Result<Scalar, String> {
    if binding.kind.is_list() {
        let mut items = Vec::new();
        for text in raw {
            if let Scalar::StringList(mut parsed) = binding.kind.parse_literal(text)? {
                items.append(&mut parsed);
            }
        }
        return Ok(Scalar::StringList(items));
    }
    let last = raw.last().map_or("", String::as_str);
    binding.kind.parse_literal(last)
}

//! Primary error enums for configuration resolution.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::resolve::SourceKind;

/// Structural problems detected while walking a schema.
///
/// These are raised before any external source is consulted and abort the
/// whole resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// The field's type is not one of the supported kinds.
    #[error("field '{field}': type {type_name} is unsupported")]
    UnsupportedKind {
        /// Dotted name of the offending field.
        field: String,
        /// Name of the unsupported type.
        type_name: String,
    },

    /// The destination does not expose the field, so it cannot be written back.
    #[error("field '{field}': not present in the destination and cannot be written back")]
    Unaddressable {
        /// Dotted name of the offending field.
        field: String,
    },

    /// The field is both hidden and required.
    #[error(
        "flag '{field}': must not be hidden and required at the same time, add \"optional\" to its cli disposition"
    )]
    HiddenRequired {
        /// Dotted name of the offending field.
        field: String,
    },

    /// The CLI disposition string could not be interpreted.
    #[error("field '{field}': invalid cli disposition '{disposition}': {reason}")]
    InvalidDisposition {
        /// Dotted name of the offending field.
        field: String,
        /// Disposition string as declared.
        disposition: String,
        /// Explanation of what is wrong with it.
        reason: String,
    },

    /// A declared default literal does not parse as the field's kind.
    #[error("field '{field}': invalid default '{literal}': {reason}")]
    InvalidDefault {
        /// Dotted name of the offending field.
        field: String,
        /// Default literal as declared.
        literal: String,
        /// Parser message.
        reason: String,
    },

    /// The value already in the destination does not match the declared kind.
    #[error("field '{field}': destination value does not match kind {kind}: {reason}")]
    KindMismatch {
        /// Dotted name of the offending field.
        field: String,
        /// Declared kind.
        kind: String,
        /// Decoder message.
        reason: String,
    },

    /// A group field does not hold a nested map in the destination.
    #[error("field '{field}': group must serialize to a map")]
    NotAGroup {
        /// Dotted name of the offending field, empty for the root value.
        field: String,
    },

    /// Two fields derived the same flag key.
    #[error("flag '--{key}' is declared by both '{first}' and '{second}'")]
    DuplicateFlag {
        /// Flag key shared by both fields.
        key: String,
        /// Field that declared the key first.
        first: String,
        /// Field that declared the key again.
        second: String,
    },

    /// A field tried to claim a reserved flag key.
    #[error("field '{field}': flag '--{key}' is reserved")]
    ReservedFlag {
        /// Dotted name of the offending field.
        field: String,
        /// Reserved key.
        key: String,
    },

    /// A flag key is not usable as a long option name.
    #[error("field '{field}': '{key}' is not a valid flag name")]
    InvalidFlag {
        /// Dotted name of the offending field.
        field: String,
        /// Rejected key.
        key: String,
    },
}

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CascadeError {
    /// The schema is structurally invalid.
    #[error("invalid configuration schema: {0}")]
    Schema(#[from] SchemaError),

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A flag or environment value could not be decoded as the field's kind.
    #[error("invalid value for '{field}' from {source_kind}: {message}")]
    Decode {
        /// Dotted name of the field.
        field: String,
        /// Layer that supplied the value.
        source_kind: SourceKind,
        /// Decoder message.
        message: String,
    },

    /// A required field is still unset after every layer was consulted.
    #[error("missing required value for '{field}'{hint}", hint = missing_hint(.flag.as_deref(), .env.as_deref()))]
    MissingRequired {
        /// Dotted name of the field.
        field: String,
        /// Flag key that could have supplied the value.
        flag: Option<String>,
        /// Environment variable that could have supplied the value.
        env: Option<String>,
    },

    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the configuration failure.
        path: std::path::PathBuf,
        /// Underlying error reported by the file loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error while serializing the destination or extracting it back.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Two or more fields failed to resolve.
    #[error("{0}")]
    Aggregate(Box<AggregatedErrors>),
}

fn missing_hint(flag: Option<&str>, env: Option<&str>) -> String {
    match (flag, env) {
        (Some(flag), Some(env)) => format!(" (set --{flag} or {env})"),
        (Some(flag), None) => format!(" (set --{flag})"),
        (None, Some(env)) => format!(" (set {env})"),
        (None, None) => String::new(),
    }
}

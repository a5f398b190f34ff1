//! Core crate for the `cascade_config` configuration resolver.
//!
//! A [`Schema`] describes the configuration tree: named leaves of a known
//! [`Kind`] grouped into nested sections. Resolution walks that schema,
//! derives a flag and an environment variable for every leaf, and merges
//! four layers into the caller's value with a fixed precedence:
//!
//! 1. command-line flags,
//! 2. environment variables,
//! 3. the value already present in the destination (for example decoded from
//!    a file), when [`ParseOptions::already_has_default_values`] is set,
//! 4. the literal default declared on the field,
//!
//! falling back to the zero value of the field's kind. The companion
//! `cascade_config_macros` crate derives [`Configuration`] so schemas can be
//! declared alongside the struct they describe.
//!
//! ```rust
//! use cascade_config::{Field, Kind, Outcome, ParseOptions, Program, Schema, Sources};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Settings {
//!     port: u16,
//! }
//!
//! # fn main() -> cascade_config::CascadeResult<()> {
//! let schema = Schema::new().field(Field::leaf("port", Kind::U16).default_value("8080"));
//! let mut settings = Settings::default();
//! let sources = Sources::from_args(["server", "--port", "9000"]);
//! let outcome = cascade_config::resolve(
//!     &Program::new("server"),
//!     &mut settings,
//!     &schema,
//!     &ParseOptions::env_only(),
//!     &sources,
//! )?;
//! assert!(matches!(outcome, Outcome::Resolved(_)));
//! assert_eq!(settings.port, 9000);
//! # Ok(())
//! # }
//! ```

pub use cascade_config_macros::Configuration;

mod error;
mod file;
mod help;
pub mod naming;
mod options;
mod resolve;
mod result_ext;
mod schema;
mod sources;
mod value;
mod walk;

pub use error::{AggregatedErrors, CascadeError, SchemaError, is_display_request};
pub use file::{PROFILE_VAR, load, load_config_file, load_with, profile_config_path};
pub use help::{Outcome, Program, resolve, resolve_or_exit};
pub use options::ParseOptions;
pub use resolve::{Report, ResolvedField, SourceKind};
pub use result_ext::CascadeResultExt;
pub use schema::{DISABLED, Disposition, Field, FieldType, Meta, Schema};
pub use sources::Sources;
pub use value::{Duration, Kind, Scalar};
pub use walk::{Binding, DefaultOrigin, walk};

/// Result type used throughout the crate.
///
/// Errors are shared behind an [`Arc`](std::sync::Arc) so aggregated reports
/// can hold the same error that was surfaced to a caller.
pub type CascadeResult<T> = Result<T, std::sync::Arc<CascadeError>>;

/// Implemented by structs that can describe their own configuration schema.
///
/// The derive macro is the usual way to implement this trait:
///
/// ```rust
/// use cascade_config::Configuration;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize, Configuration)]
/// struct Storage {
///     #[cascade(cli = "required", default = "postgres")]
///     user: String,
///     /// Database index.
///     database: u8,
/// }
///
/// let schema = Storage::schema();
/// assert_eq!(schema.fields().len(), 2);
/// ```
pub trait Configuration: serde::Serialize + serde::de::DeserializeOwned {
    /// Returns the schema describing this configuration type.
    fn schema() -> Schema;

    /// Resolves `self` in place from the given sources.
    ///
    /// # Errors
    ///
    /// Returns a [`CascadeError`] when the schema is invalid, an argument or
    /// environment value cannot be decoded, or required fields are missing.
    fn resolve_with(
        &mut self,
        program: &Program,
        options: &ParseOptions,
        sources: &Sources,
    ) -> CascadeResult<Outcome> {
        let schema = Self::schema();
        help::resolve(program, self, &schema, options, sources)
    }
}

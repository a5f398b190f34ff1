//! Loading base values from configuration files.
//!
//! A file decoded into the destination supplies the base layer: with
//! [`ParseOptions::file_and_env`](crate::ParseOptions::file_and_env) its
//! non-zero leaves are used when neither a flag nor an environment variable
//! is set.

mod loader;
mod profile;
#[cfg(feature = "yaml")]
mod yaml;

use camino::Utf8Path;
use tracing::info;

pub use loader::load_config_file;
pub use profile::{PROFILE_VAR, profile_config_path};

use crate::help::{Outcome, Program};
use crate::options::ParseOptions;
use crate::sources::Sources;
use crate::{CascadeResult, Configuration};

/// Loads the profile's file below `path` and resolves it against `sources`.
///
/// The profile is read from [`PROFILE_VAR`] in `sources`. Returns the
/// resolved value together with the outcome; on [`Outcome::Help`] the value
/// is exactly what the file contained.
///
/// # Errors
///
/// Returns [`CascadeError::File`](crate::CascadeError::File) when the file
/// cannot be read or decoded, and any error of [`resolve`](crate::resolve).
pub fn load_with<T: Configuration>(
    program: &Program,
    path: &Utf8Path,
    options: &ParseOptions,
    sources: &Sources,
) -> CascadeResult<(T, Outcome)> {
    let chosen = profile_config_path(path, sources.var(PROFILE_VAR));
    info!(path = %chosen, "loading configuration file");
    let mut config: T = load_config_file(chosen.as_std_path())?;
    let outcome = config.resolve_with(program, options, sources)?;
    Ok((config, outcome))
}

/// Loads and resolves `T` from the process arguments and environment.
///
/// Prints help and exits with status 0 when help was requested.
///
/// ```rust,no_run
/// use cascade_config::{Configuration, ParseOptions, Program};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize, Configuration)]
/// struct Config {
///     #[cascade(default = "8080")]
///     port: u16,
/// }
///
/// # fn run() -> cascade_config::CascadeResult<()> {
/// let config: Config = cascade_config::load(
///     &Program::new("server"),
///     "config/config.yaml",
///     &ParseOptions::file_and_env(),
/// )?;
/// println!("{}", config.port);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// See [`load_with`].
pub fn load<T: Configuration>(
    program: &Program,
    path: impl AsRef<Utf8Path>,
    options: &ParseOptions,
) -> CascadeResult<T> {
    match load_with(program, path.as_ref(), options, &Sources::from_process())? {
        (_, Outcome::Help(err)) => err.exit(),
        (config, Outcome::Resolved(_)) => Ok(config),
    }
}

#[cfg(test)]
mod tests;

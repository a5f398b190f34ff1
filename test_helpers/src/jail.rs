//! Helpers for running tests inside a `figment::Jail`.
//!
//! A jail changes into a fresh temporary directory and snapshots the
//! environment, so files written and variables set inside it vanish once the
//! closure returns.

use anyhow::{Result, anyhow};
use camino::Utf8Path;

/// Executes `f` inside a [`figment::Jail`] and returns its output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to the relative `path` inside the jail, creating
/// parent directories.
///
/// # Errors
///
/// Returns a [`figment::Error`] if a directory or the file cannot be created.
pub fn write_file(jail: &figment::Jail, path: &str, contents: &str) -> figment::error::Result<()> {
    if let Some(parent) = Utf8Path::new(path)
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
    {
        std::fs::create_dir_all(jail.directory().join(parent.as_std_path()))
            .map_err(|err| figment_error(&err))?;
    }
    jail.create_file(path, contents)
        .map(drop)
        .map_err(|err| figment_error(&err))
}

/// Converts any displayable error into a [`figment::Error`].
pub fn figment_error(err: &impl ToString) -> figment::Error {
    figment::Error::from(err.to_string())
}

//! Selects the configuration file for a deployment profile.

use camino::{Utf8Path, Utf8PathBuf};

/// Environment variable naming the deployment profile.
pub const PROFILE_VAR: &str = "ENV";

/// Returns the file to load for `profile`.
///
/// `dev` and `local` insert the profile name before the extension;
/// any other profile, including `prod`, uses `path` itself.
///
/// ```
/// use camino::Utf8Path;
/// use cascade_config::profile_config_path;
///
/// let base = Utf8Path::new("config/config.yaml");
/// assert_eq!(profile_config_path(base, Some("dev")), "config/config.dev.yaml");
/// assert_eq!(profile_config_path(base, Some("prod")), "config/config.yaml");
/// assert_eq!(profile_config_path(base, None), "config/config.yaml");
/// ```
#[must_use]
pub fn profile_config_path(path: &Utf8Path, profile: Option<&str>) -> Utf8PathBuf {
    match profile {
        Some(name @ ("dev" | "local")) => with_profile(path, name),
        _ => path.to_path_buf(),
    }
}

fn with_profile(path: &Utf8Path, profile: &str) -> Utf8PathBuf {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => path.with_file_name(format!("{stem}.{profile}.{ext}")),
        (Some(stem), None) => path.with_file_name(format!("{stem}.{profile}")),
        _ => path.to_path_buf(),
    }
}

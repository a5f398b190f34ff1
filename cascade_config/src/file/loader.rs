//! Decodes a configuration file into a destination value.

use std::path::Path;

use figment::Figment;
#[cfg(any(feature = "serde_json", feature = "toml"))]
use figment::providers::Format;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{CascadeError, CascadeResult};

#[cfg(feature = "yaml")]
use super::yaml::YamlSource;

#[cfg(not(all(feature = "serde_json", feature = "yaml", feature = "toml")))]
fn feature_disabled(path: &Path, feature: &str) -> CascadeError {
    CascadeError::file(
        path,
        std::io::Error::other(format!(
            "{feature} feature disabled: enable the '{feature}' feature to support this file format"
        )),
    )
}

/// Picks a parser from the file extension: `json`, `yaml`/`yml`, and TOML
/// for anything else.
fn figment_for(path: &Path, data: &str) -> Result<Figment, CascadeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let figment = match ext.as_deref() {
        Some("json") => {
            #[cfg(feature = "serde_json")]
            {
                Figment::from(figment::providers::Json::string(data))
            }
            #[cfg(not(feature = "serde_json"))]
            {
                return Err(feature_disabled(path, "serde_json"));
            }
        }
        Some("yaml" | "yml") => {
            #[cfg(feature = "yaml")]
            {
                Figment::from(YamlSource::new(path, data))
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(feature_disabled(path, "yaml"));
            }
        }
        _ => {
            #[cfg(feature = "toml")]
            {
                Figment::from(figment::providers::Toml::string(data))
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(feature_disabled(path, "toml"));
            }
        }
    };
    Ok(figment)
}

/// Reads `path` and decodes it into a fresh `T`.
///
/// The decoded value is typically passed to [`resolve`](crate::resolve) with
/// [`ParseOptions::file_and_env`](crate::ParseOptions::file_and_env) so that
/// its non-zero leaves act as defaults. Keys the file does not mention keep
/// whatever `T`'s deserializer supplies, usually `#[serde(default)]`.
///
/// # Examples
///
/// ```rust,no_run
/// use cascade_config::load_config_file;
/// use serde::Deserialize;
/// use std::path::Path;
///
/// #[derive(Deserialize)]
/// struct Config {
///     host: String,
/// }
///
/// # fn run() -> cascade_config::CascadeResult<()> {
/// let config: Config = load_config_file(Path::new("config/config.yaml"))?;
/// println!("{}", config.host);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`CascadeError::File`] when the file cannot be opened, its format
/// is not enabled, or its contents do not decode into `T`.
pub fn load_config_file<T: DeserializeOwned>(path: &Path) -> CascadeResult<T> {
    let data = std::fs::read_to_string(path).map_err(|err| {
        CascadeError::file(
            path,
            std::io::Error::new(err.kind(), format!("failed to open file: {err}")),
        )
    })?;
    let value = figment_for(path, &data)?
        .extract::<T>()
        .map_err(|err| CascadeError::file(path, err))?;
    debug!(path = %path.display(), "configuration file decoded");
    Ok(value)
}

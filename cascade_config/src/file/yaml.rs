//! YAML provider backed by `serde-saphyr`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value},
};
use serde_saphyr::Options;

/// Figment provider over YAML text that was already read from `path`.
#[derive(Debug, Clone)]
pub(super) struct YamlSource {
    path: PathBuf,
    contents: String,
}

impl YamlSource {
    pub(super) fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Booleans are restricted to `true` and `false`, so `yes`, `no` and
    /// `on` stay strings.
    fn parse(&self) -> Result<Value, serde_saphyr::Error> {
        serde_saphyr::from_str_with_options(
            &self.contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
    }
}

impl Provider for YamlSource {
    fn metadata(&self) -> Metadata {
        Metadata::from("YAML file", self.path.as_path())
    }

    fn data(&self) -> Result<BTreeMap<Profile, Dict>, figment::Error> {
        // An empty document decodes to nothing rather than to an empty map.
        if self.contents.trim().is_empty() {
            return Ok(Profile::Default.collect(Dict::new()));
        }
        let value = self.parse().map_err(|err| {
            figment::Error::from(Kind::Message(format!("failed to decode yaml file: {err}")))
        })?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Profile::Default.collect(dict))
    }
}

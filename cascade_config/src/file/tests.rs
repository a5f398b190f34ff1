//! Unit tests for configuration file loading and profile selection.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8Path;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use test_helpers::jail::{figment_error, with_jail, write_file};

use super::{load_config_file, load_with, profile_config_path};
use crate::error::CascadeError;
use crate::help::{Outcome, Program};
use crate::options::ParseOptions;
use crate::resolve::SourceKind;
use crate::schema::{Field, Schema};
use crate::sources::Sources;
use crate::Configuration;
use crate::value::Kind;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
struct Application {
    port: u16,
    domain: String,
}

impl Configuration for Application {
    fn schema() -> Schema {
        Schema::new()
            .field(Field::leaf("Port", Kind::U16).key("port"))
            .field(Field::leaf("Domain", Kind::String).key("domain").optional())
    }
}

#[rstest]
#[case::dev(Some("dev"), "config/config.dev.yaml")]
#[case::local(Some("local"), "config/config.local.yaml")]
#[case::prod(Some("prod"), "config/config.yaml")]
#[case::unknown(Some("staging"), "config/config.yaml")]
#[case::unset(None, "config/config.yaml")]
fn profiles_select_files(#[case] profile: Option<&str>, #[case] expected: &str) {
    assert_eq!(
        profile_config_path(Utf8Path::new("config/config.yaml"), profile),
        expected
    );
}

#[test]
fn profile_without_extension_is_appended() {
    assert_eq!(
        profile_config_path(Utf8Path::new("settings"), Some("dev")),
        "settings.dev"
    );
}

#[rstest]
#[case::yaml("app.yaml", "port: 8080\ndomain: example.org\n")]
#[case::yml("app.yml", "port: 8080\ndomain: example.org\n")]
#[case::toml("app.toml", "port = 8080\ndomain = \"example.org\"\n")]
#[case::json("app.json", r#"{"port": 8080, "domain": "example.org"}"#)]
fn formats_follow_the_extension(#[case] name: &str, #[case] contents: &str) -> Result<()> {
    let app = with_jail(|j| {
        write_file(j, name, contents)?;
        load_config_file::<Application>(name.as_ref()).map_err(|err| figment_error(&err))
    })?;
    ensure!(
        app == Application {
            port: 8080,
            domain: "example.org".into()
        },
        "{app:?}"
    );
    Ok(())
}

#[test]
fn empty_yaml_decodes_to_defaults() -> Result<()> {
    let app = with_jail(|j| {
        write_file(j, "empty.yaml", "")?;
        load_config_file::<Application>("empty.yaml".as_ref()).map_err(|err| figment_error(&err))
    })?;
    ensure!(app == Application::default());
    Ok(())
}

#[rstest]
#[case::missing(None, "failed to open file")]
#[case::malformed(Some("port: [1, 2"), "failed to decode yaml file")]
fn unreadable_files_are_file_errors(
    #[case] contents: Option<&str>,
    #[case] fragment: &str,
) -> Result<()> {
    let err = with_jail(|j| {
        if let Some(text) = contents {
            write_file(j, "broken.yaml", text)?;
        }
        Ok(load_config_file::<Application>("broken.yaml".as_ref()).err())
    })?
    .ok_or_else(|| anyhow!("expected an error"))?;
    ensure!(matches!(*err, CascadeError::File { .. }), "{err:?}");
    let message = format!("{err}: {err:?}");
    ensure!(message.contains(fragment), "{message}");
    Ok(())
}

#[test]
fn wrong_shape_is_a_file_error() -> Result<()> {
    let err = with_jail(|j| {
        write_file(j, "app.toml", "port = \"many\"\n")?;
        Ok(load_config_file::<Application>("app.toml".as_ref()).err())
    })?;
    ensure!(
        matches!(err.as_deref(), Some(CascadeError::File { path, .. }) if path.ends_with("app.toml")),
        "{err:?}"
    );
    Ok(())
}

#[test]
fn load_with_layers_environment_over_the_profile_file() -> Result<()> {
    let (app, outcome) = with_jail(|j| {
        write_file(j, "config/config.yaml", "port: 1\ndomain: base.example\n")?;
        write_file(j, "config/config.dev.yaml", "port: 2\ndomain: dev.example\n")?;
        let sources = Sources::from_args(["app"])
            .with_env("ENV", "dev")
            .with_env("PORT", "3");
        load_with::<Application>(
            &Program::new("app"),
            Utf8Path::new("config/config.yaml"),
            &ParseOptions::file_and_env(),
            &sources,
        )
        .map_err(|err| figment_error(&err))
    })?;
    ensure!(app.port == 3 && app.domain == "dev.example", "{app:?}");
    let report = outcome.report().ok_or_else(|| anyhow!("expected a report"))?;
    ensure!(report.source_of("Domain") == Some(SourceKind::Base));
    Ok(())
}

#[test]
fn load_with_returns_help_without_checking_required_fields() -> Result<()> {
    let (app, outcome) = with_jail(|j| {
        write_file(j, "config.yaml", "domain: only.example\n")?;
        load_with::<Application>(
            &Program::new("app"),
            Utf8Path::new("config.yaml"),
            &ParseOptions::file_and_env(),
            &Sources::from_args(["app", "--help"]),
        )
        .map_err(|err| figment_error(&err))
    })?;
    ensure!(matches!(outcome, Outcome::Help(_)));
    ensure!(app.port == 0 && app.domain == "only.example");
    Ok(())
}

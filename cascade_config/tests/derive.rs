//! Schemas produced by `#[derive(Configuration)]`.

use anyhow::{Result, anyhow, ensure};
use cascade_config::{
    CascadeError, Configuration, FieldType, Kind, ParseOptions, Program, SchemaError, Sources,
    walk,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Configuration)]
#[serde(rename_all = "PascalCase")]
struct Application {
    #[cascade(env = "LOGLEVEL", default = "info")]
    log_level: String,
    /// Bot token.
    #[cascade(name = "TGBotToken", cli = "optional")]
    tg_bot_token: String,
    #[cascade(default = 8080)]
    port: u16,
    #[cascade(flag = "proxy-url", env = "PROXY_URL", cli = "optional")]
    proxy: String,
    #[serde(skip)]
    connections: Vec<u8>,
}

#[derive(Debug, Default, Serialize, Deserialize, Configuration)]
struct Config {
    #[serde(rename = "Application")]
    #[cascade(env = "APP", flag = "")]
    application: Application,
}

#[test]
fn derived_schema_follows_the_struct() -> Result<()> {
    let schema = Config::schema();
    let [group] = schema.fields() else {
        return Err(anyhow!("expected one top-level field"));
    };
    ensure!(group.destination_key() == "Application");
    let FieldType::Group(inner) = group.field_type() else {
        return Err(anyhow!("application should be a group"));
    };
    let keys: Vec<_> = inner.fields().iter().map(|f| f.destination_key()).collect();
    ensure!(keys == ["LogLevel", "TgBotToken", "Port", "Proxy"], "{keys:?}");
    let token = inner
        .fields()
        .get(1)
        .ok_or_else(|| anyhow!("missing token field"))?;
    ensure!(token.name() == "TGBotToken");
    ensure!(token.metadata().usage.as_deref() == Some("Bot token."));
    ensure!(*token.field_type() == FieldType::Leaf(Kind::String));
    Ok(())
}

#[test]
fn derived_bindings_use_group_and_leaf_segments() -> Result<()> {
    let bindings = walk(&Config::default(), &Config::schema(), &ParseOptions::env_only())
        .map_err(|err| anyhow!("{err}"))?;
    let keys: Vec<_> = bindings
        .iter()
        .map(|b| (b.flag.as_deref(), b.env.as_deref()))
        .collect();
    ensure!(
        keys == [
            (Some("log-level"), Some("APP_LOGLEVEL")),
            (Some("tg-bot-token"), Some("APP_TG_BOT_TOKEN")),
            (Some("port"), Some("APP_PORT")),
            (Some("proxy-url"), Some("APP_PROXY_URL")),
        ],
        "{keys:?}"
    );
    Ok(())
}

#[test]
fn derived_configuration_resolves_end_to_end() -> Result<()> {
    let mut config = Config::default();
    config
        .resolve_with(
            &Program::new("forwarder"),
            &ParseOptions::env_only(),
            &Sources::from_args(["forwarder", "--port", "9000"])
                .with_env("APP_TG_BOT_TOKEN", "t0k")
                .with_env("APP_PROXY_URL", "socks5://localhost:1080"),
        )
        .map_err(|err| anyhow!("{err}"))?;
    let app = &config.application;
    ensure!(app.log_level == "info");
    ensure!(app.tg_bot_token == "t0k");
    ensure!(app.port == 9000);
    ensure!(app.proxy == "socks5://localhost:1080");
    ensure!(app.connections.is_empty());
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize, Configuration)]
struct WithMap {
    labels: std::collections::BTreeMap<String, String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Configuration)]
struct WithSkippedMap {
    #[cascade(cli = "-")]
    labels: std::collections::BTreeMap<String, String>,
    name: String,
}

#[test]
fn unsupported_types_fail_unless_skipped() -> Result<()> {
    let err = walk(&WithMap::default(), &WithMap::schema(), &ParseOptions::env_only()).err();
    ensure!(
        matches!(
            err.as_deref(),
            Some(CascadeError::Schema(SchemaError::UnsupportedKind { field, .. })) if field == "labels"
        ),
        "{err:?}"
    );
    let bindings = walk(
        &WithSkippedMap::default(),
        &WithSkippedMap::schema(),
        &ParseOptions::env_only(),
    )
    .map_err(|err| anyhow!("{err}"))?;
    ensure!(bindings.len() == 1);
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize, Configuration)]
struct BadDefault {
    #[cascade(default = "many")]
    workers: u8,
}

#[test]
fn malformed_defaults_are_schema_errors() {
    let err = walk(
        &BadDefault::default(),
        &BadDefault::schema(),
        &ParseOptions::env_only(),
    )
    .err();
    assert!(
        matches!(
            err.as_deref(),
            Some(CascadeError::Schema(SchemaError::InvalidDefault { literal, .. })) if literal == "many"
        ),
        "{err:?}"
    );
}

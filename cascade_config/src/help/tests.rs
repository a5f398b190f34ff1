//! Unit tests for help rendering and argument handling.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};

use super::{Outcome, Program, resolve};
use crate::CascadeResult;
use crate::error::{CascadeError, SchemaError};
use crate::options::ParseOptions;
use crate::schema::{Field, Schema};
use crate::sources::Sources;
use crate::value::Kind;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Api {
    token: String,
    secret: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Settings {
    port: u16,
    verbose: bool,
    offset: i32,
    region: String,
    api: Api,
}

#[fixture]
fn schema() -> Schema {
    Schema::new()
        .field(
            Field::leaf("Port", Kind::U16)
                .key("port")
                .usage("Port to listen on.")
                .default_value("8080"),
        )
        .field(Field::leaf("Verbose", Kind::Bool).key("verbose"))
        .field(Field::leaf("Offset", Kind::I32).key("offset").optional())
        .field(Field::leaf("Region", Kind::String).key("region").flag("-").optional())
        .field(
            Field::group(
                "API",
                Schema::new()
                    .field(Field::leaf("Token", Kind::String).key("token").usage("Bot token."))
                    .field(Field::leaf("Secret", Kind::String).key("secret").hidden().optional()),
            )
            .key("api"),
        )
}

fn program() -> Program {
    Program::new("forwarder").usage("forward media links")
}

fn run(schema: &Schema, args: &[&str]) -> (Settings, CascadeResult<Outcome>) {
    let mut settings = Settings::default();
    let sources = Sources::from_args(args.iter().copied());
    let outcome = resolve(
        &program(),
        &mut settings,
        schema,
        &ParseOptions::env_only(),
        &sources,
    );
    (settings, outcome)
}

#[rstest]
#[case::long(&["forwarder", "--help"])]
#[case::short(&["forwarder", "-h"])]
#[case::among_other_flags(&["forwarder", "--port", "1", "--help"])]
fn help_short_circuits_missing_required_fields(schema: Schema, #[case] args: &[&str]) -> Result<()> {
    let (settings, outcome) = run(&schema, args);
    let outcome = outcome.map_err(|err| anyhow!("{err}"))?;
    ensure!(outcome.is_help());
    ensure!(settings.port == 0, "destination must stay untouched");
    Ok(())
}

#[rstest]
fn help_lists_every_visible_binding(schema: Schema) -> Result<()> {
    let (_, outcome) = run(&schema, &["forwarder", "--help"]);
    let text = outcome
        .map_err(|err| anyhow!("{err}"))?
        .help_text()
        .ok_or_else(|| anyhow!("help was not requested"))?;
    for fragment in [
        "forward media links",
        "--port <UINT>",
        "Port to listen on. [env: PORT] [default: 8080]",
        "--verbose",
        "--api-token <STRING>",
        "Bot token. [env: API_TOKEN] [required]",
        "API:",
        "Environment:",
        "REGION",
    ] {
        ensure!(text.contains(fragment), "missing {fragment:?} in:\n{text}");
    }
    ensure!(!text.contains("--api-secret"), "hidden flag shown:\n{text}");
    Ok(())
}

#[rstest]
fn flags_accept_both_spellings_and_bare_bools(schema: Schema) -> Result<()> {
    let (settings, outcome) = run(
        &schema,
        &[
            "forwarder",
            "--port=9000",
            "--verbose",
            "--offset",
            "-5",
            "--api-token",
            "t0k",
        ],
    );
    outcome.map_err(|err| anyhow!("{err}"))?;
    ensure!(settings.port == 9000);
    ensure!(settings.verbose);
    ensure!(settings.offset == -5);
    ensure!(settings.api.token == "t0k");
    Ok(())
}

#[rstest]
fn explicit_false_for_bool_flags(schema: Schema) -> Result<()> {
    let (settings, outcome) = run(&schema, &["forwarder", "--verbose=false", "--api-token", "x"]);
    outcome.map_err(|err| anyhow!("{err}"))?;
    ensure!(!settings.verbose);
    Ok(())
}

#[rstest]
fn hidden_flags_still_parse(schema: Schema) -> Result<()> {
    let (settings, outcome) = run(&schema, &["forwarder", "--api-secret", "s", "--api-token", "x"]);
    outcome.map_err(|err| anyhow!("{err}"))?;
    ensure!(settings.api.secret == "s");
    Ok(())
}

#[rstest]
fn trailing_arguments_are_reported(schema: Schema) -> Result<()> {
    let (_, outcome) = run(&schema, &["forwarder", "--api-token", "x", "extra", "more"]);
    let outcome = outcome.map_err(|err| anyhow!("{err}"))?;
    let report = outcome.report().ok_or_else(|| anyhow!("expected a report"))?;
    ensure!(report.trailing_args() == ["extra", "more"]);
    Ok(())
}

#[rstest]
#[case::attached(&["forwarder", "--api-token", "x", "--verbose=false"], false, &[])]
#[case::bare(&["forwarder", "--api-token", "x", "--verbose"], true, &[])]
#[case::separate_value_is_positional(
    &["forwarder", "--api-token", "x", "--verbose", "false"],
    true,
    &["false"]
)]
fn bool_flags_take_values_only_after_equals(
    schema: Schema,
    #[case] args: &[&str],
    #[case] verbose: bool,
    #[case] trailing: &[&str],
) -> Result<()> {
    let (settings, outcome) = run(&schema, args);
    let outcome = outcome.map_err(|err| anyhow!("{err}"))?;
    let report = outcome.report().ok_or_else(|| anyhow!("expected a report"))?;
    ensure!(settings.verbose == verbose, "{settings:?}");
    ensure!(report.trailing_args() == trailing, "{:?}", report.trailing_args());
    Ok(())
}

#[rstest]
fn unknown_flags_are_parse_errors(schema: Schema) {
    let (_, outcome) = run(&schema, &["forwarder", "--bogus"]);
    let err = outcome.err();
    assert!(
        matches!(err.as_deref(), Some(CascadeError::CliParsing(_))),
        "{err:?}"
    );
}

#[rstest]
fn version_requests_are_display_requests(schema: Schema) -> Result<()> {
    let mut settings = Settings::default();
    let outcome = resolve(
        &program().version("1.2.3"),
        &mut settings,
        &schema,
        &ParseOptions::env_only(),
        &Sources::from_args(["forwarder", "--version"]),
    )
    .map_err(|err| anyhow!("{err}"))?;
    ensure!(outcome.help_text().is_some_and(|text| text.contains("1.2.3")));
    Ok(())
}

#[test]
fn version_flag_is_reserved_when_enabled() {
    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Versioned {
        version: String,
    }
    let schema = Schema::new().field(Field::leaf("Version", Kind::String).key("version").optional());
    let err = resolve(
        &program().version("1.0.0"),
        &mut Versioned::default(),
        &schema,
        &ParseOptions::env_only(),
        &Sources::from_args(["forwarder"]),
    )
    .err();
    assert!(
        matches!(
            err.as_deref(),
            Some(CascadeError::Schema(SchemaError::ReservedFlag { .. }))
        ),
        "{err:?}"
    );
}

//! Unit tests for literal parsing, decoding and duration shapes.

use anyhow::{Result, anyhow, ensure};
use figment::{
    Figment,
    providers::{Format, Toml},
    value::{Dict, Value},
};
use rstest::rstest;
use serde::Deserialize;
use std::time::Duration as StdDuration;

use super::{Duration, Kind, Scalar, insert_at, lookup};

#[derive(Debug, Deserialize)]
struct Timeouts {
    timeout: Duration,
}

fn decode_duration(value: impl serde::Serialize) -> Result<Scalar> {
    let serialized = Value::serialize(value)?;
    Kind::Duration.decode(&serialized).map_err(|err| anyhow!(err))
}

#[rstest]
#[case::literal_minutes("5m", StdDuration::from_secs(300))]
#[case::literal_compound("1h30m", StdDuration::from_secs(5400))]
fn duration_decodes_literals(#[case] literal: &str, #[case] expected: StdDuration) -> Result<()> {
    let decoded = decode_duration(literal)?;
    ensure!(decoded == Scalar::Duration(expected.into()), "got {decoded:?}");
    Ok(())
}

#[test]
fn duration_decodes_whole_seconds() -> Result<()> {
    let decoded = decode_duration(5_u64)?;
    ensure!(decoded == Scalar::Duration(Duration::from_secs(5)), "got {decoded:?}");
    Ok(())
}

#[test]
fn duration_decodes_fractional_seconds() -> Result<()> {
    let decoded = decode_duration(1.5_f64)?;
    ensure!(
        decoded == Scalar::Duration(StdDuration::from_millis(1500).into()),
        "got {decoded:?}"
    );
    Ok(())
}

#[test]
fn duration_passes_raw_values_through() -> Result<()> {
    let raw = StdDuration::new(2, 500);
    let decoded = decode_duration(raw)?;
    ensure!(decoded == Scalar::Duration(raw.into()), "got {decoded:?}");
    Ok(())
}

#[test]
fn duration_rejects_malformed_literals() {
    assert!(decode_duration("notaduration").is_err());
}

#[rstest]
#[case::minutes("-5m")]
#[case::compound("-1h30m")]
fn duration_rejects_negative_literals(#[case] literal: &str) {
    assert!(literal.parse::<Duration>().is_err());
    assert!(Kind::Duration.parse_literal(literal).is_err());
    assert!(decode_duration(literal).is_err());
}

#[rstest]
#[case::negative(-3.0_f64)]
#[case::not_a_number(f64::NAN)]
fn duration_rejects_impossible_seconds(#[case] secs: f64) {
    assert!(Duration::try_from_secs_f64(secs).is_err());
}

#[test]
fn duration_reports_unsupported_shapes() {
    let err = Figment::from(Toml::string("timeout = true"))
        .extract::<Timeouts>()
        .map(|t| t.timeout)
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default();
    assert!(err.contains("unsupported duration format"), "{err}");
}

#[rstest]
#[case::literal("timeout = \"90s\"", 90)]
#[case::integer("timeout = 12", 12)]
fn duration_deserializes_from_files(#[case] toml: &str, #[case] secs: u64) -> Result<()> {
    let parsed: Timeouts = Figment::from(Toml::string(toml)).extract()?;
    ensure!(parsed.timeout.as_secs() == secs, "got {:?}", parsed.timeout);
    Ok(())
}

#[test]
fn duration_serializes_as_literal() -> Result<()> {
    let value = Value::serialize(Duration::from_secs(330))?;
    ensure!(value.as_str() == Some("5m 30s"), "got {value:?}");
    Ok(())
}

#[rstest]
#[case(Kind::U8, "42", Scalar::U8(42))]
#[case(Kind::I8, "-128", Scalar::I8(-128))]
#[case(Kind::U16, " 8080 ", Scalar::U16(8080))]
#[case(Kind::I64, "-9000000000", Scalar::I64(-9_000_000_000))]
#[case(Kind::F64, "0.25", Scalar::F64(0.25))]
#[case(Kind::Bool, "T", Scalar::Bool(true))]
#[case(Kind::Bool, "False", Scalar::Bool(false))]
#[case(Kind::Bool, "1", Scalar::Bool(true))]
#[case(Kind::String, " padded ", Scalar::String(" padded ".into()))]
#[case(Kind::Duration, "2m", Scalar::Duration(Duration::from_secs(120)))]
#[case(Kind::StringList, "a, b ,c", Scalar::StringList(vec!["a".into(), "b".into(), "c".into()]))]
#[case(Kind::StringList, "", Scalar::StringList(Vec::new()))]
fn parses_literals(#[case] kind: Kind, #[case] text: &str, #[case] expected: Scalar) {
    assert_eq!(kind.parse_literal(text), Ok(expected));
}

#[rstest]
#[case(Kind::U8, "300")]
#[case(Kind::I8, "128")]
#[case(Kind::U32, "-1")]
#[case(Kind::I16, "twelve")]
#[case(Kind::Bool, "yes")]
#[case(Kind::F64, "fast")]
#[case(Kind::Duration, "soon")]
fn rejects_invalid_literals(#[case] kind: Kind, #[case] text: &str) {
    assert!(kind.parse_literal(text).is_err());
}

#[test]
fn decode_rejects_out_of_width_base_values() -> Result<()> {
    let value = Value::serialize(300_u16)?;
    ensure!(Kind::U8.decode(&value).is_err());
    ensure!(Kind::U16.decode(&value) == Ok(Scalar::U16(300)));
    Ok(())
}

#[test]
fn string_list_decodes_arrays_and_csv() -> Result<()> {
    let array = Value::serialize(vec!["x", "y"])?;
    let csv = Value::serialize("x,y")?;
    let expected = Scalar::StringList(vec!["x".into(), "y".into()]);
    ensure!(Kind::StringList.decode(&array) == Ok(expected.clone()));
    ensure!(Kind::StringList.decode(&csv) == Ok(expected));
    Ok(())
}

#[rstest]
#[case(Scalar::String(String::new()), true)]
#[case(Scalar::String("x".into()), false)]
#[case(Scalar::Bool(false), true)]
#[case(Scalar::U64(0), true)]
#[case(Scalar::I32(-1), false)]
#[case(Scalar::F64(0.0), true)]
#[case(Scalar::F64(-0.0), false)]
#[case(Scalar::Duration(Duration::ZERO), true)]
#[case(Scalar::StringList(Vec::new()), true)]
fn reports_zero_values(#[case] value: Scalar, #[case] zero: bool) {
    assert_eq!(value.is_zero(), zero);
}

#[rstest]
#[case(Kind::String)]
#[case(Kind::Bool)]
#[case(Kind::U32)]
#[case(Kind::Duration)]
#[case(Kind::StringList)]
fn zero_values_are_zero_and_kinded(#[case] kind: Kind) {
    let zero = kind.zero();
    assert!(zero.is_zero());
    assert_eq!(zero.kind(), kind);
}

#[rstest]
#[case("int", Kind::I64)]
#[case("uint16", Kind::U16)]
#[case("[]string", Kind::StringList)]
#[case("duration", Kind::Duration)]
fn kind_names_parse(#[case] name: &str, #[case] kind: Kind) {
    assert_eq!(name.parse::<Kind>(), Ok(kind));
}

#[test]
fn unknown_kind_names_are_rejected() {
    assert!("map[string]int".parse::<Kind>().is_err());
}

#[rstest]
#[case(Scalar::StringList(vec!["a".into(), "b".into()]), "a,b")]
#[case(Scalar::Duration(Duration::from_secs(90)), "1m 30s")]
#[case(Scalar::Duration(Duration::ZERO), "0s")]
#[case(Scalar::Bool(true), "true")]
fn formats_for_display(#[case] value: Scalar, #[case] expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[test]
fn duration_write_back_keeps_raw_shape() -> Result<()> {
    let raw = Value::serialize(StdDuration::from_secs(1))?;
    let written = Scalar::Duration(Duration::from_secs(5)).to_value(Some(&raw))?;
    let round: StdDuration = written.deserialize()?;
    ensure!(round == StdDuration::from_secs(5));
    let literal = Scalar::Duration(Duration::from_secs(5)).to_value(None)?;
    ensure!(literal.as_str() == Some("5s"));
    Ok(())
}

#[test]
fn nested_insert_and_lookup() -> Result<()> {
    let mut dict = Dict::new();
    let path = vec!["storage".to_owned(), "user".to_owned()];
    insert_at(&mut dict, &path, Value::serialize("admin")?);
    let found = lookup(&dict, &path).and_then(Value::as_str);
    ensure!(found == Some("admin"), "got {found:?}");
    ensure!(lookup(&dict, &["missing".to_owned()]).is_none());
    Ok(())
}

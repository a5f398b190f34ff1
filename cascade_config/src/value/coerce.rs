//! Conversions between literal text, serialized values and [`Scalar`]s.

use figment::value::{Dict, Value};
use serde::de::DeserializeOwned;

use super::{Duration, Kind, Scalar};

fn parse_bool(text: &str) -> Result<bool, String> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(format!("invalid boolean '{other}'")),
    }
}

fn parse_number<T>(text: &str, kind: Kind) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map_err(|err| format!("'{text}' is not a valid {kind}: {err}"))
}

fn parse_list(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|item| item.trim().to_owned()).collect()
}

fn decode_as<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    value.deserialize::<T>().map_err(|err| err.to_string())
}

impl Kind {
    /// Parses literal text, as found in a declared default, an environment
    /// variable or a flag value.
    ///
    /// Lists are comma separated with surrounding whitespace trimmed from
    /// every item; an empty literal is the empty list.
    ///
    /// ```
    /// use cascade_config::{Kind, Scalar};
    /// assert_eq!(Kind::U8.parse_literal("42"), Ok(Scalar::U8(42)));
    /// assert!(Kind::U8.parse_literal("300").is_err());
    /// assert_eq!(
    ///     Kind::StringList.parse_literal("a, b"),
    ///     Ok(Scalar::StringList(vec!["a".into(), "b".into()])),
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a message describing why `text` is not a valid value of this
    /// kind, including integers outside the kind's width.
    pub fn parse_literal(self, text: &str) -> Result<Scalar, String> {
        let trimmed = text.trim();
        Ok(match self {
            Self::String => Scalar::String(text.to_owned()),
            Self::Bool => Scalar::Bool(parse_bool(trimmed)?),
            Self::I8 => Scalar::I8(parse_number(trimmed, self)?),
            Self::I16 => Scalar::I16(parse_number(trimmed, self)?),
            Self::I32 => Scalar::I32(parse_number(trimmed, self)?),
            Self::I64 => Scalar::I64(parse_number(trimmed, self)?),
            Self::U8 => Scalar::U8(parse_number(trimmed, self)?),
            Self::U16 => Scalar::U16(parse_number(trimmed, self)?),
            Self::U32 => Scalar::U32(parse_number(trimmed, self)?),
            Self::U64 => Scalar::U64(parse_number(trimmed, self)?),
            Self::F64 => Scalar::F64(parse_number(trimmed, self)?),
            Self::Duration => Scalar::Duration(trimmed.parse::<Duration>()?),
            Self::StringList => Scalar::StringList(parse_list(trimmed)),
        })
    }

    /// Decodes a value taken from the serialized destination.
    ///
    /// Durations accept every shape [`Duration`] deserializes from. String
    /// lists also accept a single comma separated string.
    ///
    /// # Errors
    ///
    /// Returns the decoder's message when `value` does not have this kind's
    /// shape or is out of range for it.
    pub fn decode(self, value: &Value) -> Result<Scalar, String> {
        Ok(match self {
            Self::String => Scalar::String(decode_as(value)?),
            Self::Bool => Scalar::Bool(decode_as(value)?),
            Self::I8 => Scalar::I8(decode_as(value)?),
            Self::I16 => Scalar::I16(decode_as(value)?),
            Self::I32 => Scalar::I32(decode_as(value)?),
            Self::I64 => Scalar::I64(decode_as(value)?),
            Self::U8 => Scalar::U8(decode_as(value)?),
            Self::U16 => Scalar::U16(decode_as(value)?),
            Self::U32 => Scalar::U32(decode_as(value)?),
            Self::U64 => Scalar::U64(decode_as(value)?),
            Self::F64 => Scalar::F64(decode_as(value)?),
            Self::Duration => Scalar::Duration(decode_as(value)?),
            Self::StringList => match value {
                Value::String(_, text) => Scalar::StringList(parse_list(text)),
                other => Scalar::StringList(decode_as(other)?),
            },
        })
    }
}

impl Scalar {
    /// Converts this value into a serialized value for write-back.
    ///
    /// `shape` is the value previously stored at the same location. A
    /// duration keeps the `{ secs, nanos }` or numeric shape it found there
    /// so the destination type can still deserialize it; otherwise it is
    /// written as a duration literal.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures from [`figment`].
    pub fn to_value(&self, shape: Option<&Value>) -> Result<Value, figment::Error> {
        match (self, shape) {
            (Self::Duration(d), Some(Value::Dict(..))) => Value::serialize(d.into_inner()),
            (Self::Duration(d), Some(Value::Num(..))) if d.subsec_nanos() == 0 => {
                Value::serialize(d.as_secs())
            }
            (Self::Duration(d), Some(Value::Num(..))) => Value::serialize(d.as_secs_f64()),
            (Self::String(s), _) => Value::serialize(s),
            (Self::Bool(b), _) => Value::serialize(b),
            (Self::I8(n), _) => Value::serialize(n),
            (Self::I16(n), _) => Value::serialize(n),
            (Self::I32(n), _) => Value::serialize(n),
            (Self::I64(n), _) => Value::serialize(n),
            (Self::U8(n), _) => Value::serialize(n),
            (Self::U16(n), _) => Value::serialize(n),
            (Self::U32(n), _) => Value::serialize(n),
            (Self::U64(n), _) => Value::serialize(n),
            (Self::F64(n), _) => Value::serialize(n),
            (Self::Duration(d), _) => Value::serialize(d),
            (Self::StringList(items), _) => Value::serialize(items),
        }
    }
}

/// Inserts `value` into `dict` at the nested `path`, creating intermediate
/// dictionaries as needed.
pub(crate) fn insert_at(dict: &mut Dict, path: &[String], value: Value) {
    match path {
        [] => {}
        [key] => {
            dict.insert(key.clone(), value);
        }
        [head, rest @ ..] => {
            let entry = dict
                .entry(head.clone())
                .or_insert_with(|| Value::from(Dict::new()));
            if !matches!(entry, Value::Dict(..)) {
                *entry = Value::from(Dict::new());
            }
            if let Value::Dict(_, child) = entry {
                insert_at(child, rest, value);
            }
        }
    }
}

/// Looks up the value at the nested `path` in `dict`.
pub(crate) fn lookup<'a>(dict: &'a Dict, path: &[String]) -> Option<&'a Value> {
    let (head, rest) = path.split_first()?;
    let value = dict.get(head)?;
    if rest.is_empty() {
        return Some(value);
    }
    match value {
        Value::Dict(_, child) => lookup(child, rest),
        _ => None,
    }
}

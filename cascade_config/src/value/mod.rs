//! Scalar kinds supported by the resolver and their native values.
//!
//! Every leaf of a schema carries a [`Kind`]. Literal text from defaults,
//! environment variables and flags is parsed into a [`Scalar`] of that kind,
//! and values already present in the destination are decoded into one.

mod coerce;
mod duration;

use std::fmt;
use std::str::FromStr;

pub(crate) use coerce::{insert_at, lookup};
pub use duration::Duration;

/// The type of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Kind {
    /// UTF-8 text.
    String,
    /// `true` or `false`.
    Bool,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// 64-bit floating point number.
    F64,
    /// A span of time, see [`Duration`].
    Duration,
    /// A homogeneous list of strings.
    StringList,
}

impl Kind {
    /// Canonical lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::F64 => "float64",
            Self::Duration => "duration",
            Self::StringList => "string-list",
        }
    }

    /// Placeholder shown for the flag's value in help output.
    #[must_use]
    pub const fn value_name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Bool => "BOOL",
            Self::I8 | Self::I16 | Self::I32 | Self::I64 => "INT",
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => "UINT",
            Self::F64 => "FLOAT",
            Self::Duration => "DURATION",
            Self::StringList => "LIST",
        }
    }

    /// Whether flags of this kind may be given without a value.
    #[must_use]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Whether repeated flags of this kind accumulate.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::StringList)
    }

    /// The zero value of this kind.
    #[must_use]
    pub const fn zero(self) -> Scalar {
        match self {
            Self::String => Scalar::String(String::new()),
            Self::Bool => Scalar::Bool(false),
            Self::I8 => Scalar::I8(0),
            Self::I16 => Scalar::I16(0),
            Self::I32 => Scalar::I32(0),
            Self::I64 => Scalar::I64(0),
            Self::U8 => Scalar::U8(0),
            Self::U16 => Scalar::U16(0),
            Self::U32 => Scalar::U32(0),
            Self::U64 => Scalar::U64(0),
            Self::F64 => Scalar::F64(0.0),
            Self::Duration => Scalar::Duration(Duration::ZERO),
            Self::StringList => Scalar::StringList(Vec::new()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "string" => Self::String,
            "bool" => Self::Bool,
            "int8" => Self::I8,
            "int16" => Self::I16,
            "int32" => Self::I32,
            "int64" | "int" => Self::I64,
            "uint8" => Self::U8,
            "uint16" => Self::U16,
            "uint32" => Self::U32,
            "uint64" | "uint" => Self::U64,
            "float64" => Self::F64,
            "duration" => Self::Duration,
            "string-list" | "[]string" => Self::StringList,
            other => return Err(format!("unknown kind '{other}'")),
        };
        Ok(kind)
    }
}

/// A native value of one [`Kind`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Scalar {
    /// See [`Kind::String`].
    String(String),
    /// See [`Kind::Bool`].
    Bool(bool),
    /// See [`Kind::I8`].
    I8(i8),
    /// See [`Kind::I16`].
    I16(i16),
    /// See [`Kind::I32`].
    I32(i32),
    /// See [`Kind::I64`].
    I64(i64),
    /// See [`Kind::U8`].
    U8(u8),
    /// See [`Kind::U16`].
    U16(u16),
    /// See [`Kind::U32`].
    U32(u32),
    /// See [`Kind::U64`].
    U64(u64),
    /// See [`Kind::F64`].
    F64(f64),
    /// See [`Kind::Duration`].
    Duration(Duration),
    /// See [`Kind::StringList`].
    StringList(Vec<String>),
}

impl Scalar {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::String(_) => Kind::String,
            Self::Bool(_) => Kind::Bool,
            Self::I8(_) => Kind::I8,
            Self::I16(_) => Kind::I16,
            Self::I32(_) => Kind::I32,
            Self::I64(_) => Kind::I64,
            Self::U8(_) => Kind::U8,
            Self::U16(_) => Kind::U16,
            Self::U32(_) => Kind::U32,
            Self::U64(_) => Kind::U64,
            Self::F64(_) => Kind::F64,
            Self::Duration(_) => Kind::Duration,
            Self::StringList(_) => Kind::StringList,
        }
    }

    /// Whether this is the zero value of its kind.
    ///
    /// Only positive zero counts for floats, so an explicit `-0.0` is kept.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::String(s) => s.is_empty(),
            Self::Bool(b) => !b,
            Self::I8(n) => *n == 0,
            Self::I16(n) => *n == 0,
            Self::I32(n) => *n == 0,
            Self::I64(n) => *n == 0,
            Self::U8(n) => *n == 0,
            Self::U16(n) => *n == 0,
            Self::U32(n) => *n == 0,
            Self::U64(n) => *n == 0,
            Self::F64(n) => n.to_bits() == 0,
            Self::Duration(d) => d.is_zero(),
            Self::StringList(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::I8(n) => write!(f, "{n}"),
            Self::I16(n) => write!(f, "{n}"),
            Self::I32(n) => write!(f, "{n}"),
            Self::I64(n) => write!(f, "{n}"),
            Self::U8(n) => write!(f, "{n}"),
            Self::U16(n) => write!(f, "{n}"),
            Self::U32(n) => write!(f, "{n}"),
            Self::U64(n) => write!(f, "{n}"),
            Self::F64(n) => write!(f, "{n}"),
            Self::Duration(d) => write!(f, "{d}"),
            Self::StringList(items) => f.write_str(&items.join(",")),
        }
    }
}

#[cfg(test)]
mod tests;

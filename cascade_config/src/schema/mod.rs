//! Declarative description of a configuration tree.
//!
//! A [`Schema`] is an ordered list of [`Field`]s. Leaves carry a [`Kind`];
//! groups carry a nested schema whose fields are flattened into the parent
//! when bindings are derived. Schemas are usually produced by
//! `#[derive(Configuration)]` but can be assembled by hand:
//!
//! ```
//! use cascade_config::{Field, Kind, Schema};
//!
//! let schema = Schema::new()
//!     .field(Field::leaf("LogLevel", Kind::String).key("log_level").default_value("info"))
//!     .field(Field::group(
//!         "Storage",
//!         Schema::new()
//!             .field(Field::leaf("User", Kind::String).key("user").required())
//!             .field(Field::leaf("Password", Kind::String).key("password").hidden().optional()),
//!     ).key("storage"));
//! assert_eq!(schema.fields().len(), 2);
//! ```

mod disposition;

use crate::value::Kind;

pub use disposition::Disposition;

/// Sentinel disabling a flag, an environment variable or the whole field.
pub const DISABLED: &str = "-";

/// Ordered collection of fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends `field`, returning the schema for chaining.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends `field` in place.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl FromIterator<Field> for Schema {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A single bindable value.
    Leaf(Kind),
    /// A nested section.
    Group(Schema),
    /// A type the resolver cannot bind; rejected when the schema is walked.
    Unsupported(String),
}

impl FieldType {
    /// Interprets a kind name, keeping unknown names as [`FieldType::Unsupported`].
    ///
    /// ```
    /// use cascade_config::{FieldType, Kind};
    /// assert_eq!(FieldType::named("duration"), FieldType::Leaf(Kind::Duration));
    /// assert_eq!(
    ///     FieldType::named("complex128"),
    ///     FieldType::Unsupported("complex128".into()),
    /// );
    /// ```
    #[must_use]
    pub fn named(name: &str) -> Self {
        name.parse::<Kind>()
            .map_or_else(|_| Self::Unsupported(name.to_owned()), Self::Leaf)
    }
}

/// Optional declarative metadata attached to a field.
///
/// Every entry is `None` when not declared. The flag and environment keys
/// accept [`DISABLED`]; an empty key means "no flag" on a leaf and "no
/// prefix segment" on a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    /// Explicit flag key, appended to the inherited flag prefix.
    pub flag: Option<String>,
    /// Explicit environment key, appended to the inherited environment prefix.
    pub env: Option<String>,
    /// Replaces the inherited flag prefix for this field and its subtree.
    pub flag_prefix: Option<String>,
    /// Replaces the inherited environment prefix for this field and its subtree.
    pub env_prefix: Option<String>,
    /// Help heading.
    pub category: Option<String>,
    /// Help text.
    pub usage: Option<String>,
    /// Literal default, parsed with the field's kind.
    pub default: Option<String>,
    /// Comma separated CLI disposition, see [`Disposition`].
    pub cli: Option<String>,
}

/// One named entry of a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    key: String,
    field_type: FieldType,
    meta: Meta,
}

impl Field {
    /// Creates a field of any type. The destination key defaults to `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let owned: String = name.into();
        Self {
            key: owned.clone(),
            name: owned,
            field_type,
            meta: Meta::default(),
        }
    }

    /// Creates a leaf field.
    #[must_use]
    pub fn leaf(name: impl Into<String>, kind: Kind) -> Self {
        Self::new(name, FieldType::Leaf(kind))
    }

    /// Creates a group field.
    #[must_use]
    pub fn group(name: impl Into<String>, schema: Schema) -> Self {
        Self::new(name, FieldType::Group(schema))
    }

    /// Creates a field whose type cannot be bound.
    #[must_use]
    pub fn unsupported(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Unsupported(type_name.into()))
    }

    /// Sets the key under which the destination serializes this field.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets an explicit flag key.
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.meta.flag = Some(flag.into());
        self
    }

    /// Sets an explicit environment key.
    #[must_use]
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.meta.env = Some(env.into());
        self
    }

    /// Replaces the inherited flag prefix.
    #[must_use]
    pub fn flag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.meta.flag_prefix = Some(prefix.into());
        self
    }

    /// Replaces the inherited environment prefix.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.meta.env_prefix = Some(prefix.into());
        self
    }

    /// Sets the help heading.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.meta.category = Some(category.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.meta.usage = Some(usage.into());
        self
    }

    /// Sets the literal default.
    #[must_use]
    pub fn default_value(mut self, literal: impl Into<String>) -> Self {
        self.meta.default = Some(literal.into());
        self
    }

    /// Replaces the CLI disposition string.
    #[must_use]
    pub fn cli(mut self, disposition: impl Into<String>) -> Self {
        self.meta.cli = Some(disposition.into());
        self
    }

    /// Adds `required` to the disposition.
    #[must_use]
    pub fn required(self) -> Self {
        self.with_token("required")
    }

    /// Adds `optional` to the disposition.
    #[must_use]
    pub fn optional(self) -> Self {
        self.with_token("optional")
    }

    /// Adds `hidden` to the disposition.
    #[must_use]
    pub fn hidden(self) -> Self {
        self.with_token("hidden")
    }

    /// Removes the field from resolution entirely.
    #[must_use]
    pub fn skip(self) -> Self {
        self.cli(DISABLED)
    }

    /// Replaces all metadata at once.
    #[must_use]
    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    fn with_token(mut self, token: &str) -> Self {
        self.meta.cli = Some(match self.meta.cli.take() {
            Some(existing) if !existing.trim().is_empty() => format!("{existing},{token}"),
            _ => token.to_owned(),
        });
        self
    }

    /// Declared name, used to derive flag and environment keys.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key of this field in the serialized destination.
    #[must_use]
    pub fn destination_key(&self) -> &str {
        &self.key
    }

    /// What the field holds.
    #[must_use]
    pub const fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Declared metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Meta {
        &self.meta
    }
}

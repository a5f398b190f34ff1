//! Derivation of bindings from a schema and the destination's current value.
//!
//! The walk visits fields depth first in declaration order. Groups are
//! flattened: their leaves are appended to the parent's bindings with the
//! group's prefixes and category applied. Structural problems abort the walk
//! with a [`SchemaError`].

mod checks;

use figment::value::{Dict, Value};
use serde::Serialize;
use tracing::debug;

use crate::error::SchemaError;
use crate::naming::{ENV_SEPARATOR, FLAG_SEPARATOR, join, to_env_name, to_flag_name};
use crate::options::ParseOptions;
use crate::schema::{DISABLED, Disposition, Field, FieldType, Schema};
use crate::value::{Kind, Scalar};
use crate::{CascadeError, CascadeResult, CascadeResultExt};

/// Where a binding's default came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultOrigin {
    /// The non-zero value already present in the destination.
    Base,
    /// The literal declared on the field.
    Declared,
}

/// The externally addressable description of one leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Key path of the leaf in the serialized destination.
    pub path: Vec<String>,
    /// Dotted declared name, used in messages.
    pub name: String,
    /// Kind of the leaf.
    pub kind: Kind,
    /// Flag key without leading dashes, `None` when the leaf has no flag.
    pub flag: Option<String>,
    /// Environment variable name, `None` when lookup is disabled.
    pub env: Option<String>,
    /// Help heading.
    pub category: Option<String>,
    /// Help text.
    pub usage: Option<String>,
    /// Whether resolution fails when no layer supplies a non-zero value.
    pub required: bool,
    /// Whether the flag is left out of help output.
    pub hidden: bool,
    /// Value used when neither a flag nor the environment supplies one.
    pub default: Option<(Scalar, DefaultOrigin)>,
}

/// Derives the bindings for `schema` against the current value of `dest`.
///
/// ```
/// use cascade_config::{Field, Kind, ParseOptions, Schema, walk};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Storage { user: String }
/// #[derive(Serialize)]
/// struct Root { storage: Storage }
///
/// let schema = Schema::new().field(
///     Field::group("Storage", Schema::new().field(Field::leaf("User", Kind::String).key("user")))
///         .key("storage"),
/// );
/// let root = Root { storage: Storage { user: String::new() } };
/// let bindings = walk(&root, &schema, &ParseOptions::env_only()).expect("valid schema");
/// assert_eq!(bindings[0].flag.as_deref(), Some("storage-user"));
/// assert_eq!(bindings[0].env.as_deref(), Some("STORAGE_USER"));
/// ```
///
/// # Errors
///
/// Returns [`CascadeError::Gathering`] when `dest` cannot be serialized and
/// [`CascadeError::Schema`] for the first structural problem found.
pub fn walk<T: Serialize + ?Sized>(
    dest: &T,
    schema: &Schema,
    options: &ParseOptions,
) -> CascadeResult<Vec<Binding>> {
    let base = serialize_destination(dest)?;
    bindings_for(&base, schema, options).into_cascade()
}

/// Serializes `dest` into a dictionary.
pub(crate) fn serialize_destination<T: Serialize + ?Sized>(dest: &T) -> CascadeResult<Dict> {
    match Value::serialize(dest).map_err(CascadeError::gathering)? {
        Value::Dict(_, dict) => Ok(dict),
        _ => Err(CascadeError::from(SchemaError::NotAGroup {
            field: "(root)".to_owned(),
        })
        .into()),
    }
}

/// Walks `schema` against an already serialized destination.
pub(crate) fn bindings_for(
    base: &Dict,
    schema: &Schema,
    options: &ParseOptions,
) -> Result<Vec<Binding>, SchemaError> {
    let mut out = Vec::new();
    walk_group(base, schema, options, &Scope::default(), &mut out)?;
    checks::validate_flags(&out)?;
    debug!(bindings = out.len(), "schema walk complete");
    Ok(out)
}

/// Location of the group currently being walked.
#[derive(Debug, Default, Clone)]
struct Scope {
    path: Vec<String>,
    name: String,
}

impl Scope {
    fn child(&self, field: &Field) -> Self {
        let mut path = self.path.clone();
        path.push(field.destination_key().to_owned());
        Self {
            path,
            name: join(&self.name, field.name(), "."),
        }
    }
}

fn walk_group(
    base: &Dict,
    schema: &Schema,
    options: &ParseOptions,
    scope: &Scope,
    out: &mut Vec<Binding>,
) -> Result<(), SchemaError> {
    for field in schema.fields() {
        walk_field(base, field, options, scope, out)?;
    }
    Ok(())
}

fn walk_field(
    base: &Dict,
    field: &Field,
    options: &ParseOptions,
    parent: &Scope,
    out: &mut Vec<Binding>,
) -> Result<(), SchemaError> {
    let meta = field.metadata();
    let scope = parent.child(field);
    let disposition = Disposition::parse(meta.cli.as_deref().unwrap_or_default()).map_err(
        |reason| SchemaError::InvalidDisposition {
            field: scope.name.clone(),
            disposition: meta.cli.clone().unwrap_or_default(),
            reason,
        },
    )?;
    if disposition.skip {
        return Ok(());
    }

    let flag_prefix = meta.flag_prefix.as_deref().unwrap_or(&options.flag_prefix);
    let env_prefix = meta.env_prefix.as_deref().unwrap_or(&options.env_prefix);

    let category = meta.category.clone().or_else(|| match field.field_type() {
        FieldType::Group(_) => Some(field.name().to_owned()),
        FieldType::Leaf(_) | FieldType::Unsupported(_) => options.category.clone(),
    });

    let Some(current) = base.get(field.destination_key()) else {
        return Err(SchemaError::Unaddressable { field: scope.name });
    };

    let required = disposition.required.unwrap_or(options.required_by_default);
    if disposition.hidden && required {
        return Err(SchemaError::HiddenRequired { field: scope.name });
    }

    match field.field_type() {
        FieldType::Group(schema) => {
            let Value::Dict(_, child_base) = current else {
                return Err(SchemaError::NotAGroup { field: scope.name });
            };
            let flag_off = options.flag_disabled || meta.flag.as_deref() == Some(DISABLED);
            let env_off = options.env_disabled || meta.env.as_deref() == Some(DISABLED);
            let child_options = ParseOptions {
                flag_prefix: if flag_off {
                    String::new()
                } else {
                    segment_prefix(flag_prefix, meta.flag.as_deref(), field.name(), Naming::Flag)
                },
                env_prefix: if env_off {
                    String::new()
                } else {
                    segment_prefix(env_prefix, meta.env.as_deref(), field.name(), Naming::Env)
                },
                category,
                flag_disabled: flag_off,
                env_disabled: env_off,
                required_by_default: required,
                ..options.clone()
            };
            walk_group(child_base, schema, &child_options, &scope, out)
        }
        FieldType::Unsupported(type_name) => Err(SchemaError::UnsupportedKind {
            field: scope.name,
            type_name: type_name.clone(),
        }),
        FieldType::Leaf(kind) => {
            let flag = if options.flag_disabled {
                None
            } else {
                leaf_key(flag_prefix, meta.flag.as_deref(), field.name(), Naming::Flag)
            };
            let env = if options.env_disabled {
                None
            } else {
                leaf_key(env_prefix, meta.env.as_deref(), field.name(), Naming::Env)
            };
            let default = leaf_default(*kind, current, meta.default.as_deref(), options, &scope)?;
            out.push(Binding {
                required: required && default.is_none() && !kind.is_bool(),
                path: scope.path,
                name: scope.name,
                kind: *kind,
                flag,
                env,
                category,
                usage: meta.usage.clone(),
                hidden: disposition.hidden,
                default,
            });
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Naming {
    Flag,
    Env,
}

impl Naming {
    const fn separator(self) -> &'static str {
        match self {
            Self::Flag => FLAG_SEPARATOR,
            Self::Env => ENV_SEPARATOR,
        }
    }

    fn derive(self, name: &str) -> String {
        match self {
            Self::Flag => to_flag_name(name),
            Self::Env => to_env_name(name),
        }
    }
}

/// Prefix handed to a group's children.
fn segment_prefix(prefix: &str, explicit: Option<&str>, name: &str, naming: Naming) -> String {
    let segment = explicit.map_or_else(|| naming.derive(name), str::to_owned);
    join(prefix, &segment, naming.separator())
}

/// Key of a leaf, `None` when disabled or explicitly empty.
fn leaf_key(prefix: &str, explicit: Option<&str>, name: &str, naming: Naming) -> Option<String> {
    match explicit {
        Some(DISABLED | "") => None,
        Some(key) => Some(join(prefix, key, naming.separator())),
        None => Some(join(prefix, &naming.derive(name), naming.separator())),
    }
}

/// Establishes a leaf's default: a trusted non-zero base value first, then
/// the declared literal. The literal is always parsed so malformed defaults
/// are reported even when the base value wins.
fn leaf_default(
    kind: Kind,
    current: &Value,
    literal: Option<&str>,
    options: &ParseOptions,
    scope: &Scope,
) -> Result<Option<(Scalar, DefaultOrigin)>, SchemaError> {
    let declared = literal
        .map(|text| {
            kind.parse_literal(text)
                .map_err(|reason| SchemaError::InvalidDefault {
                    field: scope.name.clone(),
                    literal: text.to_owned(),
                    reason,
                })
        })
        .transpose()?;

    if options.already_has_default_values {
        let base = kind
            .decode(current)
            .map_err(|reason| SchemaError::KindMismatch {
                field: scope.name.clone(),
                kind: kind.to_string(),
                reason,
            })?;
        if !base.is_zero() {
            return Ok(Some((base, DefaultOrigin::Base)));
        }
    }
    Ok(declared.map(|value| (value, DefaultOrigin::Declared)))
}

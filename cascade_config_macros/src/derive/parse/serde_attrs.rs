//! Serde attribute parsing helpers.
//!
//! Bindings address the serialized form of the struct, so each field's
//! destination key must match the name serde emits. That name follows
//! `#[serde(rename = "...")]` on the field and `#[serde(rename_all = "...")]`
//! on the container.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};

use super::discard_unknown;

/// Supported `#[serde(rename_all = "...")]` rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SerdeRenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl SerdeRenameAll {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            other => Err(syn::Error::new(
                value.span(),
                format!("unsupported serde rename_all value '{other}'"),
            )),
        }
    }

    pub(crate) fn apply(self, field_name: &str) -> String {
        match self {
            Self::Lower => field_name.to_ascii_lowercase(),
            Self::Upper => field_name.to_ascii_uppercase(),
            Self::Pascal => field_name.to_upper_camel_case(),
            Self::Camel => field_name.to_lower_camel_case(),
            Self::Snake => field_name.to_snake_case(),
            Self::ScreamingSnake => field_name.to_shouty_snake_case(),
            Self::Kebab => field_name.to_kebab_case(),
            Self::ScreamingKebab => field_name.to_shouty_kebab_case(),
        }
    }
}

/// Serde options of one field that affect its serialized key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SerdeField {
    /// Serialized name from `rename` or `rename(serialize = "...")`.
    pub rename: Option<String>,
    /// `skip` or `skip_serializing`: the field never reaches the tree.
    pub skipped: bool,
    /// `flatten`: the field's keys are merged into the parent.
    pub flatten: bool,
}

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Parses `#[serde(rename_all = "...")]` from container attributes.
pub(crate) fn serde_rename_all(attrs: &[Attribute]) -> syn::Result<Option<SerdeRenameAll>> {
    let mut out = None;
    for attr in serde_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") && meta.input.peek(Token![=]) {
                let value = meta.value()?.parse::<LitStr>()?;
                out = Some(SerdeRenameAll::parse(&value)?);
                Ok(())
            } else {
                discard_unknown(&meta)
            }
        })?;
    }
    Ok(out)
}

/// Parses the serde options of a field.
pub(crate) fn serde_field(attrs: &[Attribute]) -> syn::Result<SerdeField> {
    let mut out = SerdeField::default();
    for attr in serde_attrs(attrs) {
        attr.parse_nested_meta(|meta| apply_serde_field(&meta, &mut out))?;
    }
    Ok(out)
}

fn apply_serde_field(meta: &ParseNestedMeta, out: &mut SerdeField) -> syn::Result<()> {
    if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
        out.skipped = true;
        return Ok(());
    }
    if meta.path.is_ident("flatten") {
        out.flatten = true;
        return Ok(());
    }
    if !meta.path.is_ident("rename") {
        return discard_unknown(meta);
    }
    if meta.input.peek(Token![=]) {
        out.rename = Some(meta.value()?.parse::<LitStr>()?.value());
        return Ok(());
    }
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            out.rename = Some(nested.value()?.parse::<LitStr>()?.value());
            Ok(())
        } else {
            discard_unknown(&nested)
        }
    })
}

/// Key serde writes for a field named `ident`.
pub(crate) fn serialized_key(
    ident: &str,
    serde: &SerdeField,
    rename_all: Option<SerdeRenameAll>,
) -> String {
    serde.rename.clone().unwrap_or_else(|| {
        rename_all.map_or_else(|| ident.to_owned(), |rule| rule.apply(ident))
    })
}

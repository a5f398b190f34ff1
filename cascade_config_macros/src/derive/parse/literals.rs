//! Literal parsing helpers for `#[cascade(...)]` values.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses `key = "..."`.
pub(super) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Parses a default literal, accepting strings, integers, floats and
/// booleans. Everything is kept in its textual form and parsed at runtime as
/// the field's kind.
pub(super) fn lit_default(meta: &ParseNestedMeta) -> syn::Result<String> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_owned()),
        Lit::Float(f) => Ok(f.base10_digits().to_owned()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new(
            other.span(),
            "default must be a string, integer, float or boolean literal",
        )),
    }
}

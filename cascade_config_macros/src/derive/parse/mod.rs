//! Parsing of the input struct and its `#[cascade(...)]` attributes.

mod literals;
mod serde_attrs;
mod type_utils;

use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Generics, Ident, Lit, Meta, Token};

use literals::{lit_default, lit_str};
use serde_attrs::{SerdeRenameAll, serde_field, serde_rename_all, serialized_key};
pub(crate) use type_utils::Shape;
use type_utils::{infer_shape, kind_by_name};

/// Container-level options.
#[derive(Clone, Default)]
pub(crate) struct StructAttrs {
    /// Overrides the path generated code uses for `cascade_config`.
    pub crate_path: Option<syn::Path>,
    pub rename_all: Option<SerdeRenameAll>,
}

/// Field-level `#[cascade(...)]` options, kept as written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub flag: Option<String>,
    pub env: Option<String>,
    pub flag_prefix: Option<String>,
    pub env_prefix: Option<String>,
    pub category: Option<String>,
    pub usage: Option<String>,
    pub default: Option<String>,
    pub cli: Option<String>,
    /// `Kind` variant chosen with `kind = "..."`.
    pub kind: Option<&'static str>,
    pub name: Option<String>,
}

/// One field as it appears in the generated schema.
#[derive(Clone)]
pub(crate) struct FieldSpec {
    /// Name used for flag and environment derivation.
    pub name: String,
    /// Key in the serialized struct.
    pub key: String,
    pub ty: syn::Type,
    pub shape: Shape,
    pub attrs: FieldAttrs,
}

/// Everything the generator needs from the input.
#[derive(Clone)]
pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub generics: Generics,
    pub struct_attrs: StructAttrs,
    pub fields: Vec<FieldSpec>,
}

/// Consumes an unrecognised key-value or list without recording it.
pub(super) fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn parse_cascade<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("cascade")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs {
        rename_all: serde_rename_all(attrs)?,
        ..StructAttrs::default()
    };
    parse_cascade(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path = syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            Err(meta.error("unknown container attribute; expected `crate`"))
        }
    })?;
    Ok(out)
}

fn apply_field_attr(meta: &syn::meta::ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    let Some(key) = meta.path.get_ident().map(ToString::to_string) else {
        return Err(meta.error("expected an attribute name"));
    };
    let slot = match key.as_str() {
        "flag" => &mut out.flag,
        "env" => &mut out.env,
        "flag_prefix" => &mut out.flag_prefix,
        "env_prefix" => &mut out.env_prefix,
        "category" => &mut out.category,
        "usage" => &mut out.usage,
        "cli" => &mut out.cli,
        "name" => &mut out.name,
        "default" => {
            out.default = Some(lit_default(meta)?);
            return Ok(());
        }
        "kind" => {
            let s = lit_str(meta, "kind")?;
            let kind = kind_by_name(&s.value())
                .ok_or_else(|| syn::Error::new(s.span(), format!("unknown kind '{}'", s.value())))?;
            out.kind = Some(kind);
            return Ok(());
        }
        other => return Err(meta.error(format!("unknown cascade attribute `{other}`"))),
    };
    *slot = Some(lit_str(meta, &key)?.value());
    Ok(())
}

/// Parses field-level `#[cascade(...)]` attributes. Unknown keys are errors.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_cascade(attrs, |meta| apply_field_attr(meta, &mut out))?;
    Ok(out)
}

/// First paragraph of the doc comment, lines joined by single spaces.
pub(crate) fn doc_summary(attrs: &[Attribute]) -> Option<String> {
    let lines = attrs.iter().filter_map(|attr| match &attr.meta {
        Meta::NameValue(nv) if nv.path.is_ident("doc") => match &nv.value {
            Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Some(s.value()),
            _ => None,
        },
        _ => None,
    });
    let summary = lines
        .map(|line| line.trim().to_owned())
        .skip_while(String::is_empty)
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!summary.is_empty()).then_some(summary)
}

fn parse_field(
    field: &syn::Field,
    rename_all: Option<SerdeRenameAll>,
) -> syn::Result<Option<FieldSpec>> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
    };
    let serde = serde_field(&field.attrs)?;
    if serde.skipped {
        return Ok(None);
    }
    if serde.flatten {
        return Err(syn::Error::new_spanned(
            ident,
            "#[serde(flatten)] is not supported; declare the field as a group instead",
        ));
    }
    let mut attrs = parse_field_attrs(&field.attrs)?;
    if attrs.usage.is_none() {
        attrs.usage = doc_summary(&field.attrs);
    }
    let rust_name = ident.unraw().to_string();
    let shape = attrs.kind.map_or_else(|| infer_shape(&field.ty), Shape::Leaf);
    Ok(Some(FieldSpec {
        name: attrs.name.clone().unwrap_or_else(|| rust_name.clone()),
        key: serialized_key(&rust_name, &serde, rename_all),
        ty: field.ty.clone(),
        shape,
        attrs,
    }))
}

/// Collects the struct identifier, its options and its fields.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Configuration requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Configuration can only be derived for structs",
            ));
        }
    };
    let mut fields = Vec::new();
    for field in named {
        if let Some(spec) = parse_field(field, struct_attrs.rename_all)? {
            fields.push(spec);
        }
    }
    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        struct_attrs,
        fields,
    })
}

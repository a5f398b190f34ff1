//! Kind inference from field types.
//!
//! The check is shallow and purely syntactic: the last path segment decides.
//! Scalars map to a leaf kind, `Vec<String>` to a string list, well-known
//! containers are unsupported, and any other path is assumed to be a nested
//! configuration struct.

use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// What a field becomes in the generated schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    /// Leaf with the named `Kind` variant.
    Leaf(&'static str),
    /// Nested struct implementing `Configuration`.
    Group,
    /// Type with no kind, reported when the schema is walked.
    Unsupported(String),
}

const UNSUPPORTED: &[&str] = &[
    "f32", "i128", "u128", "char", "str", "Option", "HashMap", "BTreeMap", "HashSet", "BTreeSet",
    "VecDeque", "Box", "Rc", "Arc", "Cell", "RefCell", "PathBuf", "OsString",
];

/// Maps a scalar type name to its `Kind` variant.
fn scalar_kind(ident: &str) -> Option<&'static str> {
    Some(match ident {
        "String" => "String",
        "bool" => "Bool",
        "i8" => "I8",
        "i16" => "I16",
        "i32" => "I32",
        "i64" | "isize" => "I64",
        "u8" => "U8",
        "u16" => "U16",
        "u32" => "U32",
        "u64" | "usize" => "U64",
        "f64" => "F64",
        "Duration" => "Duration",
        _ => return None,
    })
}

/// Maps a kind name accepted by `#[cascade(kind = "...")]` to its variant.
pub(crate) fn kind_by_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "string" => "String",
        "bool" => "Bool",
        "int8" => "I8",
        "int16" => "I16",
        "int32" => "I32",
        "int64" | "int" => "I64",
        "uint8" => "U8",
        "uint16" => "U16",
        "uint32" => "U32",
        "uint64" | "uint" => "U64",
        "float64" => "F64",
        "duration" => "Duration",
        "string-list" | "[]string" => "StringList",
        _ => return None,
    })
}

fn type_name(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

fn first_type_argument(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle) = args else {
        return None;
    };
    match angle.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn is_string(ty: &Type) -> bool {
    matches!(ty, Type::Path(p) if p.qself.is_none()
        && p.path.segments.last().is_some_and(|s| s.ident == "String" && s.arguments.is_none()))
}

fn path_shape(path: &TypePath, ty: &Type) -> Shape {
    let Some(last) = path.path.segments.last() else {
        return Shape::Unsupported(type_name(ty));
    };
    let ident = last.ident.to_string();
    if last.arguments.is_none()
        && let Some(kind) = scalar_kind(&ident)
    {
        return Shape::Leaf(kind);
    }
    if ident == "Vec" {
        return match first_type_argument(&last.arguments) {
            Some(inner) if is_string(inner) => Shape::Leaf("StringList"),
            _ => Shape::Unsupported(type_name(ty)),
        };
    }
    if UNSUPPORTED.contains(&ident.as_str()) {
        return Shape::Unsupported(type_name(ty));
    }
    Shape::Group
}

/// Infers the schema shape of a field of type `ty`.
pub(crate) fn infer_shape(ty: &Type) -> Shape {
    match ty {
        Type::Path(path) if path.qself.is_none() => path_shape(path, ty),
        Type::Group(group) => infer_shape(&group.elem),
        Type::Paren(paren) => infer_shape(&paren.elem),
        other => Shape::Unsupported(type_name(other)),
    }
}

//! Procedural macros for `cascade_config`.
//!
//! `#[derive(Configuration)]` builds a `cascade_config::Schema` from a
//! struct's fields. Field names come from the Rust identifiers, destination
//! keys follow the struct's serde renames, and the kind of each leaf is
//! inferred from its type. Fields whose type is another struct become
//! groups, which must implement `Configuration` themselves.
//!
//! Field attributes live under `#[cascade(...)]`:
//!
//! | key           | meaning                                             |
//! |---------------|-----------------------------------------------------|
//! | `flag`        | explicit flag segment, `"-"` disables the flag      |
//! | `env`         | explicit environment segment, `"-"` disables it     |
//! | `flag_prefix` | replaces the inherited flag prefix                  |
//! | `env_prefix`  | replaces the inherited environment prefix           |
//! | `category`    | help heading                                        |
//! | `usage`       | help text, defaults to the doc comment              |
//! | `default`     | default literal parsed as the field's kind          |
//! | `cli`         | disposition such as `"required,hidden"` or `"-"`    |
//! | `kind`        | overrides the inferred kind, for example `"uint16"` |
//! | `name`        | overrides the field name used for derivation        |
//!
//! The container accepts `#[cascade(crate = "path")]` for renamed
//! dependencies.

mod derive;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro for `cascade_config::Configuration`.
#[proc_macro_derive(Configuration, attributes(cascade))]
pub fn derive_configuration(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

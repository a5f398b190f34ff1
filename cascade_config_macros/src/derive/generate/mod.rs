//! Token generation for the `Configuration` impl.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::crate_path;
use super::parse::{FieldAttrs, FieldSpec, ParsedInput, Shape};

/// Builder calls for every option the field sets, in `Field` method order.
fn setters(attrs: &FieldAttrs) -> Vec<TokenStream> {
    [
        ("flag", &attrs.flag),
        ("env", &attrs.env),
        ("flag_prefix", &attrs.flag_prefix),
        ("env_prefix", &attrs.env_prefix),
        ("category", &attrs.category),
        ("usage", &attrs.usage),
        ("default_value", &attrs.default),
        ("cli", &attrs.cli),
    ]
    .into_iter()
    .filter_map(|(method, value)| {
        value.as_ref().map(|v| {
            let method = format_ident!("{method}");
            quote! { .#method(#v) }
        })
    })
    .collect()
}

/// Expression building the `Field` for `field`.
pub(crate) fn field_tokens(krate: &TokenStream, field: &FieldSpec) -> TokenStream {
    let name = &field.name;
    let key = &field.key;
    let base = match &field.shape {
        Shape::Leaf(kind) => {
            let variant = format_ident!("{kind}");
            quote! { #krate::Field::leaf(#name, #krate::Kind::#variant) }
        }
        Shape::Group => {
            let ty = &field.ty;
            quote! {
                #krate::Field::group(#name, <#ty as #krate::Configuration>::schema())
            }
        }
        Shape::Unsupported(type_name) => {
            quote! { #krate::Field::unsupported(#name, #type_name) }
        }
    };
    let setters = setters(&field.attrs);
    quote! { #base.key(#key) #( #setters )* }
}

/// The complete `impl Configuration for ...` block.
pub(crate) fn impl_tokens(input: &ParsedInput) -> TokenStream {
    let krate = crate_path::resolve(input.struct_attrs.crate_path.as_ref());
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = input.fields.iter().map(|field| field_tokens(&krate, field));
    quote! {
        impl #impl_generics #krate::Configuration for #ident #ty_generics #where_clause {
            fn schema() -> #krate::Schema {
                #krate::Schema::new()
                    #( .field(#fields) )*
            }
        }
    }
}

//! Path used to reach `cascade_config` from generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Returns `::cascade_config` unless `#[cascade(crate = "...")]` names a
/// different path.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::cascade_config }, |path| quote! { #path })
}

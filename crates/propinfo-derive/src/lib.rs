use proc_macro::TokenStream;

mod model;

/// Derive a class descriptor for a struct with named fields.
///
/// Every field becomes a typed property unless marked `#[prop(skip)]`.
/// Field options: `required`, `network_transient`, `storage_transient`,
/// `transient`, `sql = "..."`, `name = "..."`, `skip`. The struct may
/// rename its class with `#[model(name = "...")]`.
#[proc_macro_derive(Model, attributes(model, prop))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input.into()).into()
}

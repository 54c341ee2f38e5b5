//! Macros for SpecForge entities.

use proc_macro::TokenStream;
use syn::{parse_macro_input, Attribute, DeriveInput};

mod entity;

/// Derives `Entity` for a struct with named scalar fields.
///
/// Supported field types: `bool`, integers, `f32`/`f64`, `String`,
/// `Arc<str>`, `&'static str`, and `Option` of any of these. Fields of other
/// types must be marked `#[entity(skip)]`. `#[entity(rename = "...")]`
/// changes the name member nodes use for a field.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand_derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn get_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

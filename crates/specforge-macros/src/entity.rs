// #[derive(Entity)] implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, GenericArgument, LitStr, PathArguments, Type};

use crate::get_attribute;

// How a field's Rust type maps onto a `Value`.
enum Scalar {
    Bool,
    Int,
    // Unsigned; values above i64::MAX read as i64::MAX.
    WideUnsigned,
    // Signed and wider than i64; saturates toward the value's sign.
    WideSigned,
    Float,
    String,
    ArcStr,
    StaticStr,
}

impl Scalar {
    fn kind(&self) -> TokenStream {
        match self {
            Scalar::Bool => quote!(Bool),
            Scalar::Int | Scalar::WideUnsigned | Scalar::WideSigned => quote!(Int),
            Scalar::Float => quote!(Float),
            Scalar::String | Scalar::ArcStr | Scalar::StaticStr => quote!(Str),
        }
    }

    // Converts `v: &T` to a Value.
    fn read(&self) -> TokenStream {
        match self {
            Scalar::Bool => quote!(::specforge::__internal::Value::Bool(*v)),
            Scalar::Int => quote!(::specforge::__internal::Value::Int(*v as i64)),
            Scalar::WideUnsigned => quote!(::specforge::__internal::Value::Int(
                <i64 as ::core::convert::TryFrom<_>>::try_from(*v).unwrap_or(i64::MAX)
            )),
            Scalar::WideSigned => quote!(::specforge::__internal::Value::Int(
                <i64 as ::core::convert::TryFrom<_>>::try_from(*v)
                    .unwrap_or(if *v < 0 { i64::MIN } else { i64::MAX })
            )),
            Scalar::Float => quote!(::specforge::__internal::Value::Float(*v as f64)),
            Scalar::String => quote!(::specforge::__internal::Value::Str(
                ::std::sync::Arc::from(v.as_str())
            )),
            Scalar::ArcStr => quote!(::specforge::__internal::Value::Str(
                ::std::sync::Arc::clone(v)
            )),
            Scalar::StaticStr => quote!(::specforge::__internal::Value::Str(
                ::std::sync::Arc::from(*v)
            )),
        }
    }
}

struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
}

fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs, Error> {
    let mut attrs = FieldAttrs {
        skip: false,
        rename: None,
    };
    if let Some(attr) = get_attribute(&field.attrs, "entity") {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(attrs)
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn is_str(ty: &Type) -> bool {
    matches!(ty, Type::Path(p) if p.qself.is_none() && p.path.is_ident("str"))
}

fn classify(ty: &Type) -> Option<Scalar> {
    if let Type::Reference(reference) = ty {
        let is_static = reference
            .lifetime
            .as_ref()
            .is_some_and(|l| l.ident == "static");
        return (is_static && reference.mutability.is_none() && is_str(&reference.elem))
            .then_some(Scalar::StaticStr);
    }

    let segment = last_segment(ty)?;
    let name = segment.ident.to_string();
    match name.as_str() {
        "bool" => Some(Scalar::Bool),
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => Some(Scalar::Int),
        "u64" | "usize" | "u128" => Some(Scalar::WideUnsigned),
        "isize" | "i128" => Some(Scalar::WideSigned),
        "f32" | "f64" => Some(Scalar::Float),
        "String" => Some(Scalar::String),
        "Arc" => match &segment.arguments {
            PathArguments::AngleBracketed(args) => match args.args.first() {
                Some(GenericArgument::Type(inner)) if is_str(inner) => Some(Scalar::ArcStr),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

pub fn expand_derive(input: DeriveInput) -> Result<TokenStream, Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "#[derive(Entity)] requires named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "#[derive(Entity)] only works on structs",
            ))
        }
    };

    let mut defs = Vec::new();
    let mut arms = Vec::new();

    for field in fields {
        let attrs = parse_field_attrs(field)?;
        if attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = attrs.rename.unwrap_or_else(|| ident.to_string());

        let (scalar, nullable) = match option_inner(&field.ty) {
            Some(inner) => (classify(inner), true),
            None => (classify(&field.ty), false),
        };
        let Some(scalar) = scalar else {
            return Err(Error::new_spanned(
                &field.ty,
                "unsupported field type for #[derive(Entity)]; mark it #[entity(skip)]",
            ));
        };

        let kind = scalar.kind();
        let read = scalar.read();
        let index = defs.len();

        defs.push(quote! {
            ::specforge::__internal::FieldDef {
                name: #field_name,
                kind: ::specforge::__internal::ValueKind::#kind,
                nullable: #nullable,
            }
        });

        arms.push(if nullable {
            quote! {
                #index => match &self.#ident {
                    ::core::option::Option::Some(v) => #read,
                    ::core::option::Option::None => ::specforge::__internal::Value::Null,
                },
            }
        } else {
            quote! {
                #index => {
                    let v = &self.#ident;
                    #read
                }
            }
        });
    }

    let entity_name = name.to_string();

    Ok(quote! {
        impl #impl_generics ::specforge::__internal::Entity for #name #ty_generics #where_clause {
            fn entity_name() -> &'static str {
                #entity_name
            }

            fn fields() -> &'static [::specforge::__internal::FieldDef] {
                const FIELDS: &[::specforge::__internal::FieldDef] = &[#(#defs),*];
                FIELDS
            }

            fn read_field(&self, index: usize) -> ::specforge::__internal::Value {
                match index {
                    #(#arms)*
                    _ => ::specforge::__internal::Value::Null,
                }
            }
        }
    })
}

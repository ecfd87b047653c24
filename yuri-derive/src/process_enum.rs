use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields};

use crate::attributes::{ContainerAttrs, reprs};
use crate::generics;

/// Integer reprs an enum may use, and the `EnumRepr` each maps to.
const INT_REPRS: &[(&str, &str)] = &[
    ("u8", "U8"),
    ("u16", "U16"),
    ("u32", "U32"),
    ("u64", "U64"),
    ("usize", "Usize"),
    ("i8", "I8"),
    ("i16", "I16"),
    ("i32", "I32"),
    ("i64", "I64"),
    ("isize", "Isize"),
];

/// Generates `Reflect` for a field-less enum with an explicit integer repr.
/// It is encoded as its discriminant.
pub(crate) fn process_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    let container = ContainerAttrs::parse(&input.attrs)?;
    let ident = &input.ident;
    let name = ident.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "generic enums are not supported",
        ));
    }

    let repr = reprs(&input.attrs)?
        .into_iter()
        .find_map(|r| {
            INT_REPRS
                .iter()
                .find(|(rust, _)| r == rust)
                .map(|(_, variant)| syn::Ident::new(variant, r.span()))
        })
        .ok_or_else(|| {
            syn::Error::new_spanned(
                ident,
                "enums need an integer repr, e.g. #[repr(u8)] or #[repr(i32)]",
            )
        })?;

    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "only field-less variants can be encoded as integers",
            ));
        }
        let vident = &variant.ident;
        let vname = vident.to_string();
        variants.push(quote! {
            ::yuri::Variant {
                name: #vname,
                discriminant: Self::#vident as i64,
            }
        });
    }
    let variant_count = variants.len();

    let vtable = generics::vtable(ident, &input.generics, container.default);
    let where_clause = if container.default {
        quote! { where #ident: ::core::default::Default }
    } else {
        quote! {}
    };
    let auto_register = generics::auto_register(ident, &input.generics, container.auto_register)?;

    Ok(quote! {
        #[automatically_derived]
        unsafe impl ::yuri::Reflect for #ident #where_clause {
            const SHAPE: &'static ::yuri::Shape = &const {
                ::yuri::Shape::builder_for_sized::<Self>()
                    .type_identifier(#name)
                    .vtable(#vtable)
                    .def(::yuri::Def::Enum(::yuri::EnumDef {
                        repr: ::yuri::EnumRepr::#repr,
                        variants: &const {
                            let variants: [::yuri::Variant; #variant_count] = [#(#variants),*];
                            variants
                        },
                    }))
                    .build()
            };
        }

        #auto_register
    })
}

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, Index, Member};

use crate::attributes::{ContainerAttrs, FieldAttrs, reprs};
use crate::generics;

/// Generates `Reflect` for a struct: a composite whose bases are the
/// leading `#[reflect(base)]` fields and whose own fields are the rest.
///
/// ```ignore
/// #[derive(Reflect)]
/// #[repr(C)]
/// struct Derived {
///     #[reflect(base)]
///     left: Left,
///     own: u32,
/// }
/// ```
pub(crate) fn process_struct(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    let container = ContainerAttrs::parse(&input.attrs)?;
    let ident = &input.ident;
    let name = ident.to_string();

    let mut bases = Vec::new();
    let mut fields = Vec::new();

    let members: Vec<(Member, &syn::Field)> = match &data.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|f| f.ident.clone().map(|id| (Member::Named(id), f)))
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, f)| (Member::Unnamed(Index::from(i)), f))
            .collect(),
        Fields::Unit => Vec::new(),
    };

    for (member, field) in &members {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        let ty = &field.ty;
        if attrs.base {
            if !fields.is_empty() {
                return Err(syn::Error::new_spanned(
                    field,
                    "base fields must come before every other field",
                ));
            }
            bases.push(quote! {
                ::yuri::Base::new(
                    || <#ty as ::yuri::Reflect>::SHAPE,
                    ::core::mem::offset_of!(Self, #member),
                )
            });
            continue;
        }
        if attrs.skip {
            continue;
        }
        let field_name = match (&attrs.rename, member) {
            (Some(rename), _) => rename.value(),
            (None, Member::Named(id)) => id.to_string(),
            (None, Member::Unnamed(idx)) => idx.index.to_string(),
        };
        fields.push(quote! {
            ::yuri::Field::new(
                #field_name,
                || <#ty as ::yuri::Reflect>::SHAPE,
                ::core::mem::offset_of!(Self, #member),
            )
        });
    }

    if !bases.is_empty() && !reprs(&input.attrs)?.iter().any(|r| r == "C") {
        return Err(syn::Error::new_spanned(
            ident,
            concat!(
                "structs with #[reflect(base)] fields must be #[repr(C)] ",
                "so bases are laid out first, in order",
            ),
        ));
    }

    let self_ty = {
        let (_, ty_generics, _) = input.generics.split_for_impl();
        quote! { #ident #ty_generics }
    };
    let bounded = generics::bounded(
        &input.generics,
        container.default.then(|| self_ty.clone()),
    )?;
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let vtable = generics::vtable(ident, &input.generics, container.default);
    let auto_register = generics::auto_register(ident, &input.generics, container.auto_register)?;

    let base_count = bases.len();
    let field_count = fields.len();

    Ok(quote! {
        #[automatically_derived]
        unsafe impl #impl_generics ::yuri::Reflect for #ident #ty_generics #where_clause {
            const SHAPE: &'static ::yuri::Shape = &const {
                ::yuri::Shape::builder_for_sized::<Self>()
                    .type_identifier(#name)
                    .vtable(#vtable)
                    .def(::yuri::Def::Composite(::yuri::CompositeDef {
                        bases: &const {
                            let bases: [::yuri::Base; #base_count] = [#(#bases),*];
                            bases
                        },
                        fields: &const {
                            let fields: [::yuri::Field; #field_count] = [#(#fields),*];
                            fields
                        },
                    }))
                    .build()
            };
        }

        #auto_register
    })
}

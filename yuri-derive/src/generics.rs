use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericParam, Generics, Ident, parse_quote};

/// Adds a `Reflect` bound to every type parameter, plus `Self: Default`
/// when requested. Rejects lifetime parameters: reflected types are `'static`.
pub(crate) fn bounded(
    generics: &Generics,
    self_default: Option<TokenStream>,
) -> syn::Result<Generics> {
    let mut generics = generics.clone();
    for param in generics.params.iter_mut() {
        match param {
            GenericParam::Type(tp) => tp.bounds.push(parse_quote!(::yuri::Reflect)),
            GenericParam::Lifetime(lt) => {
                return Err(syn::Error::new_spanned(
                    lt,
                    "reflected types cannot borrow: lifetime parameters are not supported",
                ));
            }
            GenericParam::Const(_) => {}
        }
    }
    if let Some(self_ty) = self_default {
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#self_ty: ::core::default::Default));
    }
    Ok(generics)
}

/// A `TypeNameFn` closure writing `Name<T1, T2>` using each parameter's shape.
pub(crate) fn type_name_fn(ident: &Ident, generics: &Generics) -> TokenStream {
    let name = ident.to_string();
    let params: Vec<_> = generics.type_params().map(|tp| &tp.ident).collect();
    if params.is_empty() {
        return quote! { |f| f.write_str(#name) };
    }
    let writes = params.iter().enumerate().map(|(i, param)| {
        let sep = if i == 0 {
            quote! {}
        } else {
            quote! { f.write_str(", ")?; }
        };
        quote! {
            #sep
            <#param as ::yuri::Reflect>::SHAPE.write_type_name(f)?;
        }
    });
    quote! {
        |f| {
            f.write_str(#name)?;
            f.write_str("<")?;
            #(#writes)*
            f.write_str(">")
        }
    }
}

/// The value vtable: `Default`-backed when asked for, detected for concrete
/// types, absent for other generic types.
pub(crate) fn vtable(ident: &Ident, generics: &Generics, force_default: bool) -> TokenStream {
    let type_name = type_name_fn(ident, generics);
    if force_default {
        quote! {
            &const {
                ::yuri::ValueVTable::builder()
                    .type_name(#type_name)
                    .default_in_place(true, |target| unsafe {
                        ::core::option::Option::Some(
                            target.put(<Self as ::core::default::Default>::default()),
                        )
                    })
                    .build()
            }
        }
    } else if generics.params.is_empty() {
        quote! { &::yuri::value_vtable!(Self, #type_name) }
    } else {
        quote! {
            &const { ::yuri::ValueVTable::builder().type_name(#type_name).build() }
        }
    }
}

/// `inventory` submission for `#[reflect(auto_register)]`
pub(crate) fn auto_register(
    ident: &Ident,
    generics: &Generics,
    span: Option<proc_macro2::Span>,
) -> syn::Result<TokenStream> {
    let Some(span) = span else {
        return Ok(quote! {});
    };
    if !generics.params.is_empty() {
        return Err(syn::Error::new(
            span,
            "auto_register only works on non-generic types; register each instantiation explicitly",
        ));
    }
    Ok(quote! {
        ::yuri::inventory::submit! {
            ::yuri::Registration::new(|| <#ident as ::yuri::Reflect>::SHAPE)
        }
    })
}

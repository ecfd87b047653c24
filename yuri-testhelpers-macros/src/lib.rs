//! `#[yuri_testhelpers::test]`: a `#[test]` that installs the shared test
//! setup and returns `eyre::Result<()>`, so the body can use `?`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, ReturnType, parse_macro_input};

#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return syn::Error::new_spanned(attr, "#[yuri_testhelpers::test] takes no arguments")
            .to_compile_error()
            .into();
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(item as ItemFn);

    if let ReturnType::Type(_, ty) = &sig.output {
        return syn::Error::new_spanned(
            ty,
            "#[yuri_testhelpers::test] already returns eyre::Result<()>; drop the return type",
        )
        .to_compile_error()
        .into();
    }

    let name = &sig.ident;

    quote! {
        #[::core::prelude::rust_2024::test]
        #(#attrs)*
        #vis fn #name() -> ::yuri_testhelpers::eyre::Result<()> {
            ::yuri_testhelpers::setup();

            #block

            Ok(())
        }
    }
    .into()
}

//! `#[derive(Reflect)]`, re-exported by the `yuri` crate. See the docs there.

use proc_macro::TokenStream;
use syn::{Data, DeriveInput, parse_macro_input};

mod attributes;
mod generics;
mod process_enum;
mod process_struct;

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn reflect_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = match &input.data {
        Data::Struct(data) => process_struct::process_struct(&input, data),
        Data::Enum(data) => process_enum::process_enum(&input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Reflect)] does not support unions",
        )),
    };
    expanded.unwrap_or_else(|err| err.to_compile_error()).into()
}

use std::collections::BTreeSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitInt, Result,
    parse::{Parse, ParseStream},
};

use crate::types::{self, Container};

pub(crate) fn expand_from_messages(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromMessages` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromMessages` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(MessageMetadata::parse)
        .filter_map(Result::transpose) // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut numbers = BTreeSet::new();
    for field in &fields {
        if !numbers.insert(field.number.base10_parse::<u16>()?) {
            Err(Error::new(
                field.number.span(),
                "Message numbers must be unique.",
            ))?
        }
    }

    let cases = fields.iter().map(|field| {
        let MessageMetadata {
            name,
            number,
            container,
        } = field;

        let receiver = match container {
            Container::Vec => quote! {
                self.#name.push(Default::default());
                self.#name
                    .last_mut()
                    .map(|m| m as &mut dyn ::garmr_fit::avec::FromMessage)
            },
            Container::Option => quote! {
                Some(self.#name.insert(Default::default()) as &mut dyn ::garmr_fit::avec::FromMessage)
            },
        };

        quote! { #number => { #receiver } }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::garmr_fit::avec::FromMessages for #name #ty_generics #where_clause {
            fn add_message(&mut self, global: u16) -> Option<&mut dyn ::garmr_fit::avec::FromMessage> {
                match global {
                    #(#cases)*
                    _ => None,
                }
            }
        }
    };

    Ok(expanded.into())
}

struct MessageMetadata {
    name: Ident,
    number: LitInt,
    container: Container,
}

impl MessageMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("message")) else {
            return Ok(None);
        };

        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let MessageAttribute { number } = attr.meta.require_list()?.parse_args()?;
        let (container, _) = types::container(&field.ty)?;

        Ok(Some(Self {
            name,
            number,
            container,
        }))
    }
}

struct MessageAttribute {
    number: LitInt,
}

impl Parse for MessageAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let number = input.parse::<LitInt>()?;
        Ok(Self { number })
    }
}

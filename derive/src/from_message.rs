use std::collections::BTreeMap;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, Ident, LitInt, Pat, Result, Token, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

use crate::types::{self, Container};

pub(crate) fn expand_from_message(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromMessage` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromMessage` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .filter_map(Result::transpose) // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut numbers = BTreeMap::new();
    for field in &fields {
        let number = field.number.base10_parse::<u8>()?;
        if numbers.insert(number, &field.name).is_some() {
            Err(Error::new(
                field.number.span(),
                "Field numbers must be unique.",
            ))?
        }
    }

    // Match arms of each receiver method, keyed by the primitive it receives.
    let mut arms: BTreeMap<&'static str, Vec<TokenStream2>> = BTreeMap::new();

    for FieldMetadata {
        name,
        number,
        receiver,
    } in &fields
    {
        match receiver {
            Receiver::Value(primitive) => {
                let target = format_ident!("{}", primitive);

                for source in types::sources(*primitive) {
                    arms.entry(source).or_default().push(quote! {
                        #number => { self.#name = Some(#target::from(value)); }
                    });
                }
            }
            Receiver::Handler {
                primitive,
                ty,
                closure,
            } => {
                let body = &closure.body;
                let acc = &closure.inputs[0];
                let val = &closure.inputs[1];

                arms.entry(*primitive).or_default().push(quote! {
                    #number => { (|#acc: &mut #ty, #val| { #body })(&mut self.#name, value); }
                });
            }
        }
    }

    let methods = arms.into_iter().map(|(primitive, arms)| {
        let method = format_ident!("add_{}", primitive);
        let primitive = format_ident!("{}", primitive);

        quote! {
            fn #method(&mut self, field: u8, value: #primitive) {
                match field {
                    #(#arms)*
                    _ => {}
                }
            }
        }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::garmr_fit::avec::FromMessage for #name #ty_generics #where_clause {
            #(#methods)*
        }
    };

    Ok(expanded.into())
}

struct FieldMetadata {
    name: Ident,
    number: LitInt,
    receiver: Receiver,
}

enum Receiver {
    /// Store the value, widened to the field's primitive.
    Value(&'static str),
    /// Pass the exact primitive to an accumulator closure.
    Handler {
        primitive: &'static str,
        ty: Type,
        closure: ExprClosure,
    },
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            return Ok(None);
        };

        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let FieldAttribute { number, handler } = attr.meta.require_list()?.parse_args()?;

        let receiver = match handler {
            Some(closure) => {
                if closure.inputs.len() != 2 {
                    Err(Error::new_spanned(
                        &closure,
                        "Handler closure must have two parameters.",
                    ))?
                }

                let Pat::Type(pat_type) = &closure.inputs[1] else {
                    Err(Error::new_spanned(
                        &closure.inputs[1],
                        "Handler closure's second parameter must be annotated with the expected primitive type.",
                    ))?
                };

                Receiver::Handler {
                    primitive: types::primitive(&pat_type.ty)?,
                    ty: field.ty.clone(),
                    closure,
                }
            }
            None => {
                let (Container::Option, inner) = types::container(&field.ty)? else {
                    Err(Error::new_spanned(
                        &field.ty,
                        "Field without a handler must have type `Option<T>`.",
                    ))?
                };

                Receiver::Value(types::primitive(inner)?)
            }
        };

        Ok(Some(Self {
            name,
            number,
            receiver,
        }))
    }
}

struct FieldAttribute {
    number: LitInt,
    handler: Option<ExprClosure>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let number = input.parse::<LitInt>()?;

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self { number, handler })
    }
}

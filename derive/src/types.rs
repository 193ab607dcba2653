use quote::ToTokens;
use syn::{Error, GenericArgument, PathArguments, Result, Type};

/// Collection wrapping the element type of a struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    Option,
    Vec,
}

/// Split a field type of the form `Option<T>` or `Vec<T>` into its container
/// and element type.
pub(crate) fn container(ty: &Type) -> Result<(Container, &Type)> {
    let Type::Path(path) = ty else {
        Err(Error::new_spanned(ty, "Field must have a type annotation."))?
    };

    let Some(segment) = path.path.segments.last() else {
        Err(Error::new_spanned(
            &path.path.segments,
            "Field must have a type annotation.",
        ))?
    };

    let container = if segment.ident == "Option" {
        Container::Option
    } else if segment.ident == "Vec" {
        Container::Vec
    } else {
        Err(Error::new_spanned(
            &segment.ident,
            "Field must have an `Option<T>` or `Vec<T>` type.",
        ))?
    };

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        Err(Error::new_spanned(
            &segment.arguments,
            "Field container must have a generic parameter.",
        ))?
    };

    let Some(GenericArgument::Type(inner)) = arguments.args.first() else {
        Err(Error::new_spanned(
            &arguments.args,
            "Generic argument of a field container must be a type.",
        ))?
    };

    Ok((container, inner))
}

/// Primitives delivered by the receiver methods, each with the primitives that
/// convert into it without loss.
const PRIMITIVES: [(&str, &[&str]); 10] = [
    ("u8", &[]),
    ("u16", &["u8"]),
    ("u32", &["u8", "u16"]),
    ("u64", &["u8", "u16", "u32"]),
    ("i8", &[]),
    ("i16", &["u8", "i8"]),
    ("i32", &["u8", "u16", "i8", "i16"]),
    ("i64", &["u8", "u16", "u32", "i8", "i16", "i32"]),
    ("f32", &[]),
    ("f64", &["f32"]),
];

/// Resolve a type to the name of a receiver primitive.
pub(crate) fn primitive(ty: &Type) -> Result<&'static str> {
    let name = ty.to_token_stream().to_string();

    PRIMITIVES
        .iter()
        .find(|(p, _)| *p == name)
        .map(|(p, _)| *p)
        .ok_or_else(|| {
            Error::new_spanned(
                ty,
                "Field type must be a primitive from `u8` to `u64`, `i8` to `i64`, `f32` or `f64`.",
            )
        })
}

/// Primitives whose receiver methods may assign to a field of `primitive`,
/// starting with the primitive itself.
pub(crate) fn sources(primitive: &'static str) -> impl Iterator<Item = &'static str> {
    let widened = PRIMITIVES
        .iter()
        .find(|(p, _)| *p == primitive)
        .map(|(_, s)| *s)
        .unwrap_or(&[]);

    std::iter::once(primitive).chain(widened.iter().copied())
}

//! States processing data records.

use core::marker::PhantomData;

use either::Either::{self, Left, Right};

use super::definition::{NextAlt, Progress};

/// State token to decode a field of base type `T`.
#[derive(Debug)]
pub struct Field<T> {
    progress: Progress,
    bytes_remaining: u8,
    is_little_endian: bool,
    _phantom: PhantomData<T>,
}

impl<T: FieldInner> Field<T> {
    /// Transition to another state by decoding one element of a field of base
    /// type `T`.
    ///
    /// Returns the element as a Rust primitive if it did not hold its 'invalid'
    /// marker value, and a successor state. Array fields return to this state
    /// until every element is consumed.
    pub fn advance(self, r: T::From) -> (Option<T::Into>, Either<NextAlt, Self>) {
        let value = T::from(r, self.is_little_endian);

        let size = size_of::<T::From>() as u8;

        let successor = if self.bytes_remaining == size {
            Left(self.progress.next())
        } else {
            Right(Self {
                bytes_remaining: self.bytes_remaining - size,
                ..self
            })
        };

        (value, successor)
    }
}

/// State token to consume field bytes without interpreting them.
#[derive(Debug)]
pub struct Skip {
    progress: Progress,
    bytes_remaining: u8,
}

impl Skip {
    pub(super) fn new(size: u8, progress: Progress) -> Self {
        Self {
            progress,
            bytes_remaining: size,
        }
    }

    /// Transition to another state by consuming a single byte.
    pub fn advance(self, _r: [u8; 1]) -> Either<NextAlt, Self> {
        if self.bytes_remaining == 1 {
            Left(self.progress.next())
        } else {
            Right(Self {
                bytes_remaining: self.bytes_remaining - 1,
                ..self
            })
        }
    }
}

pub trait FieldInner {
    /// The data storing this base type.
    type From;
    /// The primitive corresponding to this base type.
    type Into;

    /// Convert data of this base type to the corresponding primitive, if valid.
    fn from(r: Self::From, is_le: bool) -> Option<Self::Into>;
}

macro_rules! field_inner {
    ($(#[$attr:meta])* $t:ident: $into:ty, invalid $invalid:expr) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $t;

        impl FieldInner for $t {
            type From = [u8; size_of::<$into>()];
            type Into = $into;

            fn from(r: Self::From, is_le: bool) -> Option<Self::Into> {
                let x = if is_le {
                    <$into>::from_le_bytes(r)
                } else {
                    <$into>::from_be_bytes(r)
                };

                let is_invalid: fn($into) -> bool = $invalid;
                (!is_invalid(x)).then_some(x)
            }
        }
    };
}

field_inner!(/** `enum`, `uint8`, `byte` */ U8: u8, invalid |x| x == u8::MAX);
field_inner!(/** `uint8z`, `string` */ U8Z: u8, invalid |x| x == 0);
field_inner!(/** `uint16` */ U16: u16, invalid |x| x == u16::MAX);
field_inner!(/** `uint16z` */ U16Z: u16, invalid |x| x == 0);
field_inner!(/** `uint32` */ U32: u32, invalid |x| x == u32::MAX);
field_inner!(/** `uint32z` */ U32Z: u32, invalid |x| x == 0);
field_inner!(/** `uint64` */ U64: u64, invalid |x| x == u64::MAX);
field_inner!(/** `uint64z` */ U64Z: u64, invalid |x| x == 0);

field_inner!(/** `sint8` */ I8: i8, invalid |x| x == i8::MAX);
field_inner!(/** `sint16` */ I16: i16, invalid |x| x == i16::MAX);
field_inner!(/** `sint32` */ I32: i32, invalid |x| x == i32::MAX);
field_inner!(/** `sint64` */ I64: i64, invalid |x| x == i64::MAX);

field_inner!(/** `float32` */ F32: f32, invalid |x| x.to_bits() == u32::MAX);
field_inner!(/** `float64` */ F64: f64, invalid |x| x.to_bits() == u64::MAX);

/// A state token for a field of any base type.
#[derive(Debug)]
pub enum AnyField {
    U8(Field<U8>),
    U8Z(Field<U8Z>),
    U16(Field<U16>),
    U16Z(Field<U16Z>),
    U32(Field<U32>),
    U32Z(Field<U32Z>),
    U64(Field<U64>),
    U64Z(Field<U64Z>),

    I8(Field<I8>),
    I16(Field<I16>),
    I32(Field<I32>),
    I64(Field<I64>),

    F32(Field<F32>),
    F64(Field<F64>),

    /// Unknown base type, or a size that is not a whole number of elements.
    Skip(Skip),
}

impl AnyField {
    /// Select the state for a non-empty field of a base type.
    pub(super) fn new(base_type: u8, size: u8, is_little_endian: bool, progress: Progress) -> Self {
        fn field<T: FieldInner>(
            size: u8,
            is_little_endian: bool,
            progress: Progress,
            wrap: fn(Field<T>) -> AnyField,
        ) -> AnyField {
            if usize::from(size) % size_of::<T::From>() == 0 {
                wrap(Field {
                    progress,
                    bytes_remaining: size,
                    is_little_endian,
                    _phantom: PhantomData,
                })
            } else {
                AnyField::Skip(Skip::new(size, progress))
            }
        }

        let (s, le, p) = (size, is_little_endian, progress);

        // The low five bits number the base type; the high bit marks
        // endian-sensitive types.
        match base_type & 0x1F {
            0x00 | 0x02 | 0x0D => field(s, le, p, Self::U8),
            0x01 => field(s, le, p, Self::I8),
            0x03 => field(s, le, p, Self::I16),
            0x04 => field(s, le, p, Self::U16),
            0x05 => field(s, le, p, Self::I32),
            0x06 => field(s, le, p, Self::U32),
            0x07 | 0x0A => field(s, le, p, Self::U8Z),
            0x08 => field(s, le, p, Self::F32),
            0x09 => field(s, le, p, Self::F64),
            0x0B => field(s, le, p, Self::U16Z),
            0x0C => field(s, le, p, Self::U32Z),
            0x0E => field(s, le, p, Self::I64),
            0x0F => field(s, le, p, Self::U64),
            0x10 => field(s, le, p, Self::U64Z),
            _ => Self::Skip(Skip::new(size, progress)),
        }
    }
}

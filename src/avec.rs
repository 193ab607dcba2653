//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding messages from files
//! and data slices, publishing to the [`FromMessages`] and [`FromMessage`]
//! traits.
//!
//! In many cases (when messages are of a known shape), these traits can be
//! derived. See the [`FromMessages`](macro@FromMessages) and
//! [`FromMessage`](macro@FromMessage) macros for details.

pub mod reader;
pub mod slice;
mod walk;

pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use thiserror::Error;

use crate::sans::header::DocumentHeaderError;

/// Errors occurring while decoding a document.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(std::io::Error),
    /// Unexpectedly reached the end of the input.
    #[error("Unexpectedly reached the end of the input.")]
    EndOfInput,
    /// Calculated and found CRC values do not match.
    #[error("Calculated ({calculated}) and found ({found}) CRC values do not match.")]
    CyclicRedundancyCheck { found: u16, calculated: u16 },
    /// Incorrect file header.
    #[error("Incorrect file header: {0}")]
    Header(#[from] DocumentHeaderError),
    /// A data message refers to a local message with no definition.
    #[error("Data message refers to undefined local message {0}.")]
    UndefinedMessage(u8),
    /// The last message crossed the end of the record section.
    #[error("Messages overran the record section of {size} bytes.")]
    Overrun { size: u32 },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::EndOfInput,
            _ => Self::Io(err),
        }
    }
}

/// Derive [`FromMessages`] for a struct holding a collection of messages.
///
/// # Example
///
/// To collect a single message, add the `message(N)` attribute to an
/// `Option<T>` struct field, where `N` is the global message number and `T` is
/// a type implementing [`FromMessage`] and [`Default`]. Additional messages
/// received for the same number will overwrite earlier ones. To collect every
/// occurrence of a message, apply the attribute to a `Vec<T>` instead.
///
/// ```
/// #[derive(Debug, Default, FromMessages)]
/// struct ActivityMessages {
///     #[message(0)]
///     file_id: Option<FileId>,
///     #[message(20)]
///     records: Vec<Record>,
/// }
/// ```
pub use garmr_fit_derive::FromMessages;

/// Produce message receivers for a document.
///
/// See the [`FromMessages`](macro@FromMessages) derive macro for an automatic
/// implementation of this trait.
pub trait FromMessages {
    /// Retrieve a receiver for a message, if one exists.
    fn add_message(&mut self, global: u16) -> Option<&mut dyn FromMessage>;
}

/// Derive [`FromMessage`] for a struct representing a single message.
///
/// # Examples
///
/// To receive a single value for a message field, add the `field(N)`
/// attribute to an `Option<T>` struct field, where `N` is the field number and
/// `T` is a Rust primitive. Values of narrower primitives are widened, so an
/// `Option<u32>` also receives fields encoded as `u8` or `u16`. Additional
/// values received for the same field replace earlier ones.
///
/// Timestamps from compressed record headers are resolved by the decoder and
/// delivered as field 253, like full timestamps.
///
/// ```
/// #[derive(Debug, Default, FromMessage)]
/// struct Record {
///     #[field(253)]
///     timestamp: Option<u32>,
///     #[field(0)]
///     position_lat: Option<i32>,
///     #[field(1)]
///     position_long: Option<i32>,
/// }
/// ```
///
/// To receive arrays or arbitrary types, supply an accumulator closure. Since
/// the element type cannot be inferred, the second argument must be typed,
/// and it receives exactly that primitive.
///
/// ```
/// #[derive(Debug, Default, FromMessage)]
/// struct FileId {
///     #[field(8, |v, c: u8| v.push(c))]
///     product_name: Vec<u8>,
/// }
/// ```
pub use garmr_fit_derive::FromMessage;

/// Receive field values for a message.
///
/// Before publishing, fields are converted to their corresponding Rust
/// primitive, and those holding the 'invalid' marker value are skipped. Array
/// types (including strings) are published item-by-item, calling the receiver
/// repeatedly.
///
/// The default implementation of each method ignores received values.
#[allow(unused_variables)]
pub trait FromMessage {
    /// Add a `u8` for a field to the message.
    ///
    /// This method receives values for fields represented by a, or an array of,
    /// unsigned bytes. This includes the base types `enum`, `string`, and
    /// `byte`.
    fn add_u8(&mut self, field: u8, value: u8) {}
    /// Add a `u16` for a field to the message.
    fn add_u16(&mut self, field: u8, value: u16) {}
    /// Add a `u32` for a field to the message.
    fn add_u32(&mut self, field: u8, value: u32) {}
    /// Add a `u64` for a field to the message.
    fn add_u64(&mut self, field: u8, value: u64) {}

    /// Add a `i8` for a field to the message.
    fn add_i8(&mut self, field: u8, value: i8) {}
    /// Add a `i16` for a field to the message.
    fn add_i16(&mut self, field: u8, value: i16) {}
    /// Add a `i32` for a field to the message.
    fn add_i32(&mut self, field: u8, value: i32) {}
    /// Add a `i64` for a field to the message.
    fn add_i64(&mut self, field: u8, value: i64) {}

    /// Add a `f32` for a field to the message.
    fn add_f32(&mut self, field: u8, value: f32) {}
    /// Add a `f64` for a field to the message.
    fn add_f64(&mut self, field: u8, value: f64) {}
}

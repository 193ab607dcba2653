//! States processing definition records.
//!
//! A definition record is laid out as a fixed message header, one entry per
//! field, then, when the record header announces them, a developer field count
//! followed by one entry per developer field.

use either::Either::{self, Left, Right};
use zerocopy::FromBytes;

use super::{
    data::{AnyField, Skip},
    header::{RecordHeader, has_developer_fields},
};

#[repr(C, packed)]
#[derive(Debug, FromBytes)]
struct DefinitionMessage {
    _reserved: u8,
    architecture: u8,
    global_message: [u8; 2],
    fields: u8,
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct FieldEntry {
    number: u8,
    size: u8,
    base_type: u8,
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct DeveloperFieldEntry {
    number: u8,
    size: u8,
    developer_index: u8,
}

/// State token to perform a first-pass decoding of a definition message.
#[derive(Debug)]
pub struct Definition {
    pub(super) developer: bool,
}

impl Definition {
    /// Transition to another state by performing a first-pass decoding of a
    /// definition message.
    pub fn advance(self, r: [u8; 5]) -> Next {
        let DefinitionMessage { fields, .. } = zerocopy::transmute!(r);
        Next::after_field(fields, self.developer)
    }
}

/// Successor of a first-pass definition state.
#[derive(Debug)]
pub enum Next {
    Field(DefinitionField),
    DeveloperCount(DeveloperCount),
    DeveloperField(DeveloperField),
    Header(RecordHeader),
}

impl Next {
    fn after_field(remaining: u8, developer: bool) -> Self {
        if remaining != 0 {
            Self::Field(DefinitionField {
                remaining,
                developer,
            })
        } else if developer {
            Self::DeveloperCount(DeveloperCount(()))
        } else {
            Self::Header(RecordHeader(()))
        }
    }

    fn after_developer_field(remaining: u8) -> Self {
        if remaining != 0 {
            Self::DeveloperField(DeveloperField { remaining })
        } else {
            Self::Header(RecordHeader(()))
        }
    }
}

/// State token to perform a first-pass decoding of a definition field.
#[derive(Debug)]
pub struct DefinitionField {
    remaining: u8,
    developer: bool,
}

impl DefinitionField {
    pub fn advance(self, _r: [u8; 3]) -> Next {
        Next::after_field(self.remaining - 1, self.developer)
    }
}

/// State token to perform a first-pass decoding of a developer field count.
#[derive(Debug)]
pub struct DeveloperCount(());

impl DeveloperCount {
    pub fn advance(self, r: [u8; 1]) -> Next {
        Next::after_developer_field(r[0])
    }
}

/// State token to perform a first-pass decoding of a developer field.
#[derive(Debug)]
pub struct DeveloperField {
    remaining: u8,
}

impl DeveloperField {
    pub fn advance(self, _r: [u8; 3]) -> Next {
        Next::after_developer_field(self.remaining - 1)
    }
}

/// State token to re-read the header of a definition record.
///
/// **This method expects bytes not read from the tip of the cursor.** See the
/// architecture description in the [`crate::sans`] module documentation for
/// clarification.
#[derive(Debug)]
pub struct DefinitionHeaderAlt(pub(super) ());

impl DefinitionHeaderAlt {
    /// Transition to another state by re-reading a definition record header.
    pub fn advance(self, r: [u8; 1]) -> DefinitionAlt {
        DefinitionAlt {
            developer: has_developer_fields(r[0]),
        }
    }
}

/// State token to decode a definition message.
#[derive(Debug)]
pub struct DefinitionAlt {
    developer: bool,
}

impl DefinitionAlt {
    /// Transition to another state by decoding a definition message.
    ///
    /// **This method expects bytes not read from the tip of the cursor.**
    ///
    /// Returns the global message number, and a successor state token.
    pub fn advance(self, r: [u8; 5]) -> (u16, NextAlt) {
        let DefinitionMessage {
            architecture,
            global_message,
            fields,
            ..
        } = zerocopy::transmute!(r);

        let is_little_endian = architecture == 0;
        let global_message = if is_little_endian {
            u16::from_le_bytes(global_message)
        } else {
            u16::from_be_bytes(global_message)
        };

        let progress = Progress::Fields {
            remaining: fields,
            developer: self.developer,
            is_little_endian,
        };

        (global_message, progress.next())
    }
}

/// Position within the second pass over a definition record.
#[derive(Debug, Clone, Copy)]
pub(super) enum Progress {
    Fields {
        remaining: u8,
        developer: bool,
        is_little_endian: bool,
    },
    DeveloperFields {
        remaining: u8,
    },
}

impl Progress {
    /// The state following the field just finished.
    pub(super) fn next(self) -> NextAlt {
        match self {
            Self::Fields {
                remaining: 0,
                developer: true,
                ..
            } => NextAlt::DeveloperCount(DeveloperCountAlt(())),
            Self::Fields { remaining: 0, .. } | Self::DeveloperFields { remaining: 0 } => {
                NextAlt::Header(RecordHeader(()))
            }
            Self::Fields {
                remaining,
                developer,
                is_little_endian,
            } => NextAlt::Field(DefinitionFieldAlt {
                remaining,
                developer,
                is_little_endian,
            }),
            Self::DeveloperFields { remaining } => {
                NextAlt::DeveloperField(DeveloperFieldAlt { remaining })
            }
        }
    }
}

/// Successor of a second-pass definition or data state.
#[derive(Debug)]
pub enum NextAlt {
    Field(DefinitionFieldAlt),
    DeveloperCount(DeveloperCountAlt),
    DeveloperField(DeveloperFieldAlt),
    Header(RecordHeader),
}

/// State token to decode a definition field.
#[derive(Debug)]
pub struct DefinitionFieldAlt {
    remaining: u8,
    developer: bool,
    is_little_endian: bool,
}

impl DefinitionFieldAlt {
    /// Transition to another state by decoding a definition field.
    ///
    /// **This method expects bytes not read from the tip of the cursor.**
    ///
    /// Returns the field number, and either a state token to decode the field
    /// value or, for an empty field, the state that follows it.
    pub fn advance(self, r: [u8; 3]) -> (u8, Either<AnyField, NextAlt>) {
        let FieldEntry {
            number,
            size,
            base_type,
        } = zerocopy::transmute!(r);

        let progress = Progress::Fields {
            remaining: self.remaining - 1,
            developer: self.developer,
            is_little_endian: self.is_little_endian,
        };

        let successor = if size != 0 {
            Left(AnyField::new(base_type, size, self.is_little_endian, progress))
        } else {
            Right(progress.next())
        };

        (number, successor)
    }
}

/// State token to decode a developer field count.
#[derive(Debug)]
pub struct DeveloperCountAlt(());

impl DeveloperCountAlt {
    /// **This method expects bytes not read from the tip of the cursor.**
    pub fn advance(self, r: [u8; 1]) -> NextAlt {
        Progress::DeveloperFields { remaining: r[0] }.next()
    }
}

/// Identity of a developer field within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeveloperFieldKey {
    /// Index of the developer data identifying the application.
    pub developer_index: u8,
    /// Field number assigned by the application.
    pub number: u8,
}

/// State token to decode a developer field definition.
#[derive(Debug)]
pub struct DeveloperFieldAlt {
    remaining: u8,
}

impl DeveloperFieldAlt {
    /// Transition to another state by decoding a developer field definition.
    ///
    /// **This method expects bytes not read from the tip of the cursor.**
    ///
    /// Developer field values are not interpreted; the returned [`Skip`] state
    /// consumes them.
    pub fn advance(self, r: [u8; 3]) -> (DeveloperFieldKey, Either<Skip, NextAlt>) {
        let DeveloperFieldEntry {
            number,
            size,
            developer_index,
        } = zerocopy::transmute!(r);

        let progress = Progress::DeveloperFields {
            remaining: self.remaining - 1,
        };

        let successor = if size != 0 {
            Left(Skip::new(size, progress))
        } else {
            Right(progress.next())
        };

        let key = DeveloperFieldKey {
            developer_index,
            number,
        };

        (key, successor)
    }
}

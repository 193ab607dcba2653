//! States processing document and record headers.

use either::Either::{self, Left, Right};
use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::FromBytes;

use super::{
    check::compute_crc,
    definition::{Definition, DefinitionHeaderAlt},
};

/// Highest major protocol version with a known record layout.
const MAX_PROTOCOL_MAJOR: u8 = 2;

/// An error advancing over a document header.
#[derive(Debug, Error)]
pub enum DocumentHeaderError {
    /// Incorrect filetype marker.
    #[error("Incorrect file type marker.")]
    NotFitData,
    /// Unknown header length.
    #[error("Unknown header length ({0}).")]
    UnknownHeaderLength(u8),
    /// Protocol version newer than any known layout.
    #[error("Unsupported protocol version ({major}.{minor}).")]
    UnsupportedProtocol { major: u8, minor: u8 },
    /// Calculated and found header CRC values do not match.
    #[error("Calculated ({calculated}) and found ({found}) header CRC values do not match.")]
    HeaderCheck { found: u16, calculated: u16 },
}

bitfield! {
    struct ProtocolVersion(u8) {
        [0..4] minor: u8,
        [4..8] major: u8,
    }
}

/// State token to decode a document header.
#[derive(Debug)]
pub struct DocumentHeader;

impl DocumentHeader {
    /// Transition to another state by decoding a document header.
    ///
    /// Returns the number of record bytes in this document, and a successor
    /// state token.
    pub fn advance(
        r: [u8; 12],
    ) -> Result<(u32, Either<ExtendedDocumentHeader, RecordHeader>), DocumentHeaderError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct FileHeader {
            header_size: u8,
            protocol_version: u8,
            profile_version: [u8; 2],
            data_size: [u8; 4],
            data_type: [u8; 4],
        }

        let FileHeader {
            header_size,
            protocol_version,
            data_size,
            data_type,
            ..
        } = zerocopy::transmute!(r);

        if &data_type != b".FIT" {
            Err(DocumentHeaderError::NotFitData)?;
        }

        let version = ProtocolVersion(protocol_version);
        if version.major() > MAX_PROTOCOL_MAJOR {
            Err(DocumentHeaderError::UnsupportedProtocol {
                major: version.major(),
                minor: version.minor(),
            })?;
        }

        let successor = match header_size {
            14 => Left(ExtendedDocumentHeader {
                calculated: compute_crc(0, &r),
            }),
            12 => Right(RecordHeader(())),
            _ => Err(DocumentHeaderError::UnknownHeaderLength(header_size))?,
        };

        Ok((u32::from_le_bytes(data_size), successor))
    }
}

/// State token to decode the header CRC of an extended document header.
#[derive(Debug)]
pub struct ExtendedDocumentHeader {
    calculated: u16,
}

impl ExtendedDocumentHeader {
    /// Transition to another state by checking the header CRC.
    ///
    /// A stored value of zero means the encoder skipped the check.
    pub fn advance(self, r: [u8; 2]) -> Result<RecordHeader, DocumentHeaderError> {
        let found = u16::from_le_bytes(r);

        if found != 0 && found != self.calculated {
            Err(DocumentHeaderError::HeaderCheck {
                found,
                calculated: self.calculated,
            })?;
        }

        Ok(RecordHeader(()))
    }
}

bitfield! {
    struct NormalHeader(u8) {
        [0..4] local_message: u8,
        [5] has_developer_fields,
        [6] is_definition,
        [7] is_compressed,
    }
}

bitfield! {
    struct CompressedHeader(u8) {
        [0..5] time_offset: u8,
        [5..7] local_message: u8,
    }
}

/// Whether a definition record header announces developer field definitions.
pub(super) fn has_developer_fields(r: u8) -> bool {
    NormalHeader(r).has_developer_fields()
}

/// State token to decode a record header.
#[derive(Debug)]
pub struct RecordHeader(pub(super) ());

impl RecordHeader {
    /// Transition to another state by decoding a record header.
    ///
    /// Returns the local message number, a successor state token, and for
    /// compressed timestamp headers, the five-bit time offset.
    ///
    /// Data records are decoded against their definition by advancing the
    /// [`DefinitionHeaderAlt`] token over the stored definition record,
    /// starting from its header byte.
    pub fn advance(
        self,
        r: [u8; 1],
    ) -> (u8, Either<Definition, (Option<u8>, DefinitionHeaderAlt)>) {
        let r = r[0];
        let header = NormalHeader(r);

        if header.is_compressed() {
            let header = CompressedHeader(r);
            let successor = Right((Some(header.time_offset()), DefinitionHeaderAlt(())));

            (header.local_message(), successor)
        } else if header.is_definition() {
            let successor = Left(Definition {
                developer: header.has_developer_fields(),
            });

            (header.local_message(), successor)
        } else {
            (header.local_message(), Right((None, DefinitionHeaderAlt(()))))
        }
    }
}

/// Resolve a compressed time offset against the last full timestamp.
///
/// The offset holds the five least significant bits of the timestamp; a value
/// smaller than those of `last` means they rolled over.
pub fn resolve_time_offset(last: u32, offset: u8) -> u32 {
    const MASK: u32 = 0x1F;

    let offset = u32::from(offset) & MASK;
    let base = last & !MASK;

    if offset >= last & MASK {
        base.wrapping_add(offset)
    } else {
        base.wrapping_add(offset).wrapping_add(MASK + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(size: u8, protocol: u8, data_size: u32) -> [u8; 12] {
        let mut r = [0; 12];
        r[0] = size;
        r[1] = protocol;
        r[4..8].copy_from_slice(&data_size.to_le_bytes());
        r[8..12].copy_from_slice(b".FIT");
        r
    }

    #[test]
    fn reads_little_endian_data_size() {
        let (size, successor) = DocumentHeader::advance(header(12, 0x20, 0x0102_0304)).unwrap();
        assert_eq!(size, 0x0102_0304);
        assert!(successor.is_right());
    }

    #[test]
    fn rejects_wrong_marker() {
        let mut r = header(12, 0x10, 0);
        r[8] = b'x';
        assert!(matches!(
            DocumentHeader::advance(r),
            Err(DocumentHeaderError::NotFitData)
        ));
    }

    #[test]
    fn rejects_newer_protocol() {
        assert!(matches!(
            DocumentHeader::advance(header(12, 0x31, 0)),
            Err(DocumentHeaderError::UnsupportedProtocol { major: 3, minor: 1 })
        ));
    }

    #[test]
    fn checks_extended_header_crc() {
        let r = header(14, 0x20, 10);
        let crc = compute_crc(0, &r);

        let (_, successor) = DocumentHeader::advance(r).unwrap();
        assert!(successor.left().unwrap().advance(crc.to_le_bytes()).is_ok());

        let (_, successor) = DocumentHeader::advance(r).unwrap();
        assert!(successor.left().unwrap().advance([0, 0]).is_ok());

        let (_, successor) = DocumentHeader::advance(r).unwrap();
        assert!(matches!(
            successor.left().unwrap().advance((crc ^ 1).to_le_bytes()),
            Err(DocumentHeaderError::HeaderCheck { .. })
        ));
    }

    #[test]
    fn splits_record_headers() {
        let (local, successor) = RecordHeader(()).advance([0b0110_0011]);
        assert_eq!(local, 3);
        assert!(successor.left().unwrap().developer);

        let (local, successor) = RecordHeader(()).advance([0b0000_0101]);
        assert_eq!(local, 5);
        assert_eq!(successor.right().unwrap().0, None);

        let (local, successor) = RecordHeader(()).advance([0b1100_1010]);
        assert_eq!(local, 2);
        assert_eq!(successor.right().unwrap().0, Some(0b01010));
    }

    #[test]
    fn resolves_time_offsets() {
        assert_eq!(resolve_time_offset(100, 6), 102);
        assert_eq!(resolve_time_offset(100, 4), 100);
        assert_eq!(resolve_time_offset(100, 2), 130);
        assert_eq!(resolve_time_offset(0x3F, 0x00), 0x40);
    }
}

//! Slice-based decoder implementation.

use either::Either::{Left, Right};

use crate::sans::{Decoder, check::compute_crc};

use super::{
    Error, FromMessages,
    walk::{Clock, SliceSource, Source, decode_data, decode_definition},
};

/// Decode messages from a slice of a document, publishing to a receiver.
///
/// The document CRC is checked before any message is published.
///
/// This method is also re-exported as `garmr_fit::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl FromMessages) -> Result<(), Error> {
    let mut cursor = SliceSource { r, i: 0 };

    let (size, successor) = Decoder::advance(cursor.take()?)?;

    let mut record_header = match successor {
        Left(state) => state.advance(cursor.take()?)?,
        Right(state) => state,
    };

    let end = cursor.i + size as usize; // Offset to the end of the record section.

    let Some(&[lo, hi]) = r.get(end..end + 2) else {
        Err(Error::EndOfInput)?
    };

    let found = u16::from_le_bytes([lo, hi]);
    let calculated = compute_crc(0, &r[..end]);

    if found != calculated {
        Err(Error::CyclicRedundancyCheck { found, calculated })?;
    }

    // Messages may not read past the record section.
    cursor.r = &r[..end];

    // Offsets of each local message's definition record header.
    let mut definitions: [Option<usize>; 16] = [None; 16];
    let mut clock = Clock::default();

    while cursor.i < end {
        let at = cursor.i;
        let (local, successor) = record_header.advance(cursor.take()?);

        record_header = match successor {
            Left(state) => {
                definitions[usize::from(local)] = Some(at);
                decode_definition(state, &mut cursor)?
            }
            Right((time, state)) => {
                let i = definitions[usize::from(local)].ok_or(Error::UndefinedMessage(local))?;
                let mut d = SliceSource { r: cursor.r, i };
                decode_data(state, time, &mut d, &mut cursor, &mut clock, o)?
            }
        };
    }

    Ok(())
}

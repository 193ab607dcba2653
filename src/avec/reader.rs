//! Reader-based decoder implementation.

use std::io::Read;

use either::Either::{Left, Right};

use crate::sans::{Decoder, check::compute_crc};

use super::{
    Error, FromMessages,
    walk::{Clock, Recording, SliceSource, Source, decode_data, decode_definition},
};

/// Cursor over a reader, counting bytes and accumulating their CRC.
struct ReaderSource<'a, R> {
    r: &'a mut R,
    i: usize,
    crc: u16,
}

impl<R: Read> Source for ReaderSource<'_, R> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut buf = [0; N];
        self.r.read_exact(&mut buf)?;

        self.i += N;
        self.crc = compute_crc(self.crc, &buf);

        Ok(buf)
    }
}

/// Decode messages from a reader of a document, publishing to a receiver.
///
/// Messages are published as they are read; the document CRC is only checked
/// once the record section has been consumed.
///
/// This method is also re-exported as `garmr_fit::avec::decode_reader`.
pub fn decode(r: &mut impl Read, o: &mut impl FromMessages) -> Result<(), Error> {
    let mut source = ReaderSource { r, i: 0, crc: 0 };

    let (size, successor) = Decoder::advance(source.take()?)?;

    let mut record_header = match successor {
        Left(state) => state.advance(source.take()?)?,
        Right(state) => state,
    };

    let end = source.i + size as usize; // Offset to the end of the record section.

    // Copies of each local message's definition record, header byte included.
    let mut definitions: [Option<Vec<u8>>; 16] = Default::default();
    let mut clock = Clock::default();

    while source.i < end {
        let header = source.take()?;
        let (local, successor) = record_header.advance(header);

        record_header = match successor {
            Left(state) => {
                let bytes = definitions[usize::from(local)].insert(header.to_vec());
                let mut recording = Recording {
                    inner: &mut source,
                    bytes,
                };
                decode_definition(state, &mut recording)?
            }
            Right((time, state)) => {
                let Some(r) = definitions[usize::from(local)].as_deref() else {
                    Err(Error::UndefinedMessage(local))?
                };
                let mut d = SliceSource { r, i: 0 };
                decode_data(state, time, &mut d, &mut source, &mut clock, o)?
            }
        };
    }

    if source.i != end {
        Err(Error::Overrun { size })?;
    }

    let calculated = source.crc;

    let mut found = [0; 2];
    source.r.read_exact(&mut found)?;
    let found = u16::from_le_bytes(found);

    if found != calculated {
        Err(Error::CyclicRedundancyCheck { found, calculated })?;
    }

    Ok(())
}

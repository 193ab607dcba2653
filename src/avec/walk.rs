//! Record walking shared by the slice and reader decoders.

use either::Either::{Left, Right};
use tracing::trace;

use crate::{
    profile::TIMESTAMP,
    sans::{
        data::{AnyField, Field, FieldInner, Skip},
        definition::{Definition, DefinitionHeaderAlt, Next, NextAlt},
        header::{RecordHeader, resolve_time_offset},
    },
};

use super::{Error, FromMessage, FromMessages};

/// A cursor handing out exact numbers of bytes.
pub(super) trait Source {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error>;
}

/// Cursor over a slice, starting at an offset.
pub(super) struct SliceSource<'a> {
    pub(super) r: &'a [u8],
    pub(super) i: usize,
}

impl Source for SliceSource<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let s = self.i;
        let bytes = self.r.get(s..s + N).ok_or(Error::EndOfInput)?;
        self.i += N;

        let mut buf = [0; N];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }
}

/// Cursor copying every byte it hands out into a buffer.
pub(super) struct Recording<'a, S> {
    pub(super) inner: &'a mut S,
    pub(super) bytes: &'a mut Vec<u8>,
}

impl<S: Source> Source for Recording<'_, S> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let buf = self.inner.take::<N>()?;
        self.bytes.extend_from_slice(&buf);
        Ok(buf)
    }
}

/// The last full timestamp seen in the document.
#[derive(Debug, Default)]
pub(super) struct Clock {
    last: Option<u32>,
}

impl Clock {
    fn observe(&mut self, timestamp: u32) {
        self.last = Some(timestamp);
    }

    fn resolve(&mut self, offset: u8) -> Option<u32> {
        let timestamp = resolve_time_offset(self.last?, offset);
        self.last = Some(timestamp);
        Some(timestamp)
    }
}

/// Walk over a definition record, returning the next record header.
pub(super) fn decode_definition(
    state: Definition,
    r: &mut impl Source,
) -> Result<RecordHeader, Error> {
    let mut next = state.advance(r.take()?);

    loop {
        next = match next {
            Next::Field(state) => state.advance(r.take()?),
            Next::DeveloperCount(state) => state.advance(r.take()?),
            Next::DeveloperField(state) => state.advance(r.take()?),
            Next::Header(state) => return Ok(state),
        };
    }
}

/// Decode a data record from `r`, guided by its definition record in `d`.
pub(super) fn decode_data(
    state: DefinitionHeaderAlt,
    time: Option<u8>,
    d: &mut impl Source,
    r: &mut impl Source,
    clock: &mut Clock,
    o: &mut impl FromMessages,
) -> Result<RecordHeader, Error> {
    let (global, mut next) = state.advance(d.take()?).advance(d.take()?);

    // Shadow the document receiver with that of a single message.
    let mut o = o.add_message(global);

    if let Some(offset) = time {
        match clock.resolve(offset) {
            Some(timestamp) => {
                if let Some(o) = o.as_deref_mut() {
                    o.add_u32(TIMESTAMP, timestamp);
                }
            }
            None => trace!(global, offset, "compressed timestamp precedes any full timestamp"),
        }
    }

    loop {
        next = match next {
            NextAlt::Field(state) => match state.advance(d.take()?) {
                (f, Left(field)) => decode_any_field(field, f, r, clock, o.as_deref_mut())?,
                (_, Right(next)) => next,
            },
            NextAlt::DeveloperCount(state) => state.advance(d.take()?),
            NextAlt::DeveloperField(state) => {
                let (key, successor) = state.advance(d.take()?);
                trace!(
                    global,
                    developer = key.developer_index,
                    field = key.number,
                    "skipping developer field"
                );

                match successor {
                    Left(state) => skip(state, r)?,
                    Right(next) => next,
                }
            }
            NextAlt::Header(state) => return Ok(state),
        };
    }
}

fn decode_any_field<'o>(
    field: AnyField,
    f: u8,
    r: &mut impl Source,
    clock: &mut Clock,
    o: Option<&mut (dyn FromMessage + 'o)>,
) -> Result<NextAlt, Error> {
    Ok(match field {
        AnyField::U8(s) => decode_field(s, r, f, o, FromMessage::add_u8)?.1,
        AnyField::U8Z(s) => decode_field(s, r, f, o, FromMessage::add_u8)?.1,
        AnyField::U16(s) => decode_field(s, r, f, o, FromMessage::add_u16)?.1,
        AnyField::U16Z(s) => decode_field(s, r, f, o, FromMessage::add_u16)?.1,
        AnyField::U32(s) => {
            let (value, next) = decode_field(s, r, f, o, FromMessage::add_u32)?;
            if let (TIMESTAMP, Some(timestamp)) = (f, value) {
                clock.observe(timestamp);
            }
            next
        }
        AnyField::U32Z(s) => decode_field(s, r, f, o, FromMessage::add_u32)?.1,
        AnyField::U64(s) => decode_field(s, r, f, o, FromMessage::add_u64)?.1,
        AnyField::U64Z(s) => decode_field(s, r, f, o, FromMessage::add_u64)?.1,

        AnyField::I8(s) => decode_field(s, r, f, o, FromMessage::add_i8)?.1,
        AnyField::I16(s) => decode_field(s, r, f, o, FromMessage::add_i16)?.1,
        AnyField::I32(s) => decode_field(s, r, f, o, FromMessage::add_i32)?.1,
        AnyField::I64(s) => decode_field(s, r, f, o, FromMessage::add_i64)?.1,

        AnyField::F32(s) => decode_field(s, r, f, o, FromMessage::add_f32)?.1,
        AnyField::F64(s) => decode_field(s, r, f, o, FromMessage::add_f64)?.1,

        AnyField::Skip(s) => skip(s, r)?,
    })
}

/// Decode every element of a field, publishing valid ones.
///
/// Returns the last valid element, and the state following the field.
fn decode_field<T, O, const N: usize>(
    mut state: Field<T>,
    r: &mut impl Source,
    f: u8,
    mut o: Option<&mut O>,
    add: fn(&mut O, u8, T::Into),
) -> Result<(Option<T::Into>, NextAlt), Error>
where
    T: FieldInner<From = [u8; N]>,
    T::Into: Copy,
    O: FromMessage + ?Sized,
{
    let mut last = None;

    loop {
        let (value, successor) = state.advance(r.take()?);

        if let Some(value) = value {
            if let Some(o) = o.as_deref_mut() {
                add(o, f, value);
            }
            last = Some(value);
        }

        state = match successor {
            Left(next) => return Ok((last, next)),
            Right(state) => state,
        }
    }
}

fn skip(mut state: Skip, r: &mut impl Source) -> Result<NextAlt, Error> {
    loop {
        state = match state.advance(r.take()?) {
            Left(next) => return Ok(next),
            Right(state) => state,
        }
    }
}

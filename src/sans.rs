//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals. See [`crate::avec`] for implementations covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a small, non-copy token. Once enough bytes
//! are ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any extracted
//! data.
//!
//! When decoding a data record, the finite-state machine performs a second,
//! interwoven pass over the definition record, starting at the definition's
//! record header byte. The bytes used to advance a sequence of these
//! `Alt`-suffixed definition states must match those used to advance through
//! their first-pass counterparts.
//!
//! Developer fields are described inside definition records and their values
//! are consumed by [`data::Skip`] states without being interpreted.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed. Some areas of the decoding process are not represented in the
//! finite-state machine and must be carefully written:
//!
//! - Reading bytes from the correct place in the document, including buffering
//! or seeking as necessary.
//!
//! - Ending decoding once the specified number of document bytes have been
//! read.
//!
//! - Applying cyclic redundancy checks over the document. A helper function is
//! provided in the [`check`] module.
//!
//! - Tracking the last full timestamp, against which compressed timestamp
//! headers are resolved with [`header::resolve_time_offset`].

pub mod check;
pub mod data;
pub mod definition;
pub mod header;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::DocumentHeader;

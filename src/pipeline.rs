//! Decoding of whole activity documents.
//!
//! Like the decoder's states, each stage is a token consumed by its
//! transition:
//!
//! ```text
//! Opened -> Decoded -> Normalized -> ZonesComputed -> Done
//!              \_______________________________________/
//!                          (no session)
//! ```
//!
//! Failures are the `Err` of opening or decoding. Most callers want one of
//! [`decode_activity`], [`decode_activity_bytes`] or [`decode_activity_reader`],
//! which run every stage.

use std::{
    borrow::Cow,
    fs,
    io::{self, Read},
    path::Path,
};

use either::Either::{self, Left, Right};
use thiserror::Error;
use tracing::debug;

use crate::{
    activity::{Activity, ActivitySummary, LapSummary, RecordSample},
    avec,
    messages::ActivityMessages,
    normalize,
    zones::compute_hr_zones,
};

/// Errors occurring while decoding an activity.
#[derive(Debug, Error)]
pub enum Error {
    /// The document could not be opened or read.
    #[error("Unreadable input: {0}")]
    UnreadableInput(io::Error),
    /// The document is not a well-formed FIT document.
    #[error("Malformed document: {0}")]
    MalformedFormat(avec::Error),
}

impl From<avec::Error> for Error {
    fn from(err: avec::Error) -> Self {
        match err {
            avec::Error::Io(err) => Self::UnreadableInput(err),
            err => Self::MalformedFormat(err),
        }
    }
}

/// A document held in memory, not yet decoded.
#[derive(Debug)]
pub struct Opened<'a> {
    bytes: Cow<'a, [u8]>,
}

impl Opened<'static> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let bytes = fs::read(path).map_err(Error::UnreadableInput)?;
        Ok(Self {
            bytes: Cow::Owned(bytes),
        })
    }
}

impl<'a> Opened<'a> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Cow::Borrowed(bytes),
        }
    }

    /// Decode the document's messages, checking its integrity first.
    pub fn decode(self) -> Result<Decoded, Error> {
        let mut messages = ActivityMessages::default();
        avec::decode_slice(&self.bytes, &mut messages)?;

        Ok(Decoded::new(messages))
    }
}

/// The raw messages of a document.
#[derive(Debug)]
pub struct Decoded {
    messages: ActivityMessages,
}

impl Decoded {
    fn new(messages: ActivityMessages) -> Self {
        debug!(
            sessions = messages.sessions.len(),
            laps = messages.laps.len(),
            records = messages.records.len(),
            "decoded document"
        );

        Self { messages }
    }

    /// Decode the messages of a document as it is read.
    pub fn from_reader(r: &mut impl Read) -> Result<Self, Error> {
        let mut messages = ActivityMessages::default();
        avec::decode_reader(r, &mut messages)?;

        Ok(Self::new(messages))
    }

    pub fn messages(&self) -> &ActivityMessages {
        &self.messages
    }

    /// Convert the first session, its laps and records to engineering units.
    ///
    /// A document without a session holds no activity.
    pub fn normalize(self) -> Either<Normalized, Done> {
        let ActivityMessages {
            file_id,
            sessions,
            laps,
            records,
        } = self.messages;

        let Some(session) = sessions.first() else {
            debug!("document holds no session");
            return Right(Done { activity: None });
        };

        if sessions.len() > 1 {
            debug!(sessions = sessions.len(), "using the first session only");
        }

        let start = normalize::start_time(session, file_id.as_ref());

        Left(Normalized {
            summary: normalize::summary(session, file_id.as_ref()),
            records: normalize::samples(&records, start),
            laps: normalize::laps(&laps, start),
        })
    }
}

/// A summary, records and laps in engineering units.
#[derive(Debug)]
pub struct Normalized {
    summary: ActivitySummary,
    records: Vec<RecordSample>,
    laps: Vec<LapSummary>,
}

impl Normalized {
    pub fn summary(&self) -> &ActivitySummary {
        &self.summary
    }

    pub fn records(&self) -> &[RecordSample] {
        &self.records
    }

    /// Accumulate heart-rate zone times against the session's maximum.
    pub fn compute_zones(self) -> ZonesComputed {
        let Self {
            summary,
            records,
            laps,
        } = self;

        let zones = compute_hr_zones(
            records.iter().map(RecordSample::heart_rate_sample),
            summary.max_hr,
        );
        debug!(zones = zones.len(), max_hr = summary.max_hr, "computed zones");

        ZonesComputed {
            activity: Activity {
                summary,
                records,
                laps,
                zones,
            },
        }
    }
}

/// A complete activity.
#[derive(Debug)]
pub struct ZonesComputed {
    activity: Activity,
}

impl ZonesComputed {
    pub fn finish(self) -> Done {
        Done {
            activity: Some(self.activity),
        }
    }
}

/// The outcome of a successful decode.
#[derive(Debug)]
pub struct Done {
    activity: Option<Activity>,
}

impl Done {
    pub fn into_activity(self) -> Option<Activity> {
        self.activity
    }
}

fn finish(decoded: Decoded) -> Option<Activity> {
    let done = match decoded.normalize() {
        Left(normalized) => normalized.compute_zones().finish(),
        Right(done) => done,
    };

    done.into_activity()
}

/// Decode the activity in a file.
///
/// Returns `Ok(None)` for a well-formed document without a session.
pub fn decode_activity(path: impl AsRef<Path>) -> Result<Option<Activity>, Error> {
    let path = path.as_ref();
    debug!(path = %path.display(), "decoding activity");

    Ok(finish(Opened::from_path(path)?.decode()?))
}

/// Decode the activity in a document held in memory.
pub fn decode_activity_bytes(bytes: &[u8]) -> Result<Option<Activity>, Error> {
    Ok(finish(Opened::from_bytes(bytes).decode()?))
}

/// Decode the activity in a document as it is read.
///
/// Messages are decoded before the document's integrity is known, but an
/// activity is only returned once it has been checked.
pub fn decode_activity_reader(mut r: impl Read) -> Result<Option<Activity>, Error> {
    Ok(finish(Decoded::from_reader(&mut r)?))
}

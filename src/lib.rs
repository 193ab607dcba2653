//! Decoding and derived metrics for Garmin's Flexible and Interoperable Data
//! Transfer activity files.
//!
//! Most users should begin with [`decode_activity`], which reads a document,
//! converts its first session, laps and records to engineering units, and
//! accumulates the time spent in each heart-rate zone. Zones can also be
//! recomputed from a stored series with [`compute_hr_zones`].
//!
//! The layers beneath are public too. The [`avec`] module decodes messages
//! into types deriving [`FromMessages`](avec::FromMessages), and the [`sans`]
//! module exposes the underlying finite-state machine.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `cli`: build the `garmr-fit` command-line tool (default).

extern crate self as garmr_fit;

pub mod activity;
pub mod avec;
pub mod messages;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod sans;
pub mod zones;

pub use activity::{Activity, ActivitySummary, HrZoneTime, LapSummary, Position, RecordSample};
pub use pipeline::{Error, decode_activity, decode_activity_bytes, decode_activity_reader};
pub use zones::compute_hr_zones;

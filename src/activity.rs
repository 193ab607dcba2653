//! Normalized outputs of decoding one activity document.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything extracted from one activity document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub summary: ActivitySummary,
    pub records: Vec<RecordSample>,
    pub laps: Vec<LapSummary>,
    pub zones: Vec<HrZoneTime>,
}

/// Per-activity metadata and aggregates.
///
/// Heart rates of 0 mean the device did not measure them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    /// Start time in RFC 3339, stable across re-imports of the same activity.
    pub fit_uid: String,
    pub start_time: DateTime<Utc>,
    pub sport: String,
    pub sub_sport: String,
    /// Timer time, excluding pauses.
    pub duration_s: u32,
    /// Wall-clock time, including pauses.
    pub elapsed_s: u32,
    pub distance_m: u32,
    pub avg_hr: u8,
    pub max_hr: u8,
    pub avg_speed_mps: f64,
    pub calories: u32,
    pub ascent_m: f64,
    pub descent_m: f64,
    pub device_vendor: Option<String>,
    pub device_model: Option<String>,
    pub aerobic_te: Option<f64>,
    pub anaerobic_te: Option<f64>,
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

/// One telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSample {
    /// Seconds from the activity start, non-decreasing across a sequence.
    pub offset_s: i64,
    pub position: Option<Position>,
    pub elevation_m: Option<f64>,
    pub heart_rate: Option<u8>,
    pub cadence: Option<u8>,
    pub temperature_c: Option<i8>,
    pub power_w: Option<u16>,
    pub speed_mps: Option<f64>,
}

impl RecordSample {
    /// The sample as consumed by [`crate::zones::compute_hr_zones`].
    pub fn heart_rate_sample(&self) -> (i64, Option<u8>) {
        (self.offset_s, self.heart_rate)
    }
}

/// One device-recorded lap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapSummary {
    pub index: u32,
    pub start_offset_s: i64,
    pub duration_s: u32,
    pub distance_m: u32,
    pub avg_hr: u8,
    pub max_hr: u8,
    pub avg_speed_mps: f64,
}

/// Time spent in one heart-rate zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HrZoneTime {
    /// Zone number, from 1 to 5.
    pub zone: u8,
    pub seconds: u32,
}

//! Conversion of raw message fields to engineering units.
//!
//! Each scalar conversion decides which raw values mean "absent". Integer
//! outputs truncate toward zero.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    activity::{ActivitySummary, LapSummary, Position, RecordSample},
    messages::{FileId, Lap, Record, Session},
    profile::{self, FIT_EPOCH},
};

/// Heart rate written by devices when no reading was taken.
pub const HEART_RATE_INVALID: u8 = u8::MAX;

/// Training effect written by devices when no score is available.
const TRAINING_EFFECT_INVALID: u8 = u8::MAX;

const SEMICIRCLES_TO_DEGREES: f64 = 180.0 / (1u64 << 31) as f64;

/// Milliseconds to whole seconds.
pub fn duration_s(raw: u32) -> u32 {
    raw / 1000
}

/// Centimeters to whole meters.
pub fn distance_m(raw: u32) -> u32 {
    raw / 100
}

/// Millimeters per second to meters per second.
pub fn speed_mps(raw: u32) -> f64 {
    f64::from(raw) / 1000.0
}

/// Speed of a single sample, where zero means no reading.
pub fn sample_speed_mps(raw: u32) -> Option<f64> {
    (raw != 0).then(|| speed_mps(raw))
}

pub fn heart_rate(raw: u8) -> Option<u8> {
    (raw != HEART_RATE_INVALID).then_some(raw)
}

/// Semicircle coordinates to a position, if both axes are set and in bounds.
pub fn position(lat: i32, lon: i32) -> Option<Position> {
    if lat == 0 || lon == 0 {
        return None;
    }

    let lat_deg = f64::from(lat) * SEMICIRCLES_TO_DEGREES;
    let lon_deg = f64::from(lon) * SEMICIRCLES_TO_DEGREES;

    ((-90.0..=90.0).contains(&lat_deg) && (-180.0..=180.0).contains(&lon_deg))
        .then_some(Position { lat_deg, lon_deg })
}

/// Altitude with scale 5 and offset 500 m, where zero means no reading.
pub fn elevation_m(raw: u32) -> Option<f64> {
    (raw != 0).then(|| f64::from(raw) / 5.0 - 500.0)
}

pub fn cadence(raw: u8) -> Option<u8> {
    (raw != 0).then_some(raw)
}

pub fn power_w(raw: u16) -> Option<u16> {
    (raw != 0).then_some(raw)
}

pub fn temperature_c(raw: i8) -> Option<i8> {
    (raw != 0).then_some(raw)
}

/// Tenths to a score from 0.0 to 5.0. Zero is "not reported", not a score.
pub fn training_effect(raw: u8) -> Option<f64> {
    (raw != 0 && raw != TRAINING_EFFECT_INVALID).then(|| f64::from(raw) / 10.0)
}

/// A FIT `date_time` as UTC.
pub fn timestamp(raw: u32) -> DateTime<Utc> {
    DateTime::from_timestamp(FIT_EPOCH + i64::from(raw), 0).unwrap_or_default()
}

/// Raw start time of a session, falling back to the document creation time.
pub fn start_time(session: &Session, file_id: Option<&FileId>) -> u32 {
    session
        .start_time
        .or_else(|| file_id.and_then(|f| f.time_created))
        .unwrap_or(0)
}

pub fn summary(session: &Session, file_id: Option<&FileId>) -> ActivitySummary {
    let start_time = timestamp(start_time(session, file_id));

    let device_model = file_id.and_then(|f| {
        f.product_name()
            .map(str::to_owned)
            .or_else(|| f.product.map(|p| p.to_string()))
    });

    ActivitySummary {
        fit_uid: start_time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        start_time,
        sport: profile::sport_name(session.sport),
        sub_sport: profile::sub_sport_name(session.sub_sport),
        duration_s: session.total_timer_time.map_or(0, duration_s),
        elapsed_s: session.total_elapsed_time.map_or(0, duration_s),
        distance_m: session.total_distance.map_or(0, distance_m),
        avg_hr: session.avg_heart_rate.and_then(heart_rate).unwrap_or(0),
        max_hr: session.max_heart_rate.and_then(heart_rate).unwrap_or(0),
        avg_speed_mps: session
            .avg_speed
            .or(session.enhanced_avg_speed)
            .map_or(0.0, speed_mps),
        calories: session.total_calories.unwrap_or(0),
        ascent_m: session.total_ascent.map_or(0.0, f64::from),
        descent_m: session.total_descent.map_or(0.0, f64::from),
        device_vendor: file_id
            .and_then(|f| f.manufacturer)
            .map(profile::manufacturer_name),
        device_model,
        aerobic_te: session.total_training_effect.and_then(training_effect),
        anaerobic_te: session
            .total_anaerobic_training_effect
            .and_then(training_effect),
    }
}

pub fn sample(record: &Record, offset_s: i64) -> RecordSample {
    RecordSample {
        offset_s,
        position: record
            .position_lat
            .zip(record.position_long)
            .and_then(|(lat, lon)| position(lat, lon)),
        elevation_m: record
            .altitude
            .or(record.enhanced_altitude)
            .and_then(elevation_m),
        heart_rate: record
            .heart_rate
            .and_then(heart_rate)
            .filter(|&hr| hr != 0),
        cadence: record.cadence.and_then(cadence),
        temperature_c: record.temperature.and_then(temperature_c),
        power_w: record.power.and_then(power_w),
        speed_mps: record
            .speed
            .or(record.enhanced_speed)
            .and_then(sample_speed_mps),
    }
}

/// Normalize records against the raw session start time.
///
/// Offsets never decrease: a record stamped earlier than its predecessor, or
/// not stamped at all, takes the predecessor's offset.
pub fn samples(records: &[Record], start: u32) -> Vec<RecordSample> {
    let mut previous: Option<i64> = None;

    records
        .iter()
        .map(|record| {
            let stamped = record
                .timestamp
                .map(|t| i64::from(t) - i64::from(start));

            let offset_s = match (stamped, previous) {
                (Some(offset), Some(previous)) => offset.max(previous),
                (Some(offset), None) => offset,
                (None, previous) => previous.unwrap_or(0),
            };

            previous = Some(offset_s);
            sample(record, offset_s)
        })
        .collect()
}

/// Normalize laps against the raw session start time.
pub fn laps(laps: &[Lap], start: u32) -> Vec<LapSummary> {
    laps.iter()
        .zip(0..)
        .map(|(lap, index)| LapSummary {
            index,
            start_offset_s: lap
                .start_time
                .map_or(0, |t| i64::from(t) - i64::from(start)),
            duration_s: lap.total_timer_time.map_or(0, duration_s),
            distance_m: lap.total_distance.map_or(0, distance_m),
            avg_hr: lap.avg_heart_rate.and_then(heart_rate).unwrap_or(0),
            max_hr: lap.max_heart_rate.and_then(heart_rate).unwrap_or(0),
            avg_speed_mps: lap.avg_speed.or(lap.enhanced_avg_speed).map_or(0.0, speed_mps),
        })
        .collect()
}

#[macro_use]
mod common;

use common::*;
use garmr_fit::{
    Error, HrZoneTime, avec, compute_hr_zones, decode_activity, decode_activity_bytes,
    decode_activity_reader,
};

#[test]
fn decodes_running_activity() {
    let activity = decode_activity_bytes(&running_activity(30)).unwrap().unwrap();
    let summary = &activity.summary;

    assert_eq!(summary.fit_uid, "2024-03-01T08:00:00Z");
    assert_eq!(summary.sport, "Running");
    assert_eq!(summary.sub_sport, "Trail");
    assert_eq!(summary.duration_s, 30);
    assert_eq!(summary.elapsed_s, 35);
    assert_eq!(summary.distance_m, 105);
    assert_eq!(summary.avg_speed_mps, 3.5);
    assert_eq!((summary.avg_hr, summary.max_hr), (150, 200));
    assert_eq!(summary.aerobic_te, Some(3.5));
    assert_eq!(summary.anaerobic_te, None);
    assert_eq!(summary.device_vendor.as_deref(), Some("Garmin"));
    assert_eq!(summary.device_model.as_deref(), Some("3113"));

    assert_eq!(activity.records.len(), 30);
    let last = &activity.records[29];
    assert_eq!(last.offset_s, 29);
    assert_eq!(last.heart_rate, Some(149));
    assert_eq!(last.elevation_m, Some(100.0));
    assert_eq!(last.speed_mps, Some(3.5));
    assert!(last.position.is_some());

    assert_eq!(activity.laps.len(), 1);
    assert_eq!(activity.laps[0].duration_s, 30);
    assert_eq!(activity.laps[0].max_hr, 200);

    assert_eq!(
        activity.zones,
        [
            HrZoneTime {
                zone: 2,
                seconds: 20
            },
            HrZoneTime {
                zone: 3,
                seconds: 9
            },
        ]
    );
}

#[test]
fn decodes_identically_from_every_source() {
    let data = running_activity(20);

    let path = std::env::temp_dir().join(format!("garmr-fit-{}.fit", std::process::id()));
    std::fs::write(&path, &data).unwrap();
    let from_path = decode_activity(&path);
    std::fs::remove_file(&path).unwrap();

    let from_bytes = decode_activity_bytes(&data).unwrap();
    assert_eq!(from_bytes, decode_activity_bytes(&data).unwrap());
    assert_eq!(from_bytes, from_path.unwrap());
    assert_eq!(from_bytes, decode_activity_reader(&data[..]).unwrap());
}

#[test]
fn recomputes_zones_from_stored_records() {
    let activity = decode_activity_bytes(&running_activity(45)).unwrap().unwrap();

    let samples = activity.records.iter().map(|r| r.heart_rate_sample());
    assert_eq!(compute_hr_zones(samples, activity.summary.max_hr), activity.zones);
}

#[test]
fn returns_nothing_without_a_session() {
    let data = FitBuilder::new()
        .definition(0, 0, &[(1, 2, UINT16), (4, 4, UINT32)])
        .data(0, &body![1u16, MORNING])
        .definition(1, 20, &[(253, 4, UINT32), (3, 1, UINT8)])
        .data(1, &body![MORNING, 140u8])
        .finish();

    assert_eq!(decode_activity_bytes(&data).unwrap(), None);
}

#[test]
fn uses_the_first_session() {
    let session = [(2, 4, UINT32), (5, 1, ENUM), (8, 4, UINT32)];
    let data = FitBuilder::new()
        .definition(0, 18, &session)
        .data(0, &body![MORNING, 2u8, 60_000u32])
        .data(0, &body![MORNING + 60, 1u8, 120_000u32])
        .finish();

    let summary = decode_activity_bytes(&data).unwrap().unwrap().summary;
    assert_eq!(summary.sport, "Cycling");
    assert_eq!(summary.duration_s, 60);
}

#[test]
fn defaults_missing_session_fields() {
    let data = FitBuilder::new()
        .definition(0, 0, &[(4, 4, UINT32)])
        .data(0, &body![MORNING])
        .definition(1, 18, &[(5, 1, ENUM)])
        .data(1, &body![0xFFu8])
        .finish();

    let activity = decode_activity_bytes(&data).unwrap().unwrap();
    assert_eq!(activity.summary.sport, "Generic");
    assert_eq!(activity.summary.fit_uid, "2024-03-01T08:00:00Z");
    assert_eq!(activity.summary.max_hr, 0);
    assert_eq!(activity.summary.device_vendor, None);
    assert!(activity.records.is_empty());
    assert!(activity.zones.is_empty());
}

#[test]
fn reports_unreadable_input() {
    let err = decode_activity("/nonexistent/garmr-fit/activity.fit").unwrap_err();
    assert!(matches!(err, Error::UnreadableInput(_)));
}

#[test]
fn reports_malformed_documents() {
    let mut data = running_activity(5);
    let last = data.len() - 1;
    data[last] ^= 0xFF;

    let err = decode_activity_bytes(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedFormat(avec::Error::CyclicRedundancyCheck { .. })
    ));

    let err = decode_activity_reader(&data[..]).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedFormat(avec::Error::CyclicRedundancyCheck { .. })
    ));
}

#[test]
fn measures_later_sessions_from_the_first_start() {
    let data = FitBuilder::new()
        .definition(0, 20, &[(253, 4, UINT32), (3, 1, UINT8)])
        .data(0, &body![MORNING + 5, 130u8])
        .data(0, &body![MORNING + 105, 140u8])
        .definition(1, 19, &[(2, 4, UINT32), (8, 4, UINT32)])
        .data(1, &body![MORNING, 100_000u32])
        .data(1, &body![MORNING + 100, 50_000u32])
        .definition(2, 18, &[(2, 4, UINT32), (5, 1, ENUM), (8, 4, UINT32)])
        .data(2, &body![MORNING, 5u8, 100_000u32])
        .data(2, &body![MORNING + 100, 1u8, 50_000u32])
        .finish();

    let activity = decode_activity_bytes(&data).unwrap().unwrap();
    assert_eq!(activity.summary.sport, "Swimming");
    assert_eq!(activity.summary.duration_s, 100);

    let offsets: Vec<_> = activity.records.iter().map(|r| r.offset_s).collect();
    assert_eq!(offsets, [5, 105]);

    let laps: Vec<_> = activity
        .laps
        .iter()
        .map(|l| (l.index, l.start_offset_s, l.duration_s))
        .collect();
    assert_eq!(laps, [(0, 0, 100), (1, 100, 50)]);
}

//! Time spent in heart-rate zones.
//!
//! Zones are bands of the maximum heart rate:
//!
//! | Zone | Band        |
//! |------|-------------|
//! | 1    | [50%, 60%)  |
//! | 2    | [60%, 70%)  |
//! | 3    | [70%, 80%)  |
//! | 4    | [80%, 90%)  |
//! | 5    | [90%, 100%] |
//!
//! Readings outside every band are not tracked.

use crate::{activity::HrZoneTime, normalize::HEART_RATE_INVALID};

const ZONES: usize = 5;

/// Classify a reading into a zone, comparing percentages exactly.
fn zone(hr: u8, max_hr: u8) -> Option<usize> {
    let (hr, max_hr) = (u32::from(hr) * 100, u32::from(max_hr));

    if hr > max_hr * 100 {
        return None;
    }

    // Zone `z` (counting from zero) starts at (50 + 10 z)% of the maximum.
    (0..ZONES).rev().find(|z| hr >= max_hr * (50 + 10 * *z as u32))
}

fn is_usable(hr: u8) -> bool {
    hr != 0 && hr != HEART_RATE_INVALID
}

/// Accumulate the seconds spent in each zone over a heart-rate series.
///
/// Each sample holds its offset in seconds and its reading, if any. The time
/// until the next sample is credited to the zone of the earlier reading, so
/// the last sample never starts a period. Without a maximum heart rate, or
/// with fewer than two usable readings, no zones are returned.
///
/// Returns zones with time in them, in ascending order.
pub fn compute_hr_zones<I>(samples: I, max_hr: u8) -> Vec<HrZoneTime>
where
    I: IntoIterator<Item = (i64, Option<u8>)>,
{
    if max_hr == 0 {
        return Vec::new();
    }

    let samples: Vec<_> = samples.into_iter().collect();

    if samples.iter().filter(|(_, hr)| hr.is_some_and(is_usable)).count() < 2 {
        return Vec::new();
    }

    let mut seconds = [0u32; ZONES];

    for pair in samples.windows(2) {
        let [(start, hr), (end, _)] = [pair[0], pair[1]];

        let Some(hr) = hr.filter(|&hr| is_usable(hr)) else {
            continue;
        };

        if let Some(z) = zone(hr, max_hr) {
            let elapsed = u32::try_from(end.saturating_sub(start).max(0)).unwrap_or(u32::MAX);
            seconds[z] = seconds[z].saturating_add(elapsed);
        }
    }

    (1..)
        .zip(seconds)
        .filter(|&(_, seconds)| seconds > 0)
        .map(|(zone, seconds)| HrZoneTime { zone, seconds })
        .collect()
}

use garmr_fit::{compute_hr_zones, normalize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn scales_totals_by_truncation(raw in any::<u32>()) {
        prop_assert_eq!(normalize::duration_s(raw), raw / 1000);
        prop_assert_eq!(normalize::distance_m(raw), raw / 100);
        prop_assert_eq!(normalize::speed_mps(raw), f64::from(raw) / 1000.0);
    }

    #[test]
    fn keeps_every_heart_rate_but_the_sentinel(raw in 0u8..=254) {
        prop_assert_eq!(normalize::heart_rate(raw), Some(raw));
    }

    #[test]
    fn never_keeps_a_single_axis(lat in any::<i32>(), lon in any::<i32>()) {
        let position = normalize::position(lat, lon);

        if lat == 0 || lon == 0 {
            prop_assert_eq!(position, None);
        }
        if let Some(p) = position {
            prop_assert!((-90.0..=90.0).contains(&p.lat_deg));
            prop_assert!((-180.0..=180.0).contains(&p.lon_deg));
        }
    }

    #[test]
    fn needs_two_usable_readings_for_zones(
        offsets in proptest::collection::vec(any::<i64>(), 0..8),
        reading in 1u8..=254,
        at in any::<prop::sample::Index>(),
        max_hr in any::<u8>(),
    ) {
        let mut samples: Vec<_> = offsets.iter().map(|&o| (o, None)).collect();
        if !samples.is_empty() {
            let i = at.index(samples.len());
            samples[i].1 = Some(reading);
        }

        prop_assert!(compute_hr_zones(samples, max_hr).is_empty());
    }

    #[test]
    fn never_credits_more_than_the_series_spans(
        readings in proptest::collection::vec((0i64..600, any::<u8>()), 0..64),
        max_hr in any::<u8>(),
    ) {
        let mut offset = 0;
        let samples: Vec<_> = readings
            .iter()
            .map(|&(gap, hr)| {
                offset += gap;
                (offset, Some(hr))
            })
            .collect();

        let zones = compute_hr_zones(samples.iter().copied(), max_hr);
        let total: u64 = zones.iter().map(|z| u64::from(z.seconds)).sum();
        let span = samples.last().map_or(0, |&(o, _)| o) - samples.first().map_or(0, |&(o, _)| o);

        prop_assert!(total <= span as u64);
        prop_assert!(zones.windows(2).all(|w| w[0].zone < w[1].zone));
        prop_assert!(zones.iter().all(|z| (1..=5).contains(&z.zone) && z.seconds > 0));
    }
}

#[test]
fn rejects_the_heart_rate_sentinel() {
    assert_eq!(normalize::heart_rate(255), None);
}

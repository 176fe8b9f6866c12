//! Property tests for the planar distance and grouping primitives.

use proptest::prelude::*;
use spotaudit_analysis::duplicates;
use spotaudit_analysis::precision::decimal_digits;
use spotaudit_analysis::proximity::planar_distance_deg;
use spotaudit_core::models::GeoRecord;

fn rec(id: &str, partition: &str, lat: f64, lng: f64) -> GeoRecord {
    GeoRecord {
        id: id.to_string(),
        name: id.to_string(),
        slug: String::new(),
        address: String::new(),
        latitude: lat,
        longitude: lng,
        partition: partition.to_string(),
        line: 1,
    }
}

proptest! {
    #[test]
    fn planar_distance_is_symmetric(
        a_lat in 20.0f64..46.0,
        a_lng in 122.0f64..155.0,
        b_lat in 20.0f64..46.0,
        b_lng in 122.0f64..155.0,
    ) {
        let ab = planar_distance_deg(a_lat, a_lng, b_lat, b_lng);
        let ba = planar_distance_deg(b_lat, b_lng, a_lat, a_lng);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn planar_distance_is_zero_only_at_the_same_point(
        lat in 20.0f64..46.0,
        lng in 122.0f64..155.0,
    ) {
        prop_assert_eq!(planar_distance_deg(lat, lng, lat, lng), 0.0);
    }

    #[test]
    fn identical_coordinates_always_group(
        lat in 20.0f64..46.0,
        lng in 122.0f64..155.0,
    ) {
        let records = vec![
            rec("a", "spots-a", lat, lng),
            rec("b", "spots-b", lat, lng),
        ];
        let issues = duplicates::analyze(&records);
        prop_assert_eq!(issues.len(), 1);
        prop_assert_eq!(issues[0].records.len(), 2);
    }

    #[test]
    fn decimal_digits_matches_display_form(value in 20.0f64..155.0) {
        // The digit count always refers to the canonical display form.
        let digits = decimal_digits(value);
        let shown = format!("{}", value);
        match shown.split_once('.') {
            Some((_, frac)) => prop_assert_eq!(digits, frac.len()),
            None => prop_assert_eq!(digits, 0),
        }
    }
}

//! Precision heuristics.
//!
//! Coordinates copied from a city-center lookup carry few decimal
//! digits and are otherwise invisible as data-entry errors. Three
//! decimal digits is roughly 100 m, the minimum that usefully
//! distinguishes a specific pier from the town it sits in.

use spotaudit_core::config::AuditConfig;
use spotaudit_core::models::{GeoRecord, Issue, IssueKind};

/// Count the decimal digits of a coordinate as written.
///
/// Uses the shortest round-trip display form, so `35.4` counts 1 and
/// `35.0` counts 0.
pub fn decimal_digits(value: f64) -> usize {
    let s = format!("{}", value);
    match s.split_once('.') {
        Some((_, frac)) => frac.len(),
        None => 0,
    }
}

/// Flag records whose coordinates carry suspiciously few decimal
/// digits.
///
/// Two independent lanes: `LowPrecision` when either axis falls below
/// the minimum, and the stricter `VeryRoundCoordinate` when both axes
/// carry one or two digits (near-certain placeholder placement).
pub fn analyze(records: &[GeoRecord], config: &AuditConfig) -> Vec<Issue> {
    let min_digits = config.min_decimal_digits.value;
    let very_round_max = config.very_round_max_digits.value;
    let mut issues = Vec::new();

    for record in records {
        let lat_decimals = decimal_digits(record.latitude);
        let lng_decimals = decimal_digits(record.longitude);

        if lat_decimals < min_digits || lng_decimals < min_digits {
            issues.push(Issue::new(
                IssueKind::LowPrecision { lat_decimals, lng_decimals },
                vec![record.to_ref()],
                format!(
                    "lat={} lng={} carry {}/{} decimal digits (minimum {})",
                    record.latitude, record.longitude, lat_decimals, lng_decimals, min_digits
                ),
            ));
        }

        if (1..=very_round_max).contains(&lat_decimals)
            && (1..=very_round_max).contains(&lng_decimals)
        {
            issues.push(Issue::new(
                IssueKind::VeryRoundCoordinate { lat_decimals, lng_decimals },
                vec![record.to_ref()],
                format!(
                    "lat={} lng={} are suspiciously round (possible city-center placement)",
                    record.latitude, record.longitude
                ),
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(lat: f64, lng: f64) -> GeoRecord {
        GeoRecord {
            id: "r1".to_string(),
            name: "spot".to_string(),
            slug: String::new(),
            address: String::new(),
            latitude: lat,
            longitude: lng,
            partition: "spots-a".to_string(),
            line: 1,
        }
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(35.4), 1);
        assert_eq!(decimal_digits(35.46), 2);
        assert_eq!(decimal_digits(35.462), 3);
        assert_eq!(decimal_digits(35.0), 0);
        assert_eq!(decimal_digits(139.6678), 4);
    }

    #[test]
    fn test_low_precision_flagged() {
        let config = AuditConfig::with_defaults();
        let issues = analyze(&[rec(35.4, 139.2)], &config);

        assert!(issues.iter().any(|i| matches!(
            i.kind,
            IssueKind::LowPrecision { lat_decimals: 1, lng_decimals: 1 }
        )));
    }

    #[test]
    fn test_three_decimals_pass() {
        let config = AuditConfig::with_defaults();
        let issues = analyze(&[rec(35.462, 139.667)], &config);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_one_low_axis_is_enough() {
        let config = AuditConfig::with_defaults();
        let issues = analyze(&[rec(35.46, 139.667)], &config);

        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0].kind,
            IssueKind::LowPrecision { lat_decimals: 2, lng_decimals: 3 }
        ));
    }

    #[test]
    fn test_very_round_requires_both_axes() {
        let config = AuditConfig::with_defaults();

        // Both axes 1-2 digits: low precision AND very round.
        let issues = analyze(&[rec(35.4, 139.25)], &config);
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .any(|i| matches!(i.kind, IssueKind::VeryRoundCoordinate { .. })));

        // One precise axis: low precision only.
        let issues = analyze(&[rec(35.4, 139.6678)], &config);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0].kind, IssueKind::LowPrecision { .. }));
    }

    #[test]
    fn test_integer_coordinate_is_not_very_round() {
        // Zero decimals fails the low-precision lane but is excluded
        // from the very-round lane (needs at least one digit per axis).
        let config = AuditConfig::with_defaults();
        let issues = analyze(&[rec(35.0, 139.0)], &config);

        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0].kind,
            IssueKind::LowPrecision { lat_decimals: 0, lng_decimals: 0 }
        ));
    }
}

//! Country and region bounds validation.

use spotaudit_core::config::AuditConfig;
use spotaudit_core::models::{GeoRecord, Issue, IssueKind};
use spotaudit_core::regions::RegionTable;

/// Flag records outside the country box or, when a region can be
/// inferred from the address, outside that region's box with tolerance.
///
/// The country check is unconditional and independent of address
/// parsing; a record that fails it gets no region check. Records whose
/// address yields no region only get the country check, which is a
/// normal outcome for free-text addresses.
pub fn analyze(records: &[GeoRecord], table: &RegionTable, config: &AuditConfig) -> Vec<Issue> {
    let tolerance = config.region_tolerance_deg.value;
    let mut issues = Vec::new();

    for record in records {
        if !record.has_finite_coords() {
            issues.push(Issue::new(
                IssueKind::MalformedCoordinate,
                vec![record.to_ref()],
                format!(
                    "lat={} lng={} are not finite numbers",
                    record.latitude, record.longitude
                ),
            ));
            continue;
        }

        if !table.country().contains(record.latitude, record.longitude) {
            let axes_swapped_hint = record.latitude > 100.0 || record.longitude < 100.0;
            let mut message = format!(
                "lat={} lng={} is outside the country box",
                record.latitude, record.longitude
            );
            if axes_swapped_hint {
                message.push_str(" (latitude and longitude possibly swapped)");
            }
            issues.push(Issue::new(
                IssueKind::OutOfCountry {
                    latitude: record.latitude,
                    longitude: record.longitude,
                    axes_swapped_hint,
                },
                vec![record.to_ref()],
                message,
            ));
            continue;
        }

        let Some(region) = table.infer_region(&record.address) else {
            continue;
        };

        if !region.contains(record.latitude, record.longitude, tolerance) {
            issues.push(Issue::new(
                IssueKind::RegionMismatch {
                    region: region.key.clone(),
                    expected_lat: [region.lat_min, region.lat_max],
                    expected_lng: [region.lng_min, region.lng_max],
                },
                vec![record.to_ref()],
                format!(
                    "lat={} lng={} does not match {} (expected lat {}-{}, lng {}-{})",
                    record.latitude,
                    record.longitude,
                    region.key,
                    region.lat_min,
                    region.lat_max,
                    region.lng_min,
                    region.lng_max
                ),
            ));
        }
    }

    issues
}

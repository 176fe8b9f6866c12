//! Proximity heuristics over planar degree distance.
//!
//! Planar distance is adequate here: the tolerances involved
//! (0.005° ≈ 500 m, 1.5° ≈ 150 km) dwarf the error introduced by
//! ignoring the Earth's curvature.

use spotaudit_core::config::AuditConfig;
use spotaudit_core::models::{GeoRecord, Issue, IssueKind};
use spotaudit_core::regions::RegionTable;
use std::collections::BTreeMap;

/// Euclidean distance in degrees between two coordinates.
pub fn planar_distance_deg(a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64) -> f64 {
    ((a_lat - b_lat).powi(2) + (a_lng - b_lng).powi(2)).sqrt()
}

/// Flag near-identical coordinates in different source partitions.
///
/// Same-partition pairs are skipped: near-duplicates within one file
/// are expected. Exact duplicates are skipped too; they belong to the
/// duplicate detector. The scan is an O(n²) pairwise pass, acceptable
/// at catalog sizes in the low thousands; replace with spatial
/// bucketing before the catalog grows an order of magnitude.
pub fn cross_partition(records: &[GeoRecord], config: &AuditConfig) -> Vec<Issue> {
    let epsilon = config.proximity_epsilon_deg.value;
    let mut issues = Vec::new();

    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let (a, b) = (&records[i], &records[j]);
            if a.partition == b.partition {
                continue;
            }
            let delta_lat = (a.latitude - b.latitude).abs();
            let delta_lng = (a.longitude - b.longitude).abs();
            if delta_lat < epsilon
                && delta_lng < epsilon
                && !(delta_lat == 0.0 && delta_lng == 0.0)
            {
                issues.push(Issue::new(
                    IssueKind::CrossPartitionProximity { delta_lat, delta_lng },
                    vec![a.to_ref(), b.to_ref()],
                    format!(
                        "{} and {} sit within {}° of each other in different partitions",
                        a.to_ref(),
                        b.to_ref(),
                        epsilon
                    ),
                ));
            }
        }
    }

    issues
}

/// Flag records far from the centroid of their region group.
///
/// Records are grouped by partition, then by inferred region; records
/// whose address yields no region form one anonymous group per
/// partition. Groups of one are skipped — a lone record has no
/// meaningful local average to compare against.
pub fn region_outliers(
    records: &[GeoRecord],
    table: &RegionTable,
    config: &AuditConfig,
) -> Vec<Issue> {
    let threshold = config.outlier_threshold_deg.value;

    let mut groups: BTreeMap<(String, Option<String>), Vec<&GeoRecord>> = BTreeMap::new();
    for record in records {
        let region = table.infer_region(&record.address).map(|r| r.key.clone());
        groups.entry((record.partition.clone(), region)).or_default().push(record);
    }

    let mut issues = Vec::new();
    for ((_, region), group) in &groups {
        if group.len() < 2 {
            continue;
        }

        let n = group.len() as f64;
        let centroid_lat = group.iter().map(|r| r.latitude).sum::<f64>() / n;
        let centroid_lng = group.iter().map(|r| r.longitude).sum::<f64>() / n;
        let region_label = region.clone().unwrap_or_else(|| "unknown".to_string());

        for record in group {
            let distance = planar_distance_deg(
                record.latitude,
                record.longitude,
                centroid_lat,
                centroid_lng,
            );
            if distance > threshold {
                issues.push(Issue::new(
                    IssueKind::RegionOutlier {
                        region: region_label.clone(),
                        distance_deg: distance,
                        centroid: [centroid_lat, centroid_lng],
                    },
                    vec![record.to_ref()],
                    format!(
                        "{} is {:.2}° from the {} group average",
                        record.to_ref(),
                        distance,
                        region_label
                    ),
                ));
            }
        }
    }

    issues
}

//! Exact duplicate coordinate detection.

use spotaudit_core::models::{GeoRecord, Issue, IssueKind};
use std::collections::BTreeMap;

/// Exact-string grouping key built from the coordinates as written.
pub fn coordinate_key(record: &GeoRecord) -> String {
    format!("{},{}", record.latitude, record.longitude)
}

/// Flag every group of records sharing the exact same written
/// coordinate.
///
/// Strict equality only: two records metres apart are not duplicates
/// here (they belong to the proximity analyzer). Records sharing a key
/// are reported even if the same physical place was intentionally
/// re-listed; disambiguation is a human job.
pub fn analyze(records: &[GeoRecord]) -> Vec<Issue> {
    let mut groups: BTreeMap<String, Vec<&GeoRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(coordinate_key(record)).or_default().push(record);
    }

    let mut issues = Vec::new();
    for (key, group) in groups {
        if group.len() < 2 {
            continue;
        }
        let listing =
            group.iter().map(|r| r.to_ref().to_string()).collect::<Vec<_>>().join(" | ");
        issues.push(Issue::new(
            IssueKind::DuplicateCoordinate { key: key.clone() },
            group.iter().map(|r| r.to_ref()).collect(),
            format!("{} records share {}: {}", group.len(), key, listing),
        ));
    }

    issues
}

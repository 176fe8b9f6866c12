//! Issue aggregation.

use serde::{Deserialize, Serialize};
use spotaudit_core::config::AuditConfig;
use spotaudit_core::models::{GeoRecord, Issue, Severity};
use spotaudit_core::regions::RegionTable;

use crate::{bounds, duplicates, precision, proximity};

/// Ordered audit report.
///
/// A pure merge of the analyzer outputs: the same record may appear
/// under several issue kinds, and no overall verdict is assigned —
/// editorial review interprets the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub records_scanned: usize,
    pub issues: Vec<Issue>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn structural_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Structural).count()
    }

    pub fn advisory_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Advisory).count()
    }
}

/// Run the full batch pipeline over an extracted record set.
///
/// Stage order is fixed (bounds, precision, duplicates, cross-partition
/// proximity, region outliers) and each stage preserves record order,
/// so identical inputs yield identical reports.
pub fn run_audit(records: &[GeoRecord], table: &RegionTable, config: &AuditConfig) -> AuditReport {
    let mut issues = Vec::new();
    issues.extend(bounds::analyze(records, table, config));
    issues.extend(precision::analyze(records, config));
    issues.extend(duplicates::analyze(records));
    issues.extend(proximity::cross_partition(records, config));
    issues.extend(proximity::region_outliers(records, table, config));

    tracing::debug!(
        "audit produced {} issues over {} records",
        issues.len(),
        records.len()
    );

    AuditReport { records_scanned: records.len(), issues }
}

//! Catalog record snapshot types.

use serde::{Deserialize, Serialize};

/// One catalog location entry, snapshotted at batch-run time.
///
/// Records are read-only inputs to the analyzers. `name`, `slug`, and
/// `address` are recovered on a best-effort basis and may be empty when
/// the extractor could not resolve them; downstream stages must
/// tolerate this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Source partition (catalog file stem) the record came from.
    pub partition: String,
    /// 1-based line number of the latitude field within the partition.
    pub line: usize,
}

impl GeoRecord {
    /// Both coordinates are finite numbers.
    pub fn has_finite_coords(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Reference used inside issue reports.
    pub fn to_ref(&self) -> RecordRef {
        RecordRef {
            id: self.id.clone(),
            name: self.name.clone(),
            partition: self.partition.clone(),
            line: self.line,
        }
    }
}

/// Human-readable pointer to a record inside an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: String,
    pub name: String,
    pub partition: String,
    pub line: usize,
}

impl std::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {}:{})", self.name, self.id, self.partition, self.line)
    }
}

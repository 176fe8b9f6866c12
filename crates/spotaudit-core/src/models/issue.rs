//! Typed report entries produced by the batch analyzers.

use super::record::RecordRef;
use serde::{Deserialize, Serialize};

/// Severity classes from the error-handling taxonomy.
///
/// Structural issues point at data that cannot be correct; advisory
/// issues are heuristic findings for editorial review. Both are
/// collected, never thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Structural,
    Advisory,
}

/// Issue kinds with their per-kind metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Coordinate falls outside the whole-country box.
    OutOfCountry {
        latitude: f64,
        longitude: f64,
        /// Magnitudes suggest latitude and longitude were swapped.
        axes_swapped_hint: bool,
    },
    /// Coordinate is non-finite.
    MalformedCoordinate,
    /// Coordinate falls outside the box of the region inferred from the
    /// address, beyond tolerance.
    RegionMismatch {
        region: String,
        expected_lat: [f64; 2],
        expected_lng: [f64; 2],
    },
    /// Either axis carries fewer decimal digits than the minimum.
    LowPrecision { lat_decimals: usize, lng_decimals: usize },
    /// Both axes are suspiciously round (1-2 decimal digits), the
    /// high-confidence placeholder-placement lane.
    VeryRoundCoordinate { lat_decimals: usize, lng_decimals: usize },
    /// Multiple records share the exact same written coordinate.
    DuplicateCoordinate { key: String },
    /// Near-identical coordinates across different source partitions.
    CrossPartitionProximity { delta_lat: f64, delta_lng: f64 },
    /// Record far from the centroid of its region group.
    RegionOutlier {
        region: String,
        distance_deg: f64,
        centroid: [f64; 2],
    },
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::OutOfCountry { .. } | IssueKind::MalformedCoordinate => {
                Severity::Structural
            }
            _ => Severity::Advisory,
        }
    }

    /// Short uppercase label used in report rendering.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::OutOfCountry { .. } => "OUT_OF_COUNTRY",
            IssueKind::MalformedCoordinate => "MALFORMED_COORDINATE",
            IssueKind::RegionMismatch { .. } => "REGION_MISMATCH",
            IssueKind::LowPrecision { .. } => "LOW_PRECISION",
            IssueKind::VeryRoundCoordinate { .. } => "VERY_ROUND",
            IssueKind::DuplicateCoordinate { .. } => "DUPLICATE_COORDS",
            IssueKind::CrossPartitionProximity { .. } => "CROSS_PARTITION_PROXIMITY",
            IssueKind::RegionOutlier { .. } => "REGION_OUTLIER",
        }
    }
}

/// One immutable report entry. Created once by an analyzer and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(flatten)]
    pub kind: IssueKind,
    pub severity: Severity,
    pub records: Vec<RecordRef>,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, records: Vec<RecordRef>, message: impl Into<String>) -> Self {
        let severity = kind.severity();
        Self { kind, severity, records, message: message.into() }
    }
}

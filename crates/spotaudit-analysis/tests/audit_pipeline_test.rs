//! End-to-end batch pipeline tests over an in-memory fixture catalog.

use spotaudit_analysis::{run_audit, AuditReport};
use spotaudit_core::catalog::RecordExtractor;
use spotaudit_core::config::AuditConfig;
use spotaudit_core::models::{IssueKind, Severity};
use spotaudit_core::regions::RegionTable;

const PARTITION_A: &str = r#"
export const spots = [
  {
    id: "osaka-001",
    name: "大阪南港魚つり園",
    slug: "osaka-nanko",
    address: "大阪府大阪市住之江区南港南",
    latitude: 34.6173,
    longitude: 135.4023,
  },
  {
    id: "osaka-002",
    name: "泉大津大波止",
    slug: "izumiotsu",
    address: "大阪府泉大津市なぎさ町",
    latitude: 34.504,
    longitude: 135.24,
  },
  {
    id: "osaka-003",
    name: "遠すぎるスポット",
    slug: "too-far",
    address: "大阪府岬町",
    latitude: 37.6,
    longitude: 135.404,
  },
  {
    id: "rough-001",
    name: "丸め座標",
    slug: "rough",
    address: "大阪府堺市",
    latitude: 34.5,
    longitude: 135.5,
  },
  {
    id: "offshore-001",
    name: "国外スポット",
    slug: "offshore",
    latitude: 0.0,
    longitude: 0.0,
  },
];
"#;

const PARTITION_B: &str = r#"
export const moreSpots = [
  {
    id: "copy-001",
    name: "コピー疑い",
    slug: "suspect-copy",
    address: "大阪府大阪市住之江区",
    latitude: 34.6171,
    longitude: 135.4021,
  },
  {
    id: "dup-001",
    name: "重複座標",
    slug: "dup",
    address: "大阪府泉大津市",
    latitude: 34.504,
    longitude: 135.24,
  },
];
"#;

fn fixture_report() -> AuditReport {
    let extractor = RecordExtractor::new();
    let mut records = extractor.extract_partition("spots-a", PARTITION_A);
    records.extend(extractor.extract_partition("spots-b", PARTITION_B));

    let table = RegionTable::japan();
    let config = AuditConfig::with_defaults();
    run_audit(&records, &table, &config)
}

#[test]
fn test_out_of_country_is_structural_and_skips_region_check() {
    let report = fixture_report();

    let out_of_country: Vec<_> = report
        .issues
        .iter()
        .filter(|i| matches!(i.kind, IssueKind::OutOfCountry { .. }))
        .collect();
    assert_eq!(out_of_country.len(), 1);
    assert_eq!(out_of_country[0].records[0].id, "offshore-001");
    assert_eq!(out_of_country[0].severity, Severity::Structural);

    // The offshore record must not also appear as a region mismatch.
    assert!(!report.issues.iter().any(|i| {
        matches!(i.kind, IssueKind::RegionMismatch { .. })
            && i.records.iter().any(|r| r.id == "offshore-001")
    }));
}

#[test]
fn test_region_mismatch_for_distant_in_country_record() {
    let report = fixture_report();

    let mismatches: Vec<_> = report
        .issues
        .iter()
        .filter(|i| matches!(i.kind, IssueKind::RegionMismatch { .. }))
        .collect();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].records[0].id, "osaka-003");
}

#[test]
fn test_duplicate_coordinates_reported_once() {
    let report = fixture_report();

    let duplicates: Vec<_> = report
        .issues
        .iter()
        .filter(|i| matches!(i.kind, IssueKind::DuplicateCoordinate { .. }))
        .collect();
    assert_eq!(duplicates.len(), 1);

    let ids: Vec<&str> = duplicates[0].records.iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"osaka-002"));
    assert!(ids.contains(&"dup-001"));
}

#[test]
fn test_cross_partition_proximity() {
    let report = fixture_report();

    let proximity: Vec<_> = report
        .issues
        .iter()
        .filter(|i| matches!(i.kind, IssueKind::CrossPartitionProximity { .. }))
        .collect();
    assert_eq!(proximity.len(), 1);

    let ids: Vec<&str> = proximity[0].records.iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"osaka-001"));
    assert!(ids.contains(&"copy-001"));
}

#[test]
fn test_precision_lanes() {
    let report = fixture_report();

    // osaka-002 (34.504/135.24) and rough-001 (34.5/135.5) and
    // offshore-001 (0/0) fall below three decimals; dup-001 in the
    // second partition does as well.
    let low: Vec<_> = report
        .issues
        .iter()
        .filter(|i| matches!(i.kind, IssueKind::LowPrecision { .. }))
        .collect();
    let low_ids: Vec<&str> =
        low.iter().flat_map(|i| i.records.iter().map(|r| r.id.as_str())).collect();
    assert!(low_ids.contains(&"osaka-002"));
    assert!(low_ids.contains(&"rough-001"));
    assert!(low_ids.contains(&"offshore-001"));
    assert!(low_ids.contains(&"dup-001"));
    assert!(!low_ids.contains(&"osaka-001"));

    // Only records with 1-2 digits on BOTH axes reach the very-round
    // lane; integer zeros are excluded.
    let very_round: Vec<_> = report
        .issues
        .iter()
        .filter(|i| matches!(i.kind, IssueKind::VeryRoundCoordinate { .. }))
        .collect();
    let round_ids: Vec<&str> =
        very_round.iter().flat_map(|i| i.records.iter().map(|r| r.id.as_str())).collect();
    assert!(round_ids.contains(&"rough-001"));
    assert!(!round_ids.contains(&"offshore-001"));
}

#[test]
fn test_region_outlier() {
    let report = fixture_report();

    let outliers: Vec<_> = report
        .issues
        .iter()
        .filter(|i| matches!(i.kind, IssueKind::RegionOutlier { .. }))
        .collect();
    assert_eq!(outliers.len(), 1);
    assert_eq!(outliers[0].records[0].id, "osaka-003");
}

#[test]
fn test_pipeline_is_idempotent() {
    let first = fixture_report();
    let second = fixture_report();

    assert_eq!(first, second);

    // Byte-identical serialized reports: no hidden randomness or
    // ordering nondeterminism.
    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&second).unwrap();
    assert_eq!(a, b);
}

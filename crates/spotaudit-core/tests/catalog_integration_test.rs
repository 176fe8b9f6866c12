//! Catalog extraction against an on-disk fixture directory.

use spotaudit_core::catalog::RecordExtractor;
use spotaudit_core::regions::RegionTable;
use std::fs;

const HOKKAIDO: &str = r#"
export const hokkaidoSpots = [
  {
    id: "hk-001",
    name: "小樽港",
    slug: "otaru-port",
    address: "北海道小樽市港町",
    latitude: 43.1907,
    longitude: 140.9946,
  },
];
"#;

const KANTO: &str = r#"
export const kantoSpots = [
  {
    id: "kt-001",
    name: "若洲海浜公園",
    slug: "wakasu",
    address: "東京都江東区若洲",
    latitude: 35.6178,
    longitude: 139.8278,
  },
  {
    id: "kt-002",
    name: "住所なし",
    slug: "no-address",
    latitude: 35.0936,
    longitude: 139.0772,
  },
];
"#;

#[test]
fn test_extract_dir_and_infer_regions() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("spots-kanto.ts"), KANTO).unwrap();
    fs::write(dir.path().join("spots-hokkaido.ts"), HOKKAIDO).unwrap();
    // Unrelated data files in the same directory are not partitions.
    fs::write(dir.path().join("fish.ts"), "latitude: 1.0\nlongitude: 2.0\n").unwrap();

    let extractor = RecordExtractor::new();
    let records = extractor.extract_dir(dir.path()).unwrap();

    // Sorted partition order: hokkaido before kanto.
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].partition, "spots-hokkaido");
    assert_eq!(records[0].id, "hk-001");
    assert_eq!(records[1].partition, "spots-kanto");

    let table = RegionTable::japan();
    let hokkaido = table.infer_region(&records[0].address).unwrap();
    assert_eq!(hokkaido.key, "北海道");
    assert!(hokkaido.contains(records[0].latitude, records[0].longitude, 0.5));

    let tokyo = table.infer_region(&records[1].address).unwrap();
    assert_eq!(tokyo.key, "東京");

    // A record without an address still extracts, with no region.
    assert_eq!(records[2].id, "kt-002");
    assert_eq!(records[2].address, "");
    assert!(table.infer_region(&records[2].address).is_none());
}

#[test]
fn test_extraction_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("spots-kanto.ts"), KANTO).unwrap();
    fs::write(dir.path().join("spots-hokkaido.ts"), HOKKAIDO).unwrap();

    let extractor = RecordExtractor::new();
    let first = extractor.extract_dir(dir.path()).unwrap();
    let second = extractor.extract_dir(dir.path()).unwrap();

    assert_eq!(first, second);
}

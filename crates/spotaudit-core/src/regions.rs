//! Region bounds table and address-based region inference.
//!
//! The table is injected, immutable configuration: production code uses
//! [`RegionTable::japan`], tests substitute smaller fixtures through
//! [`RegionTable::new`]. Region inference is a longest-prefix match of
//! the free-text address against region labels; an unmatched address is
//! a normal outcome, not an error.

use geo::algorithm::intersects::Intersects;
use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

/// Fixed whole-country box. Checked before any region-specific check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountryBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl CountryBounds {
    /// Deployment country box (Japan incl. outlying islands).
    pub const JAPAN: CountryBounds = CountryBounds {
        lat_min: 20.0,
        lat_max: 46.0,
        lng_min: 122.0,
        lng_max: 155.0,
    };

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            Coord { x: self.lng_min, y: self.lat_min },
            Coord { x: self.lng_max, y: self.lat_max },
        )
    }

    /// Containment test, inclusive on the boundary.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        self.to_rect().intersects(&Coord { x: lng, y: lat })
    }
}

/// Approximate bounding box for one administrative region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    /// Canonical region key, e.g. "東京".
    pub key: String,
    /// Address prefixes that select this region, most specific first.
    pub labels: Vec<String>,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl RegionBounds {
    pub fn new(
        key: impl Into<String>,
        labels: Vec<String>,
        lat_min: f64,
        lat_max: f64,
        lng_min: f64,
        lng_max: f64,
    ) -> Self {
        Self { key: key.into(), labels, lat_min, lat_max, lng_min, lng_max }
    }

    /// Bounding rect expanded by `tolerance` degrees on every side.
    pub fn to_rect(&self, tolerance: f64) -> Rect {
        Rect::new(
            Coord { x: self.lng_min - tolerance, y: self.lat_min - tolerance },
            Coord { x: self.lng_max + tolerance, y: self.lat_max + tolerance },
        )
    }

    /// Containment test with tolerance, inclusive on the boundary: a
    /// coordinate exactly on `max + tolerance` passes.
    pub fn contains(&self, lat: f64, lng: f64, tolerance: f64) -> bool {
        self.to_rect(tolerance).intersects(&Coord { x: lng, y: lat })
    }
}

/// Immutable region table, loaded once per run.
#[derive(Debug, Clone)]
pub struct RegionTable {
    country: CountryBounds,
    regions: Vec<RegionBounds>,
    /// (label, region index), sorted longest label first for
    /// most-specific-wins inference.
    label_index: Vec<(String, usize)>,
}

impl RegionTable {
    pub fn new(country: CountryBounds, regions: Vec<RegionBounds>) -> Self {
        let mut label_index = Vec::new();
        for (idx, region) in regions.iter().enumerate() {
            for label in &region.labels {
                label_index.push((label.clone(), idx));
            }
        }
        // Longest first; ties broken lexically so inference is deterministic.
        label_index.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { country, regions, label_index }
    }

    pub fn country(&self) -> &CountryBounds {
        &self.country
    }

    pub fn regions(&self) -> &[RegionBounds] {
        &self.regions
    }

    pub fn get(&self, key: &str) -> Option<&RegionBounds> {
        self.regions.iter().find(|r| r.key == key)
    }

    /// Longest-prefix match of `address` against region labels.
    ///
    /// Returns `None` when no label matches; free-text addresses are not
    /// always parseable and that is not an error.
    pub fn infer_region(&self, address: &str) -> Option<&RegionBounds> {
        self.label_index
            .iter()
            .find(|(label, _)| address.starts_with(label.as_str()))
            .map(|&(_, idx)| &self.regions[idx])
    }

    /// The deployment table: all 47 prefectures with generous boxes.
    pub fn japan() -> Self {
        const PREFECTURES: &[(&str, f64, f64, f64, f64)] = &[
            ("北海道", 41.0, 45.6, 139.0, 146.0),
            ("青森", 40.2, 41.6, 139.4, 141.7),
            ("岩手", 38.7, 40.5, 140.6, 142.1),
            ("宮城", 37.7, 39.0, 140.2, 141.7),
            ("秋田", 39.0, 40.5, 139.5, 140.7),
            ("山形", 37.7, 39.2, 139.5, 140.6),
            ("福島", 36.8, 38.0, 139.1, 141.1),
            ("茨城", 35.7, 36.9, 139.7, 140.9),
            ("栃木", 36.2, 37.2, 139.3, 140.3),
            ("群馬", 36.0, 37.0, 138.5, 139.7),
            ("埼玉", 35.7, 36.3, 138.7, 139.9),
            ("千葉", 34.9, 36.0, 139.7, 140.9),
            ("東京", 20.4, 35.9, 136.0, 140.2),
            ("神奈川", 35.1, 35.7, 138.9, 139.8),
            ("新潟", 36.7, 38.6, 137.8, 140.0),
            ("富山", 36.3, 36.9, 136.7, 137.8),
            ("石川", 36.0, 37.9, 136.2, 137.4),
            ("福井", 35.4, 36.3, 135.5, 136.9),
            ("山梨", 35.2, 35.9, 138.2, 139.1),
            ("長野", 35.2, 37.0, 137.5, 138.8),
            ("岐阜", 35.1, 36.5, 136.3, 137.7),
            ("静岡", 34.5, 35.7, 137.5, 139.2),
            ("愛知", 34.5, 35.5, 136.7, 137.8),
            ("三重", 33.7, 35.2, 135.8, 137.0),
            ("滋賀", 34.8, 35.7, 135.8, 136.5),
            ("京都", 34.8, 35.8, 134.8, 136.1),
            ("大阪", 34.2, 35.0, 135.0, 135.8),
            ("兵庫", 34.2, 35.7, 134.2, 135.5),
            ("奈良", 33.8, 34.8, 135.5, 136.3),
            ("和歌山", 33.4, 34.4, 135.0, 136.0),
            ("鳥取", 35.0, 35.7, 133.2, 134.5),
            ("島根", 34.0, 36.3, 131.6, 133.4),
            ("岡山", 34.4, 35.3, 133.3, 134.4),
            ("広島", 34.0, 35.0, 132.0, 133.4),
            ("山口", 33.7, 34.8, 130.8, 132.2),
            ("徳島", 33.5, 34.3, 133.5, 134.9),
            ("香川", 34.0, 34.6, 133.4, 134.5),
            ("愛媛", 32.9, 34.2, 132.0, 133.7),
            ("高知", 32.7, 33.9, 132.4, 134.3),
            ("福岡", 33.0, 34.0, 130.0, 131.2),
            ("佐賀", 33.0, 33.6, 129.7, 130.6),
            ("長崎", 32.0, 34.7, 128.5, 130.4),
            ("熊本", 32.0, 33.3, 129.9, 131.4),
            ("大分", 32.7, 33.8, 130.8, 132.1),
            ("宮崎", 31.3, 32.9, 130.7, 131.9),
            ("鹿児島", 27.0, 32.3, 128.5, 131.3),
            ("沖縄", 24.0, 27.9, 122.9, 131.4),
        ];

        let regions = PREFECTURES
            .iter()
            .map(|&(key, lat_min, lat_max, lng_min, lng_max)| {
                RegionBounds::new(key, official_labels(key), lat_min, lat_max, lng_min, lng_max)
            })
            .collect();

        Self::new(CountryBounds::JAPAN, regions)
    }
}

/// Address labels for a prefecture key: the official suffixed form
/// first, then the bare form.
fn official_labels(key: &str) -> Vec<String> {
    match key {
        "北海道" => vec!["北海道".to_string()],
        "東京" => vec!["東京都".to_string(), "東京".to_string()],
        "大阪" => vec!["大阪府".to_string(), "大阪".to_string()],
        "京都" => vec!["京都府".to_string(), "京都".to_string()],
        _ => vec![format!("{}県", key), key.to_string()],
    }
}

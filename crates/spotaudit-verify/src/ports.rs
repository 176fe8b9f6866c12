//! Geo-lookup port definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spotaudit_core::Result;
use std::collections::BTreeMap;

/// A small lat/lng window around a coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl BoundingBox {
    /// Box extending `half_side` degrees on each side of a coordinate.
    pub fn around(lat: f64, lng: f64, half_side: f64) -> Self {
        Self {
            lat_min: lat - half_side,
            lat_max: lat + half_side,
            lng_min: lng - half_side,
            lng_max: lng + half_side,
        }
    }
}

/// Reverse-geocoding result for one coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReversePlace {
    pub display_name: String,
    pub place_type: String,
    pub category: String,
    /// Address components keyed by part name (amenity, suburb, ...).
    pub address: BTreeMap<String, String>,
    /// Extra feature tags, raw.
    pub extra_tags: BTreeMap<String, String>,
    /// Localized/alternate names, raw.
    pub name_details: BTreeMap<String, String>,
}

/// One hit from a bounded keyword search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub display_name: String,
    pub place_type: String,
    pub category: String,
}

/// Port for the external geo-lookup collaborator.
///
/// Two narrow operations so the verifier's branching logic can be
/// unit-tested with a fake implementation, decoupled from real network
/// access.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Reverse-geocode one coordinate. `Ok(None)` means the service
    /// answered but has no place information for the coordinate.
    async fn reverse_lookup(&self, lat: f64, lng: f64) -> Result<Option<ReversePlace>>;

    /// Search for a keyword within a bounding box.
    async fn bounded_search(
        &self,
        keyword: &str,
        bbox: BoundingBox,
        limit: usize,
    ) -> Result<Vec<SearchHit>>;
}

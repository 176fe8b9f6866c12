//! Verdict state machine for single-coordinate verification.

use crate::keywords::KeywordSet;
use crate::ports::{BoundingBox, GeoLookup, ReversePlace};
use futures::stream::{self, StreamExt};
use spotaudit_core::models::LocationVerdict;
use spotaudit_core::regions::CountryBounds;

/// Half-side of the fallback water search window, in degrees (~500 m).
const WATER_SEARCH_HALF_SIDE_DEG: f64 = 0.005;
/// Result cap for the fallback water search.
const WATER_SEARCH_LIMIT: usize = 5;

/// Classifies one coordinate through the geo-lookup port.
///
/// Water and restricted-area findings are advisory: the verdict stays
/// valid whenever the country check and the lookup succeed, so the tool
/// never silently discards a record a human has not reviewed.
pub struct LocationVerifier<L> {
    lookup: L,
    country: CountryBounds,
    water: KeywordSet,
    restricted: KeywordSet,
}

impl<L: GeoLookup> LocationVerifier<L> {
    /// Verifier with the deployment country box and default keyword
    /// dictionaries.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            country: CountryBounds::JAPAN,
            water: KeywordSet::default_water(),
            restricted: KeywordSet::default_restricted(),
        }
    }

    /// Substitute the injected tables (tests, other deployments).
    pub fn with_tables(
        lookup: L,
        country: CountryBounds,
        water: KeywordSet,
        restricted: KeywordSet,
    ) -> Self {
        Self { lookup, country, water, restricted }
    }

    /// Classify one coordinate.
    ///
    /// Never fails: lookup errors degrade to an invalid verdict with a
    /// human-readable warning, and an inconclusive water check degrades
    /// to a valid verdict with a caution warning.
    pub async fn verify(&self, lat: f64, lng: f64) -> LocationVerdict {
        // Country box first; failing it costs no network call.
        if !self.country.contains(lat, lng) {
            return LocationVerdict::rejected(
                "Coordinate is outside the supported country",
                "Enter a coordinate inside the country bounds",
            );
        }

        let place = match self.lookup.reverse_lookup(lat, lng).await {
            Ok(Some(place)) => place,
            Ok(None) => {
                return LocationVerdict::rejected(
                    "No place information was found for this coordinate",
                    "Check the coordinate",
                );
            }
            Err(err) => {
                tracing::warn!("reverse lookup failed for {},{}: {}", lat, lng, err);
                return LocationVerdict::rejected(
                    format!("Place lookup failed: {}", err),
                    "Check the coordinate and try again",
                );
            }
        };

        let mut warnings = Vec::new();
        let corpus = build_corpus(&place);

        let mut is_near_water = self.water.matches(&corpus);
        if !is_near_water {
            // Many real fishing points reverse-geocode to a generic
            // residential or road label with no water keyword in it.
            is_near_water = self.search_nearby_water(lat, lng).await;
        }
        if !is_near_water {
            warnings.push(
                "This location may be far from any water; check that the coordinate is correct"
                    .to_string(),
            );
        }

        if self.restricted.matches(&corpus) {
            warnings.push(
                "This location may have restricted access; confirm that fishing is permitted"
                    .to_string(),
            );
        }

        LocationVerdict {
            is_valid: true,
            is_near_water,
            place_name: derive_place_name(&place),
            place_type: format!("{}/{}", place.category, place.place_type),
            warnings,
            details: place.display_name,
        }
    }

    /// Verify many coordinates with capped concurrency, preserving
    /// input order. The shared client's request pacing still applies to
    /// every underlying call.
    pub async fn verify_many(
        &self,
        coords: &[(f64, f64)],
        concurrency: usize,
    ) -> Vec<LocationVerdict> {
        stream::iter(coords.iter().copied())
            .map(|(lat, lng)| self.verify(lat, lng))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    /// Fallback probe: any "water" feature within ~500 m counts. Errors
    /// are inconclusive, not fatal.
    async fn search_nearby_water(&self, lat: f64, lng: f64) -> bool {
        let bbox = BoundingBox::around(lat, lng, WATER_SEARCH_HALF_SIDE_DEG);
        match self.lookup.bounded_search("water", bbox, WATER_SEARCH_LIMIT).await {
            Ok(hits) => !hits.is_empty(),
            Err(err) => {
                tracing::warn!("nearby water search failed for {},{}: {}", lat, lng, err);
                false
            }
        }
    }
}

/// One lowercase search corpus over every textual field of the
/// response.
fn build_corpus(place: &ReversePlace) -> String {
    let mut parts: Vec<&str> =
        vec![&place.display_name, &place.place_type, &place.category];
    parts.extend(place.address.values().map(String::as_str));
    for (key, value) in &place.extra_tags {
        parts.push(key);
        parts.push(value);
    }
    for (key, value) in &place.name_details {
        parts.push(key);
        parts.push(value);
    }
    parts.join(" ").to_lowercase()
}

/// Human place name from the address sub-fields, most specific first.
fn derive_place_name(place: &ReversePlace) -> String {
    for key in ["amenity", "tourism", "leisure"] {
        if let Some(value) = place.address.get(key) {
            if !value.is_empty() {
                return value.clone();
            }
        }
    }
    if let Some(value) = place.name_details.get("name") {
        if !value.is_empty() {
            return value.clone();
        }
    }
    for key in ["suburb", "city_district"] {
        if let Some(value) = place.address.get(key) {
            if !value.is_empty() {
                return value.clone();
            }
        }
    }
    place.display_name.split(',').next().unwrap_or_default().trim().to_string()
}

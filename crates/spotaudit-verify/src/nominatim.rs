//! Nominatim adapter for the geo-lookup port.

use crate::ports::{BoundingBox, GeoLookup, ReversePlace, SearchHit};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use spotaudit_core::config::AuditConfig;
use spotaudit_core::error::{Result, SpotauditError};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Initial backoff after a transient failure; doubles per retry.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Client for the public Nominatim HTTP API.
///
/// Every request carries the descriptive client identifier and the
/// accept-language hint the service's usage policy requires. Requests
/// are paced by a minimum interval and carry a hard timeout. Transient
/// failures (connect errors, HTTP 429/5xx) are retried a bounded number
/// of times with doubling backoff; 4xx responses and malformed bodies
/// are permanent.
pub struct NominatimClient {
    base_url: String,
    accept_language: String,
    max_retries: u32,
    min_interval: Duration,
    client: reqwest::Client,
    last_request: Mutex<Option<Instant>>,
}

enum RequestError {
    Transient(String),
    Permanent(SpotauditError),
}

impl NominatimClient {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        accept_language: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
        min_interval: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.into())
            .timeout(timeout)
            .build()
            .map_err(|e| SpotauditError::Lookup {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            accept_language: accept_language.into(),
            max_retries,
            min_interval,
            client,
            last_request: Mutex::new(None),
        })
    }

    /// Build a client from the lookup section of the audit config.
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(
            config.lookup_base_url.value.clone(),
            config.lookup_user_agent.value.clone(),
            config.lookup_accept_language.value.clone(),
            Duration::from_secs(config.lookup_timeout_secs.value),
            config.lookup_max_retries.value,
            Duration::from_millis(config.lookup_min_interval_ms.value),
        )
    }

    /// Sleep until the politeness interval since the previous request
    /// has elapsed.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let mut backoff = RETRY_BACKOFF;
        let mut attempt = 0;
        loop {
            self.pace().await;
            match self.try_get_json::<T>(url, params).await {
                Ok(value) => return Ok(value),
                Err(RequestError::Transient(reason)) => {
                    if attempt >= self.max_retries {
                        return Err(SpotauditError::Lookup { reason });
                    }
                    attempt += 1;
                    tracing::warn!(
                        "transient lookup failure ({}), retry {}/{}",
                        reason,
                        attempt,
                        self.max_retries
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(RequestError::Permanent(err)) => return Err(err),
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> std::result::Result<T, RequestError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header("Accept-Language", &self.accept_language)
            .send()
            .await
            .map_err(|e| RequestError::Transient(format!("request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            return Err(RequestError::Transient(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(RequestError::Permanent(SpotauditError::LookupRejected {
                status: status.as_u16(),
                reason: format!("unexpected response for {}", url),
            }));
        }

        response.json::<T>().await.map_err(|e| {
            RequestError::Permanent(SpotauditError::Lookup {
                reason: format!("malformed response: {}", e),
            })
        })
    }
}

#[async_trait]
impl GeoLookup for NominatimClient {
    async fn reverse_lookup(&self, lat: f64, lng: f64) -> Result<Option<ReversePlace>> {
        let url = format!("{}/reverse", self.base_url);
        let params = [
            ("lat", lat.to_string()),
            ("lon", lng.to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
            ("extratags", "1".to_string()),
            ("namedetails", "1".to_string()),
            ("zoom", "18".to_string()),
        ];

        let response: ReverseResponse = self.get_json(&url, &params).await?;
        if response.error.is_some() {
            // The service answered but has nothing for this coordinate
            // (open sea, for instance).
            return Ok(None);
        }

        Ok(Some(ReversePlace {
            display_name: response.display_name,
            place_type: response.place_type,
            category: response.category,
            address: response.address,
            extra_tags: response.extratags.unwrap_or_default(),
            name_details: response.namedetails.unwrap_or_default(),
        }))
    }

    async fn bounded_search(
        &self,
        keyword: &str,
        bbox: BoundingBox,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.base_url);
        let viewbox =
            format!("{},{},{},{}", bbox.lng_min, bbox.lat_min, bbox.lng_max, bbox.lat_max);
        let params = [
            ("q", keyword.to_string()),
            ("format", "jsonv2".to_string()),
            ("bounded", "1".to_string()),
            ("viewbox", viewbox),
            ("limit", limit.to_string()),
        ];

        let hits: Vec<SearchResponseItem> = self.get_json(&url, &params).await?;
        Ok(hits
            .into_iter()
            .map(|hit| SearchHit {
                display_name: hit.display_name,
                place_type: hit.place_type,
                category: hit.category,
            })
            .collect())
    }
}

/// Wire shape of a reverse-geocode response. `category` covers the
/// jsonv2 field name and aliases the legacy `class`.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    display_name: String,
    #[serde(default, rename = "type")]
    place_type: String,
    #[serde(default, alias = "class")]
    category: String,
    #[serde(default)]
    address: BTreeMap<String, String>,
    #[serde(default)]
    extratags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    namedetails: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponseItem {
    #[serde(default)]
    display_name: String,
    #[serde(default, rename = "type")]
    place_type: String,
    #[serde(default, alias = "class")]
    category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction_normalizes_base_url() {
        let client = NominatimClient::new(
            "http://localhost:8088/",
            "spotaudit-test/0.1",
            "ja",
            Duration::from_secs(5),
            2,
            Duration::from_millis(0),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:8088");
    }

    #[test]
    fn test_reverse_response_error_shape() {
        let parsed: ReverseResponse =
            serde_json::from_str(r#"{"error":"Unable to geocode"}"#).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("Unable to geocode"));
        assert!(parsed.display_name.is_empty());
    }

    #[test]
    fn test_reverse_response_accepts_legacy_class_field() {
        let parsed: ReverseResponse = serde_json::from_str(
            r#"{
                "display_name": "大黒海づり施設, 横浜市, 神奈川県",
                "type": "pier",
                "class": "man_made",
                "address": {"amenity": "大黒海づり施設", "city": "横浜市"}
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.category, "man_made");
        assert_eq!(parsed.place_type, "pier");
        assert_eq!(parsed.address.get("city").map(String::as_str), Some("横浜市"));
    }
}

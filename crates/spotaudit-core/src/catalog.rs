//! Catalog record extraction.
//!
//! Partition files are line-oriented source files in which each
//! location entry carries `latitude:`/`longitude:` fields with
//! `name`/`id`/`slug`/`address` fields nearby. Extraction is
//! best-effort: entries missing either coordinate are silently skipped
//! (a deliberate low-severity omission), and context fields that cannot
//! be resolved within their windows are emitted as empty strings.

use crate::error::{Result, SpotauditError};
use crate::models::GeoRecord;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Backward search window for name/id/slug recovery, in lines.
const CONTEXT_WINDOW: usize = 20;
/// Forward-then-backward search window for address recovery, in lines.
const ADDRESS_WINDOW: usize = 5;

pub struct RecordExtractor {
    latitude_re: Regex,
    longitude_re: Regex,
    name_re: Regex,
    id_re: Regex,
    slug_re: Regex,
    address_re: Regex,
    partition_prefix: String,
    partition_ext: String,
}

impl RecordExtractor {
    pub fn new() -> Self {
        Self {
            latitude_re: Regex::new(r"latitude:\s*([\d.]+)").expect("static pattern"),
            longitude_re: Regex::new(r"longitude:\s*([\d.]+)").expect("static pattern"),
            name_re: Regex::new(r#"name:\s*"([^"]*)""#).expect("static pattern"),
            id_re: Regex::new(r#"id:\s*"([^"]*)""#).expect("static pattern"),
            slug_re: Regex::new(r#"slug:\s*"([^"]*)""#).expect("static pattern"),
            address_re: Regex::new(r#"address:\s*"([^"]*)""#).expect("static pattern"),
            partition_prefix: "spots".to_string(),
            partition_ext: "ts".to_string(),
        }
    }

    /// Override the partition file filter (default: `spots*.ts`).
    pub fn with_partition_filter(
        mut self,
        prefix: impl Into<String>,
        ext: impl Into<String>,
    ) -> Self {
        self.partition_prefix = prefix.into();
        self.partition_ext = ext.into();
        self
    }

    /// Extract every record from one partition's content.
    pub fn extract_partition(&self, partition: &str, content: &str) -> Vec<GeoRecord> {
        let lines: Vec<&str> = content.lines().collect();
        let mut records = Vec::new();

        for i in 0..lines.len() {
            let Some(lat_cap) = self.latitude_re.captures(lines[i]) else {
                continue;
            };
            let Ok(latitude) = lat_cap[1].parse::<f64>() else {
                continue;
            };

            // Longitude sits on the same line or the next one.
            let longitude = self
                .longitude_re
                .captures(lines[i])
                .or_else(|| lines.get(i + 1).and_then(|l| self.longitude_re.captures(l)))
                .and_then(|cap| cap[1].parse::<f64>().ok());
            let Some(longitude) = longitude else {
                continue;
            };

            if !latitude.is_finite() || !longitude.is_finite() {
                continue;
            }

            // Nearest preceding name/id/slug within the context window.
            let mut name = String::new();
            let mut id = String::new();
            let mut slug = String::new();
            let start = i.saturating_sub(CONTEXT_WINDOW);
            for j in (start..=i).rev() {
                if name.is_empty() {
                    if let Some(cap) = self.name_re.captures(lines[j]) {
                        name = cap[1].to_string();
                    }
                }
                if id.is_empty() {
                    if let Some(cap) = self.id_re.captures(lines[j]) {
                        id = cap[1].to_string();
                    }
                }
                if slug.is_empty() {
                    if let Some(cap) = self.slug_re.captures(lines[j]) {
                        slug = cap[1].to_string();
                    }
                }
            }

            // Address: forward first, then backward.
            let mut address = String::new();
            let fwd_end = (i + ADDRESS_WINDOW).min(lines.len() - 1);
            for j in i..=fwd_end {
                if let Some(cap) = self.address_re.captures(lines[j]) {
                    address = cap[1].to_string();
                    break;
                }
            }
            if address.is_empty() && i > 0 {
                let back_start = i.saturating_sub(ADDRESS_WINDOW);
                for j in (back_start..i).rev() {
                    if let Some(cap) = self.address_re.captures(lines[j]) {
                        address = cap[1].to_string();
                        break;
                    }
                }
            }

            records.push(GeoRecord {
                id,
                name,
                slug,
                address,
                latitude,
                longitude,
                partition: partition.to_string(),
                line: i + 1,
            });
        }

        records
    }

    /// Scan a catalog directory and extract records from every
    /// partition file, in sorted path order for determinism.
    pub fn extract_dir(&self, dir: &Path) -> Result<Vec<GeoRecord>> {
        if !dir.is_dir() {
            return Err(SpotauditError::CatalogNotFound { path: dir.to_path_buf() });
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| self.is_partition(path))
            .collect();
        paths.sort();

        if paths.is_empty() {
            tracing::warn!("no partition files found in {}", dir.display());
        }

        let mut records = Vec::new();
        for path in &paths {
            let content = fs::read_to_string(path)?;
            let partition =
                path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
            let extracted = self.extract_partition(&partition, &content);
            tracing::debug!("extracted {} records from {}", extracted.len(), path.display());
            records.extend(extracted);
        }

        Ok(records)
    }

    fn is_partition(&self, path: &Path) -> bool {
        let name_ok = path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.starts_with(&self.partition_prefix));
        let ext_ok = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.eq_ignore_ascii_case(&self.partition_ext));
        name_ok && ext_ok
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

//! Water and restricted-area keyword dictionaries.
//!
//! Injected, immutable configuration; tests substitute smaller sets.

/// Case-insensitive keyword set matched against a lookup corpus.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(|k| k.into().to_lowercase()).collect(),
        }
    }

    /// True if any keyword occurs in `corpus`. The corpus is expected
    /// to be lowercased already.
    pub fn matches(&self, corpus: &str) -> bool {
        self.keywords.iter().any(|k| corpus.contains(k.as_str()))
    }

    /// Terms tied to fishable water in place labels, English and
    /// Japanese.
    pub fn default_water() -> Self {
        Self::new([
            "water",
            "harbour",
            "harbor",
            "port",
            "pier",
            "dock",
            "marina",
            "beach",
            "coastline",
            "coast",
            "bay",
            "cape",
            "peninsula",
            "river",
            "stream",
            "canal",
            "lake",
            "pond",
            "reservoir",
            "fishing",
            "fish",
            "breakwater",
            "jetty",
            "quay",
            "wharf",
            "sea",
            "ocean",
            "strait",
            "inlet",
            "港",
            "漁港",
            "堤防",
            "防波堤",
            "磯",
            "海岸",
            "浜",
            "川",
            "河",
            "湖",
            "池",
            "沼",
            "ダム",
            "釣り",
            "マリーナ",
        ])
    }

    /// Places where fishing is commonly prohibited.
    pub fn default_restricted() -> Self {
        Self::new([
            "military",
            "airport",
            "airbase",
            "prison",
            "nuclear",
            "power_plant",
            "industrial",
            "factory",
            "自衛隊",
            "空港",
            "原発",
            "刑務所",
        ])
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A resolved real-world place produced by the ranking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodedLocation {
    /// Full place description as returned by the geocoder.
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    /// Structured address components (road, city, country_code, ...).
    /// Empty when the geocoder returned no address details.
    #[serde(default)]
    pub address: BTreeMap<String, String>,
    /// Derived score in [0, 1]. Only ever boosted by matching signals,
    /// never reduced.
    pub confidence: f64,
    /// The candidate query that produced this result.
    pub original_query: String,
    /// Label of the extractor that produced the originating candidate.
    pub source: String,
}

impl GeocodedLocation {
    /// Lowercased ISO country code of this place, when known.
    ///
    /// Prefers the geocoder's `country_code` address component and falls
    /// back to a name lookup on the last comma-separated segment of the
    /// display name.
    #[must_use]
    pub fn country_code(&self) -> Option<String> {
        if let Some(code) = self.address.get("country_code") {
            return Some(code.to_lowercase());
        }
        let last = self.display_name.split(',').next_back()?.trim().to_lowercase();
        country_code_from_name(&last)
    }
}

/// Country name fragments mapped to ISO codes, for display names without
/// structured address details. English and Korean forms.
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("south korea", "kr"),
    ("korea", "kr"),
    ("대한민국", "kr"),
    ("한국", "kr"),
    ("china", "cn"),
    ("중국", "cn"),
    ("france", "fr"),
    ("프랑스", "fr"),
    ("germany", "de"),
    ("독일", "de"),
    ("spain", "es"),
    ("스페인", "es"),
    ("italy", "it"),
    ("이탈리아", "it"),
    ("united states", "us"),
    ("usa", "us"),
    ("미국", "us"),
    ("united kingdom", "gb"),
    ("uk", "gb"),
    ("영국", "gb"),
];

fn country_code_from_name(segment: &str) -> Option<String> {
    COUNTRY_NAMES
        .iter()
        .find(|(name, _)| segment.contains(name))
        .map(|(_, code)| (*code).to_string())
}

/// Which aggregation tier discovered an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Commons geosearch within a radius of the request point.
    #[serde(rename = "wikimedia-geo")]
    WikimediaGeo,
    /// Commons file-namespace text search on derived location keywords.
    #[serde(rename = "wikimedia-text")]
    WikimediaText,
    /// Openverse keyword search, last-resort broadening.
    #[serde(rename = "openverse")]
    Openverse,
}

impl ImageSource {
    /// The wire label used in JSON responses and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSource::WikimediaGeo => "wikimedia-geo",
            ImageSource::WikimediaText => "wikimedia-text",
            ImageSource::Openverse => "openverse",
        }
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered photo associated with a place.
///
/// `full_url` is the uniqueness key within one aggregation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResult {
    /// Display/thumbnail URL.
    pub url: String,
    /// Original-resolution URL.
    #[serde(rename = "fullUrl")]
    pub full_url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Geotag of the image itself, when the source provides one.
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Meters from the request point. `None` when the source has no
    /// geotag for the image.
    #[serde(rename = "distance")]
    pub distance_m: Option<f64>,
    pub source: ImageSource,
}

use std::collections::BTreeMap;

use serde::Deserialize;

/// A place returned by a geocoding search, before any scoring.
///
/// Confidence and provenance are attached by the ranking layer; this
/// type carries only what the geocoder said.
#[derive(Debug, Clone)]
pub struct Place {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    /// Structured address components. Empty when the search was made
    /// without address details or the provider omitted them.
    pub address: BTreeMap<String, String>,
}

/// A reverse-geocoding result: the name of the place at a coordinate.
#[derive(Debug, Clone)]
pub struct ReversePlace {
    pub display_name: String,
}

/// Raw Nominatim `/search` entry. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEntry {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub address: BTreeMap<String, String>,
}

impl SearchEntry {
    /// Converts to a [`Place`], or `None` when the coordinate strings
    /// do not parse. A malformed entry is skipped, not fatal.
    pub(crate) fn into_place(self) -> Option<Place> {
        let lat = self.lat.parse::<f64>().ok()?;
        let lon = self.lon.parse::<f64>().ok()?;
        Some(Place {
            display_name: self.display_name,
            lat,
            lon,
            address: self.address,
        })
    }
}

/// Raw Nominatim `/reverse` response.
#[derive(Debug, Deserialize)]
pub(crate) struct ReverseEntry {
    #[serde(default)]
    pub display_name: String,
}

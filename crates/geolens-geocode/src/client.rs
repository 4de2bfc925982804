//! HTTP client for the Nominatim geocoding API.
//!
//! Wraps `reqwest` with typed response deserialization and explicit
//! timeouts. Nominatim's usage policy requires an identifying user
//! agent on every request, so the agent string is mandatory at
//! construction.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::{Place, ReverseEntry, ReversePlace, SearchEntry};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Maximum results requested per search call.
pub(crate) const SEARCH_LIMIT: usize = 5;

/// Client for the Nominatim geocoding API.
///
/// Use [`GeocodeClient::new`] for production or
/// [`GeocodeClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: Url,
}

impl GeocodeClient {
    /// Creates a new client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock, or a self-hosted Nominatim).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // that join() appends path segments instead of replacing the last
        // one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Searches for places matching a free-text query.
    ///
    /// When `country_codes` is non-empty it is passed as Nominatim's
    /// `countrycodes` filter. Results arrive in provider order, at most
    /// [`SEARCH_LIMIT`]. Entries whose coordinates fail to parse are
    /// skipped.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not the expected
    ///   shape.
    pub async fn search(
        &self,
        query: &str,
        country_codes: &[String],
    ) -> Result<Vec<Place>, GeocodeError> {
        let mut url = self.endpoint("search")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            pairs.append_pair("q", query);
            pairs.append_pair("limit", &SEARCH_LIMIT.to_string());
            pairs.append_pair("addressdetails", "1");
            if !country_codes.is_empty() {
                pairs.append_pair("countrycodes", &country_codes.join(","));
            }
        }

        let body = self.request_text(&url).await?;
        let entries: Vec<SearchEntry> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        Ok(entries
            .into_iter()
            .filter_map(SearchEntry::into_place)
            .take(SEARCH_LIMIT)
            .collect())
    }

    /// Reverse-geocodes a coordinate to a place name.
    ///
    /// Uses zoom 10 (city level) without address details — this call
    /// feeds keyword derivation, which only needs the display name.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not the expected
    ///   shape.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<ReversePlace, GeocodeError> {
        let mut url = self.endpoint("reverse")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            pairs.append_pair("lat", &lat.to_string());
            pairs.append_pair("lon", &lon.to_string());
            pairs.append_pair("zoom", "10");
            pairs.append_pair("addressdetails", "0");
        }

        let body = self.request_text(&url).await?;
        let entry: ReverseEntry =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("reverse(lat={lat}, lon={lon})"),
                source: e,
            })?;

        Ok(ReversePlace {
            display_name: entry.display_name,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GeocodeError> {
        self.base_url
            .join(path)
            .map_err(|_| GeocodeError::InvalidBaseUrl(self.base_url.to_string()))
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and returns the
    /// response body.
    async fn request_text(&self, url: &Url) -> Result<String, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

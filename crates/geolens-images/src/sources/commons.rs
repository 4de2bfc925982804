//! Wikimedia Commons client: geosearch and file-namespace text search.
//!
//! Both search flavors are two-step MediaWiki calls: a search listing
//! page IDs, then an `imageinfo` batch resolving thumbnail and original
//! URLs for those pages. Pages without image info are skipped.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use geolens_core::{ImageResult, ImageSource};

use crate::error::ImagesError;

const DEFAULT_BASE_URL: &str = "https://commons.wikimedia.org/w/api.php";

/// Requested thumbnail width in pixels.
const THUMB_WIDTH: u32 = 640;

/// Client for the Wikimedia Commons `api.php` endpoint.
#[derive(Debug, Clone)]
pub struct CommonsClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    query: Option<GeoSearchQuery>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchQuery {
    #[serde(default)]
    geosearch: Vec<GeoSearchHit>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchHit {
    pageid: u64,
    lat: f64,
    lon: f64,
    #[serde(default)]
    dist: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    query: Option<TextSearchQuery>,
}

#[derive(Debug, Deserialize)]
struct TextSearchQuery {
    #[serde(default)]
    search: Vec<TextSearchHit>,
}

#[derive(Debug, Deserialize)]
struct TextSearchHit {
    pageid: u64,
}

#[derive(Debug, Deserialize)]
struct ImageInfoResponse {
    query: Option<ImageInfoQuery>,
}

#[derive(Debug, Deserialize)]
struct ImageInfoQuery {
    #[serde(default)]
    pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    pageid: Option<u64>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    url: String,
    #[serde(default)]
    thumburl: Option<String>,
}

impl CommonsClient {
    /// Creates a new client pointed at the public Commons API.
    ///
    /// # Errors
    ///
    /// Returns [`ImagesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, ImagesError> {
        Self::with_base_url(user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom `api.php` URL (for wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ImagesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ImagesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ImagesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let base_url =
            Url::parse(base_url).map_err(|_| ImagesError::InvalidBaseUrl(base_url.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Geotagged media within `radius_m` of a coordinate.
    ///
    /// Results carry the provider's own coordinates and distance; a
    /// missing distance is treated as zero (the provider found the page
    /// at the search point).
    ///
    /// # Errors
    ///
    /// [`ImagesError::Http`] or [`ImagesError::Deserialize`] on upstream
    /// failure.
    pub async fn geo_search(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<ImageResult>, ImagesError> {
        let url = self.api_url(&[
            ("action", "query"),
            ("list", "geosearch"),
            ("gscoord", &format!("{lat}|{lon}")),
            ("gsradius", &radius_m.to_string()),
            ("gslimit", &limit.to_string()),
            ("format", "json"),
        ]);
        let response: GeoSearchResponse = self.request_json(&url, "geosearch").await?;
        let hits = response
            .query
            .map(|q| q.geosearch)
            .unwrap_or_default();
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let pages = self
            .image_info(hits.iter().map(|h| h.pageid))
            .await?;

        Ok(hits
            .into_iter()
            .filter_map(|hit| {
                let page = pages.get(&hit.pageid)?;
                let info = page.imageinfo.first()?;
                Some(ImageResult {
                    url: info.thumburl.clone().unwrap_or_else(|| info.url.clone()),
                    full_url: info.url.clone(),
                    title: strip_file_prefix(&page.title),
                    description: String::new(),
                    lat: Some(hit.lat),
                    lon: Some(hit.lon),
                    distance_m: Some(hit.dist.unwrap_or(0.0)),
                    source: ImageSource::WikimediaGeo,
                })
            })
            .collect())
    }

    /// File-namespace text search.
    ///
    /// Returned images carry no coordinates — the caller decides what
    /// point, if any, to associate them with.
    ///
    /// # Errors
    ///
    /// [`ImagesError::Http`] or [`ImagesError::Deserialize`] on upstream
    /// failure.
    pub async fn text_search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ImageResult>, ImagesError> {
        let url = self.api_url(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srnamespace", "6"),
            ("srlimit", &limit.to_string()),
            ("format", "json"),
        ]);
        let response: TextSearchResponse = self.request_json(&url, "search").await?;
        let hits = response.query.map(|q| q.search).unwrap_or_default();
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let pages = self.image_info(hits.iter().map(|h| h.pageid)).await?;

        Ok(hits
            .into_iter()
            .filter_map(|hit| {
                let page = pages.get(&hit.pageid)?;
                let info = page.imageinfo.first()?;
                Some(ImageResult {
                    url: info.thumburl.clone().unwrap_or_else(|| info.url.clone()),
                    full_url: info.url.clone(),
                    title: strip_file_prefix(&page.title),
                    description: String::new(),
                    lat: None,
                    lon: None,
                    distance_m: None,
                    source: ImageSource::WikimediaText,
                })
            })
            .collect())
    }

    /// Resolves image URLs for a batch of page IDs, keyed by page ID.
    async fn image_info(
        &self,
        page_ids: impl Iterator<Item = u64>,
    ) -> Result<HashMap<u64, PageEntry>, ImagesError> {
        let joined = page_ids
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("|");
        let url = self.api_url(&[
            ("action", "query"),
            ("pageids", &joined),
            ("prop", "imageinfo"),
            ("iiprop", "url"),
            ("iiurlwidth", &THUMB_WIDTH.to_string()),
            ("format", "json"),
        ]);
        let response: ImageInfoResponse = self.request_json(&url, "imageinfo").await?;

        Ok(response
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_values()
            .filter_map(|page| Some((page.pageid?, page)))
            .collect())
    }

    fn api_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, ImagesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ImagesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

fn strip_file_prefix(title: &str) -> String {
    title.strip_prefix("File:").unwrap_or(title).to_string()
}

//! Openverse public image search — the last-resort broadening source.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use geolens_core::{ImageResult, ImageSource};

use crate::error::ImagesError;

const DEFAULT_BASE_URL: &str = "https://api.openverse.engineering";

/// Client for the Openverse image API. No API key required.
#[derive(Debug, Clone)]
pub struct OpenverseClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct OpenverseResponse {
    #[serde(default)]
    results: Vec<OpenverseItem>,
}

#[derive(Debug, Deserialize)]
struct OpenverseItem {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl OpenverseClient {
    /// Creates a new client pointed at the public Openverse API.
    ///
    /// # Errors
    ///
    /// Returns [`ImagesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, ImagesError> {
        Self::with_base_url(user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for wiremock).
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
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| ImagesError::InvalidBaseUrl(base_url.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Keyword image search, biased toward street/city photography by a
    /// fixed query suffix.
    ///
    /// Items without any usable URL are dropped. Returned images carry
    /// no coordinates.
    ///
    /// # Errors
    ///
    /// [`ImagesError::Http`] or [`ImagesError::Deserialize`] on upstream
    /// failure.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<ImageResult>, ImagesError> {
        let mut url = self
            .base_url
            .join("v1/images/")
            .map_err(|_| ImagesError::InvalidBaseUrl(self.base_url.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &format!("{query} street city"));
            pairs.append_pair("page_size", &limit.to_string());
        }

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: OpenverseResponse =
            serde_json::from_str(&body).map_err(|e| ImagesError::Deserialize {
                context: format!("openverse(q={query})"),
                source: e,
            })?;

        Ok(parsed
            .results
            .into_iter()
            .filter_map(|item| {
                let full_url = item.url.clone().or_else(|| item.thumbnail.clone())?;
                let url = item.thumbnail.unwrap_or_else(|| full_url.clone());
                Some(ImageResult {
                    url,
                    full_url,
                    title: item.title.unwrap_or_else(|| query.to_string()),
                    description: item.description.unwrap_or_default(),
                    lat: None,
                    lon: None,
                    distance_m: None,
                    source: ImageSource::Openverse,
                })
            })
            .collect())
    }
}

use thiserror::Error;

/// Errors returned by the image-source clients.
#[derive(Debug, Error)]
pub enum ImagesError {
    /// Network or TLS failure from the underlying HTTP client, or a
    /// non-2xx response status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

use thiserror::Error;

/// Errors returned by the catalog API client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the session token (401/403).
    #[error("unauthorized ({status}) calling {url}")]
    Unauthorized { status: u16, url: String },

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("rate limited (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// An authenticated call was attempted without the named credential.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

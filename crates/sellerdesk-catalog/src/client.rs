//! HTTP client for the seller catalog API.
//!
//! Wraps `reqwest` with the catalog's credential headers, status mapping and
//! typed response decoding. Endpoint groups live in sibling modules
//! (`account`, `products`, `variations`) as additional `impl` blocks.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use sellerdesk_core::AppConfig;

use crate::error::CatalogError;

const DEFAULT_USER_AGENT: &str = "sellerdesk/0.1 (seller-admin)";

/// Client for the seller catalog API.
///
/// Build with [`CatalogClient::new`] (or [`CatalogClient::from_app_config`]),
/// then attach the session token and shop scope. Authenticated endpoints
/// send them as the `authorization` and `shop_id` headers.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    pub(crate) client: Client,
    base_url: Url,
    token: Option<String>,
    shop_id: Option<String>,
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a client for `base_url` with no credentials and no retries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so endpoint segments append to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "expected an http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            token: None,
            shop_id: None,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Creates a client from the loaded application configuration, including
    /// the retry policy and any configured credentials.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let user_agent = if config.user_agent.is_empty() {
            DEFAULT_USER_AGENT
        } else {
            &config.user_agent
        };
        let mut client = Self::new(&config.api_base_url, config.request_timeout_secs, user_agent)?
            .with_retry(config.max_retries, config.retry_backoff_base_ms);
        client.token.clone_from(&config.api_token);
        client.shop_id.clone_from(&config.shop_id);
        Ok(client)
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_owned());
        self
    }

    #[must_use]
    pub fn with_shop_id(mut self, shop_id: &str) -> Self {
        self.shop_id = Some(shop_id.to_owned());
        self
    }

    pub fn set_shop_id(&mut self, shop_id: &str) {
        self.shop_id = Some(shop_id.to_owned());
    }

    #[must_use]
    pub fn shop_id(&self) -> Option<&str> {
        self.shop_id.as_deref()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Adds the session token only (used by `/account/detail`).
    pub(crate) fn with_token_header(
        &self,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, CatalogError> {
        let token = self
            .token
            .as_deref()
            .ok_or(CatalogError::MissingCredential("token"))?;
        Ok(request.header(reqwest::header::AUTHORIZATION, token))
    }

    /// Adds the session token and the shop scope.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, CatalogError> {
        let shop_id = self
            .shop_id
            .as_deref()
            .ok_or(CatalogError::MissingCredential("shop_id"))?;
        Ok(self.with_token_header(request)?.header("shop_id", shop_id))
    }

    /// Sends `request`, maps non-2xx statuses to typed errors, and returns
    /// the response for the caller to consume.
    pub(crate) async fn send(request: RequestBuilder) -> Result<Response, CatalogError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!(status = status.as_u16(), %url, "catalog request failed");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CatalogError::Unauthorized {
                status: status.as_u16(),
                url,
            }),
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound { url }),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(1);
                Err(CatalogError::RateLimited { retry_after_secs })
            }
            _ => Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            }),
        }
    }

    /// Sends `request` and decodes the body as `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, CatalogError> {
        let body = Self::send(request).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Sends `request` and returns the `_id` (or `id`) of the created
    /// resource when the body carries one.
    pub(crate) async fn send_for_id(request: RequestBuilder) -> Result<Option<String>, CatalogError> {
        let body = Self::send(request).await?.text().await?;
        Ok(extract_id(&body))
    }
}

/// Pulls a resource id out of a create response. Bodies that are empty, not
/// JSON, or carry no id yield `None`.
pub(crate) fn extract_id(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["_id", "id"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

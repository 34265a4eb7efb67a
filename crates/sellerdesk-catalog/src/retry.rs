//! Retry with exponential back-off and jitter for idempotent catalog calls.
//!
//! Only `GET`, `PATCH` and `DELETE` requests go through
//! [`retry_with_backoff`]. `POST`s (product/variation creation, image upload)
//! are sent once: repeating them after an ambiguous failure could create
//! duplicates.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 5xx, HTTP 429.
///
/// **Not retriable:** auth failures, 404, other 4xx, malformed bodies,
/// configuration errors.
pub(crate) fn is_retriable(err: &CatalogError) -> bool {
    match err {
        CatalogError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        CatalogError::UnexpectedStatus { status, .. } => *status >= 500,
        CatalogError::RateLimited { .. } => true,
        CatalogError::Unauthorized { .. }
        | CatalogError::NotFound { .. }
        | CatalogError::Deserialize { .. }
        | CatalogError::InvalidBaseUrl { .. }
        | CatalogError::MissingCredential(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry sleeps `backoff_base_ms × 2^(n-1)` ± 25 % jitter, capped
/// at 30 s. A 429 with a `Retry-After` longer than the computed delay is
/// honoured instead.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let delay_ms = match &err {
                    CatalogError::RateLimited { retry_after_secs } => {
                        jittered.max(retry_after_secs.saturating_mul(1_000).min(MAX_DELAY_MS))
                    }
                    _ => jittered,
                };
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "catalog transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

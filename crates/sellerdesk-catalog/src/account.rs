use sellerdesk_core::Attribute;

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::retry::retry_with_backoff;
use crate::types::{AccountDetail, CategoryAttributes};

impl CatalogClient {
    /// Fetches the signed-in seller's account, including the shop id that
    /// scopes every other authenticated call.
    ///
    /// Sends the token only; no shop scope is needed yet.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingCredential`] without a token, and the
    /// usual HTTP/status/decoding errors otherwise.
    pub async fn account_detail(&self) -> Result<AccountDetail, CatalogError> {
        let url = self.endpoint(&["account", "detail"]);
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self.with_token_header(self.client.get(url.clone()));
            async move { Self::send_json(request?, "account detail").await }
        })
        .await
    }

    /// Resolves the shop scope through [`CatalogClient::account_detail`]
    /// unless one is already set.
    ///
    /// # Errors
    ///
    /// Propagates any error from the account lookup.
    pub async fn ensure_shop_id(&mut self) -> Result<String, CatalogError> {
        if let Some(shop_id) = self.shop_id() {
            return Ok(shop_id.to_owned());
        }
        let detail = self.account_detail().await?;
        tracing::debug!(shop_id = %detail.shop_info.id, "resolved shop scope");
        self.set_shop_id(&detail.shop_info.id);
        Ok(detail.shop_info.id)
    }

    /// Fetches the attribute definitions declared for `category_id`.
    ///
    /// The endpoint answers with an array whose first element carries the
    /// list; an empty array yields no attributes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport, status or decoding failures.
    pub async fn category_attributes(
        &self,
        category_id: &str,
    ) -> Result<Vec<Attribute>, CatalogError> {
        let url = self.endpoint(&["category", category_id, "attributes"]);
        let groups: Vec<CategoryAttributes> =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let request = self.authorized(self.client.get(url.clone()));
                async move { Self::send_json(request?, "category attributes").await }
            })
            .await?;
        Ok(groups
            .into_iter()
            .next()
            .map(|g| g.attributes)
            .unwrap_or_default())
    }
}

use sellerdesk_core::VariationDraft;

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::retry::retry_with_backoff;

impl CatalogClient {
    /// Creates a variation under `product_id`. The body never carries an id;
    /// the server-assigned one is returned when present. Sent once.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport or status failures.
    pub async fn create_variation(
        &self,
        product_id: &str,
        variation: &VariationDraft,
    ) -> Result<Option<String>, CatalogError> {
        let url = self.endpoint(&["product", product_id, "variation"]);
        let body = variation.without_id();
        let request = self.authorized(self.client.post(url))?.json(&body);
        Self::send_for_id(request).await
    }

    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport or status failures.
    pub async fn update_variation(
        &self,
        product_id: &str,
        variation_id: &str,
        variation: &VariationDraft,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&["product", product_id, "variation", variation_id]);
        let body = variation.without_id();
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self
                .authorized(self.client.patch(url.clone()))
                .map(|r| r.json(&body));
            async move { Self::send(request?).await.map(drop) }
        })
        .await
    }

    /// Deletes a variation. A 404 means it is already gone and counts as
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport or any other status failure.
    pub async fn delete_variation(
        &self,
        product_id: &str,
        variation_id: &str,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&["product", product_id, "variation", variation_id]);
        let result = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self.authorized(self.client.delete(url.clone()));
            async move { Self::send(request?).await.map(drop) }
        })
        .await;

        match result {
            Err(CatalogError::NotFound { url }) => {
                tracing::debug!(%url, "variation already deleted");
                Ok(())
            }
            other => other,
        }
    }
}

//! Product endpoints: read, list, image upload, create and update.

use reqwest::multipart::{Form, Part};

use sellerdesk_core::{ImageFile, ProductPayload, ProductRecord, ProductStatus, ProductSummary};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::retry::retry_with_backoff;
use crate::types::{ProductListResponse, UploadResponse};

impl CatalogClient {
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id, and the usual
    /// HTTP/status/decoding errors otherwise.
    pub async fn get_product(&self, product_id: &str) -> Result<ProductRecord, CatalogError> {
        let url = self.endpoint(&["product", product_id]);
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self.authorized(self.client.get(url.clone()));
            async move { Self::send_json(request?, "product").await }
        })
        .await
    }

    /// Lists the shop's products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport, status or decoding failures.
    pub async fn list_products(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        let url = self.endpoint(&["product"]);
        let response: ProductListResponse =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let request = self.authorized(self.client.get(url.clone()));
                async move { Self::send_json(request?, "product list").await }
            })
            .await?;
        Ok(response.into_items())
    }

    /// Uploads `files` as multipart `images` parts and returns the remote
    /// URLs in upload order. Sent once, never retried.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport, status or decoding failures.
    pub async fn upload_images(&self, files: &[ImageFile]) -> Result<Vec<String>, CatalogError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)?;
            form = form.part("images", part);
        }

        let url = self.endpoint(&["product", "upload"]);
        let request = self.authorized(self.client.post(url))?.multipart(form);
        let response: UploadResponse = Self::send_json(request, "image upload").await?;
        if response.urls.len() != files.len() {
            tracing::warn!(
                sent = files.len(),
                received = response.urls.len(),
                "upload returned a different number of URLs than files sent"
            );
        }
        Ok(response.urls)
    }

    /// Creates a product (with embedded variations). Returns the new id when
    /// the server reports one. Sent once, never retried.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport or status failures.
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<Option<String>, CatalogError> {
        let url = self.endpoint(&["product"]);
        let request = self.authorized(self.client.post(url))?.json(payload);
        Self::send_for_id(request).await
    }

    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport or status failures.
    pub async fn update_product(
        &self,
        product_id: &str,
        payload: &ProductPayload,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&["product", product_id]);
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self
                .authorized(self.client.patch(url.clone()))
                .map(|r| r.json(payload));
            async move { Self::send(request?).await.map(drop) }
        })
        .await
    }

    /// Sets the storefront status of a product (listing toggle).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport or status failures.
    pub async fn set_product_status(
        &self,
        product_id: &str,
        status: ProductStatus,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&["product", product_id]);
        let body = serde_json::json!({ "status": u8::from(status) });
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self
                .authorized(self.client.patch(url.clone()))
                .map(|r| r.json(&body));
            async move { Self::send(request?).await.map(drop) }
        })
        .await
    }
}

//! Per-category attribute resolution with a session cache.

use std::collections::HashMap;

use sellerdesk_catalog::CatalogClient;
use sellerdesk_core::Attribute;

/// Resolves and caches attribute sets by category id.
///
/// Only successful fetches are cached. A failed fetch degrades to an empty
/// set so editing is never blocked; the next resolve tries again.
#[derive(Debug, Default)]
pub struct AttributeResolver {
    cache: HashMap<String, Vec<Attribute>>,
}

impl AttributeResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn resolve(&mut self, client: &CatalogClient, category_id: &str) -> Vec<Attribute> {
        if let Some(cached) = self.cache.get(category_id) {
            return cached.clone();
        }

        match client.category_attributes(category_id).await {
            Ok(attributes) => {
                tracing::debug!(
                    category_id,
                    count = attributes.len(),
                    "resolved category attributes"
                );
                self.cache
                    .insert(category_id.to_string(), attributes.clone());
                attributes
            }
            Err(e) => {
                tracing::warn!(
                    category_id,
                    error = %e,
                    "attribute fetch failed; continuing with no attributes"
                );
                Vec::new()
            }
        }
    }

    #[must_use]
    pub fn is_cached(&self, category_id: &str) -> bool {
        self.cache.contains_key(category_id)
    }
}

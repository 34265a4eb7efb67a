//! Wire shapes returned by the catalog API that have no home in
//! `sellerdesk-core`.

use serde::Deserialize;

use sellerdesk_core::Attribute;

/// `GET /account/detail` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDetail {
    #[serde(rename = "shopInfo")]
    pub shop_info: ShopInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopInfo {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One element of the `GET /category/{id}/attributes` array. Only the first
/// element is meaningful.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoryAttributes {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// `POST /product/upload` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub urls: Vec<String>,
}

/// `GET /product` may answer with a bare array or wrap it in `products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProductListResponse {
    Bare(Vec<sellerdesk_core::ProductSummary>),
    Wrapped {
        products: Vec<sellerdesk_core::ProductSummary>,
    },
}

impl ProductListResponse {
    pub(crate) fn into_items(self) -> Vec<sellerdesk_core::ProductSummary> {
        match self {
            Self::Bare(items) | Self::Wrapped { products: items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_detail_reads_shop_id() {
        let detail: AccountDetail = serde_json::from_value(serde_json::json!({
            "email": "seller@example.com",
            "shopInfo": {"_id": "shop-1", "name": "Loja"}
        }))
        .unwrap();
        assert_eq!(detail.shop_info.id, "shop-1");
        assert_eq!(detail.shop_info.name.as_deref(), Some("Loja"));
    }

    #[test]
    fn product_list_accepts_both_shapes() {
        let row = serde_json::json!({"_id": "p1", "name": "Camiseta", "status": 0});
        let bare: ProductListResponse =
            serde_json::from_value(serde_json::json!([row.clone()])).unwrap();
        assert_eq!(bare.into_items().len(), 1);

        let wrapped: ProductListResponse =
            serde_json::from_value(serde_json::json!({"products": [row]})).unwrap();
        assert_eq!(wrapped.into_items()[0].id, "p1");
    }
}

//! Product listing: summaries, name search and the active/inactive toggle.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Whether a product is offered in the storefront. Encoded on the wire as
/// `0` (active) / `1` (inactive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl TryFrom<u8> for ProductStatus {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Active),
            1 => Ok(Self::Inactive),
            other => Err(CoreError::InvalidStatus(other)),
        }
    }
}

impl From<ProductStatus> for u8 {
    fn from(status: ProductStatus) -> Self {
        match status {
            ProductStatus::Active => 0,
            ProductStatus::Inactive => 1,
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// One row of the product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub status: ProductStatus,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    /// Registration date as the server formats it.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "value")]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductSummary {
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Case-insensitive substring search on product names. A blank search
/// matches everything.
#[must_use]
pub fn filter_by_name<'a>(items: &'a [ProductSummary], search: &str) -> Vec<&'a ProductSummary> {
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Flips the status of the product with `id`, returning its new status.
pub fn toggle_status(items: &mut [ProductSummary], id: &str) -> Option<ProductStatus> {
    let item = items.iter_mut().find(|p| p.id == id)?;
    item.status = item.status.toggled();
    Some(item.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str) -> ProductSummary {
        ProductSummary {
            id: id.to_string(),
            status: ProductStatus::Active,
            name: name.to_string(),
            brand: "Marca".to_string(),
            sku: format!("SKU-{id}"),
            date: None,
            price: 10.0,
            stock: 0,
            image: None,
        }
    }

    #[test]
    fn filter_is_case_insensitive() {
        let items = vec![
            summary("1", "Camiseta Azul"),
            summary("2", "Calça Jeans"),
            summary("3", "camiseta verde"),
        ];
        let found: Vec<&str> = filter_by_name(&items, "CAMISETA")
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(found, vec!["1", "3"]);
    }

    #[test]
    fn blank_search_matches_all() {
        let items = vec![summary("1", "A"), summary("2", "B")];
        assert_eq!(filter_by_name(&items, "  ").len(), 2);
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let mut items = vec![summary("1", "A"), summary("2", "B")];
        assert_eq!(toggle_status(&mut items, "2"), Some(ProductStatus::Inactive));
        assert_eq!(items[0].status, ProductStatus::Active);
        assert_eq!(toggle_status(&mut items, "2"), Some(ProductStatus::Active));
        assert_eq!(toggle_status(&mut items, "missing"), None);
    }

    #[test]
    fn status_wire_codes() {
        let s: ProductSummary = serde_json::from_value(serde_json::json!({
            "_id": "p1", "name": "A", "status": 1, "value": 19.9, "stock": 3
        }))
        .unwrap();
        assert_eq!(s.status, ProductStatus::Inactive);
        assert!((s.price - 19.9).abs() < f64::EPSILON);
        assert!(s.in_stock());

        let bad = serde_json::from_value::<ProductSummary>(serde_json::json!({
            "_id": "p1", "name": "A", "status": 7
        }));
        assert!(bad.is_err());
    }
}

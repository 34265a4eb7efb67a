use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::attributes::AttributeProfile;

/// Target audience selected on the product form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "U")]
    Unisex,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
            Gender::Unisex => write!(f, "U"),
        }
    }
}

/// Where a product sits in the catalog tree. Chosen before the editor opens
/// and carried unchanged into the submitted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPlacement {
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub nationality: String,
}

/// One SKU-level row of the variations table.
///
/// `id` is present only once the server has created the variation; rows
/// added in the editor start without one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariationDraft {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gluten_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lactose_free: Option<bool>,
}

impl VariationDraft {
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// The descriptive value the profile keys this row on: `color` or
    /// `flavor`, never the other one.
    #[must_use]
    pub fn descriptor(&self, profile: AttributeProfile) -> Option<&str> {
        match profile {
            AttributeProfile::Color => self.color.as_deref(),
            AttributeProfile::Flavor => self.flavor.as_deref(),
        }
    }

    /// Copy of this row without its server id, as sent in create/update bodies.
    #[must_use]
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

/// The editable state of the product form. Every field may be blank while
/// the seller is still typing; [`crate::ProductSchema::validate`] turns a
/// draft into a [`crate::ValidatedProduct`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub ean: Option<String>,
    /// Blank until chosen; the create form starts at [`Gender::Male`].
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Package height in centimetres.
    #[serde(default)]
    pub height: Option<f64>,
    /// Package width in centimetres.
    #[serde(default)]
    pub width: Option<f64>,
    /// Package length in centimetres.
    #[serde(default)]
    pub length: Option<f64>,
    /// Total weight in grams.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price_discounted: Option<Decimal>,
    #[serde(default)]
    pub variations: Vec<VariationDraft>,
}

impl ProductDraft {
    /// A fresh create-flow draft: one empty variation row, nothing else.
    #[must_use]
    pub fn new_with_variation() -> Self {
        Self {
            gender: Some(Gender::default()),
            variations: vec![VariationDraft::default()],
            ..Self::default()
        }
    }

    /// A blank discounted price falls back to the full price at submission.
    pub fn default_discount_to_price(&mut self) {
        if self.price_discounted.is_none() {
            self.price_discounted = self.price;
        }
    }
}

/// Product as returned by `GET /product/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price_discounted: Option<Decimal>,
    /// The server may hand back `null` or empty slots; see [`ProductRecord::image_urls`].
    #[serde(default)]
    pub images: Vec<Option<String>>,
    #[serde(default)]
    pub variations: Vec<VariationDraft>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub nationality: String,
}

impl ProductRecord {
    /// Image URLs with `null` and empty entries dropped.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        self.images
            .iter()
            .flatten()
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn placement(&self) -> CatalogPlacement {
        CatalogPlacement {
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            nationality: self.nationality.clone(),
        }
    }

    /// Splits the record into the form state the editor works on.
    #[must_use]
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            brand: self.brand,
            description: self.description,
            sku: self.sku,
            ean: self.ean,
            gender: Some(self.gender),
            height: self.height,
            width: self.width,
            length: self.length,
            weight: self.weight,
            price: self.price,
            price_discounted: self.price_discounted,
            variations: self.variations,
        }
    }
}

/// Body of `POST /product` and `PATCH /product/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub category: String,
    pub subcategory: String,
    pub nationality: String,
    pub name: String,
    pub description: String,
    pub brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ean: Option<String>,
    pub sku: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    pub weight: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_discounted: Option<Decimal>,
    pub images: Vec<String>,
    /// Embedded only on create; the edit flow reconciles variations through
    /// their own endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<VariationDraft>>,
}

/// Accepts `"M"`, `42` and `42.5` alike; sizes are free text on the form but
/// numeric sizes round-trip through the API as numbers.
fn de_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}

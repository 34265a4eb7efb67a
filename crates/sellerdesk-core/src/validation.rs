//! Structural validation of a product draft.
//!
//! [`ProductSchema`] is built once per attribute set and flow. Validation
//! never stops at the first problem: every violation is collected as a
//! [`FieldError`] keyed by the form path it belongs to, so the surface can
//! highlight each failing input.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::attributes::{Attribute, AttributeProfile};
use crate::policy::ImageBounds;
use crate::product::{CatalogPlacement, Gender, ProductDraft, ProductPayload, VariationDraft};

const REQUIRED: &str = "Required field";
const MIN_TEXT_LEN: usize = 2;
const MIN_DIMENSION_CM: f64 = 10.0;

/// A single violation, e.g. `variations[1].stock: Minimum value 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages recorded for one field path, in rule order.
    #[must_use]
    pub fn messages_for(&self, path: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.path == path)
            .map(|e| e.message.as_str())
            .collect()
    }

    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }

    /// Path → messages, the shape a form surface binds field errors from.
    #[must_use]
    pub fn by_path(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for e in &self.errors {
            map.entry(e.path.clone())
                .or_default()
                .push(e.message.clone());
        }
        map
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// A draft that passed [`ProductSchema::validate`]; required fields are no
/// longer optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub sku: String,
    pub ean: Option<String>,
    pub gender: Gender,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub weight: f64,
    pub price: Decimal,
    pub price_discounted: Option<Decimal>,
    pub variations: Vec<VariationDraft>,
}

impl ValidatedProduct {
    /// Assembles the aggregate record. Variations are embedded (without ids)
    /// only when `embed_variations` is set, i.e. on create.
    #[must_use]
    pub fn into_payload(
        self,
        placement: &CatalogPlacement,
        images: Vec<String>,
        embed_variations: bool,
    ) -> ProductPayload {
        let variations = embed_variations.then(|| {
            self.variations
                .iter()
                .map(VariationDraft::without_id)
                .collect()
        });
        ProductPayload {
            category: placement.category.clone(),
            subcategory: placement.subcategory.clone(),
            nationality: placement.nationality.clone(),
            name: self.name,
            description: self.description,
            brand: self.brand,
            ean: self.ean.filter(|e| !e.trim().is_empty()),
            sku: self.sku,
            gender: self.gender,
            height: self.height,
            width: self.width,
            length: self.length,
            weight: self.weight,
            price: self.price,
            price_discounted: self.price_discounted,
            images,
            variations,
        }
    }
}

/// Validation rules for one attribute profile and image policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSchema {
    profile: AttributeProfile,
    images: ImageBounds,
}

impl ProductSchema {
    #[must_use]
    pub fn new(profile: AttributeProfile, images: ImageBounds) -> Self {
        Self { profile, images }
    }

    /// Selects the profile from the resolved attribute set.
    #[must_use]
    pub fn for_attributes(attributes: &[Attribute], images: ImageBounds) -> Self {
        Self::new(AttributeProfile::from_attributes(attributes), images)
    }

    #[must_use]
    pub fn profile(&self) -> AttributeProfile {
        self.profile
    }

    #[must_use]
    pub fn image_bounds(&self) -> ImageBounds {
        self.images
    }

    /// Field names every variation must carry: `size`, the profile field, `stock`.
    #[must_use]
    pub fn required_variation_fields(&self) -> [&'static str; 3] {
        ["size", self.profile.field_name(), "stock"]
    }

    /// Checks `draft` against every rule and collects all violations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each failing field when any rule
    /// is violated.
    pub fn validate(
        &self,
        draft: &ProductDraft,
        image_count: usize,
    ) -> Result<ValidatedProduct, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if image_count < self.images.min {
            errors.push(
                "images",
                if self.images.min == 1 {
                    "Choose at least one image".to_string()
                } else {
                    format!("Choose at least {} images", self.images.min)
                },
            );
        } else if image_count > self.images.max {
            errors.push(
                "images",
                format!("At most {} images are allowed", self.images.max),
            );
        }

        let name = required_text(&mut errors, "name", draft.name.as_deref());
        let description = required_text(&mut errors, "description", draft.description.as_deref());
        let brand = required_text(&mut errors, "brand", draft.brand.as_deref());
        let sku = required_text(&mut errors, "sku", draft.sku.as_deref());

        for (path, value) in [
            ("height", draft.height),
            ("width", draft.width),
            ("length", draft.length),
        ] {
            optional_dimension(&mut errors, path, value);
        }

        let weight = match draft.weight {
            None => {
                errors.push("weight", REQUIRED);
                None
            }
            Some(w) if !w.is_finite() => {
                errors.push("weight", "Must be a number");
                None
            }
            Some(w) => Some(w),
        };

        let price = match draft.price {
            None => {
                errors.push("price", REQUIRED);
                None
            }
            Some(p) if p.is_sign_negative() && !p.is_zero() => {
                errors.push("price", "Minimum value of R$ 0");
                None
            }
            Some(p) => Some(p),
        };

        if let Some(discounted) = draft.price_discounted {
            if discounted.is_sign_negative() && !discounted.is_zero() {
                errors.push("price_discounted", "Minimum value of R$ 0");
            } else if let Some(p) = draft.price {
                if discounted > p {
                    errors.push("price_discounted", format!("Maximum value of R$ {p}"));
                }
            }
        }

        if draft.variations.is_empty() {
            errors.push("variations", "At least one variation is required");
        }
        for (i, variation) in draft.variations.iter().enumerate() {
            self.validate_variation(&mut errors, i, variation);
        }

        match (name, description, brand, sku, weight, price) {
            (Some(name), Some(description), Some(brand), Some(sku), Some(weight), Some(price))
                if errors.is_empty() =>
            {
                Ok(ValidatedProduct {
                    name,
                    brand,
                    description,
                    sku,
                    ean: draft.ean.clone(),
                    gender: draft.gender.unwrap_or_default(),
                    height: draft.height,
                    width: draft.width,
                    length: draft.length,
                    weight,
                    price,
                    price_discounted: draft.price_discounted,
                    variations: draft.variations.clone(),
                })
            }
            _ => Err(errors),
        }
    }

    fn validate_variation(
        &self,
        errors: &mut ValidationErrors,
        index: usize,
        variation: &VariationDraft,
    ) {
        let path = |field: &str| format!("variations[{index}].{field}");

        if is_blank(variation.size.as_deref()) {
            errors.push(path("size"), REQUIRED);
        }

        if is_blank(variation.descriptor(self.profile)) {
            errors.push(path(self.profile.field_name()), REQUIRED);
        }

        match variation.stock {
            None => errors.push(path("stock"), REQUIRED),
            Some(stock) if stock < 0 => errors.push(path("stock"), "Minimum value 0"),
            Some(_) => {}
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn required_text(errors: &mut ValidationErrors, path: &str, value: Option<&str>) -> Option<String> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        errors.push(path, REQUIRED);
        return None;
    };
    if value.chars().count() < MIN_TEXT_LEN {
        errors.push(path, format!("Must contain at least {MIN_TEXT_LEN} characters"));
        return None;
    }
    Some(value.to_string())
}

fn optional_dimension(errors: &mut ValidationErrors, path: &str, value: Option<f64>) {
    match value {
        Some(v) if !v.is_finite() => errors.push(path, "Must be a number"),
        Some(v) if v < MIN_DIMENSION_CM => errors.push(path, "Minimum of 10cm"),
        _ => {}
    }
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;

//! Form-completeness counter gating product submission.
//!
//! The required-field set is declarative: a fixed list of product-level
//! descriptors plus a per-variation list derived from the resolved
//! attributes. One generic pass counts both `filled` and `total`, so the
//! total can never lag behind the variations or attributes it depends on.

use crate::attributes::{special_attributes, Attribute, AttributeProfile, SpecialAttribute};
use crate::product::{ProductDraft, VariationDraft};

/// Product-level fields that must be present before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Brand,
    Description,
    Sku,
    Height,
    Width,
    Length,
    Weight,
    Price,
    /// At least one image in the set.
    Images,
}

pub const PRODUCT_FIELDS: [ProductField; 10] = [
    ProductField::Name,
    ProductField::Brand,
    ProductField::Description,
    ProductField::Sku,
    ProductField::Height,
    ProductField::Width,
    ProductField::Length,
    ProductField::Weight,
    ProductField::Price,
    ProductField::Images,
];

impl ProductField {
    fn is_filled(self, draft: &ProductDraft, image_count: usize) -> bool {
        match self {
            Self::Name => has_text(draft.name.as_deref()),
            Self::Brand => has_text(draft.brand.as_deref()),
            Self::Description => has_text(draft.description.as_deref()),
            Self::Sku => has_text(draft.sku.as_deref()),
            Self::Height => draft.height.is_some(),
            Self::Width => draft.width.is_some(),
            Self::Length => draft.length.is_some(),
            Self::Weight => draft.weight.is_some(),
            Self::Price => draft.price.is_some(),
            Self::Images => image_count > 0,
        }
    }
}

/// How special attributes (`gluten_free`, `lactose_free`) count toward `filled`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributeCounting {
    /// The attribute being declared for the category is enough; an unticked
    /// checkbox is still an answer.
    #[default]
    DefinitionPresence,
    /// The variation must carry an explicit value for the attribute.
    ValuePresence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationField {
    Size,
    Stock,
    Descriptor(AttributeProfile),
    Special(SpecialAttribute),
}

/// One per-variation entry of the required-field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariationRequirement {
    pub field: VariationField,
    counting: AttributeCounting,
}

impl VariationRequirement {
    fn is_met(self, variation: &VariationDraft) -> bool {
        match self.field {
            VariationField::Size => has_text(variation.size.as_deref()),
            VariationField::Stock => variation.stock.is_some(),
            VariationField::Descriptor(AttributeProfile::Color) => {
                has_text(variation.color.as_deref())
            }
            VariationField::Descriptor(AttributeProfile::Flavor) => {
                has_text(variation.flavor.as_deref())
            }
            VariationField::Special(special) => match self.counting {
                AttributeCounting::DefinitionPresence => true,
                AttributeCounting::ValuePresence => match special {
                    SpecialAttribute::GlutenFree => variation.gluten_free.is_some(),
                    SpecialAttribute::LactoseFree => variation.lactose_free.is_some(),
                },
            },
        }
    }
}

/// Builds the per-variation required-field list for an attribute set.
#[must_use]
pub fn variation_requirements(
    attributes: &[Attribute],
    counting: AttributeCounting,
) -> Vec<VariationRequirement> {
    let profile = AttributeProfile::from_attributes(attributes);
    let base = [
        VariationField::Size,
        VariationField::Stock,
        VariationField::Descriptor(profile),
    ];
    base.into_iter()
        .chain(
            special_attributes(attributes)
                .into_iter()
                .map(VariationField::Special),
        )
        .map(|field| VariationRequirement { field, counting })
        .collect()
}

/// `filled` out of `total` required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletenessState {
    pub filled: usize,
    pub total: usize,
}

impl CompletenessState {
    /// Submission is allowed iff every required field is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled >= self.total
    }

    #[must_use]
    pub fn missing(&self) -> usize {
        self.total.saturating_sub(self.filled)
    }
}

impl std::fmt::Display for CompletenessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.filled, self.total)
    }
}

/// Counts filled and required fields for the current form state.
///
/// An empty variation list still demands one row's worth of fields, so a
/// product without variations never reads as complete.
#[must_use]
pub fn completeness(
    draft: &ProductDraft,
    image_count: usize,
    attributes: &[Attribute],
    counting: AttributeCounting,
) -> CompletenessState {
    let per_variation = variation_requirements(attributes, counting);
    let rows = draft.variations.len().max(1);
    let total = PRODUCT_FIELDS.len() + rows * per_variation.len();

    let product_filled = PRODUCT_FIELDS
        .iter()
        .filter(|field| field.is_filled(draft, image_count))
        .count();
    let variations_filled: usize = draft
        .variations
        .iter()
        .map(|v| per_variation.iter().filter(|req| req.is_met(v)).count())
        .sum();

    CompletenessState {
        filled: product_filled + variations_filled,
        total,
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn filled_draft(variations: Vec<VariationDraft>) -> ProductDraft {
        ProductDraft {
            name: Some("Camiseta".to_string()),
            brand: Some("Marca".to_string()),
            description: Some("Algodão orgânico".to_string()),
            sku: Some("CAM-001".to_string()),
            height: Some(10.0),
            width: Some(20.0),
            length: Some(30.0),
            weight: Some(250.0),
            price: Some(Decimal::new(5990, 2)),
            variations,
            ..ProductDraft::default()
        }
    }

    fn red_m() -> VariationDraft {
        VariationDraft {
            size: Some("M".to_string()),
            color: Some("Red".to_string()),
            stock: Some(5),
            ..VariationDraft::default()
        }
    }

    #[test]
    fn complete_create_form_reaches_total() {
        let draft = filled_draft(vec![red_m()]);
        let state = completeness(&draft, 2, &[], AttributeCounting::default());
        assert_eq!(state, CompletenessState { filled: 13, total: 13 });
        assert!(state.is_complete());
    }

    #[test]
    fn empty_form_counts_nothing() {
        let draft = ProductDraft::new_with_variation();
        let state = completeness(&draft, 0, &[], AttributeCounting::default());
        assert_eq!(state.filled, 0);
        assert_eq!(state.total, 13);
        assert!(!state.is_complete());
        assert_eq!(state.missing(), 13);
    }

    #[test]
    fn zero_variations_still_require_one_row() {
        let draft = filled_draft(vec![]);
        let state = completeness(&draft, 2, &[], AttributeCounting::default());
        assert_eq!(state.total, 13);
        assert_eq!(state.filled, 10);
        assert!(!state.is_complete());
    }

    #[test]
    fn adding_a_variation_raises_total_in_the_same_pass() {
        let mut draft = filled_draft(vec![red_m()]);
        let before = completeness(&draft, 2, &[], AttributeCounting::default());
        draft.variations.push(VariationDraft::default());
        let after = completeness(&draft, 2, &[], AttributeCounting::default());
        assert_eq!(after.total, before.total + 3);
        assert_eq!(after.filled, before.filled);
        assert!(!after.is_complete());
    }

    #[test]
    fn stock_of_zero_counts_as_filled() {
        let mut v = red_m();
        v.stock = Some(0);
        let state = completeness(&filled_draft(vec![v]), 2, &[], AttributeCounting::default());
        assert!(state.is_complete());
    }

    #[test]
    fn flavor_profile_ignores_color() {
        let attrs = vec![Attribute::named("flavor")];
        let state = completeness(
            &filled_draft(vec![red_m()]),
            2,
            &attrs,
            AttributeCounting::default(),
        );
        assert_eq!(state.total, 13);
        assert_eq!(state.filled, 12, "color must not stand in for flavor");

        let mut v = red_m();
        v.color = None;
        v.flavor = Some("Uva".to_string());
        let state = completeness(&filled_draft(vec![v]), 2, &attrs, AttributeCounting::default());
        assert!(state.is_complete());
    }

    #[test]
    fn special_attributes_count_by_definition_by_default() {
        let attrs = vec![
            Attribute::named("gluten_free"),
            Attribute::named("lactose_free"),
        ];
        let state = completeness(
            &filled_draft(vec![red_m(), red_m()]),
            1,
            &attrs,
            AttributeCounting::DefinitionPresence,
        );
        assert_eq!(state.total, 10 + 2 * 5);
        assert!(state.is_complete());
    }

    #[test]
    fn value_presence_requires_explicit_flags() {
        let attrs = vec![Attribute::named("gluten_free")];
        let draft = filled_draft(vec![red_m()]);
        let state = completeness(&draft, 1, &attrs, AttributeCounting::ValuePresence);
        assert_eq!(state, CompletenessState { filled: 13, total: 14 });

        let mut v = red_m();
        v.gluten_free = Some(false);
        let state = completeness(
            &filled_draft(vec![v]),
            1,
            &attrs,
            AttributeCounting::ValuePresence,
        );
        assert!(state.is_complete());
    }

    #[test]
    fn blank_text_is_not_filled() {
        let mut draft = filled_draft(vec![red_m()]);
        draft.name = Some("   ".to_string());
        let state = completeness(&draft, 2, &[], AttributeCounting::default());
        assert_eq!(state.filled, 12);
    }

    #[test]
    fn missing_images_block_completion() {
        let state = completeness(
            &filled_draft(vec![red_m()]),
            0,
            &[],
            AttributeCounting::default(),
        );
        assert_eq!(state.missing(), 1);
    }

    #[test]
    fn display_renders_progress_label() {
        let state = CompletenessState { filled: 7, total: 13 };
        assert_eq!(state.to_string(), "7/13");
    }
}

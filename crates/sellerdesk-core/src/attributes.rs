//! Category-scoped attribute definitions and what they imply for the form.
//!
//! Attributes are declared by the server per category and never edited in a
//! session. Two facts are derived from them: the [`AttributeProfile`] (which
//! descriptive field every variation must carry) and the list of
//! [`SpecialAttribute`]s that add per-variation fields to the completeness
//! count.

use serde::{Deserialize, Serialize};

/// A server-declared attribute, e.g. `flavor` or `gluten_free`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Attribute {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            kind: None,
        }
    }
}

/// Which descriptive field a category's variations are keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeProfile {
    Color,
    Flavor,
}

impl AttributeProfile {
    /// `Flavor` iff the set declares an attribute named `flavor`.
    #[must_use]
    pub fn from_attributes(attributes: &[Attribute]) -> Self {
        if attributes.iter().any(|a| a.name == "flavor") {
            Self::Flavor
        } else {
            Self::Color
        }
    }

    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Flavor => "flavor",
        }
    }
}

/// Attributes that add a boolean field to every variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialAttribute {
    GlutenFree,
    LactoseFree,
}

impl SpecialAttribute {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gluten_free" => Some(Self::GlutenFree),
            "lactose_free" => Some(Self::LactoseFree),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GlutenFree => "gluten_free",
            Self::LactoseFree => "lactose_free",
        }
    }
}

/// Special attributes in declaration order, one entry per declaration.
#[must_use]
pub fn special_attributes(attributes: &[Attribute]) -> Vec<SpecialAttribute> {
    attributes
        .iter()
        .filter_map(|a| SpecialAttribute::from_name(&a.name))
        .collect()
}

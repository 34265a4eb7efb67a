pub mod app_config;
pub mod attributes;
pub mod completeness;
pub mod config;
pub mod display;
pub mod draft_file;
pub mod error;
pub mod image_file;
pub mod listing;
pub mod policy;
pub mod product;
pub mod validation;

pub use app_config::{AppConfig, Environment};
pub use attributes::{Attribute, AttributeProfile, SpecialAttribute};
pub use completeness::{completeness, AttributeCounting, CompletenessState};
pub use config::{load_app_config, load_app_config_from_env};
pub use draft_file::{load_draft_file, DraftFile};
pub use error::{ConfigError, CoreError};
pub use image_file::ImageFile;
pub use listing::{filter_by_name, ProductStatus, ProductSummary};
pub use policy::{FlowKind, ImageBounds, ImagePolicy};
pub use product::{
    CatalogPlacement, Gender, ProductDraft, ProductPayload, ProductRecord, VariationDraft,
};
pub use validation::{FieldError, ProductSchema, ValidatedProduct, ValidationErrors};

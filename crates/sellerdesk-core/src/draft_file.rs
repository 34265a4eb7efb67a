use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::product::{CatalogPlacement, ProductDraft};
use crate::ConfigError;

/// A product draft authored as YAML, for driving the editor headlessly.
///
/// ```yaml
/// placement:
///   category: "60f1c0"
///   subcategory: "60f1c1"
///   nationality: "1"
/// product:
///   name: Camiseta
///   price: 59.9
///   variations:
///     - { size: M, color: Red, stock: 5 }
/// images:
///   - photos/front.jpg
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DraftFile {
    /// Required on create; on edit the stored placement is kept.
    #[serde(default)]
    pub placement: Option<CatalogPlacement>,
    pub product: ProductDraft,
    /// New image files, relative to the draft file's directory.
    #[serde(default)]
    pub images: Vec<PathBuf>,
    /// Persisted image URLs to drop (edit only).
    #[serde(default)]
    pub remove_images: Vec<String>,
}

/// Load and sanity-check a YAML draft file. Image paths are resolved
/// against the file's own directory.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_draft_file(path: &Path) -> Result<DraftFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DraftFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut draft: DraftFile = serde_yaml::from_str(&content)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    draft.images = draft
        .images
        .into_iter()
        .map(|p| if p.is_absolute() { p } else { base.join(p) })
        .collect();

    validate_draft_file(&draft)?;
    Ok(draft)
}

fn validate_draft_file(draft: &DraftFile) -> Result<(), ConfigError> {
    if let Some(placement) = &draft.placement {
        if placement.category.trim().is_empty() {
            return Err(ConfigError::Validation(
                "placement.category must be non-empty".to_string(),
            ));
        }
    }

    let mut seen = HashSet::new();
    for image in &draft.images {
        if !seen.insert(image) {
            return Err(ConfigError::Validation(format!(
                "image listed twice: {}",
                image.display()
            )));
        }
    }

    Ok(())
}

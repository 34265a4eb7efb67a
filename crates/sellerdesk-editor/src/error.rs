use sellerdesk_catalog::CatalogError;
use sellerdesk_core::ValidationErrors;
use thiserror::Error;

/// An image rejected at acceptance time. Rejected files never enter the
/// pending set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceLimitError {
    #[error("at most {max} images are allowed")]
    TooMany { max: usize },

    #[error("{file_name} is {size} bytes; the limit is {limit} bytes")]
    TooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },
}

/// The server write that failed during persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStep {
    CreateProduct,
    UpdateProduct { product_id: String },
    DeleteVariation { variation_id: String },
    UpdateVariation { variation_id: String },
    CreateVariation { index: usize },
}

impl std::fmt::Display for PersistStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistStep::CreateProduct => write!(f, "create product"),
            PersistStep::UpdateProduct { product_id } => write!(f, "update product {product_id}"),
            PersistStep::DeleteVariation { variation_id } => {
                write!(f, "delete variation {variation_id}")
            }
            PersistStep::UpdateVariation { variation_id } => {
                write!(f, "update variation {variation_id}")
            }
            PersistStep::CreateVariation { index } => write!(f, "create variation #{index}"),
        }
    }
}

/// Errors surfaced by an editor session. None of them end the session.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The completeness gate is closed.
    #[error("form incomplete: {filled}/{total} required fields filled")]
    Incomplete { filled: usize, total: usize },

    #[error("image upload failed: {0}")]
    Upload(#[source] CatalogError),

    #[error("image upload returned {received} URLs for {sent} files")]
    UploadMismatch { sent: usize, received: usize },

    /// A server write failed. Writes before it are not rolled back.
    #[error("failed to {step}: {source}")]
    Persistence {
        step: PersistStep,
        #[source]
        source: CatalogError,
    },

    #[error(transparent)]
    ResourceLimit(#[from] ResourceLimitError),

    /// Could not load the product or account the session depends on.
    #[error("catalog request failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("a submission is already in progress")]
    Busy,

    #[error("the product was already submitted")]
    Closed,

    #[error("variation index {index} out of range (len {len})")]
    VariationIndex { index: usize, len: usize },

    #[error("the first variation cannot be deleted")]
    FirstVariationFixed,

    #[error("the edit flow needs a product id")]
    MissingProductId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Success,
    Warning,
    Error,
}

/// What a surface shows the seller after an action: a title and one or more
/// lines of detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalMessage {
    pub kind: ModalKind,
    pub title: String,
    pub message: Vec<String>,
}

impl ModalMessage {
    #[must_use]
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: ModalKind::Success,
            title: title.to_string(),
            message: vec![message.to_string()],
        }
    }
}

impl EditorError {
    /// Maps the error to the message shown to the seller.
    #[must_use]
    pub fn to_modal(&self) -> ModalMessage {
        let (kind, title, message) = match self {
            EditorError::Validation(errors) => (
                ModalKind::Warning,
                "Check the highlighted fields",
                errors.iter().map(ToString::to_string).collect(),
            ),
            EditorError::Incomplete { filled, total } => (
                ModalKind::Warning,
                "Fill in all required fields",
                vec![format!("{filled}/{total} required fields filled")],
            ),
            EditorError::ResourceLimit(err) => {
                (ModalKind::Warning, "Image not accepted", vec![err.to_string()])
            }
            EditorError::Upload(_) | EditorError::UploadMismatch { .. } => (
                ModalKind::Error,
                "Image upload failed",
                vec![
                    self.to_string(),
                    "Your changes were kept; submit again to retry.".to_string(),
                ],
            ),
            EditorError::Persistence { .. } => (
                ModalKind::Error,
                "Could not save the product",
                vec![
                    self.to_string(),
                    "Steps that already succeeded were kept; submit again to resume.".to_string(),
                ],
            ),
            EditorError::Busy => (
                ModalKind::Warning,
                "Please wait",
                vec![self.to_string()],
            ),
            EditorError::Closed
            | EditorError::VariationIndex { .. }
            | EditorError::FirstVariationFixed
            | EditorError::MissingProductId => {
                (ModalKind::Warning, "Action not allowed", vec![self.to_string()])
            }
            EditorError::Catalog(_) => {
                (ModalKind::Error, "Something went wrong", vec![self.to_string()])
            }
        };
        ModalMessage {
            kind,
            title: title.to_string(),
            message,
        }
    }
}

pub mod attributes;
pub mod error;
pub mod images;
pub mod previews;
pub mod session;
pub mod submission;
pub mod variations;

pub use attributes::AttributeResolver;
pub use error::{EditorError, ModalKind, ModalMessage, PersistStep, ResourceLimitError};
pub use images::{AcceptReport, ImageRef, ImageSet};
pub use previews::{PreviewHandle, PreviewStore};
pub use session::{EditorSession, SubmitOutcome};
pub use submission::{SubmissionGuard, SubmissionPhase, SubmissionTracker};
pub use variations::VariationList;

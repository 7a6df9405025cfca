pub mod document;
pub mod listing;
pub mod repository;

pub use document::Document;
pub use repository::{Collection, DocumentStore};

/// Failures raised by a document store backend.
///
/// The variants only matter to operators reading logs; clients always see the
/// same generic message per resource.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Store request timed out: {0}")]
    Timeout(String),
    #[error("Malformed document: {0}")]
    Decode(String),
    #[error("Store error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

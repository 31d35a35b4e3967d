//! Upload error types.

use thiserror::Error;
use twynup_shared::AppError;

use crate::storage::StorageError;

/// Reasons an upload request fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Context identifier is not in the policy table.
    #[error("Invalid upload context")]
    UnknownContext,

    /// Content type is not accepted by the context.
    #[error("Invalid file type")]
    DisallowedContentType,
}

/// Upload authorization errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Request rejected by the policy table.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Object storage is not configured for this deployment.
    #[error("object storage is not configured")]
    NotConfigured,

    /// Storage signer failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl UploadError {
    /// Message returned to callers when storage is not configured.
    pub const NOT_CONFIGURED_MESSAGE: &'static str = "AWS not configured";
    /// Message returned to callers when signing fails.
    pub const SIGNING_FAILED_MESSAGE: &'static str = "Presign failed";
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Validation(reason) => Self::Validation(reason.to_string()),
            UploadError::NotConfigured | UploadError::Storage(StorageError::Configuration(_)) => {
                Self::Configuration(UploadError::NOT_CONFIGURED_MESSAGE.to_string())
            }
            UploadError::Storage(_) => {
                Self::ExternalService(UploadError::SIGNING_FAILED_MESSAGE.to_string())
            }
        }
    }
}

//! Upload authorization service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::UploadError;
use super::key::ObjectKey;
use super::policy::UploadContext;
use super::validation::validate;
use crate::storage::StorageService;

/// Request for an upload authorization.
#[derive(Debug, Clone, Default)]
pub struct RequestUploadInput {
    /// Upload context identifier, e.g. `profile_dp`.
    pub context: String,
    /// MIME type the client will upload.
    pub content_type: String,
}

/// A transient credential permitting one PUT of one object.
#[derive(Debug, Clone)]
pub struct UploadAuthorization {
    /// Context the upload was authorized for.
    pub context: UploadContext,
    /// Storage key the object will be written to.
    pub key: ObjectKey,
    /// Presigned upload URL.
    pub upload_url: String,
    /// HTTP method to use (PUT).
    pub upload_method: String,
    /// Headers the upload must carry.
    pub upload_headers: HashMap<String, String>,
    /// Address the object is served from after upload.
    pub public_url: String,
    /// Lifetime of `upload_url` in seconds.
    pub expires_in_secs: u64,
    /// When `upload_url` stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Issues upload authorizations.
///
/// Storage is optional so that a deployment missing its bucket settings can
/// still reject invalid requests with client errors.
pub struct UploadService {
    storage: Option<Arc<StorageService>>,
}

impl UploadService {
    /// Create a new upload service.
    #[must_use]
    pub fn new(storage: Option<Arc<StorageService>>) -> Self {
        Self { storage }
    }

    /// Validate the request and mint a presigned upload URL for a fresh key.
    ///
    /// Validation runs before the storage check, so invalid requests never
    /// reach the signer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The context or content type is not allowed
    /// - Storage is not configured
    /// - Signing fails
    pub async fn request_upload(
        &self,
        input: &RequestUploadInput,
    ) -> Result<UploadAuthorization, UploadError> {
        let validated = validate(&input.context, &input.content_type)?;

        let storage = self.storage.as_deref().ok_or(UploadError::NotConfigured)?;

        let key = validated.object_key();

        let presigned = storage
            .presign_upload(key.as_str(), validated.content_type())
            .await?;
        let public_url = storage.public_url(key.as_str());

        Ok(UploadAuthorization {
            context: validated.context(),
            key,
            upload_url: presigned.url,
            upload_method: presigned.method,
            upload_headers: presigned.headers,
            public_url,
            expires_in_secs: storage.config().presign_upload_ttl_secs,
            expires_at: presigned.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageConfig;
    use crate::upload::ValidationError;

    fn configured() -> UploadService {
        let config = StorageConfig::new("us-east-1", "mybucket", "AKIDEXAMPLE", "secret");
        let storage = StorageService::from_config(config).expect("should create service");
        UploadService::new(Some(Arc::new(storage)))
    }

    fn input(context: &str, content_type: &str) -> RequestUploadInput {
        RequestUploadInput {
            context: context.to_string(),
            content_type: content_type.to_string(),
        }
    }

    #[tokio::test]
    async fn test_request_upload_profile_picture() {
        let auth = configured()
            .request_upload(&input("profile_dp", "image/png"))
            .await
            .expect("should authorize");

        assert_eq!(auth.context, UploadContext::ProfileDp);
        assert!(auth.key.as_str().starts_with("profile/profile-dp/"));
        assert!(auth.key.as_str().ends_with(".png"));
        assert_eq!(
            auth.public_url,
            format!("https://mybucket.s3.us-east-1.amazonaws.com/{}", auth.key)
        );
        assert_eq!(auth.upload_method, "PUT");
        assert_eq!(auth.expires_in_secs, 300);
        assert!(auth.upload_url.contains(auth.key.as_str()));
    }

    #[tokio::test]
    async fn test_repeated_requests_get_distinct_keys() {
        let service = configured();
        let request = input("post_video", "video/mp4");
        let a = service.request_upload(&request).await.expect("first");
        let b = service.request_upload(&request).await.expect("second");
        assert_ne!(a.key, b.key);
        assert_ne!(a.public_url, b.public_url);
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_storage_check() {
        let service = UploadService::new(None);

        let err = service
            .request_upload(&input("post_video", "image/png"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UploadError::Validation(ValidationError::DisallowedContentType)
        ));

        let err = service
            .request_upload(&input("not_a_real_context", "image/png"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UploadError::Validation(ValidationError::UnknownContext)
        ));
    }

    #[tokio::test]
    async fn test_valid_request_without_storage_is_not_configured() {
        let err = UploadService::new(None)
            .request_upload(&input("profile_dp", "image/png"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::NotConfigured));
    }
}

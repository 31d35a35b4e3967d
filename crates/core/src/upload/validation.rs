//! Upload request validation.

use super::error::ValidationError;
use super::key::{ObjectKey, build_key};
use super::policy::{UploadContext, lookup};

/// A (context, content type) pair accepted by the policy table.
///
/// Only [`validate`] constructs this, so holding one proves the pair is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedUpload {
    context: UploadContext,
    content_type: &'static str,
}

impl ValidatedUpload {
    /// The validated upload context.
    #[must_use]
    pub const fn context(&self) -> UploadContext {
        self.context
    }

    /// The validated content type, as spelled in the policy table.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Derive a fresh object key for this upload.
    #[must_use]
    pub fn object_key(&self) -> ObjectKey {
        build_key(self.context, self.content_type)
    }
}

/// Check a requested context and content type against the policy table.
///
/// Total over all string inputs; never panics.
pub fn validate(context: &str, content_type: &str) -> Result<ValidatedUpload, ValidationError> {
    let policy = lookup(context).ok_or(ValidationError::UnknownContext)?;

    let content_type = policy
        .allowed_content_types
        .iter()
        .copied()
        .find(|allowed| *allowed == content_type)
        .ok_or(ValidationError::DisallowedContentType)?;

    Ok(ValidatedUpload {
        context: policy.context,
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::policy::{IMAGE_CONTENT_TYPES, VIDEO_CONTENT_TYPES};
    use rstest::rstest;

    #[test]
    fn test_all_allowed_pairs_are_valid() {
        for context in UploadContext::ALL {
            for content_type in context.allowed_content_types() {
                let validated = validate(context.as_str(), content_type)
                    .unwrap_or_else(|e| panic!("{context} + {content_type}: {e}"));
                assert_eq!(validated.context(), context);
                assert_eq!(validated.content_type(), *content_type);
            }
        }
    }

    #[test]
    fn test_cross_class_pairs_are_rejected() {
        let all_types: Vec<&str> = IMAGE_CONTENT_TYPES
            .iter()
            .chain(VIDEO_CONTENT_TYPES)
            .copied()
            .collect();

        for context in UploadContext::ALL {
            for content_type in all_types.iter().filter(|t| !context.allows(t)) {
                assert_eq!(
                    validate(context.as_str(), content_type),
                    Err(ValidationError::DisallowedContentType)
                );
            }
        }
    }

    #[rstest]
    #[case("post_video", "image/png")]
    #[case("profile_dp", "video/mp4")]
    #[case("team_logo", "image/gif")]
    #[case("team_logo", "")]
    #[case("league_logo", "image/PNG")]
    fn test_disallowed_content_type(#[case] context: &str, #[case] content_type: &str) {
        assert_eq!(
            validate(context, content_type),
            Err(ValidationError::DisallowedContentType)
        );
    }

    #[rstest]
    #[case("not_a_real_context", "image/png")]
    #[case("", "image/png")]
    #[case("", "")]
    #[case("Profile_Dp", "image/png")]
    fn test_unknown_context(#[case] context: &str, #[case] content_type: &str) {
        assert_eq!(
            validate(context, content_type),
            Err(ValidationError::UnknownContext)
        );
    }

    #[test]
    fn test_unknown_context_checked_before_content_type() {
        assert_eq!(
            validate("nope", "application/x-executable"),
            Err(ValidationError::UnknownContext)
        );
    }

    #[test]
    fn test_object_key_uses_context_prefix() {
        let validated = validate("profile_dp", "image/png").expect("valid pair");
        let key = validated.object_key();
        assert!(key.as_str().starts_with("profile/profile-dp/"));
        assert!(key.as_str().ends_with(".png"));
    }
}

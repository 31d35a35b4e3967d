//! Object key derivation.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::policy::UploadContext;

/// Storage key of an uploaded object: `{path_prefix}/{uuid}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build a unique object key for an upload.
///
/// The caller must have validated the pair; this does not consult the policy
/// table beyond the context's path prefix. Uniqueness relies on a random v4
/// UUID, no existence check is made against storage.
#[must_use]
pub fn build_key(context: UploadContext, content_type: &str) -> ObjectKey {
    ObjectKey(format!(
        "{}/{}.{}",
        context.path_prefix(),
        Uuid::new_v4(),
        extension(content_type)
    ))
}

/// File extension for a content type: its subtype without parameters.
///
/// `image/png` gives `png`, `video/mp4; codecs=avc1` gives `mp4`.
#[must_use]
pub fn extension(content_type: &str) -> &str {
    let subtype = content_type.split('/').nth(1).unwrap_or_default();
    subtype
        .split_once(';')
        .map_or(subtype, |(head, _)| head)
        .trim()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    // Every key is the context prefix, a slash, a UUID, a dot and the subtype.
    proptest! {
        #[test]
        fn prop_key_shape(
            index in 0usize..UploadContext::ALL.len(),
            type_index in 0usize..3,
        ) {
            let context = UploadContext::ALL[index];
            let content_type = context.allowed_content_types()[type_index];
            let key = build_key(context, content_type);

            let prefix = format!("{}/", context.path_prefix());
            let suffix = format!(".{}", extension(content_type));
            prop_assert!(key.as_str().starts_with(&prefix));
            prop_assert!(key.as_str().ends_with(&suffix));

            let middle = &key.as_str()[prefix.len()..key.as_str().len() - suffix.len()];
            prop_assert!(Uuid::parse_str(middle).is_ok());
        }
    }

    proptest! {
        #[test]
        fn prop_extension_is_path_safe(content_type in ".*") {
            let ext = extension(&content_type);
            prop_assert!(!ext.contains('/'));
            prop_assert!(!ext.contains(';'));
        }
    }

    proptest! {
        #[test]
        fn prop_repeated_keys_never_collide(count in 2usize..64) {
            let keys: HashSet<ObjectKey> = (0..count)
                .map(|_| build_key(UploadContext::ProfileVideo, "video/webm"))
                .collect();
            prop_assert_eq!(keys.len(), count);
        }
    }
}

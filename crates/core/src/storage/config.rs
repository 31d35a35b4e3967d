//! Storage configuration types.

use std::fmt;

use twynup_shared::StorageSettings;

use super::error::StorageError;

/// Storage service configuration for an S3 bucket.
#[derive(Clone)]
pub struct StorageConfig {
    /// AWS region.
    pub region: String,
    /// Bucket name.
    pub bucket: String,
    /// AWS access key ID.
    pub access_key_id: String,
    /// AWS secret access key.
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible providers.
    pub endpoint: Option<String>,
    /// Presigned upload URL TTL in seconds (default: 300 = 5 minutes).
    pub presign_upload_ttl_secs: u64,
}

impl StorageConfig {
    /// Default upload TTL: 5 minutes.
    pub const DEFAULT_UPLOAD_TTL: u64 = 300;

    /// Longest expiry SigV4 accepts: 7 days.
    pub const MAX_UPLOAD_TTL: u64 = 604_800;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            endpoint: None,
            presign_upload_ttl_secs: Self::DEFAULT_UPLOAD_TTL,
        }
    }

    /// Set a custom S3 endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set presigned upload URL TTL. Zero keeps the default and values above
    /// [`Self::MAX_UPLOAD_TTL`] are clamped to it.
    #[must_use]
    pub fn with_upload_ttl(mut self, secs: u64) -> Self {
        self.presign_upload_ttl_secs = match secs {
            0 => Self::DEFAULT_UPLOAD_TTL,
            s => s.min(Self::MAX_UPLOAD_TTL),
        };
        self
    }

    /// Check invariants the signer relies on.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the TTL is outside `1..=604800`.
    pub fn validate(&self) -> Result<(), StorageError> {
        if !(1..=Self::MAX_UPLOAD_TTL).contains(&self.presign_upload_ttl_secs) {
            return Err(StorageError::configuration(format!(
                "presign expiry must be between 1 and {} seconds",
                Self::MAX_UPLOAD_TTL
            )));
        }
        Ok(())
    }

    /// Build a config from raw application settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing setting. Values
    /// are never included in the message.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let region = required(settings.region.as_deref(), "region")?;
        let bucket = required(settings.bucket.as_deref(), "bucket")?;
        let access_key_id = required(settings.access_key_id.as_deref(), "access key id")?;
        let secret_access_key =
            required(settings.secret_access_key.as_deref(), "secret access key")?;

        let ttl = settings.presign_expires_secs.unwrap_or_default();
        if ttl > Self::MAX_UPLOAD_TTL {
            return Err(StorageError::configuration(format!(
                "presign expiry exceeds {} seconds",
                Self::MAX_UPLOAD_TTL
            )));
        }

        let mut config = Self::new(region, bucket, access_key_id, secret_access_key)
            .with_upload_ttl(ttl);
        if let Some(endpoint) = settings.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            config = config.with_endpoint(endpoint);
        }
        config.validate()?;
        Ok(config)
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, StorageError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StorageError::configuration(format!("{name} is not set")))
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("access_key_id", &"[redacted]")
            .field("secret_access_key", &"[redacted]")
            .field("endpoint", &self.endpoint)
            .field("presign_upload_ttl_secs", &self.presign_upload_ttl_secs)
            .finish()
    }
}

//! Storage service implementation using the AWS S3 SDK.

use std::collections::HashMap;
use std::time::Duration;

use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use chrono::{DateTime, TimeDelta, Utc};

use super::config::StorageConfig;
use super::error::StorageError;

/// Provider name attached to the static credentials.
const CREDENTIALS_PROVIDER: &str = "twynup-static";

/// Presigned URL for an upload.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// HTTP method to use (PUT for upload).
    pub method: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
    /// Signed headers the request must carry with the same values.
    pub headers: HashMap<String, String>,
}

/// Signs upload URLs against a single S3 bucket.
pub struct StorageService {
    client: Client,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is rejected.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        config.validate()?;
        let client = Self::create_client(&config);
        Ok(Self { client, config })
    }

    /// Create an S3 client from config.
    ///
    /// Only the static credentials from configuration are used; ambient AWS
    /// profiles and instance metadata are never consulted.
    fn create_client(config: &StorageConfig) -> Client {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        // S3-compatible providers (MinIO etc.) need path-style addressing
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Client::from_conf(builder.build())
    }

    /// Generate a presigned PUT URL for `key`, bound to `content_type`.
    ///
    /// `content-type` is part of the signed headers, so a PUT carrying any
    /// other type fails signature verification at the provider. Signing is
    /// local computation over the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the TTL is out of range or signing fails.
    pub async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, StorageError> {
        let ttl_secs = self.config.presign_upload_ttl_secs;
        let ttl = TimeDelta::try_seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX))
            .ok_or_else(|| StorageError::configuration("presign TTL out of range"))?;

        let presigning = PresigningConfig::expires_in(Duration::from_secs(ttl_secs))
            .map_err(|e| StorageError::configuration(e.to_string()))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::operation(DisplayErrorContext(&e).to_string()))?;

        let headers = presigned
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            expires_at: Utc::now() + ttl,
            headers,
        })
    }

    /// Public URL the object is reachable at once uploaded.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        public_url(&self.config.bucket, &self.config.region, key)
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Get the region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.config.region
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Virtual-hosted-style public URL for an object.
///
/// Pure template, not signed. Callers store this before the upload happens.
#[must_use]
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

//! Upload URL signing using the AWS S3 SDK.
//!
//! The service holds one S3 client built from static credentials and
//! presigns single-object PUT requests against it. Public URLs follow the
//! virtual-hosted-style template and are computed, never signed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      aws-sdk-s3                                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ put_object().key(k).content_type(ct).presigned(expires_in(ttl)) │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::StorageConfig;
pub use error::StorageError;
pub use service::{PresignedUrl, StorageService, public_url};

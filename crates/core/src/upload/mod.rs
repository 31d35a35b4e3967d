//! Upload authorization.
//!
//! This module provides the policy that governs client uploads:
//! - The policy table mapping contexts to path prefixes and content types
//! - Request validation against that table
//! - Object key derivation
//! - Orchestration of validation, key derivation and signing

mod error;
mod key;
mod policy;
mod service;
mod validation;

pub use error::{UploadError, ValidationError};
pub use key::{ObjectKey, build_key, extension};
pub use policy::{
    IMAGE_CONTENT_TYPES, MediaClass, UploadContext, UploadPolicy, VIDEO_CONTENT_TYPES, lookup,
};
pub use service::{RequestUploadInput, UploadAuthorization, UploadService};
pub use validation::{ValidatedUpload, validate};

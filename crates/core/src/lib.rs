//! Core upload logic for Twynup.
//!
//! This crate contains the upload policy and signing with ZERO web dependencies.
//!
//! # Modules
//!
//! - `upload` - Policy table, validation, key derivation and orchestration
//! - `storage` - Presigned URL generation against S3

pub mod storage;
pub mod upload;

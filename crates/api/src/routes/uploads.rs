//! Upload authorization routes.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{AppState, error::ApiError};
use twynup_core::upload::{ObjectKey, RequestUploadInput, UploadError, UploadService};
use twynup_shared::AppError;

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/s3/presign", post(presign))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a presigned upload URL.
///
/// Missing fields are read as empty strings and fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    /// Upload context identifier.
    #[serde(default)]
    pub context: Option<String>,
    /// MIME type of the file.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Response for a presigned upload URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    /// Always true.
    pub ok: bool,
    /// Storage key the object will be written to.
    pub key: ObjectKey,
    /// Presigned PUT URL.
    pub upload_url: String,
    /// HTTP method the upload must use.
    pub upload_method: String,
    /// Signed headers the upload must send unchanged.
    pub upload_headers: HashMap<String, String>,
    /// URL to persist as the object's long-term reference.
    pub public_url: String,
    /// Seconds until `upload_url` expires.
    pub expires_in: u64,
    /// Instant `upload_url` expires (RFC 3339).
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/api/s3/presign`
/// Issue a presigned upload URL for one object.
async fn presign(
    State(state): State<AppState>,
    payload: Result<Json<PresignRequest>, JsonRejection>,
) -> Result<Json<PresignResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected presign request body");
        AppError::Validation("Invalid request body".to_string())
    })?;

    let input = RequestUploadInput {
        context: payload.context.unwrap_or_default(),
        content_type: payload.content_type.unwrap_or_default(),
    };

    let service = UploadService::new(state.storage.clone());

    match service.request_upload(&input).await {
        Ok(auth) => {
            info!(
                context = %auth.context,
                key = %auth.key,
                expires_in = auth.expires_in_secs,
                expires_at = %auth.expires_at,
                "Upload URL issued"
            );

            Ok(Json(PresignResponse {
                ok: true,
                key: auth.key,
                upload_url: auth.upload_url,
                upload_method: auth.upload_method,
                upload_headers: auth.upload_headers,
                public_url: auth.public_url,
                expires_in: auth.expires_in_secs,
                expires_at: auth.expires_at,
            }))
        }
        Err(e) => {
            match &e {
                UploadError::Validation(reason) => warn!(
                    context = %input.context,
                    content_type = %input.content_type,
                    reason = %reason,
                    "Upload request rejected"
                ),
                UploadError::NotConfigured => {
                    error!("Presign requested but storage is not configured");
                }
                UploadError::Storage(storage_err) => {
                    error!(error = %storage_err, context = %input.context, "Presign failed");
                }
            }
            Err(e.into())
        }
    }
}

//! API route definitions.

use axum::Router;

use crate::{AppState, error::ApiError};
use twynup_shared::AppError;

pub mod health;
pub mod uploads;

/// Creates the router mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(uploads::routes())
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError(AppError::NotFound("Route not found".to_string()))
}

//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or expired, and 500 if the
/// link store fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    match state.links.resolve(&code).await? {
        Some(url) => {
            debug!(code = %code, "Redirecting");
            Ok(Redirect::temporary(&url))
        }
        None => Err(AppError::not_found(
            "Short link not found",
            json!({ "short": code }),
        )),
    }
}

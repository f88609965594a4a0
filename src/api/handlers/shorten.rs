//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use tracing::{debug, info};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::entities::{Admission, Reservation, whole_minutes};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::ClientIp;
use crate::utils::code_generator::validate_custom_code;
use crate::utils::url_normalizer::enforce_scheme;
use crate::utils::url_validator::is_url;

/// Shortens a URL on behalf of the calling client.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Flow
///
/// Each step short-circuits:
///
/// 1. Parse and validate the body
/// 2. Admit the client against its quota
/// 3. Check URL syntax
/// 4. Check the destination domain against the blocklist
/// 5. Add `http://` if the URL has no scheme
/// 6. Reserve the short code
/// 7. Charge one request to the client's quota
///
/// The quota is only charged once a link has actually been created, so rejected
/// or conflicting requests cost nothing.
///
/// # Request Body
///
/// ```json
/// {
///   "url": "example.com/path",
///   "short": "abc123",  // optional
///   "expire": 24        // optional, hours
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "http://example.com/path",
///   "short": "abc123",
///   "short_url": "http://localhost:3000/abc123",
///   "expire": 24,
///   "rate_limit": 9,
///   "rate_limit_reset": 30
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: malformed body, invalid custom code, or invalid URL
/// - **403 Forbidden**: the custom code is already in use
/// - **503 Service Unavailable**: quota exhausted or destination blocked
/// - **500 Internal Server Error**: the store failed or timed out
pub async fn shorten_handler(
    State(state): State<AppState>,
    ClientIp(client): ClientIp,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        debug!(error = %e, "Rejected shorten body");
        AppError::bad_request("cannot parse JSON", json!({}))
    })?;

    payload.validate()?;
    if let Some(code) = payload.custom_short() {
        validate_custom_code(code)?;
    }

    if let Admission::Rejected { reset_after } = state.quota.admit(&client).await? {
        return Err(AppError::unavailable(
            "Rate limit exceeded",
            json!({ "rate_limit_reset": whole_minutes(reset_after) }),
        ));
    }

    if !is_url(&payload.url) {
        return Err(AppError::bad_request("Invalid URL", json!({})));
    }

    if !state.domain_guard.is_allowed_domain(&payload.url) {
        debug!(client = %client, url = %payload.url, "Blocked destination");
        return Err(AppError::unavailable("You can't access this", json!({})));
    }

    let destination = enforce_scheme(&payload.url);

    let link = match state
        .links
        .reserve(payload.custom_short(), &destination, payload.expire)
        .await?
    {
        Reservation::Created(link) => link,
        Reservation::AlreadyInUse { code } => {
            return Err(AppError::forbidden(
                "URL short already in use",
                json!({ "short": code }),
            ));
        }
    };

    let quota = state.quota.charge(&client).await?;

    info!(
        client = %client,
        code = %link.code,
        remaining = quota.remaining,
        "Shortened URL"
    );

    let short_url = state.short_url(&link.code);
    Ok(Json(ShortenResponse::new(link, short_url, &quota)))
}

//! Handler for shortcode creation endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::entities::NewLink;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortcode for a long URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "validity": 30,        // optional, minutes
///   "shortcode": "abc123"  // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "http://localhost:3000/abc123",
///   "expiry": "2025-01-01T00:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for an invalid URL, shortcode or validity, including
///   fields of the wrong JSON type
/// - 409 Conflict if the custom shortcode is already taken
///
/// A body that is not a JSON object is rejected by the extractor before any
/// field is inspected.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let new_link =
        NewLink::try_from(payload).map_err(|e| state.link_service.reject_create(e))?;

    let link = state.link_service.create_short_link(new_link).await?;

    let short_link = state
        .link_service
        .get_short_url(&state.base_url, &link.code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_link,
            expiry: link.expires_at,
        }),
    ))
}

//! Handler for shortcode statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves statistics for a shortcode.
///
/// # Endpoint
///
/// `GET /shorturls/{shortcode}`
///
/// Works for expired shortcodes too; expiry only stops redirects.
///
/// # Response
///
/// ```json
/// {
///   "shortcode": "abc123",
///   "originalUrl": "https://example.com/page",
///   "createdAt": "2025-01-01T00:00:00Z",
///   "expiry": "2025-01-01T00:30:00Z",
///   "totalClicks": 1,
///   "clicks": [
///     { "timestamp": "2025-01-01T00:05:00Z", "referrer": null, "origin": "203.0.113.7" }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the shortcode doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.get_detailed_stats(&code).await?;

    Ok(Json(StatsResponse::from(stats)))
}

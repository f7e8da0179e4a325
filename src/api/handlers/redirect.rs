//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    response::Redirect,
};
use std::net::SocketAddr;

use crate::domain::entities::NewClick;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_origin::{extract_origin, extract_referrer};

/// Redirects a shortcode to its original URL.
///
/// # Endpoint
///
/// `GET /{shortcode}`
///
/// # Request Flow
///
/// 1. Build the click from the `Referer` header and the client origin
/// 2. Resolve the shortcode; the click is recorded atomically with the lookup
/// 3. Return 307 Temporary Redirect
///
/// # Errors
///
/// - 404 Not Found if the shortcode doesn't exist
/// - 410 Gone if the shortcode has expired
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    let click = NewClick {
        referrer: extract_referrer(&headers),
        origin: extract_origin(&headers, addr, state.behind_proxy),
    };

    let long_url = state.link_service.resolve(&code, click).await?;

    Ok(Redirect::temporary(&long_url))
}

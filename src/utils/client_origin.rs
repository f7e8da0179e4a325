//! Request metadata extraction for click events.

use axum::http::{HeaderMap, header};
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Resolves the network origin of a request.
///
/// When `behind_proxy` is set, the first address in `X-Forwarded-For` wins,
/// then `X-Real-IP`. Otherwise, and as a fallback, the peer socket IP is used.
/// Enable `behind_proxy` only when the service sits behind a trusted proxy;
/// both headers are client-controlled otherwise.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let peer: SocketAddr = "10.0.0.1:4000".parse().unwrap();
/// assert_eq!(extract_origin(&headers, peer, true), "203.0.113.7");
/// assert_eq!(extract_origin(&headers, peer, false), "10.0.0.1");
/// ```
pub fn extract_origin(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

/// Extracts the `Referer` header, if present and valid UTF-8.
pub fn extract_referrer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

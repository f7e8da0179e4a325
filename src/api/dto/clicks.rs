//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Click;

/// Individual click event information.
///
/// `referrer` is `null` when the visitor sent no `Referer` header.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub timestamp: DateTime<Utc>,
    pub referrer: Option<String>,
    pub origin: String,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            timestamp: click.clicked_at,
            referrer: click.referrer,
            origin: click.origin,
        }
    }
}

//! DTOs for shortcode statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::domain::repositories::DetailedStats;

/// Statistics for a single shortcode: record metadata plus every click in order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortcode: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub total_clicks: u64,
    pub clicks: Vec<ClickInfo>,
}

impl From<DetailedStats> for StatsResponse {
    fn from(stats: DetailedStats) -> Self {
        Self {
            shortcode: stats.link.code,
            original_url: stats.link.long_url,
            created_at: stats.link.created_at,
            expiry: stats.link.expires_at,
            total_clicks: stats.link.clicks,
            clicks: stats.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}

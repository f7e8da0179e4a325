//! DTOs for the shortcode creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::entities::NewLink;
use crate::error::AppError;

/// Request to create a shortcode.
///
/// Fields are taken as raw JSON so that a value of the wrong type is reported
/// as the matching registry error instead of a generic body rejection.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be an absolute HTTP/HTTPS URL).
    pub url: Option<Value>,

    /// Lifetime in whole minutes (defaults to the configured validity, normally 30).
    pub validity: Option<Value>,

    /// Optional custom shortcode: 4+ ASCII letters or digits.
    pub shortcode: Option<Value>,
}

impl TryFrom<ShortenRequest> for NewLink {
    type Error = AppError;

    fn try_from(request: ShortenRequest) -> Result<Self, Self::Error> {
        let long_url = match request.url {
            Some(Value::String(url)) => url,
            Some(other) => {
                return Err(AppError::invalid_url(
                    "URL must be a string",
                    json!({ "url": other }),
                ));
            }
            None => return Err(AppError::invalid_url("URL is required", json!({}))),
        };

        let code = match request.shortcode {
            None => None,
            Some(Value::String(code)) => Some(code),
            Some(other) => {
                return Err(AppError::invalid_shortcode(
                    "Shortcode must be a string",
                    json!({ "shortcode": other }),
                ));
            }
        };

        let validity_minutes = match request.validity {
            None => None,
            Some(value) => Some(value.as_i64().ok_or_else(|| {
                AppError::invalid_validity(
                    "Validity must be a whole number of minutes",
                    json!({ "validity": value }),
                )
            })?),
        };

        Ok(NewLink {
            long_url,
            code,
            validity_minutes,
        })
    }
}

/// Response for a created shortcode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}

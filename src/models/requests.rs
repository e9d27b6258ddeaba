//! Request DTOs for the countdown API
//!
//! Defines the structure of incoming request bodies and query strings.

use serde::Deserialize;
use url::Url;

use crate::countdown::{AssetFormat, Style, TargetDateTime};

/// Maximum alt text length in characters
pub const MAX_ALT_TEXT_LENGTH: usize = 140;

/// Alt text used when the request leaves it out
pub const DEFAULT_ALT_TEXT: &str = "Countdown";

/// Request for a countdown asset or embed snippet
/// (POST /countdown/asset, GET /countdown/asset, POST /countdown/embed)
#[derive(Debug, Clone, Deserialize)]
pub struct CountdownRequest {
    /// Moment the countdown reaches zero
    pub target_datetime: TargetDateTime,
    /// IANA timezone used to interpret a naive target
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub asset_format: AssetFormat,
    /// Accessible text for the embedded image
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Link wrapping the image in the embed snippet
    #[serde(default)]
    pub click_through_url: Option<Url>,
}

impl CountdownRequest {
    /// Creates a request with default style, format and no decorations.
    pub fn new(target_datetime: TargetDateTime) -> Self {
        Self {
            target_datetime,
            timezone: None,
            style: Style::default(),
            asset_format: AssetFormat::default(),
            alt_text: None,
            click_through_url: None,
        }
    }

    pub fn with_timezone(mut self, timezone: Option<&str>) -> Self {
        self.timezone = timezone.map(str::to_string);
        self
    }

    /// Alt text, falling back to [`DEFAULT_ALT_TEXT`] when absent or empty.
    pub fn alt_text(&self) -> &str {
        self.alt_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_ALT_TEXT)
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(alt_text) = &self.alt_text {
            if alt_text.chars().count() > MAX_ALT_TEXT_LENGTH {
                return Some(format!(
                    "alt_text exceeds maximum length of {} characters",
                    MAX_ALT_TEXT_LENGTH
                ));
            }
        }
        if let Some(url) = &self.click_through_url {
            if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
                return Some("click_through_url must be an absolute http(s) URL".to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_request_deserialize_defaults() {
        let json = r#"{"target_datetime": "2025-12-31T23:59:59"}"#;
        let req: CountdownRequest = serde_json::from_str(json).unwrap();

        assert!(req.timezone.is_none());
        assert_eq!(req.style, Style::Digital);
        assert_eq!(req.asset_format, AssetFormat::Png);
        assert_eq!(req.alt_text(), "Countdown");
        assert!(req.click_through_url.is_none());
    }

    #[test]
    fn test_countdown_request_full() {
        let json = r#"{
            "target_datetime": "2025-12-31T23:59:59+01:00",
            "timezone": "Europe/Berlin",
            "style": "minimal",
            "asset_format": "gif",
            "alt_text": "Launch",
            "click_through_url": "https://example.com/launch"
        }"#;
        let req: CountdownRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.timezone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(req.style, Style::Minimal);
        assert_eq!(req.asset_format, AssetFormat::Gif);
        assert_eq!(req.alt_text(), "Launch");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_missing_target_rejected() {
        assert!(serde_json::from_str::<CountdownRequest>(r#"{"style": "digital"}"#).is_err());
    }

    #[test]
    fn test_empty_alt_text_falls_back() {
        let mut req = CountdownRequest::new("2025-12-31T23:59:59".parse().unwrap());
        req.alt_text = Some(String::new());
        assert_eq!(req.alt_text(), DEFAULT_ALT_TEXT);
    }

    #[test]
    fn test_validate_alt_text_too_long() {
        let mut req = CountdownRequest::new("2025-12-31T23:59:59".parse().unwrap());
        req.alt_text = Some("x".repeat(MAX_ALT_TEXT_LENGTH + 1));
        assert!(req.validate().is_some());

        req.alt_text = Some("x".repeat(MAX_ALT_TEXT_LENGTH));
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut req = CountdownRequest::new("2025-12-31T23:59:59".parse().unwrap());
        req.click_through_url = Some("javascript:alert(1)".parse().unwrap());
        assert!(req.validate().is_some());

        req.click_through_url = Some("ftp://example.com/file".parse().unwrap());
        assert!(req.validate().is_some());
    }
}

//! Presentation style and asset format enums.

use std::fmt;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

// == Style ==
/// Visual style of the rendered countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Large bright digits on a dark background
    #[default]
    Digital,
    /// Smaller dark digits on a light background
    Minimal,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Digital => "digital",
            Style::Minimal => "minimal",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Asset Format ==
/// Encoded image format of the rendered countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    #[default]
    Png,
    Gif,
}

impl AssetFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetFormat::Png => "png",
            AssetFormat::Gif => "gif",
        }
    }

    /// MIME type sent as `Content-Type` and used in data URIs.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AssetFormat::Png => "image/png",
            AssetFormat::Gif => "image/gif",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            AssetFormat::Png => ImageFormat::Png,
            AssetFormat::Gif => ImageFormat::Gif,
        }
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Style::default(), Style::Digital);
        assert_eq!(AssetFormat::default(), AssetFormat::Png);
    }

    #[test]
    fn test_deserialize_lowercase() {
        let style: Style = serde_json::from_str(r#""minimal""#).unwrap();
        let format: AssetFormat = serde_json::from_str(r#""gif""#).unwrap();
        assert_eq!(style, Style::Minimal);
        assert_eq!(format, AssetFormat::Gif);
    }

    #[test]
    fn test_rejects_unknown_variant() {
        assert!(serde_json::from_str::<Style>(r#""retro""#).is_err());
        assert!(serde_json::from_str::<AssetFormat>(r#""jpeg""#).is_err());
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(AssetFormat::Png.mime_type(), "image/png");
        assert_eq!(AssetFormat::Gif.mime_type(), "image/gif");
        assert_eq!(AssetFormat::Gif.image_format(), ImageFormat::Gif);
    }
}

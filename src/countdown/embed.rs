//! HTML embed snippet and data URI helpers.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::countdown::AssetFormat;

/// `data:image/{format};base64,...` URI carrying the encoded asset.
pub fn data_uri(bytes: &[u8], format: AssetFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// Escapes text for use inside a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Centred `<img>` snippet, wrapped in a new-tab link when `link_url` is set.
pub fn render_embed_snippet(asset_url: &str, alt_text: &str, link_url: Option<&str>) -> String {
    let image = format!(
        r#"<img src="{}" alt="{}" style="max-width:100%; height:auto;" />"#,
        escape_attr(asset_url),
        escape_attr(alt_text)
    );

    let body = match link_url {
        Some(href) => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_attr(href),
            image
        ),
        None => image,
    };

    format!("<div style=\"text-align:center\">\n    {body}\n</div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_prefix() {
        assert_eq!(data_uri(b"abc", AssetFormat::Png), "data:image/png;base64,YWJj");
        assert!(data_uri(b"abc", AssetFormat::Gif).starts_with("data:image/gif;base64,"));
    }

    #[test]
    fn test_snippet_without_link() {
        let html = render_embed_snippet("data:image/png;base64,AA==", "Countdown", None);

        assert!(html.starts_with("<div style=\"text-align:center\">"));
        assert!(html.contains(r#"<img src="data:image/png;base64,AA==" alt="Countdown""#));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_snippet_with_link() {
        let html = render_embed_snippet("x.png", "Sale", Some("https://example.com/sale"));

        assert!(html.contains(
            r#"<a href="https://example.com/sale" target="_blank" rel="noopener noreferrer"><img"#
        ));
        assert!(html.contains("</a>"));
    }

    #[test]
    fn test_snippet_escapes_attributes() {
        let html = render_embed_snippet("x.png", r#""><script>alert(1)</script>"#, None);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}

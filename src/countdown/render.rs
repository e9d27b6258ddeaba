//! Countdown image rendering.
//!
//! Draws the humanized time remaining onto a fixed canvas using an embedded
//! 5x7 bitmap glyph set, then encodes it as PNG or GIF.

use std::io::Cursor;
use std::time::Duration;

use image::codecs::gif::GifEncoder;
use image::{DynamicImage, Frame, Rgb, RgbImage};

use crate::countdown::{AssetFormat, Style};
use crate::error::{AppError, Result};

// == Canvas ==
pub const CANVAS_WIDTH: u32 = 600;
pub const CANVAS_HEIGHT: u32 = 200;
const MARGIN: u32 = 20;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Glyph plus one column of spacing
const CELL_WIDTH: u32 = GLYPH_WIDTH + 1;

/// NeuQuant sampling speed for GIF palettes; 10 is the gif crate's default.
const GIF_SPEED: i32 = 10;

struct Palette {
    background: Rgb<u8>,
    foreground: Rgb<u8>,
    max_scale: u32,
}

fn palette(style: Style) -> Palette {
    match style {
        Style::Digital => Palette {
            background: Rgb([15, 15, 40]),
            foreground: Rgb([0, 255, 180]),
            max_scale: 9,
        },
        Style::Minimal => Palette {
            background: Rgb([245, 245, 245]),
            foreground: Rgb([33, 33, 33]),
            max_scale: 6,
        },
    }
}

// == Humanize ==
/// Formats a duration as `"1d 02h 03m 04s"`, dropping leading zero units.
pub fn humanize(remaining: Duration) -> String {
    let total = remaining.as_secs();
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, seconds) = (rest / 60, rest % 60);

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{hours:02}h"));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{minutes:02}m"));
    }
    parts.push(format!("{seconds:02}s"));
    parts.join(" ")
}

// == Glyphs ==
/// Row bitmaps, most significant of the low five bits is the leftmost column.
fn glyph(c: char) -> [u8; 7] {
    match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'd' => [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111],
        'h' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'm' => [0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001],
        's' => [0b00000, 0b00000, 0b01110, 0b10000, 0b01110, 0b00001, 0b11110],
        _ => [0; 7],
    }
}

/// Largest integer scale at which `text` fits inside the margins.
fn fit_scale(text: &str, max_scale: u32) -> u32 {
    let columns = (text.chars().count() as u32 * CELL_WIDTH).saturating_sub(1).max(1);
    let by_width = (CANVAS_WIDTH - 2 * MARGIN) / columns;
    let by_height = (CANVAS_HEIGHT - 2 * MARGIN) / GLYPH_HEIGHT;
    by_width.min(by_height).min(max_scale).max(1)
}

// == Draw ==
/// Draws `text` centred on a fresh canvas in the given style.
pub fn draw_text(text: &str, style: Style) -> RgbImage {
    let palette = palette(style);
    let mut image = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, palette.background);

    let scale = fit_scale(text, palette.max_scale);
    let columns = (text.chars().count() as u32 * CELL_WIDTH).saturating_sub(1);
    let origin_x = CANVAS_WIDTH.saturating_sub(columns * scale) / 2;
    let origin_y = CANVAS_HEIGHT.saturating_sub(GLYPH_HEIGHT * scale) / 2;

    for (index, c) in text.chars().enumerate() {
        let cell_x = origin_x + index as u32 * CELL_WIDTH * scale;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let x0 = cell_x + col * scale;
                let y0 = origin_y + row as u32 * scale;
                for y in y0..(y0 + scale).min(CANVAS_HEIGHT) {
                    for x in x0..(x0 + scale).min(CANVAS_WIDTH) {
                        image.put_pixel(x, y, palette.foreground);
                    }
                }
            }
        }
    }

    image
}

// == Encode ==
/// Encodes `image` in `format`.
pub fn encode(image: RgbImage, format: AssetFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        AssetFormat::Png => {
            DynamicImage::ImageRgb8(image)
                .write_to(&mut Cursor::new(&mut bytes), format.image_format())
                .map_err(|e| AppError::Render(e.to_string()))?;
        }
        AssetFormat::Gif => {
            let frame = Frame::new(DynamicImage::ImageRgb8(image).to_rgba8());
            // The encoder writes the GIF trailer when dropped.
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_SPEED);
            encoder
                .encode_frame(frame)
                .map_err(|e| AppError::Render(e.to_string()))?;
            drop(encoder);
        }
    }
    Ok(bytes)
}

/// Renders the countdown for `remaining` as encoded image bytes.
pub fn render_countdown(remaining: Duration, style: Style, format: AssetFormat) -> Result<Vec<u8>> {
    encode(draw_text(&humanize(remaining), style), format)
}

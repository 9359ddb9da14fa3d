//! Sprite decoding for the detail card: PNG bytes to an alpha-keyed pixel
//! grid, rendered as half-block cells by the UI.

use image::GenericImageView;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB pixels; transparent pixels are `None`.
    pub pixels: Vec<Option<[u8; 3]>>,
}

impl SpriteData {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[(y * self.width + x) as usize]
    }
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, String> {
    let image = image::load_from_memory(bytes).map_err(|error| error.to_string())?;
    let (width, height) = image.dimensions();
    let rgba = image.to_rgba8();
    let pixels = rgba
        .pixels()
        .map(|pixel| {
            let [r, g, b, a] = pixel.0;
            (a >= 8).then_some([r, g, b])
        })
        .collect();
    Ok(SpriteData {
        width,
        height,
        pixels,
    })
}

/// Render into at most `max_width` columns by `max_rows` terminal rows, two
/// vertical pixels per row via the upper-half-block glyph. Nearest sampling.
pub fn render_lines(sprite: &SpriteData, max_width: u16, max_rows: u16) -> Vec<Line<'static>> {
    if sprite.width == 0 || sprite.height == 0 || max_width == 0 || max_rows == 0 {
        return Vec::new();
    }
    let max_px_h = max_rows as u32 * 2;
    // Uniform scale preserving aspect; never upscale.
    let scale = (sprite.width as f32 / max_width as f32)
        .max(sprite.height as f32 / max_px_h as f32)
        .max(1.0);
    let out_w = ((sprite.width as f32 / scale) as u32).max(1);
    let out_h = ((sprite.height as f32 / scale) as u32).max(1);

    let sample = |x: u32, y: u32| {
        let src_x = ((x as f32 + 0.5) * scale) as u32;
        let src_y = ((y as f32 + 0.5) * scale) as u32;
        sprite.pixel(src_x.min(sprite.width - 1), src_y.min(sprite.height - 1))
    };

    let mut lines = Vec::new();
    let mut y = 0;
    while y < out_h {
        let mut spans = Vec::new();
        for x in 0..out_w {
            let top = sample(x, y);
            let bottom = if y + 1 < out_h { sample(x, y + 1) } else { None };
            spans.push(cell(top, bottom));
        }
        lines.push(Line::from(spans));
        y += 2;
    }
    lines
}

fn cell(top: Option<[u8; 3]>, bottom: Option<[u8; 3]>) -> Span<'static> {
    let rgb = |[r, g, b]: [u8; 3]| Color::Rgb(r, g, b);
    match (top, bottom) {
        (Some(t), Some(b)) => Span::styled("▀", Style::default().fg(rgb(t)).bg(rgb(b))),
        (Some(t), None) => Span::styled("▀", Style::default().fg(rgb(t))),
        (None, Some(b)) => Span::styled("▄", Style::default().fg(rgb(b))),
        (None, None) => Span::raw(" "),
    }
}

//! Overlay text rendering using ab_glyph
//! The font is loaded at runtime; without one the overlay falls back to its
//! built-in bitmap label.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::Rgb;
use crate::surface::PixelSurface;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Cannot read font file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid font data in {0}")]
    InvalidFont(String),
}

pub struct FontRenderer {
    font: FontVec,
}

impl FontRenderer {
    pub fn from_bytes(data: Vec<u8>, name: &str) -> Result<Self, FontError> {
        let font =
            FontVec::try_from_vec(data).map_err(|_| FontError::InvalidFont(name.to_string()))?;
        Ok(Self { font })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path_str.clone(),
            source,
        })?;
        Self::from_bytes(data, &path_str)
    }

    /// Width in pixels of `text` at `size` px
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        text.chars().map(|ch| scaled.h_advance(self.font.glyph_id(ch))).sum()
    }

    /// Ascent-to-descent height at `size` px
    pub fn line_height(&self, size: f32) -> f32 {
        self.font.as_scaled(PxScale::from(size)).height()
    }

    /// Draw `text` with its top-left corner at `(x, y)` in pixels
    pub fn draw_text(
        &self,
        surface: &mut PixelSurface,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
    ) {
        let px_scale = PxScale::from(size);
        let scaled = self.font.as_scaled(px_scale);
        let baseline = y + scaled.ascent();
        let (width, height) = (surface.width() as i32, surface.height() as i32);
        let frame = surface.frame_mut();

        let mut caret = x;
        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            let glyph = glyph_id.with_scale_and_position(px_scale, point(caret, baseline));
            caret += scaled.h_advance(glyph_id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px >= width || py >= height {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0) as u16;
                if alpha == 0 {
                    return;
                }
                let idx = ((py * width + px) * 4) as usize;
                blend(&mut frame[idx..idx + 4], color, alpha);
            });
        }
    }
}

fn blend(pixel: &mut [u8], color: Rgb, alpha: u16) {
    let inv = 255 - alpha;
    let mix = |dst: u8, src: u8| ((dst as u16 * inv + src as u16 * alpha) / 255) as u8;
    pixel[0] = mix(pixel[0], color.0);
    pixel[1] = mix(pixel[1], color.1);
    pixel[2] = mix(pixel[2], color.2);
    pixel[3] = 255;
}

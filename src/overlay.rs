//! Landing content drawn over the background: brand mark and "Sign In" button.

use crate::config::{Palette, Rgb};
use crate::font::FontRenderer;
use crate::surface::PixelSurface;

pub const SIGN_IN_LABEL: &str = "Sign In";

const LABEL_SIZE: f32 = 16.0;
const BUTTON_PAD_X: u32 = 24;
const BUTTON_PAD_Y: u32 = 12;
const MARK_GAP: u32 = 32;
const MARK_PIXEL: u32 = 8;
const LABEL_PIXEL: u32 = 2;

// 12x12 brain glyph, one bit per pixel, MSB first.
const MARK: [u16; 12] = [
    0b0001111110000000,
    0b0011001001100000,
    0b0110010100110000,
    0b1100100010011000,
    0b1001000001001000,
    0b1010011100101000,
    0b1010100010101000,
    0b1001000100001000,
    0b1100101001011000,
    0b0110010010110000,
    0b0011111111100000,
    0b0000011100000000,
];
const MARK_CELLS: u32 = 12;

// 5x7 label glyphs, low five bits per row, bit 4 leftmost.
const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
const GLYPH_ADVANCE: u32 = GLYPH_COLS + 1;

fn glyph(ch: char) -> [u8; 7] {
    match ch {
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'g' => [0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'n' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        _ => [0; 7],
    }
}

/// Logical length scaled to physical pixels, never below one.
fn scaled(v: u32, scale: f32) -> u32 {
    ((v as f32 * scale).round() as u32).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Pixel positions of the splash elements for one viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashLayout {
    pub mark: Rect,
    pub mark_pixel: u32,
    pub button: Rect,
    pub label_x: u32,
    pub label_y: u32,
}

impl SplashLayout {
    /// Centres the mark and button as one column in the viewport.
    /// Sizes are physical pixels; `scale` is the window's scale factor.
    pub fn compute(
        viewport_width: u32,
        viewport_height: u32,
        label_width: u32,
        label_height: u32,
        scale: f32,
    ) -> Self {
        let mark_pixel = scaled(MARK_PIXEL, scale);
        let mark_size = MARK_CELLS * mark_pixel;
        let pad_x = scaled(BUTTON_PAD_X, scale);
        let pad_y = scaled(BUTTON_PAD_Y, scale);
        let gap = scaled(MARK_GAP, scale);
        let button_width = label_width + pad_x * 2;
        let button_height = label_height + pad_y * 2;
        let column_height = mark_size + gap + button_height;

        let top = viewport_height.saturating_sub(column_height) / 2;
        let mark = Rect {
            x: viewport_width.saturating_sub(mark_size) / 2,
            y: top,
            width: mark_size,
            height: mark_size,
        };
        let button = Rect {
            x: viewport_width.saturating_sub(button_width) / 2,
            y: mark.bottom() + gap,
            width: button_width,
            height: button_height,
        };

        Self {
            mark,
            mark_pixel,
            button,
            label_x: button.x + pad_x,
            label_y: button.y + pad_y,
        }
    }
}

pub struct Splash {
    font: Option<FontRenderer>,
    accent: Rgb,
}

impl Splash {
    pub fn new(font: Option<FontRenderer>, palette: &Palette) -> Self {
        Self {
            font,
            accent: palette.foreground,
        }
    }

    fn label_extent(&self, scale: f32) -> (u32, u32) {
        match &self.font {
            Some(font) => (
                font.text_width(SIGN_IN_LABEL, LABEL_SIZE * scale).ceil() as u32,
                font.line_height(LABEL_SIZE * scale).ceil() as u32,
            ),
            None => {
                let px = scaled(LABEL_PIXEL, scale);
                let chars = SIGN_IN_LABEL.chars().count() as u32;
                ((chars * GLYPH_ADVANCE - 1) * px, GLYPH_ROWS * px)
            }
        }
    }

    pub fn layout(&self, viewport_width: u32, viewport_height: u32, scale: f32) -> SplashLayout {
        let (label_width, label_height) = self.label_extent(scale);
        SplashLayout::compute(viewport_width, viewport_height, label_width, label_height, scale)
    }

    pub fn draw(&self, surface: &mut PixelSurface, scale: f32) {
        let layout = self.layout(surface.width(), surface.height(), scale);
        let mp = layout.mark_pixel;

        for (row, bits) in MARK.iter().enumerate() {
            for col in 0..MARK_CELLS {
                if bits & (0x8000u16 >> col) != 0 {
                    let x = layout.mark.x + col * mp;
                    let y = layout.mark.y + row as u32 * mp;
                    surface.fill_pixels(x, y, mp, mp, self.accent);
                }
            }
        }

        let b = layout.button;
        surface.fill_pixels(b.x, b.y, b.width, b.height, self.accent);

        match &self.font {
            Some(font) => font.draw_text(
                surface,
                SIGN_IN_LABEL,
                layout.label_x as f32,
                layout.label_y as f32,
                LABEL_SIZE * scale,
                Rgb::WHITE,
            ),
            None => draw_bitmap_label(surface, &layout, scaled(LABEL_PIXEL, scale)),
        }
    }
}

fn draw_bitmap_label(surface: &mut PixelSurface, layout: &SplashLayout, px: u32) {
    for (i, ch) in SIGN_IN_LABEL.chars().enumerate() {
        let origin_x = layout.label_x + i as u32 * GLYPH_ADVANCE * px;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_COLS {
                if bits & (0b10000u8 >> col) != 0 {
                    let x = origin_x + col * px;
                    let y = layout.label_y + row as u32 * px;
                    surface.fill_pixels(x, y, px, px, Rgb::WHITE);
                }
            }
        }
    }
}

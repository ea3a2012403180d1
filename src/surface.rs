use crate::config::Rgb;

/// Something rectangles can be painted onto, in scaled units.
///
/// Coordinates are in cells: a 1×1 rectangle covers one cell-sized block
/// of pixels.
pub trait DrawSurface {
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb);
}

/// RGBA framebuffer (as handed out by `pixels`) pre-scaled by `scale`
/// physical pixels per unit. The scale may be fractional on HiDPI displays.
pub struct PixelSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    scale: f64,
}

impl<'a> PixelSurface<'a> {
    /// Returns `None` when the frame is too small for `width × height`.
    pub fn new(frame: &'a mut [u8], width: u32, height: u32, scale: f64) -> Option<Self> {
        let needed = width as usize * height as usize * 4;
        if frame.len() < needed {
            return None;
        }
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        Some(Self {
            frame,
            width,
            height,
            scale,
        })
    }

    fn to_pixels(&self, units: u32) -> u32 {
        (units as f64 * self.scale).round().min(u32::MAX as f64) as u32
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill in raw pixel coordinates, clipped to the frame.
    pub fn fill_pixels(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }

        let rgba = color.to_rgba();
        let stride = self.width as usize * 4;
        for py in y..y_end {
            let start = py as usize * stride + x as usize * 4;
            let end = py as usize * stride + x_end as usize * 4;
            for pixel in self.frame[start..end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&rgba);
            }
        }
    }

    /// Mutable access for glyph blending.
    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut *self.frame
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(rgba)
    }
}

impl DrawSurface for PixelSurface<'_> {
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        // Both edges are rounded so neighbouring cells tile without gaps.
        let left = self.to_pixels(x);
        let top = self.to_pixels(y);
        let right = self.to_pixels(x.saturating_add(width));
        let bottom = self.to_pixels(y.saturating_add(height));
        self.fill_pixels(left, top, right - left, bottom - top, color);
    }
}

/// Test double that records every `fill_rect` call.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<(u32, u32, u32, u32, Rgb)>,
}

#[cfg(test)]
impl DrawSurface for RecordingSurface {
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        self.calls.push((x, y, width, height, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_frame() {
        let mut frame = vec![0u8; 10];
        assert!(PixelSurface::new(&mut frame, 4, 4, 2.0).is_none());
    }

    #[test]
    fn test_fill_rect_is_scaled() {
        let mut frame = vec![0u8; 8 * 8 * 4];
        let mut surface = PixelSurface::new(&mut frame, 8, 8, 4.0).unwrap();
        surface.fill_rect(1, 0, 1, 1, Rgb::PINK);

        assert_eq!(surface.pixel(4, 0), Some(Rgb::PINK.to_rgba()));
        assert_eq!(surface.pixel(7, 3), Some(Rgb::PINK.to_rgba()));
        assert_eq!(surface.pixel(3, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(4, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_fill_is_clipped() {
        // 10 px wide at scale 4: the third column of cells is only half visible.
        let mut frame = vec![0u8; 10 * 6 * 4];
        let mut surface = PixelSurface::new(&mut frame, 10, 6, 4.0).unwrap();
        surface.fill_rect(2, 1, 5, 5, Rgb::WHITE);

        assert_eq!(surface.pixel(9, 5), Some(Rgb::WHITE.to_rgba()));
        assert_eq!(surface.pixel(8, 4), Some(Rgb::WHITE.to_rgba()));
        assert_eq!(surface.pixel(7, 5), Some([0, 0, 0, 0]));
        surface.fill_rect(100, 100, 1, 1, Rgb::WHITE);
        assert_eq!(surface.pixel(10, 6), None);
    }

    #[test]
    fn test_fractional_scale_tiles_without_gaps() {
        // 1.5 px per unit: a row of 4 cells spans exactly 6 px.
        let mut frame = vec![0u8; 6 * 2 * 4];
        let mut surface = PixelSurface::new(&mut frame, 6, 2, 1.5).unwrap();
        for x in 0..4 {
            surface.fill_rect(x, 0, 1, 1, Rgb::WHITE);
        }

        for px in 0..6 {
            assert_eq!(surface.pixel(px, 0), Some(Rgb::WHITE.to_rgba()));
        }
        assert_eq!(surface.pixel(0, 1), Some(Rgb::WHITE.to_rgba()));
    }

    #[test]
    fn test_double_scale_cell_is_two_by_two() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        let mut surface = PixelSurface::new(&mut frame, 4, 4, 2.0).unwrap();
        surface.fill_rect(1, 1, 1, 1, Rgb::PINK);

        assert_eq!(surface.pixel(2, 2), Some(Rgb::PINK.to_rgba()));
        assert_eq!(surface.pixel(3, 3), Some(Rgb::PINK.to_rgba()));
        assert_eq!(surface.pixel(1, 1), Some([0, 0, 0, 0]));
    }
}

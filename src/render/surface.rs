//! Software raster surface with immediate-mode drawing operations.
//!
//! The surface is an RGBA8 pixel buffer sized `logical × scale`, with the
//! drawing context pre-scaled: every operation takes logical coordinates
//! and the surface maps them to physical pixels internally. There is no
//! anti-aliasing; identical inputs produce bit-identical buffers, which
//! the determinism tests rely on.

use egui::Color32;
use image::RgbaImage;

use crate::render::text::{blend_pixel, FontSpec, TextSystem};

/// Horizontal anchoring for [`PixelSurface::draw_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge of the text.
    Left,
    /// `x` is the center of the text.
    Center,
}

/// An addressable 2D pixel buffer supporting path and text drawing.
pub struct PixelSurface {
    pixels: RgbaImage,
    logical_width: f32,
    logical_height: f32,
    scale: f32,
    text: TextSystem,
}

impl PixelSurface {
    /// Creates a surface of `logical × scale` physical pixels, cleared to
    /// transparent black.
    pub fn new(logical_width: f32, logical_height: f32, scale: f32) -> Self {
        let (width_px, height_px) = physical_size(logical_width, logical_height, scale);
        Self {
            pixels: RgbaImage::new(width_px, height_px),
            logical_width,
            logical_height,
            scale,
            text: TextSystem::new(),
        }
    }

    /// Reallocates the backing buffer for new logical dimensions and
    /// scale. The previous contents are discarded; the font system is
    /// kept.
    pub fn resize(&mut self, logical_width: f32, logical_height: f32, scale: f32) {
        let (width_px, height_px) = physical_size(logical_width, logical_height, scale);
        if (width_px, height_px) != self.pixels.dimensions() {
            self.pixels = RgbaImage::new(width_px, height_px);
        } else {
            self.pixels.fill(0);
        }
        self.logical_width = logical_width;
        self.logical_height = logical_height;
        self.scale = scale;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn logical_size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    pub fn width_px(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height_px(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow of the backing image.
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Owned copy of the backing image, for export.
    pub fn to_image(&self) -> RgbaImage {
        self.pixels.clone()
    }

    /// Fills the whole surface with `color` (replacing, not blending).
    pub fn fill(&mut self, color: Color32) {
        let pixel = image::Rgba([color.r(), color.g(), color.b(), color.a()]);
        for dst in self.pixels.pixels_mut() {
            *dst = pixel;
        }
    }

    /// Fills an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color32) {
        let Some((x0, y0, x1, y1)) = self.clip_rect(x, y, w, h) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                blend_pixel(&mut self.pixels, px, py, color, color.a());
            }
        }
    }

    /// Fills a rectangle with circular corners of `radius` logical px.
    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color32) {
        let radius = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        if radius <= 0.0 {
            self.fill_rect(x, y, w, h, color);
            return;
        }

        let Some((x0, y0, x1, y1)) = self.clip_rect(x, y, w, h) else {
            return;
        };
        let scale = self.scale;
        let left = x * scale;
        let top = y * scale;
        let right = (x + w) * scale;
        let bottom = (y + h) * scale;
        let r = radius * scale;

        for py in y0..y1 {
            for px in x0..x1 {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;

                // Inside unless the pixel sits in a corner square but
                // outside that corner's circle.
                let dx = if cx < left + r {
                    left + r - cx
                } else if cx > right - r {
                    cx - (right - r)
                } else {
                    0.0
                };
                let dy = if cy < top + r {
                    top + r - cy
                } else if cy > bottom - r {
                    cy - (bottom - r)
                } else {
                    0.0
                };

                if dx * dx + dy * dy <= r * r {
                    blend_pixel(&mut self.pixels, px, py, color, color.a());
                }
            }
        }
    }

    /// Strokes the outline of a rectangle with the given line width.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color32) {
        self.fill_rect(x, y, w, line_width, color);
        self.fill_rect(x, y + h - line_width, w, line_width, color);
        self.fill_rect(x, y, line_width, h, color);
        self.fill_rect(x + w - line_width, y, line_width, h, color);
    }

    /// Draws an axis-aligned line segment of the given width. The chart
    /// only uses horizontal and vertical grid strokes.
    pub fn line_segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Color32) {
        if (x0 - x1).abs() < f32::EPSILON {
            let top = y0.min(y1);
            self.fill_rect(x0 - width / 2.0, top, width, (y1 - y0).abs(), color);
        } else {
            let left = x0.min(x1);
            self.fill_rect(left, y0 - width / 2.0, (x1 - x0).abs(), width, color);
        }
    }

    /// Fills a triangle given by three logical points.
    pub fn fill_triangle(&mut self, points: [(f32, f32); 3], color: Color32) {
        let scale = self.scale;
        let p: Vec<(f32, f32)> = points.iter().map(|(x, y)| (x * scale, y * scale)).collect();

        let min_x = p.iter().map(|q| q.0).fold(f32::INFINITY, f32::min).floor().max(0.0) as u32;
        let min_y = p.iter().map(|q| q.1).fold(f32::INFINITY, f32::min).floor().max(0.0) as u32;
        let max_x = (p.iter().map(|q| q.0).fold(f32::NEG_INFINITY, f32::max).ceil())
            .min(self.pixels.width() as f32) as u32;
        let max_y = (p.iter().map(|q| q.1).fold(f32::NEG_INFINITY, f32::max).ceil())
            .min(self.pixels.height() as f32) as u32;

        let edge = |a: (f32, f32), b: (f32, f32), c: (f32, f32)| {
            (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
        };

        for py in min_y..max_y {
            for px in min_x..max_x {
                let c = (px as f32 + 0.5, py as f32 + 0.5);
                let d0 = edge(p[0], p[1], c);
                let d1 = edge(p[1], p[2], c);
                let d2 = edge(p[2], p[0], c);
                let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
                let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
                if !(has_neg && has_pos) {
                    blend_pixel(&mut self.pixels, px, py, color, color.a());
                }
            }
        }
    }

    /// Draws a single line of text with its line box starting at logical
    /// `(x, y)`.
    pub fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        align: TextAlign,
        text: &str,
        font: FontSpec,
        color: Color32,
    ) {
        let x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - self.text.measure(text, font) / 2.0,
        };
        self.text
            .draw(&mut self.pixels, self.scale, x, y, text, font, color);
    }

    /// Measured width of `text` in logical pixels.
    pub fn measure_text(&mut self, text: &str, font: FontSpec) -> f32 {
        self.text.measure(text, font)
    }

    /// Converts a logical rect to clamped physical pixel bounds, or
    /// `None` when the rect is empty or entirely off-surface.
    fn clip_rect(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(u32, u32, u32, u32)> {
        let scale = self.scale;
        let surface_w = self.pixels.width();
        let surface_h = self.pixels.height();

        let left = x * scale;
        let top = y * scale;
        let right = (x + w) * scale;
        let bottom = (y + h) * scale;

        if w <= 0.0
            || h <= 0.0
            || right <= 0.0
            || bottom <= 0.0
            || left >= surface_w as f32
            || top >= surface_h as f32
        {
            return None;
        }

        let x0 = left.round().max(0.0) as u32;
        let y0 = top.round().max(0.0) as u32;
        let mut x1 = (right.round().max(0.0) as u32).min(surface_w);
        let mut y1 = (bottom.round().max(0.0) as u32).min(surface_h);

        // A sub-pixel rect still paints one pixel column/row so thin
        // strokes survive rounding.
        if x1 <= x0 {
            x1 = (x0 + 1).min(surface_w);
        }
        if y1 <= y0 {
            y1 = (y0 + 1).min(surface_h);
        }
        Some((x0, y0, x1, y1))
    }
}

fn physical_size(logical_width: f32, logical_height: f32, scale: f32) -> (u32, u32) {
    let width = (logical_width * scale).round().max(1.0) as u32;
    let height = (logical_height * scale).round().max(1.0) as u32;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_dimensions_follow_scale() {
        let surface = PixelSurface::new(400.0, 200.0, 4.0);
        assert_eq!(surface.width_px(), 1600);
        assert_eq!(surface.height_px(), 800);

        let surface = PixelSurface::new(400.0, 200.0, 1.5);
        assert_eq!(surface.width_px(), 600);
        assert_eq!(surface.height_px(), 300);
    }

    #[test]
    fn test_fill_replaces_every_pixel() {
        let mut surface = PixelSurface::new(8.0, 8.0, 1.0);
        surface.fill(Color32::from_rgb(10, 20, 30));
        assert!(surface
            .image()
            .pixels()
            .all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_fill_rect_is_clipped_to_bounds() {
        let mut surface = PixelSurface::new(8.0, 8.0, 1.0);
        // Extends past every edge; must not panic.
        surface.fill_rect(-4.0, -4.0, 100.0, 100.0, Color32::WHITE);
        assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_fill_rect_blends_low_alpha() {
        let mut surface = PixelSurface::new(2.0, 2.0, 1.0);
        surface.fill(Color32::WHITE);
        surface.fill_rect(0.0, 0.0, 2.0, 2.0, Color32::from_rgba_unmultiplied(0, 0, 0, 128));
        let pixel = surface.image().get_pixel(0, 0);
        // Roughly half-way between white and black.
        assert!(pixel.0[0] > 120 && pixel.0[0] < 136);
    }

    #[test]
    fn test_thin_stroke_survives_rounding() {
        let mut surface = PixelSurface::new(8.0, 8.0, 1.0);
        surface.line_segment(2.0, 0.0, 2.0, 8.0, 0.5, Color32::WHITE);
        let painted = surface.image().pixels().filter(|p| p.0[3] != 0).count();
        assert!(painted >= 8);
    }

    #[test]
    fn test_triangle_paints_inside_only() {
        let mut surface = PixelSurface::new(16.0, 16.0, 1.0);
        surface.fill_triangle([(8.0, 2.0), (2.0, 14.0), (14.0, 14.0)], Color32::WHITE);
        // Apex row is painted near the center, corners stay empty.
        assert_eq!(surface.image().get_pixel(0, 0).0[3], 0);
        assert_eq!(surface.image().get_pixel(15, 0).0[3], 0);
        assert_ne!(surface.image().get_pixel(8, 10).0[3], 0);
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut surface = PixelSurface::new(8.0, 8.0, 1.0);
        surface.fill(Color32::WHITE);
        surface.resize(8.0, 8.0, 1.0);
        assert!(surface.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}

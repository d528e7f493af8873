//! Text shaping and rasterization for the software surface.
//!
//! Wraps cosmic-text: layout runs are computed at logical size so
//! measurement is resolution-independent, while glyphs are rasterized at
//! the physical scale so high-resolution exports stay crisp.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent, Weight};
use egui::Color32;
use image::RgbaImage;

/// Font selection for a single draw or measure call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Size in logical pixels.
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }

    fn attrs(&self) -> Attrs<'static> {
        let attrs = Attrs::new().family(Family::SansSerif);
        if self.bold {
            attrs.weight(Weight::BOLD)
        } else {
            attrs
        }
    }
}

/// Owns the font database and glyph cache for one surface.
pub struct TextSystem {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextSystem {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    fn shape(&mut self, text: &str, font: FontSpec) -> Buffer {
        let metrics = Metrics::new(font.size, font.size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, Some(10_000.0), Some(font.size * 2.0));
        buffer.set_text(&mut self.font_system, text, font.attrs(), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Measures text width in logical pixels, without drawing.
    pub fn measure(&mut self, text: &str, font: FontSpec) -> f32 {
        let buffer = self.shape(text, font);

        let mut width = 0.0f32;
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                width = width.max(glyph.x + glyph.w);
            }
        }
        width
    }

    /// Rasterizes `text` into `pixels` with its line box starting at the
    /// logical position `(x, y)`.
    ///
    /// Glyph masks are produced at `scale` and blended source-over with
    /// `color`; glyphs that fall outside the buffer are clipped.
    pub fn draw(
        &mut self,
        pixels: &mut RgbaImage,
        scale: f32,
        x: f32,
        y: f32,
        text: &str,
        font: FontSpec,
        color: Color32,
    ) {
        let buffer = self.shape(text, font);
        let origin_x = (x * scale).round() as i32;

        for run in buffer.layout_runs() {
            let baseline_y = ((y + run.line_y) * scale).round() as i32;

            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((0.0, 0.0), scale);
                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical.cache_key)
                else {
                    continue;
                };

                let width = image.placement.width as i32;
                let height = image.placement.height as i32;
                if width == 0 || height == 0 {
                    continue;
                }

                let left = origin_x + physical.x + image.placement.left;
                let top = baseline_y + physical.y - image.placement.top;

                for row in 0..height {
                    for col in 0..width {
                        let coverage = match image.content {
                            SwashContent::Mask => {
                                image.data.get((row * width + col) as usize).copied()
                            }
                            SwashContent::Color => {
                                // Color glyphs contribute through their alpha channel.
                                image
                                    .data
                                    .get(((row * width + col) * 4 + 3) as usize)
                                    .copied()
                            }
                            SwashContent::SubpixelMask => None,
                        };
                        let Some(coverage) = coverage else { continue };
                        if coverage == 0 {
                            continue;
                        }

                        let px = left + col;
                        let py = top + row;
                        if px < 0
                            || py < 0
                            || px >= pixels.width() as i32
                            || py >= pixels.height() as i32
                        {
                            continue;
                        }

                        let alpha = (color.a() as u32 * coverage as u32 + 127) / 255;
                        blend_pixel(pixels, px as u32, py as u32, color, alpha as u8);
                    }
                }
            }
        }
    }
}

impl Default for TextSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Source-over blend of `color` at the given alpha onto one pixel.
pub(crate) fn blend_pixel(pixels: &mut RgbaImage, x: u32, y: u32, color: Color32, alpha: u8) {
    if alpha == 0 {
        return;
    }

    let dst = pixels.get_pixel_mut(x, y);
    if alpha == 255 {
        *dst = image::Rgba([color.r(), color.g(), color.b(), 255]);
        return;
    }

    let a = alpha as u32;
    let inv = 255 - a;
    let blend = |src: u8, dst: u8| ((src as u32 * a + dst as u32 * inv + 127) / 255) as u8;

    let out_alpha = a + (dst.0[3] as u32 * inv + 127) / 255;
    *dst = image::Rgba([
        blend(color.r(), dst.0[0]),
        blend(color.g(), dst.0[1]),
        blend(color.b(), dst.0[2]),
        out_alpha.min(255) as u8,
    ]);
}

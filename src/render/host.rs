//! Render host: owns the shared surface and its resolution state.
//!
//! One surface serves both the on-screen chart and high-resolution
//! export. Its backing resolution is whatever the last render set;
//! callers serialize the two paths (the export coordinator's busy flag),
//! there is no locking because there is exactly one mutator thread.

use chrono::NaiveDate;
use image::RgbaImage;

use crate::layout::TimelineLayout;
use crate::model::TimelineData;
use crate::render::scene::render_scene;
use crate::render::surface::PixelSurface;

/// Scale factor used for high-quality export renders.
pub const EXPORT_SCALE_FACTOR: f32 = 4.0;

/// The two mutually-exclusive ways of rendering the shared surface.
pub trait ScaledRenderer {
    /// Renders at `pixels_per_point × 1` for on-screen display.
    fn render_interactive(&mut self, data: &TimelineData, today: NaiveDate, pixels_per_point: f32);

    /// Re-renders the same surface at `pixels_per_point × factor` and
    /// returns the resulting raster. The next interactive render
    /// restores the display resolution.
    fn render_for_export(&mut self, data: &TimelineData, today: NaiveDate, factor: f32)
        -> RgbaImage;
}

/// Owns the one raster surface shared by display and export.
pub struct RenderHost {
    surface: PixelSurface,
    current_scale: f32,
    pixels_per_point: f32,
}

impl RenderHost {
    pub fn new() -> Self {
        Self {
            surface: PixelSurface::new(1.0, 1.0, 1.0),
            current_scale: 1.0,
            pixels_per_point: 1.0,
        }
    }

    /// The surface as last rendered.
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Resolution scale of the most recent render.
    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    fn render_at(&mut self, data: &TimelineData, today: NaiveDate, scale: f32) {
        let layout = TimelineLayout::compute(&data.settings, data.swimlanes.len(), today);
        self.surface
            .resize(layout.canvas_width, layout.canvas_height, scale);
        render_scene(&mut self.surface, &layout, data, today);
        self.current_scale = scale;
    }
}

impl Default for RenderHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaledRenderer for RenderHost {
    fn render_interactive(&mut self, data: &TimelineData, today: NaiveDate, pixels_per_point: f32) {
        self.pixels_per_point = pixels_per_point;
        self.render_at(data, today, pixels_per_point);
    }

    fn render_for_export(
        &mut self,
        data: &TimelineData,
        today: NaiveDate,
        factor: f32,
    ) -> RgbaImage {
        let scale = self.pixels_per_point * factor;
        self.render_at(data, today, scale);
        self.surface.to_image()
    }
}

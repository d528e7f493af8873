//! Timeline panel: hosts the rendered chart.
//!
//! Owns the render host and the egui texture showing its surface. The
//! chart re-renders only when the data snapshot, the display scale or
//! the calendar day changes; every other frame just redraws the cached
//! texture.

use chrono::NaiveDate;
use eframe::egui;

use lanes::color::hex_to_color32;
use lanes::model::TimelineData;
use lanes::render::{RenderHost, ScaledRenderer};

pub struct TimelinePanel {
    host: RenderHost,
    texture: Option<egui::TextureHandle>,
    /// Snapshot behind the current texture: data, pixels-per-point, day.
    last_rendered: Option<(TimelineData, f32, NaiveDate)>,
}

impl TimelinePanel {
    pub fn new() -> Self {
        Self {
            host: RenderHost::new(),
            texture: None,
            last_rendered: None,
        }
    }

    /// The render host, for the export coordinator.
    pub fn host_mut(&mut self) -> &mut RenderHost {
        &mut self.host
    }

    /// After an export the surface is still at the export resolution;
    /// dropping the memo forces the next frame to re-render for display.
    pub fn invalidate(&mut self) {
        self.last_rendered = None;
    }

    /// Renders the chart panel, re-rasterizing if anything changed.
    pub fn show(&mut self, ui: &mut egui::Ui, data: &TimelineData, today: NaiveDate) {
        let pixels_per_point = ui.ctx().pixels_per_point();

        let stale = self
            .last_rendered
            .as_ref()
            .map_or(true, |(last_data, last_scale, last_day)| {
                last_data != data || *last_scale != pixels_per_point || *last_day != today
            });

        if stale {
            self.host.render_interactive(data, today, pixels_per_point);

            let surface = self.host.surface();
            let size = [surface.width_px() as usize, surface.height_px() as usize];
            let color_image =
                egui::ColorImage::from_rgba_unmultiplied(size, surface.image().as_raw());

            match &mut self.texture {
                Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "timeline_chart",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
            }

            self.last_rendered = Some((data.clone(), pixels_per_point, today));
        }

        ui.label(
            egui::RichText::new(&data.settings.title)
                .size(18.0)
                .strong()
                .color(hex_to_color32(&data.settings.text_color)),
        );
        ui.add_space(4.0);

        egui::ScrollArea::both().show(ui, |ui| {
            if let Some(texture) = &self.texture {
                let (logical_w, logical_h) = self.host.surface().logical_size();
                ui.image((texture.id(), egui::vec2(logical_w, logical_h)));
            }
        });
    }
}

impl Default for TimelinePanel {
    fn default() -> Self {
        Self::new()
    }
}

//! Swimlane manager panel: list, inline edit, reorder, add.

use eframe::egui;

use crate::app::AppState;
use lanes::color::{self, color32_to_hex, hex_to_color32};

pub struct SwimlanePanel {
    /// Lane currently being edited inline, if any.
    editing_id: Option<u64>,
    edit_name: String,
    edit_color: egui::Color32,
    new_name: String,
    new_color: egui::Color32,
}

impl SwimlanePanel {
    pub fn new() -> Self {
        Self {
            editing_id: None,
            edit_name: String::new(),
            edit_color: egui::Color32::WHITE,
            new_name: String::new(),
            new_color: hex_to_color32(color::DEFAULT_LANE_COLOR),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.heading("Swimlanes");
        ui.add_space(4.0);

        let lanes: Vec<(u64, String, String)> = state
            .data
            .sorted_swimlanes()
            .iter()
            .map(|s| (s.id, s.name.clone(), s.color.clone()))
            .collect();
        let last_index = lanes.len().saturating_sub(1);

        for (index, (id, name, color_hex)) in lanes.iter().enumerate() {
            ui.horizontal(|ui| {
                if self.editing_id == Some(*id) {
                    ui.text_edit_singleline(&mut self.edit_name);
                    ui.color_edit_button_srgba(&mut self.edit_color);
                    if ui.button("Save").clicked() {
                        state.update_swimlane(*id, &self.edit_name, &color32_to_hex(self.edit_color));
                        self.editing_id = None;
                    }
                    if ui.button("Cancel").clicked() {
                        self.editing_id = None;
                    }
                } else {
                    color_swatch(ui, hex_to_color32(color_hex));
                    ui.label(name);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🗑").clicked() {
                            state.delete_swimlane(*id);
                        }
                        if ui.button("✏").clicked() {
                            self.editing_id = Some(*id);
                            self.edit_name = name.clone();
                            self.edit_color = hex_to_color32(color_hex);
                        }
                        if ui.add_enabled(index < last_index, egui::Button::new("⬇")).clicked() {
                            state.move_lane_down(*id);
                        }
                        if ui.add_enabled(index > 0, egui::Button::new("⬆")).clicked() {
                            state.move_lane_up(*id);
                        }
                    });
                }
            });
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let response = egui::TextEdit::singleline(&mut self.new_name)
                .hint_text("New swimlane name")
                .desired_width(140.0)
                .show(ui)
                .response;
            ui.color_edit_button_srgba(&mut self.new_color);

            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("➕ Add").clicked() || enter) && !self.new_name.trim().is_empty() {
                state.add_swimlane(&self.new_name, &color32_to_hex(self.new_color));
                self.new_name.clear();
                self.new_color = hex_to_color32(&color::random_palette_color());
            }
        });
    }
}

impl Default for SwimlanePanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Small filled square showing an entity's color.
pub fn color_swatch(ui: &mut egui::Ui, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 3.0, color);
}

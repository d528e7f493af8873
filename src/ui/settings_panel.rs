//! Settings panel: chart title, visible window, colors and toggles.
//!
//! The window bounds are plain text fields validated through the date
//! normalizer when the user commits them (Enter or focus loss); a
//! failing pair leaves the settings untouched and shows the error next
//! to the fields.

use eframe::egui;

use lanes::color::{color32_to_hex, hex_to_color32};
use lanes::dates::{format_for_edit, validate_range_text, DateRangeError};
use lanes::model::{MonthFormat, TimelineSettings};

pub struct SettingsPanel {
    start_text: String,
    end_text: String,
    window_error: Option<DateRangeError>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self {
            start_text: String::new(),
            end_text: String::new(),
            window_error: None,
        }
    }

    /// Refills the date text buffers from the settings. Called once at
    /// startup after persisted settings are loaded.
    pub fn sync_from(&mut self, settings: &TimelineSettings) {
        self.start_text = format_for_edit(settings.start_date);
        self.end_text = format_for_edit(settings.end_date);
        self.window_error = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, settings: &mut TimelineSettings) {
        ui.heading("Timeline Settings");
        ui.add_space(4.0);

        ui.label("Title");
        ui.text_edit_singleline(&mut settings.title);
        ui.add_space(4.0);

        ui.label("Visible window");
        let committed = ui
            .horizontal(|ui| {
                let start = egui::TextEdit::singleline(&mut self.start_text)
                    .hint_text("yyyy-mm-dd")
                    .desired_width(90.0)
                    .show(ui)
                    .response;
                ui.label("–");
                let end = egui::TextEdit::singleline(&mut self.end_text)
                    .hint_text("yyyy-mm-dd")
                    .desired_width(90.0)
                    .show(ui)
                    .response;

                let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
                (start.lost_focus() || end.lost_focus()) && enter_pressed
            })
            .inner;

        if committed {
            match validate_range_text(&self.start_text, &self.end_text) {
                Ok((start, end)) => {
                    settings.start_date = Some(start);
                    settings.end_date = Some(end);
                    self.start_text = format_for_edit(Some(start));
                    self.end_text = format_for_edit(Some(end));
                    self.window_error = None;
                }
                Err(error) => {
                    self.window_error = Some(error);
                }
            }
        }
        if let Some(error) = self.window_error {
            ui.colored_label(egui::Color32::from_rgb(231, 76, 60), error.to_string());
        }
        ui.add_space(4.0);

        egui::ComboBox::from_label("Month format")
            .selected_text(match settings.month_format {
                MonthFormat::Short => "Short (Jan, Feb)",
                MonthFormat::Long => "Long (January)",
            })
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut settings.month_format, MonthFormat::Short, "Short (Jan, Feb)");
                ui.selectable_value(&mut settings.month_format, MonthFormat::Long, "Long (January)");
            });
        ui.add_space(4.0);

        color_field(ui, "Background", &mut settings.background_color);
        color_field(ui, "Grid", &mut settings.grid_color);
        color_field(ui, "Text", &mut settings.text_color);
        color_field(ui, "Current date", &mut settings.current_date_color);
        ui.add_space(4.0);

        ui.checkbox(&mut settings.show_grid, "Show grid lines");
        ui.checkbox(&mut settings.show_year_labels, "Show year labels");
        ui.checkbox(&mut settings.show_current_date, "Show current date");
    }
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// A labelled color swatch editing a `#rrggbb` model field.
fn color_field(ui: &mut egui::Ui, label: &str, hex: &mut String) {
    ui.horizontal(|ui| {
        let mut color = hex_to_color32(hex);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *hex = color32_to_hex(color);
        }
        ui.label(label);
    });
}

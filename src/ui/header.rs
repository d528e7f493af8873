//! Header panel UI rendering
//!
//! Top bar with the application name, the PNG export control and the
//! non-blocking status/error line.

use chrono::NaiveDate;
use eframe::egui;

use crate::app::AppState;
use lanes::export::{default_export_dir, export_file_name};

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a destination for a PNG export
    ExportRequested(std::path::PathBuf),
}

/// Renders the application header.
///
/// The export button is disabled while an export is in flight and shows
/// a busy label instead; a finished export leaves a status or error
/// message that renders next to it.
pub fn render_header(
    ui: &mut egui::Ui,
    state: &mut AppState,
    today: NaiveDate,
    exporting: bool,
) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        ui.heading("Lanes");
        ui.label("Swimlane timeline charts");
        ui.separator();

        let label = if exporting {
            "⏳ Exporting…"
        } else {
            "💾 Export PNG"
        };
        if ui.add_enabled(!exporting, egui::Button::new(label)).clicked() {
            let dialog = rfd::FileDialog::new()
                .add_filter("PNG Image", &["png"])
                .set_directory(default_export_dir())
                .set_file_name(export_file_name(&state.data.settings.title, today));

            if let Some(path) = dialog.save_file() {
                interaction = Some(HeaderInteraction::ExportRequested(path));
            }
        }

        if let Some(error) = &state.error_message {
            ui.colored_label(egui::Color32::from_rgb(231, 76, 60), error);
        } else if let Some(status) = &state.status_message {
            ui.weak(status);
        }
    });

    interaction
}

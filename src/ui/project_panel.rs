//! Project list panel.

use eframe::egui;

use crate::app::AppState;
use crate::ui::swimlane_panel::color_swatch;
use lanes::color::hex_to_color32;
use lanes::dates::format_for_edit;
use lanes::model::{Project, ProjectKind};

/// Result of user interaction with the project panel
pub enum ProjectInteraction {
    AddRequested,
    EditRequested(u64),
}

/// Renders the project list with add/edit/delete controls.
pub fn render_project_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<ProjectInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        ui.heading("Projects");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("➕ Add Project").clicked() {
                interaction = Some(ProjectInteraction::AddRequested);
            }
        });
    });
    ui.add_space(4.0);

    if state.data.projects.is_empty() {
        ui.weak("No projects yet. Click \"Add Project\" to get started.");
        return interaction;
    }

    let projects: Vec<(u64, String, String, String, u64)> = state
        .data
        .projects
        .iter()
        .map(|p| {
            (
                p.id,
                p.name.clone(),
                p.color.clone(),
                dates_summary(p),
                p.swimlane_id,
            )
        })
        .collect();

    for (id, name, color_hex, summary, swimlane_id) in projects {
        ui.horizontal(|ui| {
            color_swatch(ui, hex_to_color32(&color_hex));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&name).strong());
                ui.weak(summary);
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑").clicked() {
                    state.delete_project(id);
                }
                if ui.button("✏").clicked() {
                    interaction = Some(ProjectInteraction::EditRequested(id));
                }
                let lane_name = state
                    .data
                    .swimlanes
                    .iter()
                    .find(|lane| lane.id == swimlane_id)
                    .map(|lane| lane.name.as_str())
                    .unwrap_or("—");
                ui.weak(lane_name);
            });
        });
    }

    interaction
}

/// One-line date summary for the list.
fn dates_summary(project: &Project) -> String {
    match &project.kind {
        ProjectKind::Range { start, end } => {
            let start = format_for_edit(*start);
            let end = format_for_edit(*end);
            if start.is_empty() && end.is_empty() {
                "dates not set".to_string()
            } else {
                format!("{} – {}", start, end)
            }
        }
        ProjectKind::Milestone { delivery } => {
            let delivery = format_for_edit(*delivery);
            if delivery.is_empty() {
                "delivery not set".to_string()
            } else {
                delivery
            }
        }
    }
}

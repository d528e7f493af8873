//! Modal project editor window.
//!
//! Creates and edits projects. Date fields are free text validated
//! through the date normalizer on save: unparsable, inverted or
//! out-of-bounds dates block the save and show the error next to the
//! offending fields, while empty fields are allowed — a half-filled
//! project is kept and simply not drawn until its dates are complete.

use eframe::egui;

use crate::app::AppState;
use lanes::color::{self, color32_to_hex, hex_to_color32};
use lanes::dates::{format_for_edit, safe_parse, validate_range};
use lanes::model::{Project, ProjectKind};

pub struct ProjectEditor {
    open: bool,
    /// `Some` when editing an existing project.
    editing_id: Option<u64>,
    name: String,
    swimlane_id: u64,
    milestone: bool,
    start_text: String,
    end_text: String,
    delivery_text: String,
    color: egui::Color32,
    description: String,
    date_error: Option<String>,
}

impl ProjectEditor {
    pub fn new() -> Self {
        Self {
            open: false,
            editing_id: None,
            name: String::new(),
            swimlane_id: 0,
            milestone: false,
            start_text: String::new(),
            end_text: String::new(),
            delivery_text: String::new(),
            color: hex_to_color32(color::DEFAULT_PROJECT_COLOR),
            description: String::new(),
            date_error: None,
        }
    }

    /// Opens the editor with a blank form for a new project.
    pub fn open_new(&mut self, state: &AppState) {
        *self = Self::new();
        self.open = true;
        self.swimlane_id = state
            .data
            .sorted_swimlanes()
            .first()
            .map(|lane| lane.id)
            .unwrap_or(0);
        self.color = hex_to_color32(&color::random_palette_color());
    }

    /// Opens the editor pre-filled from an existing project.
    pub fn open_edit(&mut self, project: &Project) {
        *self = Self::new();
        self.open = true;
        self.editing_id = Some(project.id);
        self.name = project.name.clone();
        self.swimlane_id = project.swimlane_id;
        self.color = hex_to_color32(&project.color);
        self.description = project.description.clone();
        match &project.kind {
            ProjectKind::Range { start, end } => {
                self.milestone = false;
                self.start_text = format_for_edit(*start);
                self.end_text = format_for_edit(*end);
            }
            ProjectKind::Milestone { delivery } => {
                self.milestone = true;
                self.delivery_text = format_for_edit(*delivery);
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Renders the editor window and applies a successful save to the
    /// state.
    pub fn show(&mut self, ctx: &egui::Context, state: &mut AppState) {
        if !self.open {
            return;
        }

        let title = if self.editing_id.is_some() {
            "Edit Project"
        } else {
            "Add Project"
        };

        let mut keep_open = true;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .open(&mut keep_open)
            .show(ctx, |ui| {
                ui.label("Project name");
                ui.text_edit_singleline(&mut self.name);
                ui.add_space(4.0);

                ui.label("Swimlane");
                let selected_name = state
                    .data
                    .swimlanes
                    .iter()
                    .find(|lane| lane.id == self.swimlane_id)
                    .map(|lane| lane.name.clone())
                    .unwrap_or_else(|| "—".to_string());
                egui::ComboBox::from_id_salt("project_swimlane")
                    .selected_text(selected_name)
                    .show_ui(ui, |ui| {
                        for lane in state.data.sorted_swimlanes() {
                            ui.selectable_value(&mut self.swimlane_id, lane.id, &lane.name);
                        }
                    });
                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    ui.label("Type:");
                    let range_picked = ui
                        .radio_value(&mut self.milestone, false, "📅 Date Range")
                        .changed();
                    let milestone_picked = ui
                        .radio_value(&mut self.milestone, true, "⚑ Milestone")
                        .changed();
                    if range_picked || milestone_picked {
                        self.date_error = None;
                    }
                });
                ui.add_space(4.0);

                if self.milestone {
                    ui.label("Delivery date");
                    egui::TextEdit::singleline(&mut self.delivery_text)
                        .hint_text("yyyy-mm-dd")
                        .desired_width(110.0)
                        .show(ui);
                } else {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label("Start date");
                            egui::TextEdit::singleline(&mut self.start_text)
                                .hint_text("yyyy-mm-dd")
                                .desired_width(110.0)
                                .show(ui);
                        });
                        ui.vertical(|ui| {
                            ui.label("End date");
                            egui::TextEdit::singleline(&mut self.end_text)
                                .hint_text("yyyy-mm-dd")
                                .desired_width(110.0)
                                .show(ui);
                        });
                    });
                }
                if let Some(error) = &self.date_error {
                    ui.colored_label(egui::Color32::from_rgb(231, 76, 60), error);
                }
                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    ui.label("Color:");
                    ui.color_edit_button_srgba(&mut self.color);
                });
                ui.add_space(4.0);

                ui.label("Description (optional)");
                ui.add(
                    egui::TextEdit::multiline(&mut self.description)
                        .desired_rows(3)
                        .desired_width(280.0),
                );
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let save_label = if self.editing_id.is_some() {
                        "Update Project"
                    } else {
                        "Create Project"
                    };
                    if ui.button(save_label).clicked() {
                        self.try_save(state);
                    }
                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });
            });

        if !keep_open {
            self.open = false;
        }
    }

    /// Validates the date fields and commits the project on success.
    fn try_save(&mut self, state: &mut AppState) {
        let kind = match self.build_kind() {
            Ok(kind) => kind,
            Err(message) => {
                self.date_error = Some(message);
                return;
            }
        };

        let name = self.name.trim();
        let project = Project {
            id: self.editing_id.unwrap_or_else(|| state.allocate_id()),
            name: if name.is_empty() {
                "Untitled Project".to_string()
            } else {
                name.to_string()
            },
            swimlane_id: self.swimlane_id,
            kind,
            color: color32_to_hex(self.color),
            description: self.description.trim().to_string(),
        };

        state.save_project(project);
        self.open = false;
    }

    fn build_kind(&self) -> Result<ProjectKind, String> {
        if self.milestone {
            let delivery = parse_optional(&self.delivery_text, "delivery date")?;
            if delivery.is_some() {
                validate_range(delivery, delivery).map_err(|e| e.to_string())?;
            }
            Ok(ProjectKind::Milestone { delivery })
        } else {
            let start = parse_optional(&self.start_text, "start date")?;
            let end = parse_optional(&self.end_text, "end date")?;
            if start.is_some() && end.is_some() {
                validate_range(start, end).map_err(|e| e.to_string())?;
            } else if let Some(date) = start.or(end) {
                // Half-filled ranges are allowed but still bounds-checked.
                validate_range(Some(date), Some(date)).map_err(|e| e.to_string())?;
            }
            Ok(ProjectKind::Range { start, end })
        }
    }
}

impl Default for ProjectEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Empty text is a legitimate in-progress state; anything else must
/// parse.
fn parse_optional(text: &str, field: &str) -> Result<Option<chrono::NaiveDate>, String> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    match safe_parse(text) {
        Some(date) => Ok(Some(date)),
        None => Err(format!("invalid {field}")),
    }
}

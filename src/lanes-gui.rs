//! Lanes Timeline GUI Application
//!
//! Interactive editor for swimlane timeline charts built with the egui
//! framework. The editor features:
//! - Project management (date ranges and milestones) across named,
//!   ordered swimlanes
//! - A live chart preview rendered by the `lanes` engine
//! - Chart settings (visible window, colors, grid and label toggles)
//! - High-resolution PNG export

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use chrono::{Local, NaiveDate};
use eframe::egui;

mod app;
mod ui;

use app::{AppState, PrefsCoordinator};
use lanes::{ExportCoordinator, ExportResult};
use ui::{
    render_header, render_project_panel, HeaderInteraction, ProjectEditor, ProjectInteraction,
    SettingsPanel, SwimlanePanel, TimelinePanel,
};

/// Main application entry point that initializes and launches the
/// timeline editor GUI.
fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Lanes Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Lanes Timeline",
        options,
        Box::new(|cc| Ok(Box::new(LanesApp::new(cc)))),
    )
}

/// The timeline editor application.
struct LanesApp {
    /// Centralized application state
    state: AppState,
    /// Chart panel owning the render host
    timeline: TimelinePanel,
    settings_panel: SettingsPanel,
    swimlane_panel: SwimlanePanel,
    project_editor: ProjectEditor,
    /// PNG export workflow
    exporter: ExportCoordinator,
}

impl LanesApp {
    /// Creates the editor, restoring persisted display settings.
    fn new(cc: &eframe::CreationContext) -> Self {
        let mut state = AppState::new();
        if let Some(settings) = PrefsCoordinator::load_settings(cc.storage) {
            state.data.settings = settings;
        }
        state.ensure_default_lane();

        let mut settings_panel = SettingsPanel::new();
        settings_panel.sync_from(&state.data.settings);

        Self {
            state,
            timeline: TimelinePanel::new(),
            settings_panel,
            swimlane_panel: SwimlanePanel::new(),
            project_editor: ProjectEditor::new(),
            exporter: ExportCoordinator::new(),
        }
    }

    /// Applies a finished export to the status/error line.
    fn check_export_completion(&mut self) {
        match self.exporter.check_completion() {
            ExportResult::Saved(path) => {
                self.state.error_message = None;
                self.state.status_message = Some(format!("Saved {}", path.display()));
            }
            ExportResult::Failed(message) => {
                self.state.status_message = None;
                self.state.error_message = Some(format!("Export failed: {}", message));
            }
            ExportResult::None => {}
        }
    }

    fn start_export(&mut self, path: std::path::PathBuf, today: NaiveDate, ctx: &egui::Context) {
        self.state.status_message = None;
        self.state.error_message = None;
        self.exporter.start_export(
            self.timeline.host_mut(),
            &self.state.data,
            today,
            path,
            ctx,
        );
        // The shared surface is now at export resolution; re-render it
        // for display on the next frame.
        self.timeline.invalidate();
    }
}

impl eframe::App for LanesApp {
    /// Called when the app is being shut down - persists display
    /// settings.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        PrefsCoordinator::save_settings(storage, &self.state.data.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_export_completion();

        let today = Local::now().date_naive();

        let mut export_request = None;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let exporting = self.exporter.is_exporting();
            if let Some(HeaderInteraction::ExportRequested(path)) =
                render_header(ui, &mut self.state, today, exporting)
            {
                export_request = Some(path);
            }
        });

        egui::SidePanel::left("controls")
            .default_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match render_project_panel(ui, &mut self.state) {
                        Some(ProjectInteraction::AddRequested) => {
                            self.project_editor.open_new(&self.state);
                        }
                        Some(ProjectInteraction::EditRequested(id)) => {
                            if let Some(project) = self.state.project(id) {
                                let project = project.clone();
                                self.project_editor.open_edit(&project);
                            }
                        }
                        None => {}
                    }

                    ui.separator();
                    self.swimlane_panel.show(ui, &mut self.state);
                    ui.separator();
                    self.settings_panel.show(ui, &mut self.state.data.settings);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.timeline.show(ui, &self.state.data, today);
        });

        self.project_editor.show(ctx, &mut self.state);

        if let Some(path) = export_request {
            self.start_export(path, today, ctx);
        }
    }
}

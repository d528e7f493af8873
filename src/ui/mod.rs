//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the timeline
//! editor:
//! - Header panel (export control, status line)
//! - Project panel and modal project editor
//! - Swimlane manager panel
//! - Settings panel (title, window, colors, toggles)
//! - Timeline panel (the rendered chart)

pub mod header;
pub mod project_editor;
pub mod project_panel;
pub mod settings_panel;
pub mod swimlane_panel;
pub mod timeline_panel;

pub use header::{render_header, HeaderInteraction};
pub use project_editor::ProjectEditor;
pub use project_panel::{render_project_panel, ProjectInteraction};
pub use settings_panel::SettingsPanel;
pub use swimlane_panel::SwimlanePanel;
pub use timeline_panel::TimelinePanel;

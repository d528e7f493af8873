//! Data model for timeline charts.
//!
//! Projects, swimlanes and chart settings are plain owned values. The
//! rendering engine receives them as an immutable snapshot per render call
//! and never holds references across calls; all mutation happens in the
//! host application's state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;

/// How a project occupies the timeline.
///
/// Dates are optional on purpose: a project mid-edit may not have all of
/// its dates filled in yet, and the renderer skips such projects instead
/// of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProjectKind {
    /// A span from a start date to an end date, drawn as a bar.
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// A single delivery date, drawn as a triangle marker.
    Milestone { delivery: Option<NaiveDate> },
}

impl ProjectKind {
    /// Empty range, the default for a freshly created project.
    pub fn empty_range() -> Self {
        ProjectKind::Range {
            start: None,
            end: None,
        }
    }
}

/// A single project placed on a swimlane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    /// Swimlane this project belongs to, by id. Not an ownership
    /// relation; a dangling id simply means the project is not drawn.
    pub swimlane_id: u64,
    #[serde(flatten)]
    pub kind: ProjectKind,
    /// Display color as `#rrggbb`.
    pub color: String,
    pub description: String,
}

/// A named horizontal track grouping projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swimlane {
    pub id: u64,
    pub name: String,
    /// Display color as `#rrggbb`; the band is painted at low opacity.
    pub color: String,
    /// Vertical position. Lanes render in ascending order, ties broken
    /// by data order. Callers keep this dense after reordering.
    pub order: u32,
}

/// Month label style for the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthFormat {
    /// Jan, Feb, Mar
    Short,
    /// January, February, March
    Long,
}

impl MonthFormat {
    /// Formats the month of `date` according to this style.
    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            MonthFormat::Short => date.format("%b").to_string(),
            MonthFormat::Long => date.format("%B").to_string(),
        }
    }
}

/// Chart-wide display settings.
///
/// The visible window bounds are optional: the user can clear or mistype
/// a date field, and the layout calculator substitutes defaults rather
/// than refusing to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSettings {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub title: String,
    pub background_color: String,
    pub grid_color: String,
    pub text_color: String,
    pub current_date_color: String,
    pub show_grid: bool,
    pub show_year_labels: bool,
    pub show_current_date: bool,
    pub month_format: MonthFormat,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        let (start, end) = dates::default_window();
        Self {
            start_date: Some(start),
            end_date: Some(end),
            title: "Project Timeline".to_string(),
            background_color: "#ffffff".to_string(),
            grid_color: "#d1d5db".to_string(),
            text_color: "#111827".to_string(),
            current_date_color: "#ef4444".to_string(),
            show_grid: true,
            show_year_labels: true,
            show_current_date: true,
            month_format: MonthFormat::Short,
        }
    }
}

/// The complete immutable snapshot consumed by a render call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    pub projects: Vec<Project>,
    pub swimlanes: Vec<Swimlane>,
    pub settings: TimelineSettings,
}

impl TimelineData {
    /// A small demo chart: two lanes, a range project and a milestone.
    pub fn sample() -> Self {
        let settings = TimelineSettings {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            title: "Project Timeline 2024".to_string(),
            ..TimelineSettings::default()
        };

        Self {
            projects: vec![
                Project {
                    id: 1,
                    name: "Project Alpha".to_string(),
                    swimlane_id: 1,
                    kind: ProjectKind::Range {
                        start: NaiveDate::from_ymd_opt(2024, 1, 15),
                        end: NaiveDate::from_ymd_opt(2024, 3, 30),
                    },
                    color: "#3B82F6".to_string(),
                    description: String::new(),
                },
                Project {
                    id: 2,
                    name: "Release v2.0".to_string(),
                    swimlane_id: 2,
                    kind: ProjectKind::Milestone {
                        delivery: NaiveDate::from_ymd_opt(2024, 2, 15),
                    },
                    color: "#EF4444".to_string(),
                    description: String::new(),
                },
            ],
            swimlanes: vec![
                Swimlane {
                    id: 1,
                    name: "Development".to_string(),
                    color: "#3B82F6".to_string(),
                    order: 0,
                },
                Swimlane {
                    id: 2,
                    name: "Marketing".to_string(),
                    color: "#10B981".to_string(),
                    order: 1,
                },
            ],
            settings,
        }
    }

    /// Swimlanes in rendering order: ascending `order`, ties broken by
    /// data order.
    pub fn sorted_swimlanes(&self) -> Vec<&Swimlane> {
        let mut lanes: Vec<&Swimlane> = self.swimlanes.iter().collect();
        lanes.sort_by_key(|lane| lane.order);
        lanes
    }

    /// Projects assigned to the given swimlane, in data order.
    pub fn projects_in_lane(&self, swimlane_id: u64) -> impl Iterator<Item = &Project> {
        self.projects
            .iter()
            .filter(move |p| p.swimlane_id == swimlane_id)
    }
}

//! Centralized application state for the timeline editor.
//!
//! Owns the timeline data snapshot and exposes intent-revealing mutation
//! methods for the form panels. The rendering engine never sees this
//! struct; it receives `&TimelineData` per render call.

use lanes::color;
use lanes::model::{Project, Swimlane, TimelineData};

/// Main application state.
pub struct AppState {
    /// The chart being edited.
    pub data: TimelineData,

    /// Non-blocking status line (last export result).
    pub status_message: Option<String>,

    /// Current error message to display (if any).
    pub error_message: Option<String>,

    /// Next unused entity id.
    next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates the application state seeded with the sample chart.
    pub fn new() -> Self {
        let data = TimelineData::sample();
        let next_id = highest_id(&data) + 1;
        Self {
            data,
            status_message: None,
            error_message: None,
            next_id,
        }
    }

    /// Allocates a fresh entity id.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ===== Projects =====

    /// Inserts a new project or replaces the one with the same id.
    pub fn save_project(&mut self, project: Project) {
        match self.data.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => self.data.projects.push(project),
        }
    }

    pub fn delete_project(&mut self, id: u64) {
        self.data.projects.retain(|p| p.id != id);
    }

    pub fn project(&self, id: u64) -> Option<&Project> {
        self.data.projects.iter().find(|p| p.id == id)
    }

    // ===== Swimlanes =====

    /// Appends a new lane at the bottom of the chart.
    pub fn add_swimlane(&mut self, name: &str, color_hex: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let id = self.allocate_id();
        let order = self.data.swimlanes.len() as u32;
        self.data.swimlanes.push(Swimlane {
            id,
            name: name.to_string(),
            color: color_hex.to_string(),
            order,
        });
    }

    /// Renames/recolors a lane in place.
    pub fn update_swimlane(&mut self, id: u64, name: &str, color_hex: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if let Some(lane) = self.data.swimlanes.iter_mut().find(|s| s.id == id) {
            lane.name = name.to_string();
            lane.color = color_hex.to_string();
        }
    }

    /// Removes a lane and re-indexes the remaining orders densely.
    ///
    /// Projects that referenced the lane are kept; they simply stop
    /// rendering until reassigned. The chart always keeps at least one
    /// lane.
    pub fn delete_swimlane(&mut self, id: u64) {
        self.data.swimlanes.retain(|s| s.id != id);
        self.reindex_lanes();
        self.ensure_default_lane();
    }

    /// Swaps a lane with its predecessor in display order.
    pub fn move_lane_up(&mut self, id: u64) {
        self.sort_lanes_by_order();
        if let Some(index) = self.data.swimlanes.iter().position(|s| s.id == id) {
            if index > 0 {
                self.data.swimlanes.swap(index - 1, index);
                self.reindex_lanes();
            }
        }
    }

    /// Swaps a lane with its successor in display order.
    pub fn move_lane_down(&mut self, id: u64) {
        self.sort_lanes_by_order();
        if let Some(index) = self.data.swimlanes.iter().position(|s| s.id == id) {
            if index + 1 < self.data.swimlanes.len() {
                self.data.swimlanes.swap(index, index + 1);
                self.reindex_lanes();
            }
        }
    }

    /// Guarantees at least one lane exists so new projects always have a
    /// home.
    pub fn ensure_default_lane(&mut self) {
        if self.data.swimlanes.is_empty() {
            let id = self.allocate_id();
            self.data.swimlanes.push(Swimlane {
                id,
                name: "Default".to_string(),
                color: color::DEFAULT_LANE_COLOR.to_string(),
                order: 0,
            });
        }
    }

    fn sort_lanes_by_order(&mut self) {
        self.data.swimlanes.sort_by_key(|s| s.order);
    }

    fn reindex_lanes(&mut self) {
        self.sort_lanes_by_order();
        for (index, lane) in self.data.swimlanes.iter_mut().enumerate() {
            lane.order = index as u32;
        }
    }
}

fn highest_id(data: &TimelineData) -> u64 {
    data.projects
        .iter()
        .map(|p| p.id)
        .chain(data.swimlanes.iter().map(|s| s.id))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanes::model::ProjectKind;

    fn project(id: u64, lane: u64) -> Project {
        Project {
            id,
            name: format!("P{id}"),
            swimlane_id: lane,
            kind: ProjectKind::empty_range(),
            color: "#3B82F6".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_ids_do_not_collide_with_sample_data() {
        let mut state = AppState::new();
        let id = state.allocate_id();
        assert!(state.data.projects.iter().all(|p| p.id != id));
        assert!(state.data.swimlanes.iter().all(|s| s.id != id));
    }

    #[test]
    fn test_save_project_inserts_then_replaces() {
        let mut state = AppState::new();
        let id = state.allocate_id();
        state.save_project(project(id, 1));
        let count = state.data.projects.len();

        let mut edited = project(id, 1);
        edited.name = "Renamed".to_string();
        state.save_project(edited);

        assert_eq!(state.data.projects.len(), count);
        assert_eq!(state.project(id).unwrap().name, "Renamed");
    }

    #[test]
    fn test_delete_swimlane_reindexes_densely() {
        let mut state = AppState::new();
        state.add_swimlane("Third", "#aabbcc");
        let ids: Vec<u64> = state.data.swimlanes.iter().map(|s| s.id).collect();
        state.delete_swimlane(ids[0]);

        let orders: Vec<u32> = state.data.swimlanes.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_deleting_last_lane_recreates_default() {
        let mut state = AppState::new();
        let ids: Vec<u64> = state.data.swimlanes.iter().map(|s| s.id).collect();
        for id in ids {
            state.delete_swimlane(id);
        }
        assert_eq!(state.data.swimlanes.len(), 1);
        assert_eq!(state.data.swimlanes[0].name, "Default");
        assert_eq!(state.data.swimlanes[0].order, 0);
    }

    #[test]
    fn test_move_lane_up_and_down() {
        let mut state = AppState::new();
        let first = state.data.swimlanes[0].id;
        let second = state.data.swimlanes[1].id;

        state.move_lane_down(first);
        assert_eq!(state.data.sorted_swimlanes()[0].id, second);

        state.move_lane_up(first);
        assert_eq!(state.data.sorted_swimlanes()[0].id, first);

        // Moving the top lane up is a no-op.
        state.move_lane_up(first);
        assert_eq!(state.data.sorted_swimlanes()[0].id, first);
    }

    #[test]
    fn test_deleting_lane_keeps_projects() {
        let mut state = AppState::new();
        let lane = state.data.swimlanes[0].id;
        let id = state.allocate_id();
        state.save_project(project(id, lane));
        state.delete_swimlane(lane);
        assert!(state.project(id).is_some());
    }

    #[test]
    fn test_blank_lane_name_is_rejected() {
        let mut state = AppState::new();
        let count = state.data.swimlanes.len();
        state.add_swimlane("   ", "#aabbcc");
        assert_eq!(state.data.swimlanes.len(), count);
    }
}

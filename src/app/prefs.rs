//! Display-settings persistence coordination.
//!
//! Chart display settings (title, window, colors, toggles) survive
//! application restarts through eframe's persistent storage, stored as a
//! JSON string. The chart contents themselves (projects, swimlanes) are
//! deliberately not persisted.

use lanes::model::TimelineSettings;

const SETTINGS_KEY: &str = "timeline_settings";

/// Coordinates loading and saving of chart display settings.
pub struct PrefsCoordinator;

impl PrefsCoordinator {
    /// Loads display settings from persistent storage, if present and
    /// valid.
    pub fn load_settings(storage: Option<&dyn eframe::Storage>) -> Option<TimelineSettings> {
        let json = storage?.get_string(SETTINGS_KEY)?;
        serde_json::from_str(&json).ok()
    }

    /// Saves display settings to persistent storage.
    ///
    /// Called from the application's `save` hook on shutdown.
    pub fn save_settings(storage: &mut dyn eframe::Storage, settings: &TimelineSettings) {
        if let Ok(json) = serde_json::to_string(settings) {
            storage.set_string(SETTINGS_KEY, json);
            storage.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage;
    use lanes::model::MonthFormat;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut storage = MockStorage::new();

        let settings = TimelineSettings {
            title: "Roadmap".to_string(),
            month_format: MonthFormat::Long,
            show_grid: false,
            ..TimelineSettings::default()
        };

        PrefsCoordinator::save_settings(&mut storage, &settings);
        let loaded = PrefsCoordinator::load_settings(Some(&storage)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_returns_none() {
        let storage = MockStorage::new();
        assert!(PrefsCoordinator::load_settings(Some(&storage)).is_none());
        assert!(PrefsCoordinator::load_settings(None).is_none());
    }

    #[test]
    fn test_load_corrupt_returns_none() {
        let mut storage = MockStorage::new();
        storage.set_string(SETTINGS_KEY, "{not json".to_string());
        assert!(PrefsCoordinator::load_settings(Some(&storage)).is_none());
    }
}

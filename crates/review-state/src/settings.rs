//! Local user settings (highlight color, grid dimensions)

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ReviewResult;
use crate::storage::KeyValueStorage;
use crate::view::{GridDimensions, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};

pub const SETTINGS_KEY: &str = "appSettings";

pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#FFD700";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub highlight_color: String,
    pub grid_columns: u32,
    pub grid_rows: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        let grid = GridDimensions::default();
        Self {
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            grid_columns: grid.columns(),
            grid_rows: grid.rows(),
        }
    }
}

impl AppSettings {
    /// Stored settings over the defaults; missing or broken entries fall back
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> Self {
        let raw = match storage.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("[SETTINGS] Failed to read settings: {}", e);
                return Self::default();
            }
        };
        match serde_json::from_str::<AppSettings>(&raw) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                warn!("[SETTINGS] Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStorage + ?Sized>(&self, storage: &S) -> ReviewResult<()> {
        let json = serde_json::to_string(self)?;
        storage.set_item(SETTINGS_KEY, &json)
    }

    pub fn grid(&self) -> GridDimensions {
        GridDimensions::new(self.grid_columns, self.grid_rows)
    }

    fn sanitized(mut self) -> Self {
        self.grid_columns = self.grid_columns.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION);
        self.grid_rows = self.grid_rows.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION);
        if self.highlight_color.trim().is_empty() {
            self.highlight_color = DEFAULT_HIGHLIGHT_COLOR.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_when_absent() {
        let storage = MemoryStorage::new();
        let settings = AppSettings::load(&storage);
        assert_eq!(settings.highlight_color, "#FFD700");
        assert_eq!(settings.grid().page_size(), 50);
    }

    #[test]
    fn test_partial_settings_merge_over_defaults() {
        let storage = MemoryStorage::new();
        storage
            .set_item(SETTINGS_KEY, r##"{"highlightColor":"#00ff00"}"##)
            .unwrap();
        let settings = AppSettings::load(&storage);
        assert_eq!(settings.highlight_color, "#00ff00");
        assert_eq!(settings.grid_columns, 5);
        assert_eq!(settings.grid_rows, 10);
    }

    #[test]
    fn test_out_of_range_grid_is_clamped() {
        let storage = MemoryStorage::new();
        storage
            .set_item(SETTINGS_KEY, r#"{"gridColumns":0,"gridRows":40,"highlightColor":" "}"#)
            .unwrap();
        let settings = AppSettings::load(&storage);
        assert_eq!(settings.grid_columns, 1);
        assert_eq!(settings.grid_rows, 10);
        assert_eq!(settings.highlight_color, DEFAULT_HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_save_uses_camel_case_keys() {
        let storage = MemoryStorage::new();
        let settings = AppSettings {
            highlight_color: "#123456".to_string(),
            grid_columns: 3,
            grid_rows: 4,
        };
        settings.save(&storage).unwrap();

        let raw = storage.get_item(SETTINGS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["highlightColor"], "#123456");
        assert_eq!(json["gridColumns"], 3);
        assert_eq!(AppSettings::load(&storage), settings);
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        let storage = MemoryStorage::new();
        storage.set_item(SETTINGS_KEY, "not json").unwrap();
        assert_eq!(AppSettings::load(&storage), AppSettings::default());
    }
}

//! Editor settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// Undo history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum number of undoable commands (0 = unbounded)
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Duplicate command settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateSettings {
    /// Translation applied to the copy
    pub offset: [f64; 3],
}

impl Default for DuplicateSettings {
    fn default() -> Self {
        Self {
            offset: [1.0, 1.0, 0.0],
        }
    }
}

/// Values used when a create command omits a field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimitiveDefaults {
    pub cube_size: f64,
    pub cylinder_radius: f64,
    /// Cylinder axis end, relative to its start
    pub cylinder_axis: [f64; 3],
}

impl Default for PrimitiveDefaults {
    fn default() -> Self {
        Self {
            cube_size: 1.0,
            cylinder_radius: 0.5,
            cylinder_axis: [0.0, 0.0, 1.0],
        }
    }
}

/// Tessellation settings for the mesh store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometrySettings {
    /// Cylinder segments (3..=256)
    pub segments: u32,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self { segments: 32 }
    }
}

/// All editor settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EditorSettings {
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub duplicate: DuplicateSettings,
    #[serde(default)]
    pub defaults: PrimitiveDefaults,
    #[serde(default)]
    pub geometry: GeometrySettings,
}

impl EditorSettings {
    /// Clamp values into their accepted ranges
    pub fn sanitized(mut self) -> Self {
        self.geometry.segments = self.geometry.segments.clamp(3, 256);
        self
    }

    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "scene-editor", "scene-editor")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the platform config dir, or defaults if missing/invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| EditorError::Settings(format!("read {}: {e}", path.display())))?;
        let settings: Self = serde_json::from_str(&json)
            .map_err(|e| EditorError::Settings(format!("parse {}: {e}", path.display())))?;
        Ok(settings.sanitized())
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, path: &Path) -> EditorResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| EditorError::Settings(format!("create {}: {e}", dir.display())))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EditorError::Settings(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| EditorError::Settings(format!("write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EditorSettings::default();
        assert_eq!(s.history.max_depth, 100);
        assert_eq!(s.duplicate.offset, [1.0, 1.0, 0.0]);
        assert_eq!(s.defaults.cube_size, 1.0);
        assert_eq!(s.defaults.cylinder_radius, 0.5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: EditorSettings = serde_json::from_str(r#"{"history": {"max_depth": 5}}"#).unwrap();
        assert_eq!(s.history.max_depth, 5);
        assert_eq!(s.geometry.segments, 32);
    }

    #[test]
    fn test_sanitized_clamps() {
        let mut s = EditorSettings::default();
        s.geometry.segments = 1;
        assert_eq!(s.clone().sanitized().geometry.segments, 3);
        s.geometry.segments = 10_000;
        assert_eq!(s.sanitized().geometry.segments, 256);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("scene-editor-test-{}", uuid::Uuid::new_v4()));
        let path = dir.join("settings.json");

        let mut s = EditorSettings::default();
        s.duplicate.offset = [2.0, 0.0, 0.0];
        s.save_to(&path).unwrap();

        let loaded = EditorSettings::load_from(&path).unwrap();
        assert_eq!(loaded.duplicate.offset, [2.0, 0.0, 0.0]);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let path = std::env::temp_dir().join("scene-editor-does-not-exist.json");
        assert!(matches!(
            EditorSettings::load_from(&path),
            Err(EditorError::Settings(_))
        ));
    }
}

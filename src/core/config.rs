//! Configuration and settings module.
//!
//! Color customization and window preferences persisted to the user's
//! config directory. The editing grid (`PROGRESS_STEPS`, `BPM_STEPS`)
//! stays compile-time constant and is not part of the settings.

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings filename for persistence.
const SETTINGS_FILENAME: &str = "config.json";

/// Color settings for the graph surface.
///
/// All colors can be customized by the user and are persisted to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSettings {
    /// Graph background color
    pub background: [u8; 3],
    /// Gridline color
    pub grid: [u8; 3],
    /// Curve stroke color
    pub curve: [u8; 3],
    /// Point marker color
    pub point: [u8; 3],
    /// Highlight ring color for the hovered point
    pub highlight: [u8; 3],
    /// Gridline and point label text color
    pub text: [u8; 3],
    /// Invalid-input text color in the row editor
    pub invalid: [u8; 3],
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background: [30, 30, 35], // Dark gray
            grid: [70, 70, 78],       // Medium gray
            curve: [100, 150, 255],   // Blue
            point: [100, 150, 255],   // Blue
            highlight: [244, 67, 54], // Red
            text: [160, 160, 168],    // Light gray
            invalid: [244, 67, 54],   // Red
        }
    }
}

impl ColorSettings {
    /// Convert a color array to egui Color32.
    #[inline]
    pub fn to_color32(color: [u8; 3]) -> Color32 {
        Color32::from_rgb(color[0], color[1], color[2])
    }

    /// Get the background color as Color32.
    pub fn background_color(&self) -> Color32 {
        Self::to_color32(self.background)
    }

    /// Get the gridline color as Color32.
    pub fn grid_color(&self) -> Color32 {
        Self::to_color32(self.grid)
    }

    /// Get the curve stroke color as Color32.
    pub fn curve_color(&self) -> Color32 {
        Self::to_color32(self.curve)
    }

    /// Get the point marker color as Color32.
    pub fn point_color(&self) -> Color32 {
        Self::to_color32(self.point)
    }

    /// Get the highlight ring color as Color32.
    pub fn highlight_color(&self) -> Color32 {
        Self::to_color32(self.highlight)
    }

    /// Get the label text color as Color32.
    pub fn text_color(&self) -> Color32 {
        Self::to_color32(self.text)
    }

    /// Get the invalid-input color as Color32.
    pub fn invalid_color(&self) -> Color32 {
        Self::to_color32(self.invalid)
    }
}

/// Application settings including color customization and window preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Color customization settings.
    pub colors: ColorSettings,

    /// Window size to restore on startup (width, height).
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
}

impl EditorSettings {
    /// Get the settings file path in the user's config directory.
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("tempo-curve-editor");
            path.push(SETTINGS_FILENAME);
            path
        })
    }

    /// Load settings from disk, returning defaults if loading fails.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            log::warn!("could not determine config directory, using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("failed to parse {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path()
            .ok_or_else(|| "could not determine config directory".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize settings: {}", e))?;

        std::fs::write(&path, content).map_err(|e| format!("failed to write settings file: {}", e))
    }

    /// Set the window size to restore on next startup.
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window_size = Some((width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_settings_default() {
        let settings = ColorSettings::default();
        assert_eq!(settings.background, [30, 30, 35]);
        assert_eq!(settings.highlight, [244, 67, 54]);
    }

    #[test]
    fn test_color32_conversion() {
        let color = [255, 128, 64];
        assert_eq!(
            ColorSettings::to_color32(color),
            Color32::from_rgb(255, 128, 64)
        );
    }

    #[test]
    fn test_settings_serialization_round_trip() {
        let mut settings = EditorSettings::default();
        settings.colors.curve = [1, 2, 3];
        settings.window_size = Some((1024.0, 768.0));

        let json = serde_json::to_string(&settings).unwrap();
        let restored: EditorSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.colors, settings.colors);
        assert_eq!(restored.window_size, Some((1024.0, 768.0)));
    }

    #[test]
    fn test_backward_compatible_deserialization() {
        // Old config files without window_size still load.
        let old_json = r#"{"colors":{"background":[30,30,35],"grid":[70,70,78],"curve":[100,150,255],"point":[100,150,255],"highlight":[244,67,54],"text":[160,160,168],"invalid":[244,67,54]}}"#;
        let settings: EditorSettings = serde_json::from_str(old_json).unwrap();
        assert!(settings.window_size.is_none());
        assert_eq!(settings.colors, ColorSettings::default());
    }

    #[test]
    fn test_set_window_size() {
        let mut settings = EditorSettings::default();
        settings.set_window_size(800.0, 600.0);
        assert_eq!(settings.window_size, Some((800.0, 600.0)));
    }
}

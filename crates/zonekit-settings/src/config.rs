//! Configuration for the zone editor.
//!
//! Provides configuration file handling and validation. Supports TOML
//! and JSON file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Snapping behavior (grid and edge snapping)
//! - Editor behavior (minimum zone size, undo depth)
//! - Per-layout defaults (padding, gaps, zone appearance)
//! - Keyboard shortcuts

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use zonekit_core::constants;

/// Grid and edge snapping behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnappingSettings {
    /// Snap edges to the grid lattice
    pub grid_enabled: bool,
    /// Grid interval along the x axis, normalized
    pub grid_interval_x: f64,
    /// Grid interval along the y axis, normalized
    pub grid_interval_y: f64,
    /// Snap edges to neighboring zones' edges
    pub edge_enabled: bool,
    /// Distance within which an edge attracts, normalized
    pub edge_threshold: f64,
}

impl Default for SnappingSettings {
    fn default() -> Self {
        Self {
            grid_enabled: true,
            grid_interval_x: constants::DEFAULT_GRID_INTERVAL,
            grid_interval_y: constants::DEFAULT_GRID_INTERVAL,
            edge_enabled: true,
            edge_threshold: constants::DEFAULT_EDGE_SNAP_THRESHOLD,
        }
    }
}

/// Editor behavior settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Minimum zone width and height, normalized
    pub min_zone_size: f64,
    /// Offset applied to duplicated and offset-pasted zones
    pub duplicate_offset: f64,
    /// Bound on undo history depth
    pub undo_depth: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_zone_size: constants::DEFAULT_MIN_ZONE_SIZE,
            duplicate_offset: constants::DUPLICATE_OFFSET,
            undo_depth: constants::DEFAULT_UNDO_DEPTH,
        }
    }
}

/// Default appearance for newly created zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceDefaults {
    /// Fill color while a drag hovers the zone, `#rrggbb`
    pub highlight_color: String,
    /// Fill color while inactive, `#rrggbb`
    pub inactive_color: String,
    /// Border color, `#rrggbb`
    pub border_color: String,
    /// Opacity while highlighted, 0.0-1.0
    pub active_opacity: f64,
    /// Opacity while inactive, 0.0-1.0
    pub inactive_opacity: f64,
    /// Border width in pixels
    pub border_width: f64,
    /// Border corner radius in pixels
    pub border_radius: f64,
}

impl Default for AppearanceDefaults {
    fn default() -> Self {
        Self {
            highlight_color: "#3daee9".to_string(),
            inactive_color: "#31363b".to_string(),
            border_color: "#fcfcfc".to_string(),
            active_opacity: 0.5,
            inactive_opacity: 0.2,
            border_width: 2.0,
            border_radius: 8.0,
        }
    }
}

/// Per-layout defaults inherited unless a layout overrides them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDefaults {
    /// Gap between adjacent zones, in pixels
    pub zone_padding: f64,
    /// Gap between zones and the screen edge, in pixels
    pub outer_gap: f64,
    /// Appearance for zones without custom colors
    pub appearance: AppearanceDefaults,
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            zone_padding: 8.0,
            outer_gap: 8.0,
            appearance: AppearanceDefaults::default(),
        }
    }
}

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapping behavior
    pub snapping: SnappingSettings,
    /// Editor behavior
    pub editor: EditorSettings,
    /// Per-layout defaults
    pub layout_defaults: LayoutDefaults,
    /// Keyboard shortcut strings, action id -> key sequence
    pub shortcuts: HashMap<String, String>,
}

impl Config {
    /// Default keyboard shortcuts for editor actions
    pub fn default_shortcuts() -> HashMap<String, String> {
        [
            ("edit_undo", "Ctrl+Z"),
            ("edit_redo", "Ctrl+Shift+Z"),
            ("edit_cut", "Ctrl+X"),
            ("edit_copy", "Ctrl+C"),
            ("edit_paste", "Ctrl+V"),
            ("edit_duplicate", "Ctrl+D"),
            ("edit_delete", "Del"),
            ("edit_select_all", "Ctrl+A"),
            ("zone_split_horizontal", "Ctrl+H"),
            ("zone_split_vertical", "Ctrl+T"),
            ("zone_bring_to_front", "Ctrl+Shift+Up"),
            ("zone_send_to_back", "Ctrl+Shift+Down"),
            ("layout_save", "Ctrl+S"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Platform-specific default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zonekit").join("config.toml"))
    }

    /// Load configuration from a TOML or JSON file, by extension
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = match extension_of(path).as_str() {
            "toml" => toml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat {
                    extension: other.to_string(),
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML or JSON file, by extension
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = match extension_of(path).as_str() {
            "toml" => toml::to_string_pretty(self)?,
            "json" => serde_json::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat {
                    extension: other.to_string(),
                })
            }
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> SettingsResult<()> {
        let snapping = &self.snapping;
        if snapping.grid_interval_x <= 0.0 || snapping.grid_interval_x > 0.5 {
            return Err(invalid(
                "snapping.grid_interval_x",
                "must be in (0.0, 0.5]",
            ));
        }
        if snapping.grid_interval_y <= 0.0 || snapping.grid_interval_y > 0.5 {
            return Err(invalid(
                "snapping.grid_interval_y",
                "must be in (0.0, 0.5]",
            ));
        }
        if snapping.edge_threshold < 0.0 || snapping.edge_threshold > 0.25 {
            return Err(invalid("snapping.edge_threshold", "must be in [0.0, 0.25]"));
        }

        let editor = &self.editor;
        if editor.min_zone_size <= 0.0 || editor.min_zone_size > 0.5 {
            return Err(invalid("editor.min_zone_size", "must be in (0.0, 0.5]"));
        }
        if editor.undo_depth == 0 {
            return Err(invalid("editor.undo_depth", "must be at least 1"));
        }

        let appearance = &self.layout_defaults.appearance;
        for (field, value) in [
            ("active_opacity", appearance.active_opacity),
            ("inactive_opacity", appearance.inactive_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(
                    &format!("layout_defaults.appearance.{field}"),
                    "must be in [0.0, 1.0]",
                ));
            }
        }
        if self.layout_defaults.zone_padding < 0.0 || self.layout_defaults.outer_gap < 0.0 {
            return Err(invalid("layout_defaults", "padding and gap must be >= 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

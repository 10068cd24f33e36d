//! Zone records: the unit of layout editing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zonekit_core::Rect;
use zonekit_settings::AppearanceDefaults;

/// Stable, unique identifier of a zone.
///
/// Generated at creation and never reused; survives every mutation of
/// the zone it names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ZoneId(Uuid);

impl ZoneId {
    /// Generates a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ZoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ZoneId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-zone visual styling.
///
/// `use_custom_colors` gates whether these values override the
/// layout-level defaults when the zone is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneAppearance {
    pub highlight_color: String,
    pub inactive_color: String,
    pub border_color: String,
    pub active_opacity: f64,
    pub inactive_opacity: f64,
    pub border_width: f64,
    pub border_radius: f64,
    pub use_custom_colors: bool,
}

impl ZoneAppearance {
    /// Builds an appearance from the configured layout defaults, with
    /// custom colors disabled.
    pub fn from_defaults(defaults: &AppearanceDefaults) -> Self {
        Self {
            highlight_color: defaults.highlight_color.clone(),
            inactive_color: defaults.inactive_color.clone(),
            border_color: defaults.border_color.clone(),
            active_opacity: defaults.active_opacity,
            inactive_opacity: defaults.inactive_opacity,
            border_width: defaults.border_width,
            border_radius: defaults.border_radius,
            use_custom_colors: false,
        }
    }
}

impl Default for ZoneAppearance {
    fn default() -> Self {
        Self::from_defaults(&AppearanceDefaults::default())
    }
}

/// A single rectangular region of a layout.
///
/// Geometry is normalized layout-relative; the paint (z-) order is the
/// zone's position in the store sequence, not a field here.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    /// User-facing label; empty is allowed, non-empty names are unique
    /// within a layout.
    pub name: String,
    /// Keyboard-binding number, unique within a layout, 1-99.
    pub number: u8,
    pub geometry: Rect,
    pub appearance: ZoneAppearance,
}

impl Zone {
    /// Creates a zone with a fresh id and an empty name.
    pub fn new(geometry: Rect, number: u8, appearance: ZoneAppearance) -> Self {
        Self {
            id: ZoneId::new(),
            name: String::new(),
            number,
            geometry,
            appearance,
        }
    }
}

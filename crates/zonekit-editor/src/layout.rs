//! Layout records and their persisted JSON schema.
//!
//! A layout is the persisted unit: identity and metadata here, the
//! zones themselves in the store while editing. `LayoutFile` is the
//! wire form exchanged with the persistence service; all geometry in it
//! is normalized floats in [0, 1].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zonekit_core::constants::{INHERIT_DEFAULT, MAX_ZONE_NUMBER};
use zonekit_core::{Rect, Result, ValidationError};

use crate::zone::{Zone, ZoneAppearance, ZoneId};

/// Stable identifier of a layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LayoutId(Uuid);

impl LayoutId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LayoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for LayoutId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LayoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout-level metadata edited alongside the zones.
///
/// `zone_padding`/`outer_gap` of [`INHERIT_DEFAULT`] mean "inherit the
/// global default"; empty visibility lists mean "visible everywhere".
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub id: LayoutId,
    pub name: String,
    pub kind: String,
    pub is_built_in: bool,
    pub shader_id: Option<String>,
    pub shader_params: BTreeMap<String, f64>,
    pub zone_padding: f64,
    pub outer_gap: f64,
    pub allowed_screens: Vec<String>,
    pub allowed_desktops: Vec<String>,
    pub allowed_activities: Vec<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Layout {
    /// Creates an empty custom layout inheriting every default.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: LayoutId::new(),
            name: name.into(),
            kind: "custom".to_string(),
            is_built_in: false,
            shader_id: None,
            shader_params: BTreeMap::new(),
            zone_padding: INHERIT_DEFAULT,
            outer_gap: INHERIT_DEFAULT,
            allowed_screens: Vec::new(),
            allowed_desktops: Vec::new(),
            allowed_activities: Vec::new(),
            created: now,
            modified: now,
        }
    }
}

/// Persisted zone appearance, camelCase wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceData {
    pub highlight_color: String,
    pub inactive_color: String,
    pub border_color: String,
    pub active_opacity: f64,
    pub inactive_opacity: f64,
    pub border_width: f64,
    pub border_radius: f64,
    pub use_custom_colors: bool,
}

impl Default for AppearanceData {
    fn default() -> Self {
        Self::from_appearance(&ZoneAppearance::default())
    }
}

impl AppearanceData {
    pub fn from_appearance(appearance: &ZoneAppearance) -> Self {
        Self {
            highlight_color: appearance.highlight_color.clone(),
            inactive_color: appearance.inactive_color.clone(),
            border_color: appearance.border_color.clone(),
            active_opacity: appearance.active_opacity,
            inactive_opacity: appearance.inactive_opacity,
            border_width: appearance.border_width,
            border_radius: appearance.border_radius,
            use_custom_colors: appearance.use_custom_colors,
        }
    }

    pub fn to_appearance(&self) -> ZoneAppearance {
        ZoneAppearance {
            highlight_color: self.highlight_color.clone(),
            inactive_color: self.inactive_color.clone(),
            border_color: self.border_color.clone(),
            active_opacity: self.active_opacity,
            inactive_opacity: self.inactive_opacity,
            border_width: self.border_width,
            border_radius: self.border_radius,
            use_custom_colors: self.use_custom_colors,
        }
    }
}

/// Persisted zone record, camelCase wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneData {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    pub zone_number: u8,
    pub relative_geometry: Rect,
    #[serde(default)]
    pub appearance: AppearanceData,
}

impl ZoneData {
    pub fn from_zone(zone: &Zone) -> Self {
        Self {
            id: zone.id.as_uuid(),
            name: zone.name.clone(),
            zone_number: zone.number,
            relative_geometry: zone.geometry,
            appearance: AppearanceData::from_appearance(&zone.appearance),
        }
    }

    /// Converts to a live zone, validating geometry and number range.
    pub fn to_zone(&self) -> Result<Zone> {
        if self.zone_number == 0 || self.zone_number > MAX_ZONE_NUMBER {
            return Err(ValidationError::NumberOutOfRange {
                number: self.zone_number,
            }
            .into());
        }
        let rect = self.relative_geometry;
        let components = [rect.x, rect.y, rect.width, rect.height];
        if components.iter().any(|value| !value.is_finite()) {
            return Err(ValidationError::InvalidGeometry {
                reason: "geometry contains a non-finite value".to_string(),
            }
            .into());
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(ValidationError::InvalidGeometry {
                reason: "zone has no area".to_string(),
            }
            .into());
        }
        if rect.x < 0.0 || rect.y < 0.0 || rect.right() > 1.0 + 1e-9 || rect.bottom() > 1.0 + 1e-9
        {
            return Err(ValidationError::InvalidGeometry {
                reason: "geometry exceeds the layout bounds".to_string(),
            }
            .into());
        }
        Ok(Zone {
            id: ZoneId::from(self.id),
            name: self.name.clone(),
            number: self.zone_number,
            geometry: rect,
            appearance: self.appearance.to_appearance(),
        })
    }
}

fn inherit_default() -> f64 {
    INHERIT_DEFAULT
}

fn is_inherit(value: &f64) -> bool {
    *value == INHERIT_DEFAULT
}

/// The persisted layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFile {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_built_in: bool,
    pub zones: Vec<ZoneData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shader_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shader_params: BTreeMap<String, f64>,
    #[serde(default = "inherit_default", skip_serializing_if = "is_inherit")]
    pub zone_padding: f64,
    #[serde(default = "inherit_default", skip_serializing_if = "is_inherit")]
    pub outer_gap: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_screens: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_desktops: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl LayoutFile {
    /// Assembles the wire form from metadata and live zones.
    pub fn from_parts(layout: &Layout, zones: &[Zone]) -> Self {
        Self {
            id: layout.id.as_uuid(),
            name: layout.name.clone(),
            kind: layout.kind.clone(),
            is_built_in: layout.is_built_in,
            zones: zones.iter().map(ZoneData::from_zone).collect(),
            shader_id: layout.shader_id.clone(),
            shader_params: layout.shader_params.clone(),
            zone_padding: layout.zone_padding,
            outer_gap: layout.outer_gap,
            allowed_screens: layout.allowed_screens.clone(),
            allowed_desktops: layout.allowed_desktops.clone(),
            allowed_activities: layout.allowed_activities.clone(),
            created: Some(layout.created),
            modified: Some(layout.modified),
        }
    }

    /// Splits the wire form into metadata and live zones, validating
    /// every zone before anything is returned.
    pub fn into_parts(self) -> Result<(Layout, Vec<Zone>)> {
        let zones = self
            .zones
            .iter()
            .map(ZoneData::to_zone)
            .collect::<Result<Vec<_>>>()?;
        let now = Utc::now();
        let layout = Layout {
            id: LayoutId::from(self.id),
            name: self.name,
            kind: self.kind,
            is_built_in: self.is_built_in,
            shader_id: self.shader_id,
            shader_params: self.shader_params,
            zone_padding: self.zone_padding,
            outer_gap: self.outer_gap,
            allowed_screens: self.allowed_screens,
            allowed_desktops: self.allowed_desktops,
            allowed_activities: self.allowed_activities,
            created: self.created.unwrap_or(now),
            modified: self.modified.unwrap_or(now),
        };
        Ok((layout, zones))
    }
}

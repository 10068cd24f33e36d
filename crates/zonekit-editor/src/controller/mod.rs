//! Editor controller: the single point of mutation for the UI layer.
//!
//! The controller validates input, applies the snap pipeline, composes
//! command objects, and owns selection state plus the collaborator
//! service handles. Every mutating entry point validates first and
//! aborts with a failure event before any state changes; no-op updates
//! within the geometry tolerance are suppressed so sub-pixel jitter
//! never pollutes the undo stack.

mod clipboard_ops;
mod drag;
mod layout_io;

use std::sync::Arc;

use crate::clipboard::{ClipboardAccess, InMemoryClipboard};
use crate::commands::{AppearanceChange, EditorCommand};
use crate::history::UndoController;
use crate::layout::Layout;
use crate::selection::SelectionModel;
use crate::services::{
    LayoutRepository, MemoryLayoutRepository, ShaderCatalog, ShaderInfo, StaticShaderCatalog,
};
use crate::snapping::{
    calculate_fill_region, collect_geometries_at_divider, find_adjacent_zones,
    shared_edge_length, snap_geometry_selective, SnapEdges,
};
use crate::templates::LayoutTemplate;
use crate::zone::{Zone, ZoneAppearance, ZoneId};
use crate::zone_store::ZoneStore;
use chrono::Utc;
use zonekit_core::constants::{
    FORBIDDEN_NAME_CHARS, GEOMETRY_EPSILON, INHERIT_DEFAULT, MAX_ZONE_NAME_LEN, MAX_ZONE_NUMBER,
};
use zonekit_core::{
    EditorEvent, Error, EventBus, Rect, Result, StoreError, ValidationError,
};
use zonekit_settings::Config;

use self::drag::MultiDragState;

/// Which visibility allow-list a toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityList {
    Screens,
    Desktops,
    Activities,
}

/// Orchestration façade over the zone store, undo stack, selection,
/// and external services, for one editing session.
pub struct EditorController {
    config: Config,
    events: Arc<EventBus>,
    store: ZoneStore,
    selection: SelectionModel,
    history: UndoController,
    repository: Box<dyn LayoutRepository>,
    shaders: Box<dyn ShaderCatalog>,
    clipboard: Box<dyn ClipboardAccess>,
    layout: Layout,
    drag: Option<MultiDragState>,
}

impl EditorController {
    /// Creates a controller over the given collaborator services.
    pub fn new(
        config: Config,
        repository: Box<dyn LayoutRepository>,
        shaders: Box<dyn ShaderCatalog>,
        clipboard: Box<dyn ClipboardAccess>,
    ) -> Self {
        let events = Arc::new(EventBus::new());
        let store = ZoneStore::new(
            events.clone(),
            config.layout_defaults.appearance.clone(),
        );
        let history = UndoController::new(config.editor.undo_depth);
        Self {
            config,
            events,
            store,
            selection: SelectionModel::new(),
            history,
            repository,
            shaders,
            clipboard,
            layout: Layout::new("Untitled"),
            drag: None,
        }
    }

    /// Creates a controller with in-process services, for headless use
    /// and tests.
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            Box::new(MemoryLayoutRepository::new()),
            Box::new(StaticShaderCatalog::default()),
            Box::new(InMemoryClipboard::new()),
        )
    }

    // Accessors ----------------------------------------------------------

    /// The event bus this session publishes to.
    pub fn events(&self) -> Arc<EventBus> {
        self.events.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The zones in paint order.
    pub fn zones(&self) -> &[Zone] {
        self.store.zones()
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.store.get(id)
    }

    pub fn store(&self) -> &ZoneStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// The selected zones, in paint order.
    pub fn selected_zones(&self) -> Vec<&Zone> {
        self.store
            .zones()
            .iter()
            .filter(|zone| self.selection.contains(zone.id))
            .collect()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether unsaved changes exist.
    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }

    // Internal plumbing --------------------------------------------------

    /// Publishes a failure event and hands the error back to the caller.
    pub(crate) fn fail(&self, error: Error) -> Error {
        self.events.publish(EditorEvent::OperationFailed {
            reason: error.to_string(),
        });
        error
    }

    pub(crate) fn publish_selection(&self) {
        self.events.publish(EditorEvent::SelectionChanged {
            selected: self
                .selection
                .ids()
                .iter()
                .map(|id| id.as_uuid())
                .collect(),
        });
    }

    fn emit_clean_transition(&self, was_clean: bool) {
        let clean = self.history.is_clean();
        if clean != was_clean {
            self.events
                .publish(EditorEvent::CleanStateChanged { clean });
        }
    }

    pub(crate) fn push_command(&mut self, command: EditorCommand) {
        let was_clean = self.history.is_clean();
        self.history
            .push(command, &mut self.store, &mut self.selection);
        self.emit_clean_transition(was_clean);
    }

    pub(crate) fn begin_macro(&mut self, label: &str) {
        self.history.begin_macro(label);
    }

    pub(crate) fn end_macro(&mut self) {
        let was_clean = self.history.is_clean();
        self.history.end_macro();
        self.emit_clean_transition(was_clean);
    }

    pub(crate) fn require_zone(&self, id: ZoneId) -> Result<Zone> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| self.fail(StoreError::ZoneNotFound { id: id.as_uuid() }.into()))
    }

    fn min_zone_size(&self) -> f64 {
        self.config.editor.min_zone_size
    }

    pub(crate) fn snapped(&self, rect: Rect, exclude: Option<ZoneId>, edges: SnapEdges) -> Rect {
        snap_geometry_selective(
            rect,
            self.store.zones(),
            exclude,
            &self.config.snapping,
            self.min_zone_size(),
            edges,
        )
    }

    // Validation ---------------------------------------------------------

    fn validate_geometry(&self, rect: &Rect) -> Result<()> {
        let components = [rect.x, rect.y, rect.width, rect.height];
        if components.iter().any(|value| !value.is_finite()) {
            return Err(ValidationError::InvalidGeometry {
                reason: "geometry contains a non-finite value".to_string(),
            }
            .into());
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(ValidationError::InvalidGeometry {
                reason: "zone size must be positive".to_string(),
            }
            .into());
        }
        if rect.x >= 1.0 || rect.y >= 1.0 || rect.right() <= 0.0 || rect.bottom() <= 0.0 {
            return Err(ValidationError::InvalidGeometry {
                reason: "zone lies entirely outside the layout".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn validate_name(&self, name: &str, exclude: Option<ZoneId>) -> Result<()> {
        let length = name.chars().count();
        if length > MAX_ZONE_NAME_LEN {
            return Err(ValidationError::NameTooLong { length }.into());
        }
        for character in FORBIDDEN_NAME_CHARS {
            if name.contains(character) {
                return Err(ValidationError::ForbiddenCharacter { character }.into());
            }
        }
        if !self.store.is_name_free(name, exclude) {
            return Err(ValidationError::DuplicateName {
                name: name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn validate_number(&self, number: u8, exclude: Option<ZoneId>) -> Result<()> {
        if number == 0 || number > MAX_ZONE_NUMBER {
            return Err(ValidationError::NumberOutOfRange { number }.into());
        }
        if !self.store.is_number_free(number, exclude) {
            return Err(ValidationError::DuplicateNumber { number }.into());
        }
        Ok(())
    }

    fn validate_appearance(&self, appearance: &ZoneAppearance) -> Result<()> {
        for (field, value) in [
            ("active_opacity", appearance.active_opacity),
            ("inactive_opacity", appearance.inactive_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    reason: "opacity must be in [0.0, 1.0]".to_string(),
                }
                .into());
            }
        }
        if appearance.border_width < 0.0 || appearance.border_radius < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "border".to_string(),
                reason: "border width and radius must be >= 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn validate_appearance_change(&self, change: &AppearanceChange) -> Result<()> {
        let (field, value) = match change {
            AppearanceChange::ActiveOpacity(value) => ("active_opacity", *value),
            AppearanceChange::InactiveOpacity(value) => ("inactive_opacity", *value),
            AppearanceChange::BorderWidth(value) => ("border_width", *value),
            AppearanceChange::BorderRadius(value) => ("border_radius", *value),
            _ => return Ok(()),
        };
        let valid = match change {
            AppearanceChange::ActiveOpacity(_) | AppearanceChange::InactiveOpacity(_) => {
                (0.0..=1.0).contains(&value)
            }
            _ => value >= 0.0,
        };
        if !valid {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                reason: "value out of range".to_string(),
            }
            .into());
        }
        Ok(())
    }

    // Zone creation and removal ------------------------------------------

    /// Validates, snaps, and adds a zone on top of the paint order.
    pub fn add_zone(&mut self, rect: Rect) -> Result<ZoneId> {
        self.validate_geometry(&rect).map_err(|e| self.fail(e))?;
        let rect = self.snapped(rect, None, SnapEdges::ALL);
        let zone = self
            .store
            .new_zone(rect)
            .ok_or_else(|| self.fail(StoreError::NumbersExhausted.into()))?;
        let id = zone.id;
        self.push_command(EditorCommand::AddZone { zone });
        Ok(id)
    }

    /// Deletes a zone; with `auto_fill`, formerly adjacent zones grow
    /// into the vacated space, largest shared edge first, all under one
    /// undo entry.
    pub fn delete_zone(&mut self, id: ZoneId, auto_fill: bool) -> Result<()> {
        let zone = self.require_zone(id)?;
        let index = self.store.index_of(id).unwrap_or_default();

        if !auto_fill {
            self.push_command(EditorCommand::DeleteZone { zone, index });
            self.publish_selection();
            return Ok(());
        }

        let removed_rect = zone.geometry;
        let mut neighbors: Vec<(ZoneId, f64)> = find_adjacent_zones(id, self.store.zones())
            .all()
            .into_iter()
            .filter_map(|nid| {
                self.store
                    .get(nid)
                    .map(|n| (nid, shared_edge_length(&removed_rect, &n.geometry)))
            })
            .collect();
        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1));

        self.begin_macro("Delete Zone");
        self.push_command(EditorCommand::DeleteZone { zone, index });
        for (nid, _) in neighbors {
            if let Some(region) = calculate_fill_region(nid, self.store.zones(), None) {
                let old = match self.store.get(nid) {
                    Some(neighbor) => neighbor.geometry,
                    None => continue,
                };
                self.push_command(EditorCommand::Fill {
                    id: nid,
                    old,
                    new: region,
                });
            }
        }
        self.end_macro();
        self.publish_selection();
        Ok(())
    }

    /// Deletes every selected zone as one undo entry.
    pub fn delete_selected(&mut self) -> Result<usize> {
        let ids = self.selection.to_vec();
        if ids.is_empty() {
            return Err(self.fail(ValidationError::EmptySelection.into()));
        }
        let old_selection = ids.clone();
        self.begin_macro("Delete Zones");
        self.push_command(EditorCommand::ChangeSelection {
            old: old_selection,
            new: Vec::new(),
        });
        let mut removed = 0;
        for id in &ids {
            if let (Some(zone), Some(index)) =
                (self.store.get(*id).cloned(), self.store.index_of(*id))
            {
                self.push_command(EditorCommand::DeleteZone { zone, index });
                removed += 1;
            }
        }
        self.end_macro();
        self.publish_selection();
        Ok(removed)
    }

    /// Duplicates a zone with an offset position and a fresh number.
    pub fn duplicate_zone(&mut self, id: ZoneId) -> Result<ZoneId> {
        let zone = self.build_duplicate(id)?;
        let new_id = zone.id;
        self.push_command(EditorCommand::Duplicate { source: id, zone });
        Ok(new_id)
    }

    /// Duplicates every selected zone as one undo entry; the duplicates
    /// become the new selection.
    pub fn duplicate_selected(&mut self) -> Result<Vec<ZoneId>> {
        let ids = self.selection.to_vec();
        if ids.is_empty() {
            return Err(self.fail(ValidationError::EmptySelection.into()));
        }
        let old_selection = ids.clone();
        let mut new_ids = Vec::new();
        self.begin_macro("Duplicate Zones");
        for id in ids {
            match self.build_duplicate(id) {
                Ok(zone) => {
                    new_ids.push(zone.id);
                    self.push_command(EditorCommand::Duplicate { source: id, zone });
                }
                Err(error) => {
                    self.end_macro();
                    return Err(error);
                }
            }
        }
        self.push_command(EditorCommand::ChangeSelection {
            old: old_selection,
            new: new_ids.clone(),
        });
        self.end_macro();
        self.publish_selection();
        Ok(new_ids)
    }

    fn build_duplicate(&self, id: ZoneId) -> Result<Zone> {
        let source = self.require_zone(id)?;
        let number = self
            .store
            .allocate_number()
            .ok_or_else(|| self.fail(StoreError::NumbersExhausted.into()))?;
        let mut zone = source;
        zone.id = ZoneId::new();
        zone.number = number;
        if !zone.name.is_empty() {
            zone.name = self.store.unique_copy_name(&zone.name);
        }
        let offset = self.config.editor.duplicate_offset;
        zone.geometry = zone.geometry.translated(offset, offset).clamp_to_unit(0.0);
        Ok(zone)
    }

    /// Halves a zone along the requested axis. The original keeps the
    /// first half; the new zone takes the second and inherits the
    /// original's appearance.
    pub fn split_zone(&mut self, id: ZoneId, horizontal: bool) -> Result<ZoneId> {
        let original = self.require_zone(id)?;
        let rect = original.geometry;
        let half_extent = if horizontal {
            rect.height / 2.0
        } else {
            rect.width / 2.0
        };
        if half_extent < self.min_zone_size() {
            return Err(self.fail(
                ValidationError::InvalidGeometry {
                    reason: "zone is too small to split".to_string(),
                }
                .into(),
            ));
        }
        let number = self
            .store
            .allocate_number()
            .ok_or_else(|| self.fail(StoreError::NumbersExhausted.into()))?;

        let (shrunk, second) = if horizontal {
            (
                Rect::new(rect.x, rect.y, rect.width, half_extent),
                Rect::new(rect.x, rect.y + half_extent, rect.width, half_extent),
            )
        } else {
            (
                Rect::new(rect.x, rect.y, half_extent, rect.height),
                Rect::new(rect.x + half_extent, rect.y, half_extent, rect.height),
            )
        };

        let created = Zone::new(second, number, original.appearance.clone());
        let new_id = created.id;
        self.push_command(EditorCommand::Split {
            original,
            shrunk,
            created,
        });
        Ok(new_id)
    }

    // Zone field updates -------------------------------------------------

    /// Updates a zone's geometry through the snap-then-clamp pipeline.
    ///
    /// `edges` names the edges being actively changed so a handle
    /// resize never snaps the fixed edge. Returns false when the result
    /// is within tolerance of the current geometry (no undo entry).
    pub fn update_zone_geometry(
        &mut self,
        id: ZoneId,
        rect: Rect,
        edges: SnapEdges,
    ) -> Result<bool> {
        let zone = self.require_zone(id)?;
        self.validate_geometry(&rect).map_err(|e| self.fail(e))?;
        let new = self.snapped(rect, Some(id), edges);
        if new.approx_eq(&zone.geometry, GEOMETRY_EPSILON) {
            return Ok(false);
        }
        self.push_command(EditorCommand::UpdateGeometry {
            id,
            old: zone.geometry,
            new,
        });
        Ok(true)
    }

    /// Renames a zone after length/charset/uniqueness validation.
    pub fn rename_zone(&mut self, id: ZoneId, name: &str) -> Result<bool> {
        let zone = self.require_zone(id)?;
        self.validate_name(name, Some(id)).map_err(|e| self.fail(e))?;
        if zone.name == name {
            return Ok(false);
        }
        self.push_command(EditorCommand::UpdateName {
            id,
            old: zone.name,
            new: name.to_string(),
        });
        Ok(true)
    }

    /// Renumbers a zone after range/uniqueness validation.
    pub fn renumber_zone(&mut self, id: ZoneId, number: u8) -> Result<bool> {
        let zone = self.require_zone(id)?;
        self.validate_number(number, Some(id))
            .map_err(|e| self.fail(e))?;
        if zone.number == number {
            return Ok(false);
        }
        self.push_command(EditorCommand::UpdateNumber {
            id,
            old: zone.number,
            new: number,
        });
        Ok(true)
    }

    /// Replaces a zone's appearance record.
    pub fn set_zone_appearance(
        &mut self,
        id: ZoneId,
        appearance: ZoneAppearance,
    ) -> Result<bool> {
        let zone = self.require_zone(id)?;
        self.validate_appearance(&appearance)
            .map_err(|e| self.fail(e))?;
        if zone.appearance == appearance {
            return Ok(false);
        }
        self.push_command(EditorCommand::UpdateAppearance {
            id,
            old: zone.appearance,
            new: appearance,
        });
        Ok(true)
    }

    /// Applies one appearance field edit to every selected zone as one
    /// undo entry. Returns the number of zones touched.
    pub fn batch_update_appearance(&mut self, change: AppearanceChange) -> Result<usize> {
        if self.selection.is_empty() {
            return Err(self.fail(ValidationError::EmptySelection.into()));
        }
        self.validate_appearance_change(&change)
            .map_err(|e| self.fail(e))?;
        let old: Vec<(ZoneId, ZoneAppearance)> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| {
                self.store
                    .get(*id)
                    .map(|zone| (*id, zone.appearance.clone()))
            })
            .collect();
        let count = old.len();
        self.push_command(EditorCommand::BatchAppearance { change, old });
        Ok(count)
    }

    /// Translates every selected zone by the same delta as one undo
    /// entry. Returns false when nothing moved.
    pub fn move_selected_by(&mut self, dx: f64, dy: f64) -> Result<bool> {
        if self.selection.is_empty() {
            return Err(self.fail(ValidationError::EmptySelection.into()));
        }
        let min_size = self.min_zone_size();
        let moves: Vec<(ZoneId, Rect, Rect)> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.store.get(*id))
            .filter_map(|zone| {
                let new = zone
                    .geometry
                    .translated(dx, dy)
                    .clamp_to_unit(min_size);
                if new.approx_eq(&zone.geometry, GEOMETRY_EPSILON) {
                    None
                } else {
                    Some((zone.id, zone.geometry, new))
                }
            })
            .collect();
        if moves.is_empty() {
            return Ok(false);
        }
        self.begin_macro("Move Zones");
        for (id, old, new) in moves {
            self.push_command(EditorCommand::UpdateGeometry { id, old, new });
        }
        self.end_macro();
        Ok(true)
    }

    // Fill and dividers --------------------------------------------------

    /// Grows a zone into adjacent empty space; the optional cursor
    /// picks the expansion side when both are open. Returns false when
    /// no growth is possible.
    pub fn expand_zone(&mut self, id: ZoneId, cursor: Option<(f64, f64)>) -> Result<bool> {
        let zone = self.require_zone(id)?;
        match calculate_fill_region(id, self.store.zones(), cursor) {
            Some(region) => {
                self.push_command(EditorCommand::Fill {
                    id,
                    old: zone.geometry,
                    new: region,
                });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Moves the divider shared by two zones, resizing every zone that
    /// touches the divider line, as one undo entry.
    ///
    /// The position is clamped so no touching zone drops below the
    /// minimum size. Returns false when nothing would move.
    pub fn move_divider(
        &mut self,
        first: ZoneId,
        second: ZoneId,
        vertical: bool,
        position: f64,
    ) -> Result<bool> {
        self.require_zone(first)?;
        self.require_zone(second)?;
        let Some((divider_pos, touching)) =
            collect_geometries_at_divider(first, second, vertical, self.store.zones())
        else {
            return Err(self.fail(
                ValidationError::InvalidGeometry {
                    reason: "zones do not share a divider".to_string(),
                }
                .into(),
            ));
        };

        let min_size = self.min_zone_size();
        let eps = zonekit_core::constants::EDGE_EPSILON;
        let mut lower: f64 = 0.0;
        let mut upper: f64 = 1.0;
        for rect in touching.values() {
            if vertical {
                if (rect.right() - divider_pos).abs() < eps {
                    lower = lower.max(rect.x + min_size);
                }
                if (rect.x - divider_pos).abs() < eps {
                    upper = upper.min(rect.right() - min_size);
                }
            } else {
                if (rect.bottom() - divider_pos).abs() < eps {
                    lower = lower.max(rect.y + min_size);
                }
                if (rect.y - divider_pos).abs() < eps {
                    upper = upper.min(rect.bottom() - min_size);
                }
            }
        }
        if upper < lower {
            return Ok(false);
        }
        let target = position.clamp(lower, upper);

        let mut old = Vec::new();
        let mut new = Vec::new();
        for (id, rect) in &touching {
            let updated = if vertical {
                if (rect.right() - divider_pos).abs() < eps {
                    Rect::new(rect.x, rect.y, target - rect.x, rect.height)
                } else {
                    Rect::new(target, rect.y, rect.right() - target, rect.height)
                }
            } else if (rect.bottom() - divider_pos).abs() < eps {
                Rect::new(rect.x, rect.y, rect.width, target - rect.y)
            } else {
                Rect::new(rect.x, target, rect.width, rect.bottom() - target)
            };
            if !updated.approx_eq(rect, GEOMETRY_EPSILON) {
                old.push((*id, *rect));
                new.push((*id, updated));
            }
        }
        if new.is_empty() {
            return Ok(false);
        }
        self.push_command(EditorCommand::DividerResize { old, new });
        Ok(true)
    }

    // Z-order ------------------------------------------------------------

    /// Moves a zone to the top of the paint order.
    pub fn bring_to_front(&mut self, id: ZoneId) -> Result<bool> {
        self.reorder(id, |order, index| {
            let id = order.remove(index);
            order.push(id);
        })
    }

    /// Moves a zone to the bottom of the paint order.
    pub fn send_to_back(&mut self, id: ZoneId) -> Result<bool> {
        self.reorder(id, |order, index| {
            let id = order.remove(index);
            order.insert(0, id);
        })
    }

    /// Swaps a zone with its next-higher neighbor.
    pub fn bring_forward(&mut self, id: ZoneId) -> Result<bool> {
        self.reorder(id, |order, index| {
            if index + 1 < order.len() {
                order.swap(index, index + 1);
            }
        })
    }

    /// Swaps a zone with its next-lower neighbor.
    pub fn send_backward(&mut self, id: ZoneId) -> Result<bool> {
        self.reorder(id, |order, index| {
            if index > 0 {
                order.swap(index, index - 1);
            }
        })
    }

    fn reorder(
        &mut self,
        id: ZoneId,
        rearrange: impl FnOnce(&mut Vec<ZoneId>, usize),
    ) -> Result<bool> {
        self.require_zone(id)?;
        let old_order = self.store.order();
        let index = old_order
            .iter()
            .position(|existing| *existing == id)
            .unwrap_or_default();
        let mut new_order = old_order.clone();
        rearrange(&mut new_order, index);
        if new_order == old_order {
            return Ok(false);
        }
        self.push_command(EditorCommand::SetZOrder {
            old_order,
            new_order,
        });
        Ok(true)
    }

    // Structural operations ----------------------------------------------

    /// Replaces the layout's zones with a template's, as one undo
    /// entry. The selection is cleared first and restored on undo.
    pub fn apply_template(&mut self, template: &LayoutTemplate) -> Result<()> {
        let defaults = &self.config.layout_defaults.appearance;
        let new: Vec<Zone> = template
            .geometries()
            .into_iter()
            .enumerate()
            .map(|(index, rect)| {
                Zone::new(
                    rect,
                    (index + 1).min(MAX_ZONE_NUMBER as usize) as u8,
                    ZoneAppearance::from_defaults(defaults),
                )
            })
            .collect();
        let old = self.store.zones().to_vec();
        let old_selection = self.selection.to_vec();
        self.begin_macro("Apply Template");
        self.push_command(EditorCommand::ChangeSelection {
            old: old_selection,
            new: Vec::new(),
        });
        self.push_command(EditorCommand::ApplyTemplate { old, new });
        self.end_macro();
        self.publish_selection();
        Ok(())
    }

    /// Removes every zone as one undo entry.
    pub fn clear_all(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return Ok(());
        }
        let old = self.store.zones().to_vec();
        let old_selection = self.selection.to_vec();
        self.begin_macro("Clear Zones");
        self.push_command(EditorCommand::ChangeSelection {
            old: old_selection,
            new: Vec::new(),
        });
        self.push_command(EditorCommand::ClearAll { old });
        self.end_macro();
        self.publish_selection();
        Ok(())
    }

    // Selection ----------------------------------------------------------

    /// Selects a zone. With `multi`, toggles it within the selection
    /// instead of replacing it. Selection changes are undoable.
    pub fn select_zone(&mut self, id: ZoneId, multi: bool) -> Result<bool> {
        self.require_zone(id)?;
        let old = self.selection.to_vec();
        let new = if multi {
            let mut new = old.clone();
            if let Some(position) = new.iter().position(|existing| *existing == id) {
                new.remove(position);
            } else {
                new.push(id);
            }
            new
        } else {
            vec![id]
        };
        if new == old {
            return Ok(false);
        }
        self.push_command(EditorCommand::ChangeSelection { old, new });
        self.publish_selection();
        Ok(true)
    }

    /// Selects every zone, in paint order.
    pub fn select_all(&mut self) -> bool {
        let old = self.selection.to_vec();
        let new = self.store.order();
        if new == old {
            return false;
        }
        self.push_command(EditorCommand::ChangeSelection { old, new });
        self.publish_selection();
        true
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let old = self.selection.to_vec();
        self.push_command(EditorCommand::ChangeSelection {
            old,
            new: Vec::new(),
        });
        self.publish_selection();
        true
    }

    // Undo/redo ----------------------------------------------------------

    /// Reverts the newest undo entry.
    pub fn undo(&mut self) -> bool {
        let was_clean = self.history.is_clean();
        let undone = self
            .history
            .undo(&mut self.store, &mut self.selection);
        if undone {
            self.emit_clean_transition(was_clean);
            self.publish_selection();
        }
        undone
    }

    /// Re-applies the next redo entry.
    pub fn redo(&mut self) -> bool {
        let was_clean = self.history.is_clean();
        let redone = self
            .history
            .redo(&mut self.store, &mut self.selection);
        if redone {
            self.emit_clean_transition(was_clean);
            self.publish_selection();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    // Layout metadata ----------------------------------------------------

    /// Renames the layout being edited.
    pub fn rename_layout(&mut self, name: impl Into<String>) {
        self.layout.name = name.into();
        self.layout.modified = Utc::now();
    }

    /// The shaders the catalog currently offers.
    pub fn available_shaders(&self) -> Result<Vec<ShaderInfo>> {
        self.shaders.available_shaders().map_err(|e| self.fail(e))
    }

    /// Selects (or clears) the layout's decorative shader.
    ///
    /// Parameter keys not declared by the new shader are dropped, so
    /// orphaned values never accumulate across shader switches.
    pub fn set_shader(&mut self, shader_id: Option<&str>) -> Result<()> {
        match shader_id {
            None => {
                self.layout.shader_id = None;
                self.layout.shader_params.clear();
            }
            Some(id) => {
                let info = self
                    .shaders
                    .shader_info(id)
                    .map_err(|e| self.fail(e))?
                    .ok_or_else(|| {
                        self.fail(
                            ValidationError::UnknownShader {
                                shader_id: id.to_string(),
                            }
                            .into(),
                        )
                    })?;
                self.layout
                    .shader_params
                    .retain(|key, _| info.parameters.iter().any(|param| param.id == *key));
                self.layout.shader_id = Some(id.to_string());
            }
        }
        self.layout.modified = Utc::now();
        Ok(())
    }

    /// Stores a parameter value for the selected shader.
    pub fn set_shader_param(&mut self, key: &str, value: f64) -> Result<()> {
        let Some(shader_id) = self.layout.shader_id.clone() else {
            return Err(self.fail(Error::other("no shader selected")));
        };
        let info = self
            .shaders
            .shader_info(&shader_id)
            .map_err(|e| self.fail(e))?
            .ok_or_else(|| {
                self.fail(ValidationError::UnknownShader { shader_id }.into())
            })?;
        if !info.parameters.iter().any(|param| param.id == key) {
            return Err(self.fail(
                ValidationError::UnknownShaderParameter {
                    parameter: key.to_string(),
                }
                .into(),
            ));
        }
        self.layout.shader_params.insert(key.to_string(), value);
        self.layout.modified = Utc::now();
        Ok(())
    }

    /// Toggles an item in a visibility allow-list.
    ///
    /// An empty list means "visible everywhere", so the first toggle
    /// populates the list with every known item except the toggled one;
    /// and a toggle that would make the list cover every known item
    /// collapses it back to empty instead.
    pub fn toggle_visibility(&mut self, list: VisibilityList, item: &str, known: &[String]) {
        let entries = match list {
            VisibilityList::Screens => &mut self.layout.allowed_screens,
            VisibilityList::Desktops => &mut self.layout.allowed_desktops,
            VisibilityList::Activities => &mut self.layout.allowed_activities,
        };
        if entries.is_empty() {
            *entries = known
                .iter()
                .filter(|candidate| candidate.as_str() != item)
                .cloned()
                .collect();
        } else if let Some(position) = entries.iter().position(|entry| entry == item) {
            entries.remove(position);
        } else {
            entries.push(item.to_string());
        }
        if !entries.is_empty() && known.iter().all(|candidate| entries.contains(candidate)) {
            entries.clear();
        }
        self.layout.modified = Utc::now();
    }

    /// Sets the per-layout zone padding override; `INHERIT_DEFAULT`
    /// restores inheritance.
    pub fn set_zone_padding(&mut self, value: f64) -> Result<()> {
        self.validate_padding("zone_padding", value)?;
        self.layout.zone_padding = value;
        self.layout.modified = Utc::now();
        Ok(())
    }

    /// Sets the per-layout outer gap override; `INHERIT_DEFAULT`
    /// restores inheritance.
    pub fn set_outer_gap(&mut self, value: f64) -> Result<()> {
        self.validate_padding("outer_gap", value)?;
        self.layout.outer_gap = value;
        self.layout.modified = Utc::now();
        Ok(())
    }

    fn validate_padding(&self, field: &str, value: f64) -> Result<()> {
        if value != INHERIT_DEFAULT && (!value.is_finite() || value < 0.0) {
            return Err(self.fail(
                ValidationError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be >= 0, or -1 to inherit".to_string(),
                }
                .into(),
            ));
        }
        Ok(())
    }

    /// Zone padding with the inherit sentinel resolved.
    pub fn effective_zone_padding(&self) -> f64 {
        if self.layout.zone_padding == INHERIT_DEFAULT {
            self.config.layout_defaults.zone_padding
        } else {
            self.layout.zone_padding
        }
    }

    /// Outer gap with the inherit sentinel resolved.
    pub fn effective_outer_gap(&self) -> f64 {
        if self.layout.outer_gap == INHERIT_DEFAULT {
            self.config.layout_defaults.outer_gap
        } else {
            self.layout.outer_gap
        }
    }
}

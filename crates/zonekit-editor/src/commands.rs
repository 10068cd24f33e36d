//! Undoable mutations of the zone store.
//!
//! One variant per mutation type, each carrying enough old/new state to
//! invert itself. `apply` installs the new state, `undo` the old; both
//! are idempotent and tolerate zones that have disappeared (checked
//! lookups, never panics). Applications that remove zones also drop
//! them from the selection in the same step, so no transient
//! inconsistent state is observable.

use crate::selection::SelectionModel;
use crate::zone::{Zone, ZoneAppearance, ZoneId};
use crate::zone_store::ZoneStore;
use zonekit_core::Rect;

/// A single edit to a zone appearance field.
///
/// A closed enum rather than a property-name string: the set of
/// editable fields is part of the type.
#[derive(Debug, Clone, PartialEq)]
pub enum AppearanceChange {
    HighlightColor(String),
    InactiveColor(String),
    BorderColor(String),
    ActiveOpacity(f64),
    InactiveOpacity(f64),
    BorderWidth(f64),
    BorderRadius(f64),
    UseCustomColors(bool),
}

impl AppearanceChange {
    /// Writes the change into an appearance record.
    pub fn apply_to(&self, appearance: &mut ZoneAppearance) {
        match self {
            AppearanceChange::HighlightColor(color) => {
                appearance.highlight_color = color.clone();
            }
            AppearanceChange::InactiveColor(color) => {
                appearance.inactive_color = color.clone();
            }
            AppearanceChange::BorderColor(color) => appearance.border_color = color.clone(),
            AppearanceChange::ActiveOpacity(value) => appearance.active_opacity = *value,
            AppearanceChange::InactiveOpacity(value) => appearance.inactive_opacity = *value,
            AppearanceChange::BorderWidth(value) => appearance.border_width = *value,
            AppearanceChange::BorderRadius(value) => appearance.border_radius = *value,
            AppearanceChange::UseCustomColors(value) => appearance.use_custom_colors = *value,
        }
    }
}

/// An undoable editor mutation.
#[derive(Debug, Clone)]
pub enum EditorCommand {
    /// Insert a fully-formed zone record on top.
    AddZone { zone: Zone },
    /// Remove a zone, remembering its record and paint-order position.
    DeleteZone { zone: Zone, index: usize },
    UpdateGeometry {
        id: ZoneId,
        old: Rect,
        new: Rect,
    },
    UpdateName {
        id: ZoneId,
        old: String,
        new: String,
    },
    UpdateNumber {
        id: ZoneId,
        old: u8,
        new: u8,
    },
    UpdateAppearance {
        id: ZoneId,
        old: ZoneAppearance,
        new: ZoneAppearance,
    },
    /// Insert a pre-built duplicate of `source`.
    Duplicate { source: ZoneId, zone: Zone },
    /// Shrink `original` to `shrunk` and insert `created` beside it.
    Split {
        original: Zone,
        shrunk: Rect,
        created: Zone,
    },
    /// Grow a zone into adjacent empty space.
    Fill {
        id: ZoneId,
        old: Rect,
        new: Rect,
    },
    /// Whole-list paint-order snapshots; z-order has no stable per-zone
    /// key, so the coarse capture is the simplest correct inverse.
    SetZOrder {
        old_order: Vec<ZoneId>,
        new_order: Vec<ZoneId>,
    },
    /// Wholesale replacement with a template's zones.
    ApplyTemplate { old: Vec<Zone>, new: Vec<Zone> },
    /// Wholesale removal of every zone.
    ClearAll { old: Vec<Zone> },
    /// Wholesale replacement appending pasted zones.
    PasteZones { old: Vec<Zone>, new: Vec<Zone> },
    /// One field edit applied to many zones, one undo entry.
    BatchAppearance {
        change: AppearanceChange,
        old: Vec<(ZoneId, ZoneAppearance)>,
    },
    /// Coordinated resize of every zone touching a divider.
    DividerResize {
        old: Vec<(ZoneId, Rect)>,
        new: Vec<(ZoneId, Rect)>,
    },
    /// Selection changes are undoable by design.
    ChangeSelection {
        old: Vec<ZoneId>,
        new: Vec<ZoneId>,
    },
    /// Atomic group: redo in order, undo in reverse order.
    Macro {
        label: String,
        commands: Vec<EditorCommand>,
    },
}

impl EditorCommand {
    /// Display label for history UIs.
    pub fn label(&self) -> &str {
        match self {
            EditorCommand::AddZone { .. } => "Add Zone",
            EditorCommand::DeleteZone { .. } => "Delete Zone",
            EditorCommand::UpdateGeometry { .. } => "Resize Zone",
            EditorCommand::UpdateName { .. } => "Rename Zone",
            EditorCommand::UpdateNumber { .. } => "Renumber Zone",
            EditorCommand::UpdateAppearance { .. } => "Change Zone Appearance",
            EditorCommand::Duplicate { .. } => "Duplicate Zone",
            EditorCommand::Split { .. } => "Split Zone",
            EditorCommand::Fill { .. } => "Fill Space",
            EditorCommand::SetZOrder { .. } => "Reorder Zones",
            EditorCommand::ApplyTemplate { .. } => "Apply Template",
            EditorCommand::ClearAll { .. } => "Clear Zones",
            EditorCommand::PasteZones { .. } => "Paste Zones",
            EditorCommand::BatchAppearance { .. } => "Change Zones Appearance",
            EditorCommand::DividerResize { .. } => "Move Divider",
            EditorCommand::ChangeSelection { .. } => "Change Selection",
            EditorCommand::Macro { label, .. } => label,
        }
    }

    /// Applies the new state.
    pub fn apply(&self, store: &mut ZoneStore, selection: &mut SelectionModel) {
        match self {
            EditorCommand::AddZone { zone } => {
                store.insert_zone(zone.clone());
            }
            EditorCommand::DeleteZone { zone, .. } => {
                if store.remove_zone(zone.id).is_some() {
                    selection.remove(zone.id);
                }
            }
            EditorCommand::UpdateGeometry { id, new, .. } => {
                store.set_geometry_direct(*id, *new);
            }
            EditorCommand::UpdateName { id, new, .. } => {
                store.set_name_direct(*id, new.clone());
            }
            EditorCommand::UpdateNumber { id, new, .. } => {
                store.set_number_direct(*id, *new);
            }
            EditorCommand::UpdateAppearance { id, new, .. } => {
                store.set_appearance_direct(*id, new.clone());
            }
            EditorCommand::Duplicate { zone, .. } => {
                store.insert_zone(zone.clone());
            }
            EditorCommand::Split {
                original,
                shrunk,
                created,
            } => {
                store.begin_batch_update();
                store.set_geometry_direct(original.id, *shrunk);
                store.insert_zone(created.clone());
                store.end_batch_update();
            }
            EditorCommand::Fill { id, new, .. } => {
                store.set_geometry_direct(*id, *new);
            }
            EditorCommand::SetZOrder { new_order, .. } => {
                store.set_order(new_order);
            }
            EditorCommand::ApplyTemplate { new, .. }
            | EditorCommand::PasteZones { new, .. } => {
                store.restore_zones(new.clone());
                selection.retain_known(store);
            }
            EditorCommand::ClearAll { .. } => {
                store.restore_zones(Vec::new());
                selection.clear();
            }
            EditorCommand::BatchAppearance { change, old } => {
                store.begin_batch_update();
                for (id, _) in old {
                    if let Some(mut appearance) =
                        store.get(*id).map(|zone| zone.appearance.clone())
                    {
                        change.apply_to(&mut appearance);
                        store.set_appearance_direct(*id, appearance);
                    }
                }
                store.end_batch_update();
            }
            EditorCommand::DividerResize { new, .. } => {
                store.begin_batch_update();
                for (id, rect) in new {
                    store.set_geometry_direct(*id, *rect);
                }
                store.end_batch_update();
            }
            EditorCommand::ChangeSelection { new, .. } => {
                selection.replace(new.clone());
                selection.retain_known(store);
            }
            EditorCommand::Macro { commands, .. } => {
                store.begin_batch_update();
                for command in commands {
                    command.apply(store, selection);
                }
                store.end_batch_update();
            }
        }
    }

    /// Restores the old state.
    pub fn undo(&self, store: &mut ZoneStore, selection: &mut SelectionModel) {
        match self {
            EditorCommand::AddZone { zone } => {
                if store.remove_zone(zone.id).is_some() {
                    selection.remove(zone.id);
                }
            }
            EditorCommand::DeleteZone { zone, index } => {
                store.insert_zone_at(zone.clone(), *index);
            }
            EditorCommand::UpdateGeometry { id, old, .. } => {
                store.set_geometry_direct(*id, *old);
            }
            EditorCommand::UpdateName { id, old, .. } => {
                store.set_name_direct(*id, old.clone());
            }
            EditorCommand::UpdateNumber { id, old, .. } => {
                store.set_number_direct(*id, *old);
            }
            EditorCommand::UpdateAppearance { id, old, .. } => {
                store.set_appearance_direct(*id, old.clone());
            }
            EditorCommand::Duplicate { zone, .. } => {
                if store.remove_zone(zone.id).is_some() {
                    selection.remove(zone.id);
                }
            }
            EditorCommand::Split {
                original, created, ..
            } => {
                store.begin_batch_update();
                if store.remove_zone(created.id).is_some() {
                    selection.remove(created.id);
                }
                store.set_geometry_direct(original.id, original.geometry);
                store.end_batch_update();
            }
            EditorCommand::Fill { id, old, .. } => {
                store.set_geometry_direct(*id, *old);
            }
            EditorCommand::SetZOrder { old_order, .. } => {
                store.set_order(old_order);
            }
            EditorCommand::ApplyTemplate { old, .. }
            | EditorCommand::ClearAll { old }
            | EditorCommand::PasteZones { old, .. } => {
                store.restore_zones(old.clone());
                selection.retain_known(store);
            }
            EditorCommand::BatchAppearance { old, .. } => {
                store.begin_batch_update();
                for (id, appearance) in old {
                    store.set_appearance_direct(*id, appearance.clone());
                }
                store.end_batch_update();
            }
            EditorCommand::DividerResize { old, .. } => {
                store.begin_batch_update();
                for (id, rect) in old {
                    store.set_geometry_direct(*id, *rect);
                }
                store.end_batch_update();
            }
            EditorCommand::ChangeSelection { old, .. } => {
                selection.replace(old.clone());
                selection.retain_known(store);
            }
            EditorCommand::Macro { commands, .. } => {
                store.begin_batch_update();
                for command in commands.iter().rev() {
                    command.undo(store, selection);
                }
                store.end_batch_update();
            }
        }
    }
}

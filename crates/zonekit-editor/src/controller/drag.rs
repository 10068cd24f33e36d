//! Multi-zone drag protocol.
//!
//! The primary zone is driven by the direct-manipulation path, which
//! already records its own undo entry; this protocol mirrors the
//! primary's delta onto the other selected zones. Intermediate updates
//! bypass the undo stack and are batched into one notification per
//! update; the commit converts the accumulated delta into a single
//! macro covering the non-primary zones, and a cancel restores the
//! original positions.

use std::collections::BTreeMap;

use crate::commands::EditorCommand;
use crate::zone::ZoneId;
use zonekit_core::constants::GEOMETRY_EPSILON;
use zonekit_core::{Error, Rect, Result};

use super::EditorController;

/// Snapshot of a drag in progress.
#[derive(Debug, Clone)]
pub(crate) struct MultiDragState {
    primary: ZoneId,
    origins: BTreeMap<ZoneId, Rect>,
}

impl EditorController {
    /// Begins a multi-zone drag anchored on `primary`, snapshotting the
    /// initial geometry of every selected zone.
    pub fn start_multi_zone_drag(&mut self, primary: ZoneId) -> Result<()> {
        self.require_zone(primary)?;
        if !self.selection().contains(primary) {
            return Err(self.fail(Error::other("primary zone is not selected")));
        }
        let origins: BTreeMap<ZoneId, Rect> = self
            .selection()
            .ids()
            .iter()
            .filter_map(|id| self.zone(*id).map(|zone| (*id, zone.geometry)))
            .collect();
        self.drag = Some(MultiDragState { primary, origins });
        Ok(())
    }

    /// Whether a multi-zone drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Applies the primary zone's movement to the other selected zones.
    ///
    /// `primary_x`/`primary_y` is the primary's current origin; the
    /// delta from its snapshot is applied to every other dragged zone
    /// directly, clamped to bounds, under one notification batch.
    pub fn update_multi_zone_drag(&mut self, primary_x: f64, primary_y: f64) -> Result<()> {
        let state = self
            .drag
            .clone()
            .ok_or_else(|| self.fail(Error::other("no multi-zone drag in progress")))?;
        let Some(primary_origin) = state.origins.get(&state.primary) else {
            return Err(self.fail(Error::other("drag primary has no snapshot")));
        };
        let dx = primary_x - primary_origin.x;
        let dy = primary_y - primary_origin.y;

        let store = &mut self.store;
        store.begin_batch_update();
        for (id, origin) in &state.origins {
            if *id == state.primary {
                continue;
            }
            let rect = origin.translated(dx, dy).clamp_to_unit(0.0);
            store.set_geometry_direct(*id, rect);
        }
        store.end_batch_update();
        Ok(())
    }

    /// Ends the drag.
    ///
    /// With `commit`, the accumulated movement of the non-primary zones
    /// becomes one undo macro (the primary's own drag handler records
    /// its entry separately). Without, their original positions are
    /// restored directly.
    pub fn end_multi_zone_drag(&mut self, commit: bool) -> Result<()> {
        let state = self
            .drag
            .take()
            .ok_or_else(|| self.fail(Error::other("no multi-zone drag in progress")))?;

        if commit {
            let moves: Vec<(ZoneId, Rect, Rect)> = state
                .origins
                .iter()
                .filter(|(id, _)| **id != state.primary)
                .filter_map(|(id, origin)| {
                    self.zone(*id).and_then(|zone| {
                        if zone.geometry.approx_eq(origin, GEOMETRY_EPSILON) {
                            None
                        } else {
                            Some((*id, *origin, zone.geometry))
                        }
                    })
                })
                .collect();
            self.begin_macro("Move Zones");
            for (id, old, new) in moves {
                self.push_command(EditorCommand::UpdateGeometry { id, old, new });
            }
            self.end_macro();
        } else {
            self.store.begin_batch_update();
            for (id, origin) in &state.origins {
                if *id == state.primary {
                    continue;
                }
                self.store.set_geometry_direct(*id, *origin);
            }
            self.store.end_batch_update();
        }
        Ok(())
    }
}

//! Authoritative in-memory zone collection for the layout being edited.
//!
//! The store owns the zones and their paint order (sequence position =
//! z-order, later paints on top) and publishes `ZonesChanged` through
//! the shared event bus on every mutation. None of its operations are
//! undo-aware; the command layer on top captures inverse state.
//!
//! # Batch updates
//!
//! `begin_batch_update`/`end_batch_update` bracket N mutations into one
//! notification. The bracket is a reentrancy-safe depth counter, not a
//! rollback mechanism: mutations land immediately, only notification is
//! deferred, and the flush happens exactly once when the depth returns
//! to zero.

use std::sync::Arc;

use crate::snapping::{calculate_fill_region, find_adjacent_zones, shared_edge_length};
use crate::zone::{Zone, ZoneAppearance, ZoneId};
use zonekit_core::constants::{DUPLICATE_OFFSET, MAX_ZONE_NUMBER};
use zonekit_core::{EditorEvent, EventBus, Rect};
use zonekit_settings::AppearanceDefaults;

/// Ordered collection of the zones being edited.
#[derive(Debug)]
pub struct ZoneStore {
    zones: Vec<Zone>,
    events: Arc<EventBus>,
    defaults: AppearanceDefaults,
    batch_depth: u32,
    batch_dirty: bool,
}

impl ZoneStore {
    /// Creates an empty store publishing to `events`.
    pub fn new(events: Arc<EventBus>, defaults: AppearanceDefaults) -> Self {
        Self {
            zones: Vec::new(),
            events,
            defaults,
            batch_depth: 0,
            batch_dirty: false,
        }
    }

    fn notify(&mut self) {
        if self.batch_depth > 0 {
            self.batch_dirty = true;
        } else {
            self.events.publish(EditorEvent::ZonesChanged);
        }
    }

    /// Opens a notification batch. Reentrant.
    pub fn begin_batch_update(&mut self) {
        self.batch_depth += 1;
    }

    /// Closes a notification batch, flushing once when the outermost
    /// bracket closes. An unmatched end clamps at zero depth.
    pub fn end_batch_update(&mut self) {
        if self.batch_depth == 0 {
            tracing::warn!("end_batch_update without matching begin_batch_update");
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0 && self.batch_dirty {
            self.batch_dirty = false;
            self.events.publish(EditorEvent::ZonesChanged);
        }
    }

    /// The zones in paint order (last on top).
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn contains(&self, id: ZoneId) -> bool {
        self.zones.iter().any(|z| z.id == id)
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    fn get_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.id == id)
    }

    /// Position of the zone in the paint order.
    pub fn index_of(&self, id: ZoneId) -> Option<usize> {
        self.zones.iter().position(|z| z.id == id)
    }

    /// The ids in paint order.
    pub fn order(&self) -> Vec<ZoneId> {
        self.zones.iter().map(|z| z.id).collect()
    }

    /// The highest zone number in use, 0 when empty.
    pub fn max_number(&self) -> u8 {
        self.zones.iter().map(|z| z.number).max().unwrap_or(0)
    }

    /// Whether `number` is unused, ignoring `exclude`.
    pub fn is_number_free(&self, number: u8, exclude: Option<ZoneId>) -> bool {
        !self
            .zones
            .iter()
            .any(|z| z.number == number && Some(z.id) != exclude)
    }

    /// Whether `name` is unused, ignoring `exclude`. Empty names are
    /// always free.
    pub fn is_name_free(&self, name: &str, exclude: Option<ZoneId>) -> bool {
        name.is_empty()
            || !self
                .zones
                .iter()
                .any(|z| z.name == name && Some(z.id) != exclude)
    }

    /// The smallest unused zone number, if any remain.
    pub fn allocate_number(&self) -> Option<u8> {
        (1..=MAX_ZONE_NUMBER).find(|n| self.is_number_free(*n, None))
    }

    /// Builds a zone record with a fresh id, the next available number,
    /// and the default appearance, without inserting it.
    ///
    /// Used by the command layer to capture the exact record an add-like
    /// operation will create, so redo re-creates the identical zone.
    pub fn new_zone(&self, geometry: Rect) -> Option<Zone> {
        let number = self.allocate_number()?;
        Some(Zone::new(
            geometry,
            number,
            ZoneAppearance::from_defaults(&self.defaults),
        ))
    }

    /// Creates and appends a zone; returns its id.
    pub fn add_zone(&mut self, geometry: Rect) -> Option<ZoneId> {
        let zone = self.new_zone(geometry)?;
        let id = zone.id;
        self.zones.push(zone);
        self.notify();
        Some(id)
    }

    /// Appends an existing record unless its id is already present.
    pub fn insert_zone(&mut self, zone: Zone) {
        if self.contains(zone.id) {
            return;
        }
        self.zones.push(zone);
        self.notify();
    }

    /// Re-inserts an existing record at a paint-order position.
    pub fn insert_zone_at(&mut self, zone: Zone, index: usize) {
        if self.contains(zone.id) {
            return;
        }
        let index = index.min(self.zones.len());
        self.zones.insert(index, zone);
        self.notify();
    }

    /// Removes a zone, returning the record and its paint-order index.
    pub fn remove_zone(&mut self, id: ZoneId) -> Option<(Zone, usize)> {
        let index = self.index_of(id)?;
        let zone = self.zones.remove(index);
        self.notify();
        Some((zone, index))
    }

    /// Removes a zone; returns whether it existed.
    pub fn delete_zone(&mut self, id: ZoneId) -> bool {
        self.remove_zone(id).is_some()
    }

    /// Deletes a zone and optionally grows its neighbors into the
    /// vacated space.
    ///
    /// Neighbors are processed by shared-edge length descending, so the
    /// largest neighbor claims the most space first.
    pub fn delete_zone_with_fill(&mut self, id: ZoneId, auto_fill: bool) -> bool {
        let Some(zone) = self.get(id) else {
            return false;
        };
        let removed_rect = zone.geometry;
        let neighbors = if auto_fill {
            let adjacent = find_adjacent_zones(id, &self.zones);
            let mut neighbors: Vec<(ZoneId, f64)> = adjacent
                .all()
                .into_iter()
                .filter_map(|nid| {
                    self.get(nid)
                        .map(|n| (nid, shared_edge_length(&removed_rect, &n.geometry)))
                })
                .collect();
            neighbors.sort_by(|a, b| b.1.total_cmp(&a.1));
            neighbors
        } else {
            Vec::new()
        };

        self.begin_batch_update();
        let removed = self.delete_zone(id);
        if removed {
            for (nid, _) in neighbors {
                self.expand_to_fill_space(nid, None);
            }
        }
        self.end_batch_update();
        removed
    }

    /// Clones a zone with a fresh id and number, an offset position,
    /// and a name suffix; appends it on top. Returns the new id.
    pub fn duplicate_zone(&mut self, id: ZoneId) -> Option<ZoneId> {
        let source = self.get(id)?.clone();
        let number = self.allocate_number()?;
        let mut zone = source;
        zone.id = ZoneId::new();
        zone.number = number;
        if !zone.name.is_empty() {
            zone.name = self.unique_copy_name(&zone.name);
        }
        zone.geometry = zone
            .geometry
            .translated(DUPLICATE_OFFSET, DUPLICATE_OFFSET)
            .clamp_to_unit(0.0);
        let new_id = zone.id;
        self.zones.push(zone);
        self.notify();
        Some(new_id)
    }

    /// Derives an unused name by appending a copy suffix.
    pub fn unique_copy_name(&self, base: &str) -> String {
        let candidate = format!("{base} copy");
        if self.is_name_free(&candidate, None) {
            return candidate;
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{base} copy {counter}");
            if self.is_name_free(&candidate, None) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Halves a zone along the requested axis; the original keeps the
    /// first half, the new zone takes the second and inherits the
    /// original's appearance. Returns the new id.
    pub fn split_zone(&mut self, id: ZoneId, horizontal: bool) -> Option<ZoneId> {
        let source = self.get(id)?.clone();
        let number = self.allocate_number()?;
        let (shrunk, second) = split_rect(&source.geometry, horizontal);

        let created = Zone::new(second, number, source.appearance.clone());
        let new_id = created.id;

        self.begin_batch_update();
        if let Some(zone) = self.get_mut(id) {
            zone.geometry = shrunk;
            self.notify();
        }
        self.zones.push(created);
        self.notify();
        self.end_batch_update();
        Some(new_id)
    }

    /// Direct geometry mutation, no validation or snapping.
    pub fn set_geometry_direct(&mut self, id: ZoneId, geometry: Rect) -> bool {
        match self.get_mut(id) {
            Some(zone) => {
                zone.geometry = geometry;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Direct name mutation, no validation.
    pub fn set_name_direct(&mut self, id: ZoneId, name: String) -> bool {
        match self.get_mut(id) {
            Some(zone) => {
                zone.name = name;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Direct number mutation, no validation.
    pub fn set_number_direct(&mut self, id: ZoneId, number: u8) -> bool {
        match self.get_mut(id) {
            Some(zone) => {
                zone.number = number;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Direct appearance mutation, no validation.
    pub fn set_appearance_direct(&mut self, id: ZoneId, appearance: ZoneAppearance) -> bool {
        match self.get_mut(id) {
            Some(zone) => {
                zone.appearance = appearance;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Moves the zone to the end of the sequence (topmost).
    pub fn bring_to_front(&mut self, id: ZoneId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let zone = self.zones.remove(index);
                self.zones.push(zone);
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Moves the zone to the start of the sequence (bottommost).
    pub fn send_to_back(&mut self, id: ZoneId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let zone = self.zones.remove(index);
                self.zones.insert(0, zone);
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Swaps the zone with its next-higher neighbor.
    pub fn bring_forward(&mut self, id: ZoneId) -> bool {
        match self.index_of(id) {
            Some(index) if index + 1 < self.zones.len() => {
                self.zones.swap(index, index + 1);
                self.notify();
                true
            }
            _ => false,
        }
    }

    /// Swaps the zone with its next-lower neighbor.
    pub fn send_backward(&mut self, id: ZoneId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                self.zones.swap(index, index - 1);
                self.notify();
                true
            }
            _ => false,
        }
    }

    /// Reorders the sequence to match `ids`; zones missing from `ids`
    /// keep their relative order at the end.
    pub fn set_order(&mut self, ids: &[ZoneId]) {
        self.zones.sort_by_key(|zone| {
            ids.iter()
                .position(|id| *id == zone.id)
                .unwrap_or(usize::MAX)
        });
        self.notify();
    }

    /// Grows the zone into adjacent empty space; returns whether any
    /// growth happened.
    pub fn expand_to_fill_space(&mut self, id: ZoneId, cursor: Option<(f64, f64)>) -> bool {
        match calculate_fill_region(id, &self.zones, cursor) {
            Some(region) => self.set_geometry_direct(id, region),
            None => false,
        }
    }

    /// Wholesale replacement, used by structural undo/redo.
    pub fn restore_zones(&mut self, zones: Vec<Zone>) {
        self.zones = zones;
        self.notify();
    }

    /// Removes every zone.
    pub fn clear(&mut self) {
        self.zones.clear();
        self.notify();
    }
}

fn split_rect(rect: &Rect, horizontal: bool) -> (Rect, Rect) {
    if horizontal {
        let half = rect.height / 2.0;
        (
            Rect::new(rect.x, rect.y, rect.width, half),
            Rect::new(rect.x, rect.y + half, rect.width, half),
        )
    } else {
        let half = rect.width / 2.0;
        (
            Rect::new(rect.x, rect.y, half, rect.height),
            Rect::new(rect.x + half, rect.y, half, rect.height),
        )
    }
}

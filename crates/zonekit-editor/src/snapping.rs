//! Grid and edge snapping over normalized zone geometry.
//!
//! Pure functions: every query takes the zone slice it operates on and
//! returns a new value, so the engine carries no state of its own.
//!
//! The snap pipeline normalizes its input into the unit square first,
//! then moves each *active* edge independently to the nearest attractor
//! (grid lattice or a neighboring zone's parallel edge within the
//! threshold), enforces the minimum zone size without disturbing fixed
//! edges, and finally clamps back into bounds with position taking
//! priority over size. Snapping an already-snapped rectangle is a no-op.

use std::collections::BTreeMap;

use crate::zone::{Zone, ZoneId};
use zonekit_core::constants::EDGE_EPSILON;
use zonekit_core::Rect;
use zonekit_settings::SnappingSettings;

/// Which edges of a rectangle are being actively changed.
///
/// Only active edges snap; the others stay exactly as given so a
/// resize from one handle never jumps the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl SnapEdges {
    /// All four edges active (whole-rectangle move or free resize).
    pub const ALL: SnapEdges = SnapEdges {
        left: true,
        right: true,
        top: true,
        bottom: true,
    };

    /// No edge active; snapping becomes a pure normalize-and-clamp.
    pub const NONE: SnapEdges = SnapEdges {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };
}

/// Zones adjacent to a zone, per side.
///
/// A zone is adjacent on a side when its opposite edge lies within
/// [`EDGE_EPSILON`] of this zone's edge and the spans overlap on the
/// perpendicular axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacentZones {
    pub left: Vec<ZoneId>,
    pub right: Vec<ZoneId>,
    pub top: Vec<ZoneId>,
    pub bottom: Vec<ZoneId>,
}

impl AdjacentZones {
    /// Every adjacent id, regardless of side.
    pub fn all(&self) -> Vec<ZoneId> {
        let mut ids = Vec::new();
        for side in [&self.left, &self.right, &self.top, &self.bottom] {
            for id in side {
                if !ids.contains(id) {
                    ids.push(*id);
                }
            }
        }
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
            && self.right.is_empty()
            && self.top.is_empty()
            && self.bottom.is_empty()
    }
}

/// Snaps all four edges of `rect` against the grid and the other zones.
pub fn snap_geometry(
    rect: Rect,
    zones: &[Zone],
    exclude: Option<ZoneId>,
    settings: &SnappingSettings,
    min_size: f64,
) -> Rect {
    snap_geometry_selective(rect, zones, exclude, settings, min_size, SnapEdges::ALL)
}

/// Snaps only the active edges of `rect`, leaving the rest as given.
pub fn snap_geometry_selective(
    rect: Rect,
    zones: &[Zone],
    exclude: Option<ZoneId>,
    settings: &SnappingSettings,
    min_size: f64,
    edges: SnapEdges,
) -> Rect {
    let rect = rect.clamp_to_unit(min_size);

    let mut vertical_edges = Vec::new();
    let mut horizontal_edges = Vec::new();
    if settings.edge_enabled {
        for zone in zones {
            if Some(zone.id) == exclude {
                continue;
            }
            vertical_edges.push(zone.geometry.x);
            vertical_edges.push(zone.geometry.right());
            horizontal_edges.push(zone.geometry.y);
            horizontal_edges.push(zone.geometry.bottom());
        }
    }

    let mut left = rect.x;
    let mut right = rect.right();
    let mut top = rect.y;
    let mut bottom = rect.bottom();

    if edges.left {
        left = snap_value(left, settings.grid_interval_x, settings, &vertical_edges);
    }
    if edges.right {
        right = snap_value(right, settings.grid_interval_x, settings, &vertical_edges);
    }
    if edges.top {
        top = snap_value(top, settings.grid_interval_y, settings, &horizontal_edges);
    }
    if edges.bottom {
        bottom = snap_value(bottom, settings.grid_interval_y, settings, &horizontal_edges);
    }

    // Minimum size without moving a fixed edge.
    if right - left < min_size {
        if edges.left && !edges.right {
            left = right - min_size;
        } else {
            right = left + min_size;
        }
    }
    if bottom - top < min_size {
        if edges.top && !edges.bottom {
            top = bottom - min_size;
        } else {
            bottom = top + min_size;
        }
    }

    Rect::new(left, top, right - left, bottom - top).clamp_to_unit(min_size)
}

/// Moves one edge coordinate to its nearest attractor.
///
/// Neighboring edges only attract within the configured threshold; the
/// grid always attracts when enabled. The closer candidate wins.
fn snap_value(value: f64, grid_interval: f64, settings: &SnappingSettings, others: &[f64]) -> f64 {
    let mut best: Option<(f64, f64)> = None;

    if settings.edge_enabled {
        for &candidate in others {
            let distance = (candidate - value).abs();
            if distance <= settings.edge_threshold
                && best.map_or(true, |(d, _)| distance < d)
            {
                best = Some((distance, candidate));
            }
        }
    }

    if settings.grid_enabled && grid_interval > 0.0 {
        let candidate = (value / grid_interval).round() * grid_interval;
        let distance = (candidate - value).abs();
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }

    best.map_or(value, |(_, candidate)| candidate)
}

/// Finds the zones adjacent to `id` on each side.
pub fn find_adjacent_zones(id: ZoneId, zones: &[Zone]) -> AdjacentZones {
    let Some(zone) = zones.iter().find(|z| z.id == id) else {
        return AdjacentZones::default();
    };
    let rect = zone.geometry;
    let mut adjacent = AdjacentZones::default();

    for other in zones {
        if other.id == id {
            continue;
        }
        let o = other.geometry;
        if o.overlaps_vertically(&rect, EDGE_EPSILON) {
            if (o.right() - rect.x).abs() < EDGE_EPSILON {
                adjacent.left.push(other.id);
            }
            if (o.x - rect.right()).abs() < EDGE_EPSILON {
                adjacent.right.push(other.id);
            }
        }
        if o.overlaps_horizontally(&rect, EDGE_EPSILON) {
            if (o.bottom() - rect.y).abs() < EDGE_EPSILON {
                adjacent.top.push(other.id);
            }
            if (o.y - rect.bottom()).abs() < EDGE_EPSILON {
                adjacent.bottom.push(other.id);
            }
        }
    }

    adjacent
}

/// Length of the edge two rectangles share, 0.0 when not adjacent.
pub fn shared_edge_length(a: &Rect, b: &Rect) -> f64 {
    let vertical_touch = (a.right() - b.x).abs() < EDGE_EPSILON
        || (b.right() - a.x).abs() < EDGE_EPSILON;
    if vertical_touch {
        let overlap = a.bottom().min(b.bottom()) - a.y.max(b.y);
        if overlap > 0.0 {
            return overlap;
        }
    }
    let horizontal_touch = (a.bottom() - b.y).abs() < EDGE_EPSILON
        || (b.bottom() - a.y).abs() < EDGE_EPSILON;
    if horizontal_touch {
        let overlap = a.right().min(b.right()) - a.x.max(b.x);
        if overlap > 0.0 {
            return overlap;
        }
    }
    0.0
}

/// Computes the maximal rectangle `id` can grow into.
///
/// Each side expands until it meets the nearest zone overlapping the
/// perpendicular span, or the layout boundary. With a cursor position,
/// each axis only expands toward the side nearer the cursor, falling
/// back to the opposite side when the preferred one has no room.
///
/// Returns `None` when the zone is unknown or no growth is possible.
pub fn calculate_fill_region(
    id: ZoneId,
    zones: &[Zone],
    cursor: Option<(f64, f64)>,
) -> Option<Rect> {
    let zone = zones.iter().find(|z| z.id == id)?;
    let rect = zone.geometry;

    let mut left_limit: f64 = 0.0;
    let mut right_limit: f64 = 1.0;
    let mut top_limit: f64 = 0.0;
    let mut bottom_limit: f64 = 1.0;

    for other in zones {
        if other.id == id {
            continue;
        }
        let o = other.geometry;
        if o.overlaps_vertically(&rect, EDGE_EPSILON) {
            if o.right() <= rect.x + EDGE_EPSILON {
                left_limit = left_limit.max(o.right());
            }
            if o.x >= rect.right() - EDGE_EPSILON {
                right_limit = right_limit.min(o.x);
            }
        }
        if o.overlaps_horizontally(&rect, EDGE_EPSILON) {
            if o.bottom() <= rect.y + EDGE_EPSILON {
                top_limit = top_limit.max(o.bottom());
            }
            if o.y >= rect.bottom() - EDGE_EPSILON {
                bottom_limit = bottom_limit.min(o.y);
            }
        }
    }

    let mut left = left_limit.min(rect.x);
    let mut right = right_limit.max(rect.right());
    let mut top = top_limit.min(rect.y);
    let mut bottom = bottom_limit.max(rect.bottom());

    if let Some((cx, cy)) = cursor {
        let grow_left = left < rect.x - EDGE_EPSILON;
        let grow_right = right > rect.right() + EDGE_EPSILON;
        if grow_left && grow_right {
            if cx < rect.center_x() {
                right = rect.right();
            } else {
                left = rect.x;
            }
        }
        let grow_top = top < rect.y - EDGE_EPSILON;
        let grow_bottom = bottom > rect.bottom() + EDGE_EPSILON;
        if grow_top && grow_bottom {
            if cy < rect.center_y() {
                bottom = rect.bottom();
            } else {
                top = rect.y;
            }
        }
    }

    let region = Rect::new(left, top, right - left, bottom - top);
    if region.approx_eq(&rect, EDGE_EPSILON) {
        None
    } else {
        Some(region)
    }
}

/// Collects every zone touching the divider between two adjacent zones.
///
/// A vertical divider is the shared x coordinate between the zones; a
/// horizontal divider the shared y coordinate. The result maps each
/// touching zone to its current geometry, keyed deterministically.
///
/// Returns `None` when the zones do not share an edge on the requested
/// axis.
pub fn collect_geometries_at_divider(
    first: ZoneId,
    second: ZoneId,
    vertical: bool,
    zones: &[Zone],
) -> Option<(f64, BTreeMap<ZoneId, Rect>)> {
    let a = zones.iter().find(|z| z.id == first)?.geometry;
    let b = zones.iter().find(|z| z.id == second)?.geometry;

    let position = if vertical {
        if (a.right() - b.x).abs() < EDGE_EPSILON {
            a.right()
        } else if (b.right() - a.x).abs() < EDGE_EPSILON {
            b.right()
        } else {
            return None;
        }
    } else if (a.bottom() - b.y).abs() < EDGE_EPSILON {
        a.bottom()
    } else if (b.bottom() - a.y).abs() < EDGE_EPSILON {
        b.bottom()
    } else {
        return None;
    };

    let mut touching = BTreeMap::new();
    for zone in zones {
        let r = zone.geometry;
        let touches = if vertical {
            (r.x - position).abs() < EDGE_EPSILON || (r.right() - position).abs() < EDGE_EPSILON
        } else {
            (r.y - position).abs() < EDGE_EPSILON || (r.bottom() - position).abs() < EDGE_EPSILON
        };
        if touches {
            touching.insert(zone.id, r);
        }
    }

    Some((position, touching))
}

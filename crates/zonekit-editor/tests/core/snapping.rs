use zonekit_core::Rect;
use zonekit_editor::snapping::{
    calculate_fill_region, collect_geometries_at_divider, find_adjacent_zones,
    shared_edge_length, snap_geometry, snap_geometry_selective, SnapEdges,
};
use zonekit_editor::zone::{Zone, ZoneAppearance};
use zonekit_settings::SnappingSettings;

fn settings() -> SnappingSettings {
    SnappingSettings {
        grid_enabled: true,
        grid_interval_x: 0.05,
        grid_interval_y: 0.05,
        edge_enabled: true,
        edge_threshold: 0.02,
    }
}

fn zone(number: u8, x: f64, y: f64, w: f64, h: f64) -> Zone {
    Zone::new(Rect::new(x, y, w, h), number, ZoneAppearance::default())
}

#[test]
fn test_grid_snap_all_edges() {
    let snapped = snap_geometry(
        Rect::new(0.12, 0.13, 0.28, 0.30),
        &[],
        None,
        &settings(),
        0.05,
    );
    assert!(snapped.approx_eq(&Rect::new(0.10, 0.15, 0.30, 0.30), 1e-9));
}

#[test]
fn test_selective_snap_leaves_fixed_edges_alone() {
    // Resize from the right handle: the left edge must stay exactly
    // where it was, even though it is off the grid.
    let edges = SnapEdges {
        left: false,
        right: true,
        top: false,
        bottom: false,
    };
    let snapped = snap_geometry_selective(
        Rect::new(0.11, 0.10, 0.32, 0.30),
        &[],
        None,
        &settings(),
        0.05,
        edges,
    );
    assert_eq!(snapped.x, 0.11);
    assert_eq!(snapped.y, 0.10);
    assert!((snapped.right() - 0.45).abs() < 1e-9);
    assert!((snapped.bottom() - 0.40).abs() < 1e-9);
}

#[test]
fn test_edge_snap_attracts_within_threshold() {
    let mut config = settings();
    config.grid_enabled = false;
    let neighbors = vec![zone(1, 0.5, 0.0, 0.3, 1.0)];
    let snapped = snap_geometry(
        Rect::new(0.19, 0.0, 0.3, 1.0),
        &neighbors,
        None,
        &config,
        0.05,
    );
    // The right edge at 0.49 is pulled onto the neighbor's left edge.
    assert!((snapped.right() - 0.5).abs() < 1e-9);
    // The left edge has no attractor within the threshold.
    assert_eq!(snapped.x, 0.19);
}

#[test]
fn test_edge_snap_ignores_excluded_zone() {
    let mut config = settings();
    config.grid_enabled = false;
    let zones = vec![zone(1, 0.5, 0.0, 0.3, 1.0)];
    let own_id = zones[0].id;
    let snapped = snap_geometry(
        Rect::new(0.49, 0.0, 0.3, 1.0),
        &zones,
        Some(own_id),
        &config,
        0.05,
    );
    // The only candidate edges belong to the excluded zone itself.
    assert_eq!(snapped.x, 0.49);
}

#[test]
fn test_snap_clamps_out_of_bounds_input() {
    let snapped = snap_geometry(
        Rect::new(0.9, 0.95, 0.3, 0.3),
        &[],
        None,
        &settings(),
        0.05,
    );
    assert!(snapped.is_valid(0.05 - 1e-9));
    assert!((snapped.right() - 1.0).abs() < 1e-9);
    assert!((snapped.bottom() - 1.0).abs() < 1e-9);
}

#[test]
fn test_snap_enforces_minimum_size() {
    let snapped = snap_geometry(
        Rect::new(0.2, 0.2, 0.001, 0.001),
        &[],
        None,
        &settings(),
        0.05,
    );
    assert!(snapped.width >= 0.05 - 1e-9);
    assert!(snapped.height >= 0.05 - 1e-9);
}

#[test]
fn test_snap_is_idempotent() {
    let cases = [
        Rect::new(0.12, 0.13, 0.28, 0.30),
        Rect::new(0.9, 0.95, 0.3, 0.3),
        Rect::new(0.0, 0.0, 1.0, 1.0),
        Rect::new(0.33, 0.41, 0.22, 0.18),
    ];
    let neighbors = vec![zone(1, 0.5, 0.0, 0.25, 1.0), zone(2, 0.0, 0.6, 1.0, 0.4)];
    for rect in cases {
        let once = snap_geometry(rect, &neighbors, None, &settings(), 0.05);
        let twice = snap_geometry(once, &neighbors, None, &settings(), 0.05);
        assert!(twice.approx_eq(&once, 1e-9), "{rect:?} -> {once:?} -> {twice:?}");
    }
}

#[test]
fn test_adjacency_by_side() {
    let a = zone(1, 0.0, 0.0, 0.5, 1.0);
    let b = zone(2, 0.5, 0.0, 0.5, 0.5);
    let c = zone(3, 0.5, 0.5, 0.5, 0.5);
    let zones = vec![a.clone(), b.clone(), c.clone()];

    let around_a = find_adjacent_zones(a.id, &zones);
    assert_eq!(around_a.right, vec![b.id, c.id]);
    assert!(around_a.left.is_empty());

    let around_b = find_adjacent_zones(b.id, &zones);
    assert_eq!(around_b.left, vec![a.id]);
    assert_eq!(around_b.bottom, vec![c.id]);
}

#[test]
fn test_adjacency_requires_span_overlap() {
    // Touching corners only: spans do not overlap.
    let a = zone(1, 0.0, 0.0, 0.5, 0.5);
    let b = zone(2, 0.5, 0.5, 0.5, 0.5);
    let zones = vec![a.clone(), b.clone()];
    assert!(find_adjacent_zones(a.id, &zones).is_empty());
}

#[test]
fn test_shared_edge_length() {
    let a = Rect::new(0.0, 0.0, 0.5, 1.0);
    let b = Rect::new(0.5, 0.25, 0.5, 0.5);
    assert!((shared_edge_length(&a, &b) - 0.5).abs() < 1e-9);
    let far = Rect::new(0.7, 0.0, 0.3, 1.0);
    assert_eq!(shared_edge_length(&a, &far), 0.0);
}

#[test]
fn test_fill_region_expands_to_nearest_obstacle() {
    let a = zone(1, 0.0, 0.0, 0.25, 1.0);
    let b = zone(2, 0.75, 0.0, 0.25, 1.0);
    let zones = vec![a.clone(), b];
    let region = calculate_fill_region(a.id, &zones, None).expect("should grow");
    assert!(region.approx_eq(&Rect::new(0.0, 0.0, 0.75, 1.0), 1e-9));
}

#[test]
fn test_fill_region_none_when_boxed_in() {
    let a = zone(1, 0.0, 0.0, 0.5, 1.0);
    let b = zone(2, 0.5, 0.0, 0.5, 1.0);
    let zones = vec![a.clone(), b];
    assert!(calculate_fill_region(a.id, &zones, None).is_none());
}

#[test]
fn test_fill_region_cursor_picks_direction() {
    let m = zone(1, 0.4, 0.0, 0.2, 1.0);
    let zones = vec![m.clone()];

    let toward_left = calculate_fill_region(m.id, &zones, Some((0.1, 0.5))).unwrap();
    assert!(toward_left.approx_eq(&Rect::new(0.0, 0.0, 0.6, 1.0), 1e-9));

    let toward_right = calculate_fill_region(m.id, &zones, Some((0.9, 0.5))).unwrap();
    assert!(toward_right.approx_eq(&Rect::new(0.4, 0.0, 0.6, 1.0), 1e-9));
}

#[test]
fn test_fill_region_cursor_falls_back_when_side_blocked() {
    // Flush against the layout boundary on the left: even with the
    // cursor on the left, growth happens to the right.
    let m = zone(1, 0.0, 0.0, 0.2, 1.0);
    let zones = vec![m.clone()];
    let region = calculate_fill_region(m.id, &zones, Some((0.05, 0.5))).unwrap();
    assert!(region.approx_eq(&Rect::new(0.0, 0.0, 1.0, 1.0), 1e-9));
}

#[test]
fn test_divider_collects_every_touching_zone() {
    let a = zone(1, 0.0, 0.0, 0.5, 1.0);
    let b = zone(2, 0.5, 0.0, 0.5, 0.5);
    let c = zone(3, 0.5, 0.5, 0.5, 0.5);
    let zones = vec![a.clone(), b.clone(), c.clone()];

    let (position, touching) =
        collect_geometries_at_divider(a.id, b.id, true, &zones).expect("shared divider");
    assert!((position - 0.5).abs() < 1e-9);
    assert_eq!(touching.len(), 3);
    assert!(touching.contains_key(&c.id));
}

#[test]
fn test_divider_requires_shared_edge() {
    let a = zone(1, 0.0, 0.0, 0.5, 1.0);
    let b = zone(2, 0.5, 0.0, 0.5, 0.5);
    let c = zone(3, 0.5, 0.5, 0.5, 0.5);
    let zones = vec![a.clone(), b.clone(), c.clone()];

    // B and C share a horizontal edge, not a vertical one.
    assert!(collect_geometries_at_divider(b.id, c.id, true, &zones).is_none());
    assert!(collect_geometries_at_divider(b.id, c.id, false, &zones).is_some());
}

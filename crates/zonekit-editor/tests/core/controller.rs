use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use zonekit_core::{Error, EventCategory, EventFilter, Rect};
use zonekit_editor::clipboard::InMemoryClipboard;
use zonekit_editor::commands::AppearanceChange;
use zonekit_editor::controller::{EditorController, VisibilityList};
use zonekit_editor::services::{
    MemoryLayoutRepository, ShaderInfo, ShaderParameter, StaticShaderCatalog,
};
use zonekit_editor::snapping::SnapEdges;
use zonekit_editor::templates::find_template;
use zonekit_settings::Config;

fn controller() -> EditorController {
    EditorController::in_memory(Config::default())
}

fn failure_counter(controller: &EditorController) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();
    controller.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Failure]),
        move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        },
    );
    counter
}

#[test]
fn test_add_zone_snaps_and_selectable() {
    let mut editor = controller();
    let id = editor.add_zone(Rect::new(0.12, 0.13, 0.28, 0.30)).unwrap();
    let zone = editor.zone(id).unwrap();
    assert!(zone
        .geometry
        .approx_eq(&Rect::new(0.10, 0.15, 0.30, 0.30), 1e-9));
    assert_eq!(zone.number, 1);

    assert!(editor.select_zone(id, false).unwrap());
    assert_eq!(editor.selection().primary(), Some(id));
}

#[test]
fn test_add_rejects_degenerate_geometry() {
    let mut editor = controller();
    let failures = failure_counter(&editor);

    assert!(editor.add_zone(Rect::new(0.1, 0.1, 0.0, 0.2)).is_err());
    assert!(editor.add_zone(Rect::new(0.1, 0.1, 0.2, f64::NAN)).is_err());
    assert!(editor.add_zone(Rect::new(1.5, 0.1, 0.2, 0.2)).is_err());

    assert!(editor.zones().is_empty());
    assert_eq!(failures.load(Ordering::SeqCst), 3);
}

#[test]
fn test_rename_validation() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    let b = editor.add_zone(Rect::new(0.3, 0.0, 0.3, 0.3)).unwrap();

    assert!(editor.rename_zone(a, "Browser").unwrap());

    // Duplicate non-empty names are rejected.
    let err = editor.rename_zone(b, "Browser").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(editor.zone(b).unwrap().name, "");

    // Forbidden characters and over-long names are rejected.
    assert!(editor.rename_zone(b, "bad<name").is_err());
    assert!(editor.rename_zone(b, &"x".repeat(101)).is_err());

    // Empty names are always allowed, even twice.
    assert!(!editor.rename_zone(b, "").unwrap());
    assert!(editor.rename_zone(a, "").unwrap());
}

#[test]
fn test_renumber_validation() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    let b = editor.add_zone(Rect::new(0.3, 0.0, 0.3, 0.3)).unwrap();

    assert!(editor.renumber_zone(a, 42).unwrap());
    assert!(editor.renumber_zone(b, 42).is_err());
    assert!(editor.renumber_zone(b, 0).is_err());
    assert!(editor.renumber_zone(b, 100).is_err());
    assert_eq!(editor.zone(b).unwrap().number, 2);
}

#[test]
fn test_unknown_zone_is_recoverable_error() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    editor.delete_zone(a, false).unwrap();

    let err = editor.rename_zone(a, "gone").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_geometry_update_suppresses_jitter() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.10, 0.10, 0.30, 0.30)).unwrap();
    assert!(editor.can_undo());

    // Sub-tolerance wiggle produces no undo entry.
    let moved = editor
        .update_zone_geometry(
            a,
            Rect::new(0.100004, 0.1, 0.3, 0.3),
            SnapEdges::NONE,
        )
        .unwrap();
    assert!(!moved);
    assert_eq!(editor.undo_label(), Some("Add Zone"));

    let moved = editor
        .update_zone_geometry(a, Rect::new(0.2, 0.1, 0.3, 0.3), SnapEdges::ALL)
        .unwrap();
    assert!(moved);
    assert_eq!(editor.undo_label(), Some("Resize Zone"));
}

#[test]
fn test_split_too_small_is_rejected() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.05, 0.05)).unwrap();
    assert!(editor.split_zone(a, true).is_err());
    assert_eq!(editor.zones().len(), 1);
}

#[test]
fn test_batch_appearance_requires_selection() {
    let mut editor = controller();
    editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    let err = editor
        .batch_update_appearance(AppearanceChange::UseCustomColors(true))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(zonekit_core::ValidationError::EmptySelection)
    ));
}

#[test]
fn test_batch_appearance_applies_to_selection() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    let b = editor.add_zone(Rect::new(0.3, 0.0, 0.3, 0.3)).unwrap();
    let c = editor.add_zone(Rect::new(0.6, 0.0, 0.3, 0.3)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.select_zone(b, true).unwrap();

    let touched = editor
        .batch_update_appearance(AppearanceChange::ActiveOpacity(0.9))
        .unwrap();
    assert_eq!(touched, 2);
    assert_eq!(editor.zone(a).unwrap().appearance.active_opacity, 0.9);
    assert_eq!(editor.zone(b).unwrap().appearance.active_opacity, 0.9);
    assert_ne!(editor.zone(c).unwrap().appearance.active_opacity, 0.9);

    // One undo reverts both zones.
    assert!(editor.undo());
    assert_ne!(editor.zone(a).unwrap().appearance.active_opacity, 0.9);
    assert_ne!(editor.zone(b).unwrap().appearance.active_opacity, 0.9);

    // Out-of-range values are rejected up front.
    assert!(editor
        .batch_update_appearance(AppearanceChange::ActiveOpacity(1.5))
        .is_err());
}

#[test]
fn test_zorder_through_controller_is_undoable() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.2, 0.2)).unwrap();
    let b = editor.add_zone(Rect::new(0.2, 0.0, 0.2, 0.2)).unwrap();
    let c = editor.add_zone(Rect::new(0.4, 0.0, 0.2, 0.2)).unwrap();

    assert!(editor.bring_to_front(a).unwrap());
    assert_eq!(editor.store().order(), vec![b, c, a]);

    assert!(editor.undo());
    assert_eq!(editor.store().order(), vec![a, b, c]);

    // Already at the back: no entry is recorded.
    assert!(!editor.send_to_back(a).unwrap());
}

#[test]
fn test_divider_move_resizes_all_touching_zones() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.5, 1.0)).unwrap();
    let b = editor.add_zone(Rect::new(0.5, 0.0, 0.5, 0.5)).unwrap();
    let c = editor.add_zone(Rect::new(0.5, 0.5, 0.5, 0.5)).unwrap();

    assert!(editor.move_divider(a, b, true, 0.6).unwrap());
    assert!(editor
        .zone(a)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.0, 0.0, 0.6, 1.0), 1e-9));
    assert!(editor
        .zone(b)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.6, 0.0, 0.4, 0.5), 1e-9));
    assert!(editor
        .zone(c)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.6, 0.5, 0.4, 0.5), 1e-9));

    // One undo restores all three.
    assert!(editor.undo());
    assert!(editor
        .zone(c)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.5, 0.5, 0.5, 0.5), 1e-9));
}

#[test]
fn test_divider_move_clamps_to_min_size() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.5, 1.0)).unwrap();
    let b = editor.add_zone(Rect::new(0.5, 0.0, 0.5, 1.0)).unwrap();

    assert!(editor.move_divider(a, b, true, 0.999).unwrap());
    // The right zone keeps the minimum width.
    assert!((editor.zone(b).unwrap().geometry.width - 0.05).abs() < 1e-9);
}

#[test]
fn test_apply_template_is_single_undo_entry() {
    let mut editor = controller();
    let seeded = editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    editor.select_zone(seeded, false).unwrap();

    let template = find_template("priority-grid").unwrap();
    editor.apply_template(&template).unwrap();
    assert_eq!(editor.zones().len(), 3);
    assert!(editor.selection().is_empty());

    assert!(editor.undo());
    assert_eq!(editor.zones().len(), 1);
    assert_eq!(editor.zone(seeded).map(|z| z.id), Some(seeded));
    assert_eq!(editor.selection().ids(), &[seeded]);
}

#[test]
fn test_clear_all_and_undo() {
    let mut editor = controller();
    editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    editor.add_zone(Rect::new(0.3, 0.0, 0.3, 0.3)).unwrap();

    editor.clear_all().unwrap();
    assert!(editor.zones().is_empty());

    assert!(editor.undo());
    assert_eq!(editor.zones().len(), 2);
}

#[test]
fn test_delete_selected_restores_selection_on_undo() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    let b = editor.add_zone(Rect::new(0.3, 0.0, 0.3, 0.3)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.select_zone(b, true).unwrap();

    assert_eq!(editor.delete_selected().unwrap(), 2);
    assert!(editor.zones().is_empty());
    assert!(editor.selection().is_empty());

    assert!(editor.undo());
    assert_eq!(editor.zones().len(), 2);
    assert_eq!(editor.selection().ids(), &[a, b]);
}

#[test]
fn test_multi_zone_drag_commit() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.10, 0.10, 0.20, 0.20)).unwrap();
    let b = editor.add_zone(Rect::new(0.40, 0.10, 0.20, 0.20)).unwrap();
    let c = editor.add_zone(Rect::new(0.70, 0.10, 0.20, 0.20)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.select_zone(b, true).unwrap();
    editor.select_zone(c, true).unwrap();

    let before_entries = editor.undo_label().map(str::to_string);
    editor.start_multi_zone_drag(a).unwrap();
    editor.update_multi_zone_drag(0.15, 0.20).unwrap();
    // The followers mirror the primary's delta; the primary itself is
    // driven by its own handler.
    assert!(editor
        .zone(b)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.45, 0.20, 0.20, 0.20), 1e-9));
    assert!(editor
        .zone(a)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.10, 0.10, 0.20, 0.20), 1e-9));

    editor.end_multi_zone_drag(true).unwrap();
    assert!(!editor.is_dragging());
    assert_eq!(editor.undo_label(), Some("Move Zones"));

    // One undo reverts both followers.
    assert!(editor.undo());
    assert!(editor
        .zone(b)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.40, 0.10, 0.20, 0.20), 1e-9));
    assert!(editor
        .zone(c)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.70, 0.10, 0.20, 0.20), 1e-9));
    assert_eq!(editor.undo_label().map(str::to_string), before_entries);
}

#[test]
fn test_multi_zone_drag_cancel_restores_positions() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.10, 0.10, 0.20, 0.20)).unwrap();
    let b = editor.add_zone(Rect::new(0.40, 0.10, 0.20, 0.20)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.select_zone(b, true).unwrap();

    let label_before = editor.undo_label().map(str::to_string);
    editor.start_multi_zone_drag(a).unwrap();
    editor.update_multi_zone_drag(0.30, 0.30).unwrap();
    editor.end_multi_zone_drag(false).unwrap();

    assert!(editor
        .zone(b)
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.40, 0.10, 0.20, 0.20), 1e-9));
    // Cancel leaves no undo entry behind.
    assert_eq!(editor.undo_label().map(str::to_string), label_before);
}

#[test]
fn test_drag_requires_selected_primary() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.1, 0.1, 0.2, 0.2)).unwrap();
    assert!(editor.start_multi_zone_drag(a).is_err());
    assert!(editor.update_multi_zone_drag(0.2, 0.2).is_err());
}

#[test]
fn test_move_selected_by_is_one_entry() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.10, 0.10, 0.20, 0.20)).unwrap();
    let b = editor.add_zone(Rect::new(0.40, 0.10, 0.20, 0.20)).unwrap();
    let c = editor.add_zone(Rect::new(0.70, 0.10, 0.20, 0.20)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.select_zone(b, true).unwrap();
    editor.select_zone(c, true).unwrap();

    assert!(editor.move_selected_by(0.1, 0.0).unwrap());
    for (id, x) in [(a, 0.20), (b, 0.50), (c, 0.80)] {
        assert!((editor.zone(id).unwrap().geometry.x - x).abs() < 1e-9);
    }

    assert!(editor.undo());
    for (id, x) in [(a, 0.10), (b, 0.40), (c, 0.70)] {
        assert!((editor.zone(id).unwrap().geometry.x - x).abs() < 1e-9);
    }
}

#[test]
fn test_shader_switch_prunes_stale_params() {
    let catalog = StaticShaderCatalog::new(vec![
        ShaderInfo {
            id: "wave".to_string(),
            name: "Wave".to_string(),
            parameters: vec![
                ShaderParameter {
                    id: "amplitude".to_string(),
                    name: "Amplitude".to_string(),
                    default: 0.5,
                    min: 0.0,
                    max: 1.0,
                },
                ShaderParameter {
                    id: "speed".to_string(),
                    name: "Speed".to_string(),
                    default: 1.0,
                    min: 0.0,
                    max: 4.0,
                },
            ],
        },
        ShaderInfo {
            id: "glow".to_string(),
            name: "Glow".to_string(),
            parameters: vec![ShaderParameter {
                id: "radius".to_string(),
                name: "Radius".to_string(),
                default: 2.0,
                min: 0.0,
                max: 16.0,
            }],
        },
    ]);
    let mut editor = EditorController::new(
        Config::default(),
        Box::new(MemoryLayoutRepository::new()),
        Box::new(catalog),
        Box::new(InMemoryClipboard::new()),
    );

    editor.set_shader(Some("wave")).unwrap();
    editor.set_shader_param("amplitude", 0.8).unwrap();
    editor.set_shader_param("speed", 2.0).unwrap();
    assert_eq!(editor.layout().shader_params.len(), 2);

    // Parameters not declared by the new shader are dropped.
    editor.set_shader(Some("glow")).unwrap();
    assert!(editor.layout().shader_params.is_empty());
    editor.set_shader_param("radius", 4.0).unwrap();
    assert!(editor.set_shader_param("amplitude", 0.8).is_err());

    // Unknown shaders are rejected; clearing drops everything.
    assert!(editor.set_shader(Some("missing")).is_err());
    editor.set_shader(None).unwrap();
    assert!(editor.layout().shader_params.is_empty());
}

#[test]
fn test_visibility_toggle_asymmetry() {
    let mut editor = controller();
    let known: Vec<String> = ["s1", "s2", "s3"].iter().map(|s| s.to_string()).collect();

    // Toggling on an empty list excludes just the toggled item.
    editor.toggle_visibility(VisibilityList::Screens, "s1", &known);
    assert_eq!(editor.layout().allowed_screens, vec!["s2", "s3"]);

    // Regular membership toggles.
    editor.toggle_visibility(VisibilityList::Screens, "s2", &known);
    assert_eq!(editor.layout().allowed_screens, vec!["s3"]);

    // Re-adding until the list covers everything collapses to empty.
    editor.toggle_visibility(VisibilityList::Screens, "s2", &known);
    editor.toggle_visibility(VisibilityList::Screens, "s1", &known);
    assert!(editor.layout().allowed_screens.is_empty());

    // The three lists are independent.
    editor.toggle_visibility(VisibilityList::Desktops, "d1", &["d1".to_string()]);
    assert!(editor.layout().allowed_desktops.is_empty());
    editor.toggle_visibility(
        VisibilityList::Activities,
        "a1",
        &["a1".to_string(), "a2".to_string()],
    );
    assert_eq!(editor.layout().allowed_activities, vec!["a2"]);
}

#[test]
fn test_padding_overrides_and_inherit_sentinel() {
    let mut editor = controller();
    let default_padding = editor.config().layout_defaults.zone_padding;
    assert_eq!(editor.effective_zone_padding(), default_padding);

    editor.set_zone_padding(4.0).unwrap();
    assert_eq!(editor.effective_zone_padding(), 4.0);

    editor.set_zone_padding(-1.0).unwrap();
    assert_eq!(editor.effective_zone_padding(), default_padding);

    assert!(editor.set_zone_padding(-3.0).is_err());
    assert!(editor.set_outer_gap(12.0).is_ok());
    assert_eq!(editor.effective_outer_gap(), 12.0);
}

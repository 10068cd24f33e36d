use zonekit_core::Rect;
use zonekit_editor::clipboard::{
    decode_entries, encode_entries, ClipboardEntry, JSON_MIME, TEXT_MIME, ZONES_MIME,
};
use zonekit_editor::controller::EditorController;
use zonekit_editor::zone::{Zone, ZoneAppearance};
use zonekit_settings::Config;

fn controller() -> EditorController {
    EditorController::in_memory(Config::default())
}

#[test]
fn test_encode_produces_all_three_representations() {
    let zones = vec![Zone::new(
        Rect::new(0.0, 0.0, 0.5, 0.5),
        1,
        ZoneAppearance::default(),
    )];
    let entries = encode_entries(&zones).unwrap();
    let mimes: Vec<&str> = entries.iter().map(|entry| entry.mime.as_str()).collect();
    assert_eq!(mimes, vec![ZONES_MIME, JSON_MIME, TEXT_MIME]);
    // All entries carry the same document.
    assert_eq!(entries[0].data, entries[2].data);
}

#[test]
fn test_decode_round_trip() {
    let zones = vec![
        Zone::new(Rect::new(0.0, 0.0, 0.5, 0.5), 1, ZoneAppearance::default()),
        Zone::new(Rect::new(0.5, 0.0, 0.5, 0.5), 2, ZoneAppearance::default()),
    ];
    let entries = encode_entries(&zones).unwrap();
    let envelope = decode_entries(&entries).unwrap();
    assert_eq!(envelope.version, 1);
    assert_eq!(envelope.zones.len(), 2);
    assert_eq!(envelope.zones[0].zone_number, 1);
}

#[test]
fn test_decode_falls_back_to_plain_text() {
    let zones = vec![Zone::new(
        Rect::new(0.0, 0.0, 0.5, 0.5),
        1,
        ZoneAppearance::default(),
    )];
    let full = encode_entries(&zones).unwrap();
    let text_only = vec![full.into_iter().last().unwrap()];
    assert_eq!(text_only[0].mime, TEXT_MIME);
    assert!(decode_entries(&text_only).is_some());
}

#[test]
fn test_decode_rejects_garbage_and_future_versions() {
    let garbage = vec![ClipboardEntry {
        mime: TEXT_MIME.to_string(),
        data: "not json at all".to_string(),
    }];
    assert!(decode_entries(&garbage).is_none());

    let future = vec![ClipboardEntry {
        mime: ZONES_MIME.to_string(),
        data: r#"{"version": 99, "zones": []}"#.to_string(),
    }];
    assert!(decode_entries(&future).is_none());

    assert!(decode_entries(&[]).is_none());
}

#[test]
fn test_copy_then_can_paste() {
    let mut editor = controller();
    assert!(!editor.can_paste());

    let a = editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    editor.select_zone(a, false).unwrap();
    assert_eq!(editor.copy_selection().unwrap(), 1);
    assert!(editor.can_paste());
}

#[test]
fn test_copy_requires_selection() {
    let mut editor = controller();
    editor.add_zone(Rect::new(0.0, 0.0, 0.3, 0.3)).unwrap();
    assert!(editor.copy_selection().is_err());
}

#[test]
fn test_paste_with_offset_renumbers_and_shifts() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.10, 0.10, 0.30, 0.30)).unwrap();
    let b = editor.add_zone(Rect::new(0.50, 0.10, 0.30, 0.30)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.select_zone(b, true).unwrap();
    editor.copy_selection().unwrap();

    let pasted = editor.paste(true).unwrap();
    assert_eq!(pasted.len(), 2);
    assert_eq!(editor.zones().len(), 4);

    let offset = editor.config().editor.duplicate_offset;
    let first = editor.zone(pasted[0]).unwrap();
    let second = editor.zone(pasted[1]).unwrap();

    // Fresh ids, numbers continuing from the existing maximum.
    assert_ne!(first.id, a);
    assert_ne!(first.id, b);
    assert_eq!(first.number, 3);
    assert_eq!(second.number, 4);

    // Positions shifted by the duplicate offset.
    assert!(first
        .geometry
        .approx_eq(&Rect::new(0.10 + offset, 0.10 + offset, 0.30, 0.30), 1e-9));

    // The pasted zones are now the selection.
    assert_eq!(editor.selection().ids(), pasted.as_slice());

    // The whole paste is one undo entry.
    assert!(editor.undo());
    assert_eq!(editor.zones().len(), 2);
}

#[test]
fn test_paste_without_offset_keeps_positions() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.10, 0.10, 0.30, 0.30)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.copy_selection().unwrap();

    let pasted = editor.paste(false).unwrap();
    assert!(editor
        .zone(pasted[0])
        .unwrap()
        .geometry
        .approx_eq(&Rect::new(0.10, 0.10, 0.30, 0.30), 1e-9));
}

#[test]
fn test_paste_clamps_to_bounds() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.70, 0.70, 0.30, 0.30)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.copy_selection().unwrap();

    let pasted = editor.paste(true).unwrap();
    let zone = editor.zone(pasted[0]).unwrap();
    assert!(zone.geometry.right() <= 1.0 + 1e-9);
    assert!(zone.geometry.bottom() <= 1.0 + 1e-9);
}

#[test]
fn test_paste_renames_colliding_names() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.10, 0.10, 0.30, 0.30)).unwrap();
    editor.rename_zone(a, "Web").unwrap();
    editor.select_zone(a, false).unwrap();
    editor.copy_selection().unwrap();

    let pasted = editor.paste(true).unwrap();
    assert_eq!(editor.zone(pasted[0]).unwrap().name, "Web copy");
}

#[test]
fn test_paste_empty_clipboard_fails() {
    let mut editor = controller();
    let err = editor.paste(true).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_cut_removes_and_pastes_back() {
    let mut editor = controller();
    let a = editor.add_zone(Rect::new(0.10, 0.10, 0.30, 0.30)).unwrap();
    let b = editor.add_zone(Rect::new(0.50, 0.10, 0.30, 0.30)).unwrap();
    editor.select_zone(a, false).unwrap();
    editor.select_zone(b, true).unwrap();

    assert_eq!(editor.cut_selection().unwrap(), 2);
    assert!(editor.zones().is_empty());

    // Cut is one undo entry.
    assert!(editor.undo());
    assert_eq!(editor.zones().len(), 2);
    assert!(editor.redo());

    // And the cut content pastes back in.
    let pasted = editor.paste(false).unwrap();
    assert_eq!(pasted.len(), 2);
    assert_eq!(editor.zone(pasted[0]).unwrap().number, 1);
}

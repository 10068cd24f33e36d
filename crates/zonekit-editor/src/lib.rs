//! # ZoneKit Editor
//!
//! The zone-layout editing core behind a window-snapping shell: a
//! constraint-based rectangle-layout editor with transactional undo,
//! z-order management, multi-selection batch editing, and edge
//! snapping, all over normalized [0, 1] coordinates.
//!
//! ## Core Components
//!
//! ### Editing state
//! - **Zones**: named, numbered rectangular regions with per-zone
//!   appearance
//! - **Zone store**: the authoritative ordered collection (sequence
//!   position = paint order) with batched change notification
//! - **Selection**: an ordered multi-selection whose first entry is
//!   primary
//!
//! ### History
//! - **Commands**: one variant per mutation, each capturing enough
//!   old/new state to invert itself
//! - **Undo controller**: a linear history with atomic macros and a
//!   clean (saved-point) marker
//!
//! ### Geometry
//! - **Snapping**: pure functions snapping edges to a grid and to
//!   neighboring zones, plus adjacency, fill-region, and divider
//!   queries
//!
//! ### Orchestration
//! - **Editor controller**: validates, snaps, composes commands, and
//!   talks to the external persistence/shader/clipboard collaborators
//! - **Templates**: built-in layout presets applied as single undo
//!   entries
//!
//! ## Architecture
//!
//! ```text
//! EditorController (validation, snapping, selection, services)
//!   ├── ZoneStore (zones + paint order + batched notification)
//!   ├── UndoController (command history, macros, clean marker)
//!   └── Snapping engine (pure geometry queries)
//!
//! LayoutFile / ClipboardEnvelope (wire schemas)
//! LayoutRepository / ShaderCatalog / ClipboardAccess (collaborators)
//! ```
//!
//! UI gestures flow through the controller, which validates and snaps,
//! then records an inverse-capable command; undo/redo replay commands
//! against the store directly, bypassing controller validation.

pub mod clipboard;
pub mod commands;
pub mod controller;
pub mod history;
pub mod layout;
pub mod selection;
pub mod services;
pub mod snapping;
pub mod templates;
pub mod zone;
pub mod zone_store;

pub use clipboard::{
    ClipboardAccess, ClipboardEntry, ClipboardEnvelope, InMemoryClipboard, JSON_MIME,
    TEXT_MIME, ZONES_MIME,
};
pub use commands::{AppearanceChange, EditorCommand};
pub use controller::{EditorController, VisibilityList};
pub use history::UndoController;
pub use layout::{AppearanceData, Layout, LayoutFile, LayoutId, ZoneData};
pub use selection::SelectionModel;
pub use services::{
    LayoutRepository, MemoryLayoutRepository, ShaderCatalog, ShaderInfo, ShaderParameter,
    StaticShaderCatalog,
};
pub use snapping::{
    calculate_fill_region, collect_geometries_at_divider, find_adjacent_zones,
    shared_edge_length, snap_geometry, snap_geometry_selective, AdjacentZones, SnapEdges,
};
pub use templates::{builtin_templates, find_template, LayoutTemplate, TemplateKind};
pub use zone::{Zone, ZoneAppearance, ZoneId};
pub use zone_store::ZoneStore;

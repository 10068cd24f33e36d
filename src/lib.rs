//! # ZoneKit
//!
//! A zone-layout editing engine for window snapping and tiling shells:
//! - Visual zone editing over normalized [0, 1] coordinates
//! - Grid and edge snapping, adjacency and fill queries
//! - Transactional undo/redo with atomic macros and clean tracking
//! - Multi-selection batch editing and a clipboard protocol
//!
//! ## Architecture
//!
//! ZoneKit is organized as a workspace with multiple crates:
//!
//! 1. **zonekit-core** - Core types, errors, event bus, geometry
//! 2. **zonekit-settings** - Configuration and settings persistence
//! 3. **zonekit-editor** - Zone store, snapping, commands, controller
//! 4. **zonekit** - Integration crate wiring the pieces together
//!
//! The presentation layer (overlays, pickers, OSDs) and the
//! window-management daemon are external collaborators reached through
//! the service traits in `zonekit-editor`.

pub mod clipboard;

pub use zonekit_core::{
    EditorEvent, Error, EventBus, EventCategory, EventFilter, Rect, Result, ServiceError,
    StoreError, SubscriptionId, ValidationError,
};

pub use zonekit_settings::{Config, SettingsPersistence};

pub use zonekit_editor::{
    builtin_templates, AppearanceChange, ClipboardAccess, ClipboardEntry, EditorCommand,
    EditorController, InMemoryClipboard, Layout, LayoutFile, LayoutId, LayoutRepository,
    LayoutTemplate, MemoryLayoutRepository, SelectionModel, ShaderCatalog, ShaderInfo,
    SnapEdges, StaticShaderCatalog, TemplateKind, UndoController, VisibilityList, Zone,
    ZoneAppearance, ZoneId, ZoneStore, ZONES_MIME,
};

pub use clipboard::SystemClipboard;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

//! Event definitions for the editing core.

use uuid::Uuid;

/// Broad grouping of editor events, used for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Zone collection content or geometry changed.
    Zones,
    /// Selection membership changed.
    Selection,
    /// Layout-level lifecycle (load/save) and metadata.
    Layout,
    /// Clipboard content changed.
    Clipboard,
    /// An operation failed.
    Failure,
}

/// Events published by the editing core.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// The zone collection changed (content, geometry, or z-order).
    /// Suppressed and coalesced inside a store batch bracket.
    ZonesChanged,

    /// The selection changed.
    SelectionChanged {
        /// The new selection, in order; the first entry is primary.
        selected: Vec<Uuid>,
    },

    /// A layout was loaded into the editor.
    LayoutLoaded {
        /// Id of the loaded layout.
        layout_id: Uuid,
    },

    /// The current layout was saved successfully.
    LayoutSaved {
        /// Id of the saved layout.
        layout_id: Uuid,
    },

    /// A layout load round trip failed; editing state is untouched.
    LoadFailed {
        /// The service's error text.
        reason: String,
    },

    /// A layout save round trip failed; editing state is untouched.
    SaveFailed {
        /// The service's error text.
        reason: String,
    },

    /// A validation or lookup failure aborted an operation.
    OperationFailed {
        /// Human-readable reason.
        reason: String,
    },

    /// Zone data was placed on the clipboard.
    ClipboardChanged,

    /// The undo stack crossed the clean (saved) point.
    CleanStateChanged {
        /// Whether the document now matches its saved state.
        clean: bool,
    },
}

impl EditorEvent {
    /// The category this event belongs to.
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::ZonesChanged => EventCategory::Zones,
            EditorEvent::SelectionChanged { .. } => EventCategory::Selection,
            EditorEvent::LayoutLoaded { .. }
            | EditorEvent::LayoutSaved { .. }
            | EditorEvent::CleanStateChanged { .. } => EventCategory::Layout,
            EditorEvent::ClipboardChanged => EventCategory::Clipboard,
            EditorEvent::LoadFailed { .. }
            | EditorEvent::SaveFailed { .. }
            | EditorEvent::OperationFailed { .. } => EventCategory::Failure,
        }
    }
}

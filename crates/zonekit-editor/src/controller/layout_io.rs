//! Layout load/save round trips against the persistence service.
//!
//! Failures surface as distinct load-failed/save-failed events with
//! the service's error text; the in-memory editing state is never
//! touched on a failed round trip, so the user can retry or export
//! locally. The core never retries on its own.

use std::path::Path;

use chrono::Utc;
use zonekit_core::{EditorEvent, Result};

use crate::layout::{Layout, LayoutFile, LayoutId};

use super::EditorController;

impl EditorController {
    /// The current layout and zones in wire form.
    pub fn to_layout_file(&self) -> LayoutFile {
        LayoutFile::from_parts(&self.layout, self.store.zones())
    }

    /// Loads a layout wholesale, replacing the editing state.
    ///
    /// Undo history does not cross layout boundaries: the stack is
    /// cleared and the fresh document starts clean.
    pub fn load_layout(&mut self, id: &LayoutId) -> Result<()> {
        let file = self.repository.load_layout(id).map_err(|error| {
            self.events.publish(EditorEvent::LoadFailed {
                reason: error.to_string(),
            });
            error
        })?;
        // Validate every zone before any state is replaced.
        let (layout, zones) = file.into_parts().map_err(|error| {
            self.events.publish(EditorEvent::LoadFailed {
                reason: error.to_string(),
            });
            error
        })?;

        self.layout = layout;
        self.drag = None;
        self.selection.clear();
        self.store.restore_zones(zones);
        self.history.clear();
        self.history.set_clean();
        self.events.publish(EditorEvent::LayoutLoaded {
            layout_id: self.layout.id.as_uuid(),
        });
        self.publish_selection();
        Ok(())
    }

    /// Saves the current layout back through the persistence service.
    ///
    /// Success marks the undo stack clean; failure leaves everything
    /// untouched.
    pub fn save_layout(&mut self) -> Result<()> {
        let file = self.to_layout_file();
        self.repository.update_layout(&file).map_err(|error| {
            self.events.publish(EditorEvent::SaveFailed {
                reason: error.to_string(),
            });
            error
        })?;
        self.layout.modified = Utc::now();
        let was_clean = self.history.is_clean();
        self.history.set_clean();
        if !was_clean {
            self.events
                .publish(EditorEvent::CleanStateChanged { clean: true });
        }
        self.events.publish(EditorEvent::LayoutSaved {
            layout_id: self.layout.id.as_uuid(),
        });
        Ok(())
    }

    /// Persists the current zones as a brand-new layout and switches
    /// the session to it.
    pub fn save_layout_as(&mut self, name: impl Into<String>) -> Result<LayoutId> {
        let mut layout = self.layout.clone();
        layout.id = LayoutId::new();
        layout.name = name.into();
        layout.is_built_in = false;
        layout.created = Utc::now();
        layout.modified = layout.created;
        let file = LayoutFile::from_parts(&layout, self.store.zones());
        let id = self.repository.create_layout(&file).map_err(|error| {
            self.events.publish(EditorEvent::SaveFailed {
                reason: error.to_string(),
            });
            error
        })?;
        self.layout = layout;
        self.history.set_clean();
        self.events
            .publish(EditorEvent::LayoutSaved { layout_id: id.as_uuid() });
        Ok(id)
    }

    /// Starts a fresh unsaved layout, dropping the current editing
    /// state.
    pub fn new_layout(&mut self, name: impl Into<String>) {
        self.layout = Layout::new(name);
        self.drag = None;
        self.selection.clear();
        self.store.restore_zones(Vec::new());
        self.history.clear();
        self.publish_selection();
    }

    /// Imports a layout file into the persistence service, returning
    /// the new layout's id. Does not switch the editing session.
    pub fn import_layout(&mut self, path: &Path) -> Result<LayoutId> {
        self.repository.import_layout(path).map_err(|error| {
            self.events.publish(EditorEvent::LoadFailed {
                reason: error.to_string(),
            });
            error
        })
    }

    /// Exports a persisted layout to a file.
    pub fn export_layout(&self, id: &LayoutId, path: &Path) -> Result<()> {
        self.repository.export_layout(id, path).map_err(|error| {
            self.events.publish(EditorEvent::SaveFailed {
                reason: error.to_string(),
            });
            error
        })
    }
}

//! System clipboard transport for the zone clipboard protocol.
//!
//! `arboard` exposes a text clipboard, so the plain-text entry is what
//! actually crosses the process boundary; it carries the same JSON
//! envelope as the richer entries, and paste decodes it through the
//! usual fallback chain. The full entry list is kept in-process so
//! `can_paste` and same-session round trips see the custom MIME type.

use arboard::Clipboard;
use zonekit_core::{Error, Result};
use zonekit_editor::{ClipboardAccess, ClipboardEntry, TEXT_MIME};

/// Clipboard access backed by the system clipboard.
pub struct SystemClipboard {
    inner: Clipboard,
    /// Last payload written by this process, including non-text
    /// entries the system clipboard cannot carry.
    last_written: Vec<ClipboardEntry>,
    /// The text that accompanied `last_written`.
    last_text: Option<String>,
}

impl SystemClipboard {
    /// Connects to the system clipboard.
    pub fn new() -> Result<Self> {
        let inner = Clipboard::new().map_err(|err| Error::other(err.to_string()))?;
        Ok(Self {
            inner,
            last_written: Vec::new(),
            last_text: None,
        })
    }
}

impl ClipboardAccess for SystemClipboard {
    fn set_payload(&mut self, entries: Vec<ClipboardEntry>) -> Result<()> {
        let text = entries
            .iter()
            .find(|entry| entry.mime == TEXT_MIME)
            .or_else(|| entries.first())
            .map(|entry| entry.data.clone())
            .unwrap_or_default();
        self.inner
            .set_text(text.clone())
            .map_err(|err| Error::other(err.to_string()))?;
        self.last_text = Some(text);
        self.last_written = entries;
        Ok(())
    }

    fn payload(&self) -> Result<Vec<ClipboardEntry>> {
        // arboard needs &mut for reads; a short-lived handle avoids
        // locking the main one behind a RefCell.
        let mut reader = Clipboard::new().map_err(|err| Error::other(err.to_string()))?;
        let text = match reader.get_text() {
            Ok(text) => text,
            Err(arboard::Error::ContentNotAvailable) => return Ok(Vec::new()),
            Err(err) => return Err(Error::other(err.to_string())),
        };
        // While our own payload still owns the clipboard, expose the
        // full entry list with the custom MIME type intact.
        if self.last_text.as_deref() == Some(text.as_str()) {
            return Ok(self.last_written.clone());
        }
        Ok(vec![ClipboardEntry {
            mime: TEXT_MIME.to_string(),
            data: text,
        }])
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("entries", &self.last_written.len())
            .finish()
    }
}

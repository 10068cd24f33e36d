//! Clipboard protocol for zones.
//!
//! Copy places a versioned JSON envelope on the clipboard under the
//! custom zones MIME type, with a generic JSON entry and a plain-text
//! entry carrying the same document for interop. Paste decodes from
//! the richest entry available.

use serde::{Deserialize, Serialize};
use zonekit_core::Result;

use crate::layout::ZoneData;
use crate::zone::Zone;

/// Custom clipboard MIME type for zone data.
pub const ZONES_MIME: &str = "application/vnd.zonekit.zones+json";
/// Generic JSON fallback.
pub const JSON_MIME: &str = "application/json";
/// Plain-text fallback.
pub const TEXT_MIME: &str = "text/plain";

/// Version of the clipboard envelope schema.
pub const CLIPBOARD_VERSION: u32 = 1;

/// The JSON document carried on the clipboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardEnvelope {
    pub version: u32,
    pub zones: Vec<ZoneData>,
}

/// One clipboard representation: a MIME type and its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardEntry {
    pub mime: String,
    pub data: String,
}

/// Clipboard transport boundary.
///
/// Implementations decide which representations the underlying
/// clipboard can carry; at minimum the plain-text entry survives.
pub trait ClipboardAccess {
    /// Replaces the clipboard content with the given representations.
    fn set_payload(&mut self, entries: Vec<ClipboardEntry>) -> Result<()>;

    /// The current clipboard representations, possibly empty.
    fn payload(&self) -> Result<Vec<ClipboardEntry>>;
}

/// In-process clipboard, used in tests and headless sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClipboard {
    entries: Vec<ClipboardEntry>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardAccess for InMemoryClipboard {
    fn set_payload(&mut self, entries: Vec<ClipboardEntry>) -> Result<()> {
        self.entries = entries;
        Ok(())
    }

    fn payload(&self) -> Result<Vec<ClipboardEntry>> {
        Ok(self.entries.clone())
    }
}

/// Serializes zones into the full entry list: custom MIME first, then
/// the JSON and plain-text fallbacks, all carrying the same document.
pub fn encode_entries(zones: &[Zone]) -> Result<Vec<ClipboardEntry>> {
    let envelope = ClipboardEnvelope {
        version: CLIPBOARD_VERSION,
        zones: zones.iter().map(ZoneData::from_zone).collect(),
    };
    let json = serde_json::to_string(&envelope)?;
    Ok(vec![
        ClipboardEntry {
            mime: ZONES_MIME.to_string(),
            data: json.clone(),
        },
        ClipboardEntry {
            mime: JSON_MIME.to_string(),
            data: json.clone(),
        },
        ClipboardEntry {
            mime: TEXT_MIME.to_string(),
            data: json,
        },
    ])
}

/// Decodes an envelope from clipboard entries, trying the custom MIME
/// type first and falling back to JSON, then plain text.
///
/// Returns `None` when no entry parses as a supported envelope.
pub fn decode_entries(entries: &[ClipboardEntry]) -> Option<ClipboardEnvelope> {
    for mime in [ZONES_MIME, JSON_MIME, TEXT_MIME] {
        for entry in entries.iter().filter(|entry| entry.mime == mime) {
            if let Some(envelope) = parse_envelope(&entry.data) {
                return Some(envelope);
            }
        }
    }
    // Unknown MIME types still may carry the document.
    entries.iter().find_map(|entry| parse_envelope(&entry.data))
}

fn parse_envelope(data: &str) -> Option<ClipboardEnvelope> {
    let envelope: ClipboardEnvelope = serde_json::from_str(data).ok()?;
    if envelope.version == 0 || envelope.version > CLIPBOARD_VERSION {
        return None;
    }
    Some(envelope)
}

//! Copy/cut/paste over the clipboard protocol.

use crate::clipboard::{decode_entries, encode_entries};
use crate::commands::EditorCommand;
use crate::zone::{Zone, ZoneId};
use zonekit_core::constants::MAX_ZONE_NUMBER;
use zonekit_core::{EditorEvent, Result, ValidationError};

use super::EditorController;

impl EditorController {
    /// Serializes the selected zones onto the clipboard, in paint
    /// order. Returns the number of zones copied.
    pub fn copy_selection(&mut self) -> Result<usize> {
        if self.selection().is_empty() {
            return Err(self.fail(ValidationError::EmptySelection.into()));
        }
        let zones: Vec<Zone> = self
            .store()
            .zones()
            .iter()
            .filter(|zone| self.selection().contains(zone.id))
            .cloned()
            .collect();
        let count = zones.len();
        let entries = encode_entries(&zones)?;
        self.clipboard
            .set_payload(entries)
            .map_err(|e| self.fail(e))?;
        self.events().publish(EditorEvent::ClipboardChanged);
        Ok(count)
    }

    /// Copies the selected zones, then deletes them as one undo entry.
    pub fn cut_selection(&mut self) -> Result<usize> {
        let count = self.copy_selection()?;
        let ids = self.selection().to_vec();
        self.begin_macro("Cut Zones");
        self.push_command(EditorCommand::ChangeSelection {
            old: ids.clone(),
            new: Vec::new(),
        });
        for id in ids {
            if let (Some(zone), Some(index)) =
                (self.zone(id).cloned(), self.store().index_of(id))
            {
                self.push_command(EditorCommand::DeleteZone { zone, index });
            }
        }
        self.end_macro();
        self.publish_selection();
        Ok(count)
    }

    /// Whether the clipboard currently holds decodable zone data.
    ///
    /// Queried live so external clipboard changes are reflected.
    pub fn can_paste(&self) -> bool {
        self.clipboard
            .payload()
            .ok()
            .and_then(|entries| decode_entries(&entries))
            .map_or(false, |envelope| !envelope.zones.is_empty())
    }

    /// Pastes zones from the clipboard as one undo entry.
    ///
    /// Pasted zones get fresh ids, numbers continuing from the current
    /// maximum, and optionally an offset position to avoid exact
    /// overlap; geometry is clamped to bounds. The pasted zones become
    /// the new selection. Returns their ids.
    pub fn paste(&mut self, with_offset: bool) -> Result<Vec<ZoneId>> {
        let envelope = self
            .clipboard
            .payload()
            .ok()
            .and_then(|entries| decode_entries(&entries))
            .filter(|envelope| !envelope.zones.is_empty())
            .ok_or_else(|| self.fail(ValidationError::NothingToPaste.into()))?;

        let old: Vec<Zone> = self.store().zones().to_vec();
        let old_selection = self.selection().to_vec();
        let offset = if with_offset {
            self.config().editor.duplicate_offset
        } else {
            0.0
        };
        let min_size = self.config().editor.min_zone_size;

        let mut used_numbers: Vec<u8> = old.iter().map(|zone| zone.number).collect();
        let mut next_number = self.store().max_number();
        let mut used_names: Vec<String> = old
            .iter()
            .filter(|zone| !zone.name.is_empty())
            .map(|zone| zone.name.clone())
            .collect();

        let mut pasted = Vec::new();
        for data in &envelope.zones {
            let mut zone = data.to_zone().map_err(|e| self.fail(e))?;
            zone.id = ZoneId::new();
            zone.number = match allocate_sequential(&mut next_number, &used_numbers) {
                Some(number) => number,
                None => {
                    return Err(
                        self.fail(zonekit_core::StoreError::NumbersExhausted.into())
                    )
                }
            };
            used_numbers.push(zone.number);
            if !zone.name.is_empty() && used_names.contains(&zone.name) {
                zone.name = unique_name(&zone.name, &used_names);
            }
            if !zone.name.is_empty() {
                used_names.push(zone.name.clone());
            }
            zone.geometry = zone
                .geometry
                .translated(offset, offset)
                .clamp_to_unit(min_size);
            pasted.push(zone);
        }

        let pasted_ids: Vec<ZoneId> = pasted.iter().map(|zone| zone.id).collect();
        let mut new = old.clone();
        new.extend(pasted);

        self.begin_macro("Paste Zones");
        self.push_command(EditorCommand::PasteZones { old, new });
        self.push_command(EditorCommand::ChangeSelection {
            old: old_selection,
            new: pasted_ids.clone(),
        });
        self.end_macro();
        self.publish_selection();
        Ok(pasted_ids)
    }
}

/// Next number after `cursor` not present in `used`, wrapping into the
/// low range once 99 is exhausted.
fn allocate_sequential(cursor: &mut u8, used: &[u8]) -> Option<u8> {
    while *cursor < MAX_ZONE_NUMBER {
        *cursor += 1;
        if !used.contains(cursor) {
            return Some(*cursor);
        }
    }
    (1..=MAX_ZONE_NUMBER).find(|candidate| !used.contains(candidate))
}

fn unique_name(base: &str, used: &[String]) -> String {
    let candidate = format!("{base} copy");
    if !used.contains(&candidate) {
        return candidate;
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{base} copy {counter}");
        if !used.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

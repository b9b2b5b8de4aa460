//! Linear undo/redo history of raster edits.

use super::raster::{Raster, RasterPatch};
use super::stroke::Stroke;

/// What a history entry did to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// A stroke was committed
    Stroke(Stroke),
    /// The canvas was cleared to the background color
    Clear,
}

/// A reversible edit: the edited region before and after the change.
///
/// Patches are exact pixel copies, so undo and redo restore bit-identical rasters.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub edit: Edit,
    before: RasterPatch,
    after: RasterPatch,
}

impl HistoryEntry {
    pub fn new(edit: Edit, before: RasterPatch, after: RasterPatch) -> Self {
        Self {
            edit,
            before,
            after,
        }
    }

    fn byte_size(&self) -> usize {
        self.before.byte_size() + self.after.byte_size()
    }
}

/// Linear history with a single cursor.
///
/// Entries `[0, cursor)` are applied; entries `[cursor, len)` have been undone
/// and can be redone until a new edit is pushed.
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    /// Maximum retained entries (0 = unlimited)
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries,
        }
    }

    /// Records a new edit, discarding anything that was undone.
    pub fn push(&mut self, entry: HistoryEntry) {
        let discarded = self.entries.len() - self.cursor;
        if discarded > 0 {
            log::debug!("Discarding {} redoable history entries", discarded);
        }
        self.entries.truncate(self.cursor);
        self.entries.push(entry);

        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(..overflow);
        }
        self.cursor = self.entries.len();
    }

    /// Steps back one entry, restoring the raster it changed.
    ///
    /// Returns `None` at the start of history.
    pub fn undo(&mut self, raster: &mut Raster) -> Option<&Edit> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        let entry = &self.entries[self.cursor];
        raster.apply(&entry.before);
        Some(&entry.edit)
    }

    /// Re-applies the next undone entry.
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, raster: &mut Raster) -> Option<&Edit> {
        let entry = self.entries.get(self.cursor)?;
        raster.apply(&entry.after);
        self.cursor += 1;
        Some(&entry.edit)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that are currently applied, oldest first.
    pub fn applied(&self) -> impl DoubleEndedIterator<Item = &Edit> {
        self.entries[..self.cursor].iter().map(|e| &e.edit)
    }

    /// Approximate memory held by stored patches.
    pub fn byte_size(&self) -> usize {
        self.entries.iter().map(HistoryEntry::byte_size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};

    fn record_fill(history: &mut History, raster: &mut Raster, color: crate::draw::Rgb) {
        let rect = raster.bounds().unwrap();
        let before = raster.capture(rect).unwrap();
        raster.fill(color);
        let after = raster.capture(rect).unwrap();
        history.push(HistoryEntry::new(Edit::Clear, before, after));
    }

    #[test]
    fn undo_and_redo_walk_the_cursor() {
        let mut raster = Raster::new(4, 4, WHITE);
        let mut history = History::new(0);
        record_fill(&mut history, &mut raster, RED);
        record_fill(&mut history, &mut raster, BLACK);

        assert!(history.undo(&mut raster).is_some());
        assert_eq!(raster.get(0, 0), Some(RED));
        assert!(history.undo(&mut raster).is_some());
        assert_eq!(raster.get(0, 0), Some(WHITE));
        assert!(history.undo(&mut raster).is_none());

        assert!(history.redo(&mut raster).is_some());
        assert!(history.redo(&mut raster).is_some());
        assert_eq!(raster.get(0, 0), Some(BLACK));
        assert!(history.redo(&mut raster).is_none());
    }

    #[test]
    fn byte_size_counts_both_patches() {
        let mut raster = Raster::new(4, 4, WHITE);
        let mut history = History::new(0);
        assert_eq!(history.byte_size(), 0);

        record_fill(&mut history, &mut raster, RED);
        history.push(HistoryEntry::new(
            Edit::Clear,
            RasterPatch::empty(),
            RasterPatch::empty(),
        ));
        assert_eq!(history.byte_size(), 2 * 16 * std::mem::size_of::<crate::draw::Rgb>());
    }

    #[test]
    fn push_after_undo_truncates_redo() {
        let mut raster = Raster::new(4, 4, WHITE);
        let mut history = History::new(0);
        record_fill(&mut history, &mut raster, RED);
        record_fill(&mut history, &mut raster, BLACK);
        history.undo(&mut raster);

        record_fill(&mut history, &mut raster, WHITE);
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(history.redo(&mut raster).is_none());
    }

    #[test]
    fn max_entries_drops_oldest() {
        let mut raster = Raster::new(2, 2, WHITE);
        let mut history = History::new(2);
        record_fill(&mut history, &mut raster, RED);
        record_fill(&mut history, &mut raster, BLACK);
        record_fill(&mut history, &mut raster, WHITE);

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 2);
        history.undo(&mut raster);
        history.undo(&mut raster);
        // The oldest (WHITE -> RED) entry is gone, so undo stops at RED.
        assert_eq!(raster.get(0, 0), Some(RED));
        assert!(!history.can_undo());
    }
}

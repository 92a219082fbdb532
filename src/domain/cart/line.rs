//! Cart line and its immutable snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, Money};

/// Separator between accumulated notes.
pub const NOTE_SEPARATOR: &str = "; ";

/// One line of a cart.
///
/// Name and unit price are copied from the catalog when the line is first
/// created and never re-resolved, so later catalog changes cannot alter an
/// existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub notes: String,
}

impl CartLine {
    pub(crate) fn new(
        item_id: ItemId,
        name: String,
        unit_price: Money,
        quantity: u32,
        notes: &str,
    ) -> Self {
        let mut line = Self {
            item_id,
            name,
            unit_price,
            quantity,
            notes: String::new(),
        };
        line.append_note(notes);
        line
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    /// Appends a note unless it is blank or repeats the latest note.
    pub(crate) fn append_note(&mut self, note: &str) {
        let note = note.trim();
        if note.is_empty() || self.last_note() == Some(note) {
            return;
        }
        if !self.notes.is_empty() {
            self.notes.push_str(NOTE_SEPARATOR);
        }
        self.notes.push_str(note);
    }

    fn last_note(&self) -> Option<&str> {
        if self.notes.is_empty() {
            return None;
        }
        self.notes.rsplit(NOTE_SEPARATOR).next()
    }

    /// Copies the line, with its subtotal, for rendering or ordering.
    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            item_id: self.item_id.clone(),
            name: self.name.clone(),
            price: self.unit_price,
            quantity: self.quantity,
            notes: self.notes.clone(),
            subtotal: self.subtotal(),
        }
    }
}

/// Frozen copy of a line, including its subtotal at copy time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub item_id: ItemId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
    pub subtotal: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(notes: &str) -> CartLine {
        CartLine::new(
            ItemId::new("bread-1").unwrap(),
            "Bread".to_string(),
            Money::from_cents(200),
            2,
            notes,
        )
    }

    #[test]
    fn subtotal_is_price_times_quantity() {
        assert_eq!(line("").subtotal(), Money::from_cents(400));
    }

    #[test]
    fn notes_accumulate_with_separator() {
        let mut l = line("sliced");
        l.append_note("whole wheat");
        assert_eq!(l.notes, "sliced; whole wheat");
    }

    #[test]
    fn repeated_latest_note_is_not_appended() {
        let mut l = line("sliced");
        l.append_note(" sliced ");
        assert_eq!(l.notes, "sliced");
    }

    #[test]
    fn earlier_note_may_reappear_later() {
        let mut l = line("sliced");
        l.append_note("toasted");
        l.append_note("sliced");
        assert_eq!(l.notes, "sliced; toasted; sliced");
    }

    #[test]
    fn blank_notes_are_ignored() {
        let mut l = line("");
        l.append_note("   ");
        assert!(l.notes.is_empty());
    }

    #[test]
    fn snapshot_carries_subtotal() {
        let snap = line("").snapshot();
        assert_eq!(snap.subtotal, Money::from_cents(400));
        assert_eq!(snap.quantity, 2);
    }
}

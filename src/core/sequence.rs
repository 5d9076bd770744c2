//! The ordered record sequence maintained by the fragment backend.
//!
//! The sequence shadows the platform's actual history stack: one record per
//! position the application has navigated through, plus a cursor marking the
//! currently active position. The native backend never uses it - the platform
//! stores records for that backend.

use super::record::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// Ordered, randomly-indexable list of records with a position cursor.
///
/// `position` is `None` until the first record is written (the uninitialized
/// state). Advancing past a position discards everything at or after the new
/// index, so records abandoned by a back-then-push can never be resolved
/// again.
///
/// # Example
///
/// ```rust
/// use backstack::core::{Record, Sequence};
/// use serde_json::json;
///
/// let mut sequence = Sequence::new();
/// sequence.write_current(Record::new(json!({}), "Home", "/"));
/// sequence.advance(Record::new(json!({}), "Search", "/search"));
///
/// assert_eq!(sequence.len(), 2);
/// assert_eq!(sequence.position(), Some(1));
/// assert_eq!(sequence.current().unwrap().url, "/search");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Sequence {
    records: Vec<Record>,
    position: Option<usize>,
}

impl Sequence {
    /// Create an empty, uninitialized sequence.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            position: None,
        }
    }

    /// The record at the current position, if any.
    pub fn current(&self) -> Option<&Record> {
        self.position.and_then(|i| self.records.get(i))
    }

    /// The current cursor index, `None` before the first write.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record has been written yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Advance the cursor and write `record` at the new position, truncating
    /// any records previously at or after that index.
    pub fn advance(&mut self, record: Record) {
        let next = self.position.map_or(0, |p| p + 1);
        self.records.truncate(next);
        self.records.push(record);
        self.position = Some(next);
    }

    /// Write `record` at the current position without advancing.
    ///
    /// Initializes the cursor to 0 when the sequence is uninitialized. Records
    /// ahead of the cursor are left in place.
    pub fn write_current(&mut self, record: Record) {
        let index = self.position.unwrap_or(0);
        if index < self.records.len() {
            self.records[index] = record;
        } else {
            self.records.push(record);
        }
        self.position = Some(index);
    }

    /// Linear scan from index 0 for the first record with the given id.
    ///
    /// The sequence is bounded by in-session navigation depth, so a scan is
    /// preferred over an auxiliary id-to-index map.
    pub fn find_by_id(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Move the cursor to `index`. Returns false if out of bounds.
    pub fn set_position(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.position = Some(index);
            true
        } else {
            false
        }
    }

    /// The record at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(title: &str, url: &str) -> Record {
        Record::new(json!({}), title, url)
    }

    #[test]
    fn new_sequence_is_uninitialized() {
        let sequence = Sequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.position(), None);
        assert!(sequence.current().is_none());
    }

    #[test]
    fn advance_from_uninitialized_starts_at_zero() {
        let mut sequence = Sequence::new();
        sequence.advance(record("A", "/a"));

        assert_eq!(sequence.position(), Some(0));
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn advance_appends_and_moves_cursor() {
        let mut sequence = Sequence::new();
        sequence.advance(record("A", "/a"));
        sequence.advance(record("B", "/b"));

        assert_eq!(sequence.position(), Some(1));
        assert_eq!(sequence.current().unwrap().url, "/b");
    }

    #[test]
    fn advance_after_set_position_truncates_forward_records() {
        let mut sequence = Sequence::new();
        sequence.advance(record("A", "/a"));
        sequence.advance(record("B", "/b"));
        sequence.advance(record("C", "/c"));
        let discarded_b = sequence.get(1).unwrap().id;
        let discarded_c = sequence.get(2).unwrap().id;

        assert!(sequence.set_position(0));
        sequence.advance(record("D", "/d"));

        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.current().unwrap().url, "/d");
        assert_eq!(sequence.find_by_id(discarded_b), None);
        assert_eq!(sequence.find_by_id(discarded_c), None);
    }

    #[test]
    fn write_current_does_not_grow_the_sequence() {
        let mut sequence = Sequence::new();
        sequence.advance(record("A", "/a"));
        sequence.advance(record("B", "/b"));

        let before_len = sequence.len();
        let before_pos = sequence.position();
        for i in 0..3 {
            sequence.write_current(record("B'", &format!("/b{i}")));
        }

        assert_eq!(sequence.len(), before_len);
        assert_eq!(sequence.position(), before_pos);
        assert_eq!(sequence.current().unwrap().url, "/b2");
    }

    #[test]
    fn write_current_initializes_empty_sequence() {
        let mut sequence = Sequence::new();
        sequence.write_current(record("Seed", "/"));

        assert_eq!(sequence.position(), Some(0));
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn find_by_id_scans_from_the_front() {
        let mut sequence = Sequence::new();
        sequence.advance(record("A", "/a"));
        sequence.advance(record("B", "/b"));
        let first = sequence.get(0).unwrap().id;
        let second = sequence.get(1).unwrap().id;

        assert_eq!(sequence.find_by_id(first), Some(0));
        assert_eq!(sequence.find_by_id(second), Some(1));
        assert_eq!(sequence.find_by_id(RecordId::new()), None);
    }

    #[test]
    fn set_position_rejects_out_of_bounds() {
        let mut sequence = Sequence::new();
        sequence.advance(record("A", "/a"));

        assert!(!sequence.set_position(5));
        assert_eq!(sequence.position(), Some(0));
    }
}

use std::collections::BTreeMap;

use paper_trails_protocol::{ItemKey, Point};

/// Resolved canvas coordinates of every placed item, keyed by [`ItemKey`].
///
/// A table is produced by one full layout pass and is never patched
/// afterwards; a re-layout builds a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTable {
    entries: BTreeMap<ItemKey, Point>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `point` for `key` unless the key is already present. Returns
    /// whether the point was recorded.
    pub(crate) fn insert_first(&mut self, key: ItemKey, point: Point) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, point);
        true
    }

    pub fn get(&self, key: &ItemKey) -> Option<Point> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemKey, Point)> {
        self.entries.iter().map(|(k, p)| (k, *p))
    }

    /// Number of person portraits in the table.
    pub fn person_count(&self) -> usize {
        self.entries
            .keys()
            .filter(|k| matches!(k, ItemKey::Person(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let mut table = PositionTable::new();
        let key = ItemKey::publication("curie", 1898, 0);
        assert!(table.insert_first(key.clone(), Point::new(1.0, 2.0)));
        assert!(!table.insert_first(key.clone(), Point::new(9.0, 9.0)));
        assert_eq!(table.get(&key), Some(Point::new(1.0, 2.0)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.person_count(), 0);
    }
}

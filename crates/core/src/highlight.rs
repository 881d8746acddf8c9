//! Hover highlighting of a person's group.
//!
//! The surface reports which [`ItemKey`] the pointer is over; hovering any
//! part of a person (portrait, connecting line, publication marker) lights
//! up the whole group. [`HoverTracker`] turns successive hover reports into
//! the keys to switch off and on.

use std::collections::BTreeMap;

use paper_trails_protocol::{ItemKey, SharedStr};
use serde::Serialize;

/// Person id → every key drawn for that person.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightIndex {
    groups: BTreeMap<SharedStr, Vec<ItemKey>>,
}

impl HighlightIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` to its person's group. Keys that don't belong to a person
    /// are ignored, as are repeats.
    pub fn insert(&mut self, key: &ItemKey) {
        let Some(person) = key.person_id() else {
            return;
        };
        let group = self.groups.entry(person.clone()).or_default();
        if !group.contains(key) {
            group.push(key.clone());
        }
    }

    /// Keys of the group `key` belongs to; empty for unrelated keys.
    pub fn group_of(&self, key: &ItemKey) -> &[ItemKey] {
        key.person_id()
            .and_then(|id| self.groups.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Keys whose highlight must be removed and added, in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightChange {
    pub leave: Vec<ItemKey>,
    pub enter: Vec<ItemKey>,
}

impl HighlightChange {
    pub fn is_empty(&self) -> bool {
        self.leave.is_empty() && self.enter.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverTracker {
    current: Option<SharedStr>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SharedStr> {
        self.current.as_ref()
    }

    /// Move the hover to `key` (or to nothing). Moving within the same
    /// person's group produces no change.
    pub fn update(&mut self, key: Option<&ItemKey>, index: &HighlightIndex) -> HighlightChange {
        let next = key
            .filter(|k| !index.group_of(k).is_empty())
            .and_then(ItemKey::person_id)
            .cloned();
        if next == self.current {
            return HighlightChange::default();
        }
        let leave = self
            .current
            .take()
            .map(|id| index.group_of(&ItemKey::Person(id)).to_vec())
            .unwrap_or_default();
        let enter = key
            .filter(|_| next.is_some())
            .map(|k| index.group_of(k).to_vec())
            .unwrap_or_default();
        self.current = next;
        HighlightChange { leave, enter }
    }
}

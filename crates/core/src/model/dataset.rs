use serde::{Deserialize, Serialize};

use super::{Discovery, Person, SignificantEvent};

/// The three collections delivered by the data provider. Any of them may be
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// People in a stable order (by id when loaded from a keyed mapping).
    pub people: Vec<Person>,
    pub discoveries: Vec<Discovery>,
    pub events: Vec<SignificantEvent>,
}

impl Dataset {
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.discoveries.is_empty() && self.events.is_empty()
    }
}

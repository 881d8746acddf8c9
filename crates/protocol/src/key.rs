//! Stable identifiers for laid-out timeline items.
//!
//! Keys render as `person:<id>`, `pub:<id>:<year>:<n>`, `discovery:<index>`
//! and `event:<index>`; this string form is what crosses the wire to the
//! presentation surface and comes back with hover/activation signals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::shared_str::SharedStr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKey {
    /// A person's portrait (and the line connecting it to the axis).
    Person(SharedStr),
    /// The `ordinal`-th publication marker of a person in a given year,
    /// counted in source order.
    Publication {
        person: SharedStr,
        year: i32,
        ordinal: usize,
    },
    /// Index into the discovery collection as loaded.
    Discovery(usize),
    /// Index into the significant event collection as loaded.
    Event(usize),
}

impl ItemKey {
    pub fn person(id: impl Into<SharedStr>) -> Self {
        ItemKey::Person(id.into())
    }

    pub fn publication(person: impl Into<SharedStr>, year: i32, ordinal: usize) -> Self {
        ItemKey::Publication {
            person: person.into(),
            year,
            ordinal,
        }
    }

    /// Id of the person this key belongs to, for person-related keys.
    pub fn person_id(&self) -> Option<&SharedStr> {
        match self {
            ItemKey::Person(id) | ItemKey::Publication { person: id, .. } => Some(id),
            ItemKey::Discovery(_) | ItemKey::Event(_) => None,
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Person(id) => write!(f, "person:{id}"),
            ItemKey::Publication {
                person,
                year,
                ordinal,
            } => write!(f, "pub:{person}:{year}:{ordinal}"),
            ItemKey::Discovery(index) => write!(f, "discovery:{index}"),
            ItemKey::Event(index) => write!(f, "event:{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("unknown item kind in key `{0}`")]
    UnknownKind(String),
    #[error("malformed item key `{0}`")]
    Malformed(String),
}

impl FromStr for ItemKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || KeyParseError::Malformed(s.to_owned());
        let (kind, rest) = s.split_once(':').ok_or_else(malformed)?;
        match kind {
            "person" if !rest.is_empty() => Ok(ItemKey::person(rest)),
            "pub" => {
                // Ids may themselves contain ':'; year and ordinal are always last.
                let (rest, ordinal) = rest.rsplit_once(':').ok_or_else(malformed)?;
                let (person, year) = rest.rsplit_once(':').ok_or_else(malformed)?;
                let year = year.parse().map_err(|_| malformed())?;
                let ordinal = ordinal.parse().map_err(|_| malformed())?;
                if person.is_empty() {
                    return Err(malformed());
                }
                Ok(ItemKey::publication(person, year, ordinal))
            }
            "discovery" => rest.parse().map(ItemKey::Discovery).map_err(|_| malformed()),
            "event" => rest.parse().map(ItemKey::Event).map_err(|_| malformed()),
            "person" => Err(malformed()),
            other => Err(KeyParseError::UnknownKind(other.to_owned())),
        }
    }
}

impl Serialize for ItemKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let keys = [
            ItemKey::person("curie"),
            ItemKey::publication("curie", 1898, 0),
            ItemKey::publication("curie", 1898, 1),
            ItemKey::publication("ns:weird", -50, 2),
            ItemKey::Discovery(3),
            ItemKey::Event(0),
        ];
        for key in keys {
            let text = key.to_string();
            assert_eq!(text.parse::<ItemKey>(), Ok(key), "{text}");
        }
    }

    #[test]
    fn rejects_bad_keys() {
        assert_eq!(
            "photo:curie".parse::<ItemKey>(),
            Err(KeyParseError::UnknownKind("photo".into()))
        );
        assert!("pub:curie".parse::<ItemKey>().is_err());
        assert!("pub:curie:1898".parse::<ItemKey>().is_err());
        assert!("pub::1900:0".parse::<ItemKey>().is_err());
        assert!("pub:curie:1898:-1".parse::<ItemKey>().is_err());
        assert!("event:x".parse::<ItemKey>().is_err());
        assert!("person:".parse::<ItemKey>().is_err());
        assert!("curie".parse::<ItemKey>().is_err());
    }

    #[test]
    fn person_id_of_related_keys() {
        assert_eq!(
            ItemKey::publication("bohr", 1913, 0).person_id(),
            Some(&SharedStr::from("bohr"))
        );
        assert_eq!(ItemKey::Event(1).person_id(), None);
    }
}

//! Parsing of the three data resources.
//!
//! - people: a JSON object keyed by person id
//!   (`{"curie": {"name": "Marie Curie", "publications": [...]}}`), kept in
//!   file order
//! - discoveries: a JSON array of discovery records
//! - significant events: a JSON array of `{startYear, endYear, ...}` records
//!
//! The resources are JSON renditions of the hand-edited YAML files under
//! `data/`, same keys and shapes. Convert after editing, e.g.
//! `yq -o=json data/scientists.yaml > data/scientists.json`.
//!
//! [`load_all`] is the provider-side error boundary: a failed resource is
//! logged and replaced by an empty collection.

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::{Dataset, Discovery, Person, SignificantEvent};

/// Which of the three resources a load concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    People,
    Discoveries,
    Events,
}

impl Resource {
    /// Path of the resource relative to the site root.
    pub fn path(self) -> &'static str {
        match self {
            Resource::People => "data/scientists.json",
            Resource::Discoveries => "data/discoveries.json",
            Resource::Events => "data/significantevents.json",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::People => write!(f, "scientists"),
            Resource::Discoveries => write!(f, "discoveries"),
            Resource::Events => write!(f, "significant events"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// Parse the people resource in file order. An empty document or `null`
/// yields no people.
pub fn parse_people(data: &[u8]) -> Result<Vec<Person>, LoadError> {
    if is_blank(data) {
        return Ok(Vec::new());
    }
    let map: Option<IndexMap<String, Person>> = serde_json::from_slice(data)?;
    Ok(map
        .unwrap_or_default()
        .into_iter()
        .map(|(id, mut person)| {
            person.id = id;
            person
        })
        .collect())
}

pub fn parse_discoveries(data: &[u8]) -> Result<Vec<Discovery>, LoadError> {
    if is_blank(data) {
        return Ok(Vec::new());
    }
    let list: Option<Vec<Discovery>> = serde_json::from_slice(data)?;
    Ok(list.unwrap_or_default())
}

pub fn parse_events(data: &[u8]) -> Result<Vec<SignificantEvent>, LoadError> {
    if is_blank(data) {
        return Ok(Vec::new());
    }
    let list: Option<Vec<SignificantEvent>> = serde_json::from_slice(data)?;
    Ok(list.unwrap_or_default())
}

/// Raw outcome of fetching each resource.
#[derive(Debug)]
pub struct RawResources {
    pub people: Result<Vec<u8>, LoadError>,
    pub discoveries: Result<Vec<u8>, LoadError>,
    pub events: Result<Vec<u8>, LoadError>,
}

/// Parse whatever was fetched into a [`Dataset`], logging and skipping any
/// resource that failed to fetch or parse.
pub fn load_all(raw: RawResources) -> Dataset {
    let people = settle(Resource::People, raw.people.and_then(|d| parse_people(&d)));
    let discoveries = settle(
        Resource::Discoveries,
        raw.discoveries.and_then(|d| parse_discoveries(&d)),
    );
    let events = settle(Resource::Events, raw.events.and_then(|d| parse_events(&d)));
    Dataset {
        people,
        discoveries,
        events,
    }
}

fn settle<T>(resource: Resource, result: Result<Vec<T>, LoadError>) -> Vec<T> {
    match result {
        Ok(items) => {
            log::info!("{resource} data loaded: {} records", items.len());
            items
        }
        Err(err) => {
            log::error!("failed to load {resource} data: {err}");
            Vec::new()
        }
    }
}

fn is_blank(data: &[u8]) -> bool {
    data.iter().all(u8::is_ascii_whitespace)
}

//! Detail dialog contents for activated items.

use paper_trails_protocol::ItemKey;
use serde::Serialize;

use crate::model::Dataset;

const MISSING: &str = "N/A";
const NO_DETAILS: &str = "No details available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    Publication,
    Discovery,
    Event,
}

impl DetailKind {
    /// Caption shown before the actor label.
    pub fn caption(self) -> &'static str {
        match self {
            DetailKind::Publication => "Author:",
            DetailKind::Discovery => "Discoverer:",
            DetailKind::Event => "Period:",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRequest {
    pub actor_caption: &'static str,
    pub actor_label: String,
    pub year_label: String,
    pub title: String,
    pub body: String,
    pub kind: DetailKind,
}

impl DetailRequest {
    /// Blank fields become `N/A`; a blank body becomes a placeholder.
    pub fn new(
        kind: DetailKind,
        actor: Option<&str>,
        year: Option<String>,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Self {
        Self {
            actor_caption: kind.caption(),
            actor_label: or_missing(actor, MISSING),
            year_label: year.filter(|y| !y.is_empty()).unwrap_or_else(|| MISSING.to_owned()),
            title: or_missing(title, MISSING),
            body: or_missing(body, NO_DETAILS),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonDetail {
    pub name: String,
    pub nationality: String,
    pub birth: String,
    pub death: String,
    pub image: String,
    pub image_alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Detail {
    Item(DetailRequest),
    Person(PersonDetail),
}

fn or_missing(value: Option<&str>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(placeholder)
        .to_owned()
}

/// Resolve what to show for an activated key. Unknown keys are logged and
/// yield nothing.
pub fn detail_for(key: &ItemKey, dataset: &Dataset, default_portrait: &str) -> Option<Detail> {
    let detail = match key {
        ItemKey::Person(id) => dataset.person(id).map(|person| {
            Detail::Person(PersonDetail {
                name: or_missing(person.name.as_deref(), MISSING),
                nationality: or_missing(person.nationality.as_deref(), MISSING),
                birth: or_missing(person.birth.as_deref(), MISSING),
                death: or_missing(person.death.as_deref(), MISSING),
                image: person
                    .cartoon
                    .clone()
                    .unwrap_or_else(|| default_portrait.to_owned()),
                image_alt: match person.name.as_deref() {
                    Some(name) => format!("{name} cartoon"),
                    None => "Scientist cartoon".to_owned(),
                },
            })
        }),
        ItemKey::Publication {
            person,
            year,
            ordinal,
        } => dataset.person(person).and_then(|p| {
            let publication = p.publication_in(*year, *ordinal)?;
            Some(Detail::Item(DetailRequest::new(
                DetailKind::Publication,
                p.name.as_deref(),
                Some(year.to_string()),
                publication.title.as_deref(),
                publication.abstract_text.as_deref(),
            )))
        }),
        ItemKey::Discovery(index) => dataset.discoveries.get(*index).map(|d| {
            Detail::Item(DetailRequest::new(
                DetailKind::Discovery,
                d.discoverer.as_deref(),
                d.year.map(|y| y.to_string()),
                d.title.as_deref(),
                d.details.as_deref(),
            ))
        }),
        ItemKey::Event(index) => dataset.events.get(*index).map(|e| {
            let period = match (e.start_year, e.end_year) {
                (Some(start), Some(end)) => Some(format!("{start} - {end}")),
                _ => None,
            };
            Detail::Item(DetailRequest::new(
                DetailKind::Event,
                Some("Significant Event"),
                period,
                e.title.as_deref(),
                e.details.as_deref(),
            ))
        }),
    };
    if detail.is_none() {
        log::warn!("no data for activated item {key}");
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Discovery, Person, Publication, SignificantEvent};

    fn dataset() -> Dataset {
        let mut curie = Person::new("curie", "Marie Curie");
        curie.nationality = Some("Polish-French".into());
        curie.publications.push(Publication {
            year: Some(1898),
            title: Some("On a New Radioactive Substance".into()),
            abstract_text: None,
        });
        let mut electron = Discovery::new(1897, "Electron");
        electron.discoverer = Some("J. J. Thomson".into());
        electron.details = Some("Cathode rays are particles.".into());
        Dataset {
            people: vec![curie],
            discoveries: vec![electron],
            events: vec![SignificantEvent::new(1914, 1918, "World War I")],
        }
    }

    #[test]
    fn publication_detail_uses_author_and_placeholder_body() {
        let detail = detail_for(&ItemKey::publication("curie", 1898, 0), &dataset(), "d.png");
        let Some(Detail::Item(request)) = detail else {
            panic!("expected an item detail, got {detail:?}");
        };
        assert_eq!(request.actor_caption, "Author:");
        assert_eq!(request.actor_label, "Marie Curie");
        assert_eq!(request.year_label, "1898");
        assert_eq!(request.body, "No details available.");
    }

    #[test]
    fn discovery_and_event_captions() {
        let data = dataset();
        let Some(Detail::Item(discovery)) = detail_for(&ItemKey::Discovery(0), &data, "d.png")
        else {
            panic!("missing discovery detail");
        };
        assert_eq!(discovery.actor_caption, "Discoverer:");
        assert_eq!(discovery.actor_label, "J. J. Thomson");

        let Some(Detail::Item(event)) = detail_for(&ItemKey::Event(0), &data, "d.png") else {
            panic!("missing event detail");
        };
        assert_eq!(event.actor_caption, "Period:");
        assert_eq!(event.actor_label, "Significant Event");
        assert_eq!(event.year_label, "1914 - 1918");
        assert_eq!(event.kind, DetailKind::Event);
    }

    #[test]
    fn person_detail_fills_gaps() {
        let detail = detail_for(&ItemKey::person("curie"), &dataset(), "images/default.png");
        let Some(Detail::Person(person)) = detail else {
            panic!("missing person detail");
        };
        assert_eq!(person.nationality, "Polish-French");
        assert_eq!(person.birth, "N/A");
        assert_eq!(person.image, "images/default.png");
        assert_eq!(person.image_alt, "Marie Curie cartoon");
    }

    #[test]
    fn unknown_keys_give_nothing() {
        let data = dataset();
        assert_eq!(detail_for(&ItemKey::person("bohr"), &data, "d.png"), None);
        assert_eq!(detail_for(&ItemKey::publication("curie", 1900, 0), &data, "d.png"), None);
        assert_eq!(detail_for(&ItemKey::Event(7), &data, "d.png"), None);
        assert_eq!(detail_for(&ItemKey::publication("curie", 1898, 1), &data, "d.png"), None);
    }

    #[test]
    fn serializes_with_a_type_tag() {
        let detail = detail_for(&ItemKey::Event(0), &dataset(), "d.png");
        let json = serde_json::to_value(&detail).unwrap_or_default();
        assert_eq!(json["type"], "item");
        assert_eq!(json["kind"], "event");
    }
}

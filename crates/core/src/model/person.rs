use paper_trails_protocol::Color;
use serde::{Deserialize, Serialize};

use super::{lenient_text, lenient_year, parse_color};

/// Border/line colour for people without one.
pub const DEFAULT_PERSON_COLOR: Color = Color::rgb8(0xcc, 0xcc, 0xcc);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique key; filled in from the map key when loading.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nationality: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub birth: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub death: Option<String>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub cartoon: Option<String>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            nationality: None,
            birth: None,
            death: None,
            publications: Vec::new(),
            color: None,
            photo: None,
            cartoon: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown Scientist")
    }

    pub fn color(&self) -> Color {
        parse_color(self.color.as_deref(), DEFAULT_PERSON_COLOR, &self.id)
    }

    /// Publications with a year, ordered by year (stable for equal years).
    pub fn dated_publications(&self) -> Vec<(i32, &Publication)> {
        let mut dated: Vec<(i32, &Publication)> = self
            .publications
            .iter()
            .filter_map(|p| p.year.map(|y| (y, p)))
            .collect();
        dated.sort_by_key(|(year, _)| *year);
        dated
    }

    /// Year of the earliest dated publication; `None` excludes the person
    /// from layout.
    pub fn first_publication_year(&self) -> Option<i32> {
        self.publications.iter().filter_map(|p| p.year).min()
    }

    /// The `ordinal`-th publication in `year`, counted in source order.
    pub fn publication_in(&self, year: i32, ordinal: usize) -> Option<&Publication> {
        self.publications
            .iter()
            .filter(|p| p.year == Some(year))
            .nth(ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(year: Option<i32>, title: &str) -> Publication {
        Publication {
            year,
            title: Some(title.into()),
            abstract_text: None,
        }
    }

    #[test]
    fn first_year_ignores_undated() {
        let mut p = Person::new("bohr", "Niels Bohr");
        p.publications = vec![
            publication(None, "draft"),
            publication(Some(1920), "b"),
            publication(Some(1913), "a"),
        ];
        assert_eq!(p.first_publication_year(), Some(1913));
        let years: Vec<i32> = p.dated_publications().iter().map(|(y, _)| *y).collect();
        assert_eq!(years, vec![1913, 1920]);
    }

    #[test]
    fn same_year_publications_by_ordinal() {
        let mut p = Person::new("curie", "Marie Curie");
        p.publications = vec![
            publication(Some(1898), "Polonium"),
            publication(Some(1903), "Thesis"),
            publication(Some(1898), "Radium"),
        ];
        let title = |ordinal| {
            p.publication_in(1898, ordinal)
                .and_then(|p| p.title.as_deref())
        };
        assert_eq!(title(0), Some("Polonium"));
        assert_eq!(title(1), Some("Radium"));
        assert_eq!(title(2), None);
    }

    #[test]
    fn undated_person_has_no_first_year() {
        let mut p = Person::new("x", "X");
        p.publications = vec![publication(None, "lost")];
        assert_eq!(p.first_publication_year(), None);
    }

    #[test]
    fn display_name_falls_back() {
        let mut p = Person::new("x", "  ");
        assert_eq!(p.display_name(), "Unknown Scientist");
        p.name = None;
        assert_eq!(p.display_name(), "Unknown Scientist");
    }

    #[test]
    fn deserializes_abstract_field() {
        let p: Publication =
            serde_json::from_str(r#"{"year": 1905, "title": "SR", "abstract": "moving bodies"}"#)
                .unwrap_or_else(|_| publication(None, ""));
        assert_eq!(p.abstract_text.as_deref(), Some("moving bodies"));
    }
}

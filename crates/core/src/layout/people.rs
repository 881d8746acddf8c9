use paper_trails_protocol::{Color, ItemKey, Point, Rect, RenderCommand, SharedStr};

use super::axis::YearAxis;
use super::positions::PositionTable;
use crate::model::Person;
use crate::preferences::PortraitStyle;

/// Which side of the axis a portrait row sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortraitPlacement {
    pub key: ItemKey,
    pub rect: Rect,
    pub row: Row,
    pub first_year: i32,
    pub color: Color,
    pub name: SharedStr,
    pub source: SharedStr,
    pub alternate: Option<SharedStr>,
}

impl PortraitPlacement {
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Vertical distances from the axis for portraits, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortraitOffsets {
    pub base: f64,
    pub stagger: f64,
}

/// Place one portrait per person that has a dated publication.
///
/// People are ordered by first publication year (ties keep dataset order)
/// and alternate above/below the axis; every second portrait on a row is
/// pushed further out. Within a row a portrait may overlap its left
/// neighbour by at most half its width.
pub fn place_portraits(
    people: &[Person],
    axis: &YearAxis,
    size: f64,
    offsets: PortraitOffsets,
    style: PortraitStyle,
    default_portrait: &SharedStr,
    positions: &mut PositionTable,
) -> Vec<PortraitPlacement> {
    let mut ordered: Vec<(i32, &Person)> = people
        .iter()
        .filter_map(|p| match p.first_publication_year() {
            Some(year) => Some((year, p)),
            None => {
                log::debug!("{}: no dated publication, not placed", p.id);
                None
            }
        })
        .collect();
    ordered.sort_by_key(|(year, _)| *year);

    let mut last_end = [f64::NEG_INFINITY; 2];
    let mut placements = Vec::with_capacity(ordered.len());

    for (index, (first_year, person)) in ordered.into_iter().enumerate() {
        let row = if index % 2 == 0 { Row::Above } else { Row::Below };
        let stagger = if (index / 2) % 2 == 1 { offsets.stagger } else { 0.0 };
        let distance = offsets.base + stagger;
        let center_y = match row {
            Row::Above => axis.axis_y() - distance,
            Row::Below => axis.axis_y() + distance,
        };

        let edge = &mut last_end[row as usize];
        let mut left = axis.x(first_year) - size / 2.0;
        if left < *edge - size / 2.0 {
            left = *edge - size / 2.0;
        }
        *edge = left + size;
        let left = axis.clamp_left(left, size);

        let rect = Rect::new(left, center_y - size / 2.0, size, size);
        let key = ItemKey::person(person.id.as_str());
        positions.insert_first(key.clone(), rect.center());

        let (source, alternate) = portrait_sources(person, style, default_portrait);
        placements.push(PortraitPlacement {
            key,
            rect,
            row,
            first_year,
            color: person.color(),
            name: person.display_name().into(),
            source,
            alternate,
        });
    }
    placements
}

/// Image for the requested style plus the other variant, if any. A missing
/// cartoon falls back to the photo; a missing photo to the default image.
fn portrait_sources(
    person: &Person,
    style: PortraitStyle,
    default_portrait: &SharedStr,
) -> (SharedStr, Option<SharedStr>) {
    let photo = person
        .photo
        .as_deref()
        .map(SharedStr::from)
        .unwrap_or_else(|| default_portrait.clone());
    let cartoon = person.cartoon.as_deref().map(SharedStr::from);
    match (style, cartoon) {
        (PortraitStyle::Cartoon, Some(cartoon)) => (cartoon, Some(photo)),
        (_, cartoon) => (photo, cartoon),
    }
}

pub fn portrait_commands(
    placements: &[PortraitPlacement],
    fallback: &SharedStr,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(placements.len() + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "people".into(),
        label: Some("Scientists".into()),
    });
    commands.extend(placements.iter().map(|p| RenderCommand::DrawImage {
        rect: p.rect,
        source: p.source.clone(),
        alternate: p.alternate.clone(),
        fallback: fallback.clone(),
        border: p.color.into(),
        alt: p.name.clone(),
        key: Some(p.key.clone()),
    }));
    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Publication;

    fn person(id: &str, years: &[i32]) -> Person {
        let mut p = Person::new(id, id);
        p.publications = years
            .iter()
            .map(|&y| Publication {
                year: Some(y),
                title: None,
                abstract_text: None,
            })
            .collect();
        p
    }

    fn axis() -> YearAxis {
        YearAxis::new(1600, 2024, 2120.0, 200.0).unwrap_or_else(|| unreachable!())
    }

    const OFFSETS: PortraitOffsets = PortraitOffsets {
        base: 80.0,
        stagger: 40.0,
    };

    fn place(people: &[Person]) -> (Vec<PortraitPlacement>, PositionTable) {
        let mut table = PositionTable::new();
        let placed = place_portraits(
            people,
            &axis(),
            50.0,
            OFFSETS,
            PortraitStyle::Photo,
            &SharedStr::from("images/default.png"),
            &mut table,
        );
        (placed, table)
    }

    #[test]
    fn every_dated_person_appears_once() {
        let mut undated = Person::new("ghost", "Ghost");
        undated.publications.push(Publication {
            year: None,
            title: None,
            abstract_text: None,
        });
        let people = vec![
            person("a", &[1900, 1890]),
            undated,
            person("b", &[1950]),
            Person::new("empty", "Empty"),
        ];
        let (placed, table) = place(&people);
        assert_eq!(placed.len(), 2);
        assert_eq!(table.person_count(), 2);
        assert!(table.contains(&ItemKey::person("a")));
        assert!(!table.contains(&ItemKey::person("ghost")));
        assert!(!table.contains(&ItemKey::person("empty")));
    }

    #[test]
    fn rows_alternate_and_stagger() {
        let people: Vec<Person> = (0..4)
            .map(|i| person(&format!("p{i}"), &[1700 + i * 50]))
            .collect();
        let (placed, _) = place(&people);
        let rows: Vec<Row> = placed.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![Row::Above, Row::Below, Row::Above, Row::Below]);
        let ys: Vec<f64> = placed.iter().map(|p| p.center().y).collect();
        assert_eq!(ys, vec![120.0, 280.0, 80.0, 320.0]);
    }

    #[test]
    fn same_row_overlap_is_at_most_half() {
        // p0, p2, p4 share the top row and the same year.
        let people: Vec<Person> = (0..5).map(|i| person(&format!("p{i}"), &[1800])).collect();
        let (placed, _) = place(&people);
        let top: Vec<&PortraitPlacement> =
            placed.iter().filter(|p| p.row == Row::Above).collect();
        assert_eq!(top.len(), 3);
        for pair in top.windows(2) {
            let overlap = pair[0].rect.right() - pair[1].rect.x;
            assert!(overlap <= 25.0 + 1e-9, "overlap {overlap}");
        }
    }

    #[test]
    fn ties_keep_dataset_order() {
        let people = vec![person("z", &[1900]), person("a", &[1900])];
        let (placed, _) = place(&people);
        assert_eq!(placed[0].key, ItemKey::person("z"));
        assert_eq!(placed[1].key, ItemKey::person("a"));
    }

    #[test]
    fn portraits_are_clamped_to_the_canvas() {
        let people = vec![person("early", &[1600]), person("late", &[2024])];
        let (placed, _) = place(&people);
        assert_eq!(placed[0].rect.x, 0.0);
        assert_eq!(placed[1].rect.right(), 2120.0);
    }

    #[test]
    fn cartoon_style_prefers_cartoon_image() {
        let mut p = person("curie", &[1898]);
        p.photo = Some("images/curie.jpg".into());
        p.cartoon = Some("images/curie_cartoon.png".into());
        let fallback = SharedStr::from("images/default.png");
        let (source, alternate) = portrait_sources(&p, PortraitStyle::Cartoon, &fallback);
        assert_eq!(source, "images/curie_cartoon.png");
        assert_eq!(alternate.as_deref(), Some("images/curie.jpg"));

        p.cartoon = None;
        p.photo = None;
        let (source, alternate) = portrait_sources(&p, PortraitStyle::Cartoon, &fallback);
        assert_eq!(source, "images/default.png");
        assert_eq!(alternate, None);
    }
}

use std::collections::HashMap;

use paper_trails_protocol::{Color, ItemKey, Point, Rect, RenderCommand};

use super::axis::YearAxis;
use super::positions::PositionTable;
use crate::model::Person;

/// A publication marker on the axis line.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicationPlacement {
    pub key: ItemKey,
    pub rect: Rect,
    pub color: Color,
    pub tooltip: String,
}

impl PublicationPlacement {
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Horizontal offset of the `n`-th marker sharing a year: `0, +s, -s, +2s,
/// -2s, ...` so same-year markers fan out around the year position.
pub fn fan_offset(n: usize, step: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let magnitude = n.div_ceil(2) as f64 * step;
    if n % 2 == 1 { magnitude } else { -magnitude }
}

/// Place every dated publication of every person on the axis.
///
/// Same-year markers (across people) fan out by half a marker width per
/// step. Markers of one person in one year are told apart by their ordinal
/// in source order, so each gets its own key and position.
pub fn place_publications(
    people: &[Person],
    axis: &YearAxis,
    size: f64,
    positions: &mut PositionTable,
) -> Vec<PublicationPlacement> {
    let mut per_year: HashMap<i32, usize> = HashMap::new();
    let mut placements = Vec::new();

    for person in people {
        let color = person.color();
        let mut ordinals: HashMap<i32, usize> = HashMap::new();
        for (year, publication) in person.dated_publications() {
            let ordinal = ordinals.entry(year).or_insert(0);
            let key = ItemKey::publication(person.id.as_str(), year, *ordinal);
            *ordinal += 1;

            let n = per_year.entry(year).or_insert(0);
            let offset = fan_offset(*n, size / 2.0);
            *n += 1;

            let left = axis.clamp_left(axis.x(year) - size / 2.0 + offset, size);
            let rect = Rect::new(left, axis.axis_y() - size / 2.0, size, size);
            positions.insert_first(key.clone(), rect.center());
            placements.push(PublicationPlacement {
                key,
                rect,
                color,
                tooltip: format!(
                    "{} ({year})",
                    publication.title.as_deref().unwrap_or("N/A")
                ),
            });
        }
        let skipped = person.publications.iter().filter(|p| p.year.is_none()).count();
        if skipped > 0 {
            log::debug!("{}: skipped {skipped} undated publication(s)", person.id);
        }
    }
    placements
}

pub fn publication_commands(placements: &[PublicationPlacement]) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(placements.len() + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "publications".into(),
        label: Some("Publications".into()),
    });
    commands.extend(placements.iter().map(|p| RenderCommand::DrawRect {
        rect: p.rect,
        fill: p.color.into(),
        border: None,
        label: Some(p.tooltip.as_str().into()),
        key: Some(p.key.clone()),
    }));
    commands.push(RenderCommand::EndGroup);
    commands
}

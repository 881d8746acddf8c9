use paper_trails_protocol::{Color, ItemKey, Point, RenderCommand};

use super::people::PortraitPlacement;
use super::positions::PositionTable;

const LINK_WIDTH: f64 = 1.0;

/// Line between a portrait and the person's first publication marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonLink {
    pub key: ItemKey,
    pub from: Point,
    pub to: Point,
    pub color: Color,
}

/// Resolve both ends through the position table. People whose first
/// publication was never placed get no line.
pub fn connect_people(portraits: &[PortraitPlacement], positions: &PositionTable) -> Vec<PersonLink> {
    portraits
        .iter()
        .filter_map(|portrait| {
            let person = portrait.key.person_id()?;
            let target = ItemKey::publication(person.clone(), portrait.first_year, 0);
            let (Some(from), Some(to)) = (positions.get(&portrait.key), positions.get(&target))
            else {
                log::warn!("no first publication position for {target}, line skipped");
                return None;
            };
            Some(PersonLink {
                key: portrait.key.clone(),
                from,
                to,
                color: portrait.color,
            })
        })
        .collect()
}

pub fn link_commands(links: &[PersonLink]) -> Vec<RenderCommand> {
    links
        .iter()
        .map(|link| RenderCommand::DrawLine {
            from: link.from,
            to: link.to,
            color: link.color.into(),
            width: LINK_WIDTH,
            key: Some(link.key.clone()),
        })
        .collect()
}

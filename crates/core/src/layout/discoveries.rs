use paper_trails_protocol::{
    Color, ItemKey, Point, Rect, RenderCommand, SharedStr, TextAlign, TextBaseline,
};

use super::axis::YearAxis;
use super::positions::PositionTable;
use crate::model::Discovery;

const LINE_WIDTH: f64 = 1.5;
const MIN_LABEL_FONT: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryPlacement {
    pub key: ItemKey,
    pub year: i32,
    pub rect: Rect,
    /// Where the connecting line meets the axis: the true year position,
    /// even when the marker itself was pushed right.
    pub anchor: Point,
    pub color: Color,
    pub label: SharedStr,
    pub tooltip: String,
}

impl DiscoveryPlacement {
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Place discovery markers above the axis, sweeping left to right in year
/// order and pushing each marker clear of the previous one plus `padding`.
pub fn place_discoveries(
    discoveries: &[Discovery],
    axis: &YearAxis,
    size: f64,
    offset: f64,
    padding: f64,
    positions: &mut PositionTable,
) -> Vec<DiscoveryPlacement> {
    let mut ordered: Vec<(usize, i32, &Discovery)> = discoveries
        .iter()
        .enumerate()
        .filter_map(|(index, d)| match d.year {
            Some(year) => Some((index, year, d)),
            None => {
                log::debug!("discovery {index} has no year, skipped");
                None
            }
        })
        .collect();
    ordered.sort_by_key(|(_, year, _)| *year);

    let center_y = axis.axis_y() - offset;
    let mut last_end = f64::NEG_INFINITY;
    let mut placements = Vec::with_capacity(ordered.len());

    for (index, year, discovery) in ordered {
        let year_x = axis.x(year);
        let mut left = year_x - size / 2.0;
        if left < last_end + padding {
            left = last_end + padding;
        }
        let left = axis.clamp_left(left, size);
        last_end = left + size;

        let rect = Rect::new(left, center_y - size / 2.0, size, size);
        let key = ItemKey::Discovery(index);
        positions.insert_first(key.clone(), rect.center());
        placements.push(DiscoveryPlacement {
            key,
            year,
            rect,
            anchor: Point::new(year_x, axis.axis_y()),
            color: discovery.color(),
            label: discovery.label().into(),
            tooltip: format!("{} ({year})", discovery.display_title()),
        });
    }
    placements
}

/// Connecting lines from marker centre to the axis.
pub fn discovery_line_commands(placements: &[DiscoveryPlacement]) -> Vec<RenderCommand> {
    placements
        .iter()
        .map(|p| RenderCommand::DrawLine {
            from: p.center(),
            to: p.anchor,
            color: p.color.into(),
            width: LINE_WIDTH,
            key: None,
        })
        .collect()
}

pub fn discovery_commands(placements: &[DiscoveryPlacement]) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(placements.len() * 2 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "discoveries".into(),
        label: Some("Discoveries".into()),
    });
    for p in placements {
        commands.push(RenderCommand::DrawRect {
            rect: p.rect,
            fill: p.color.into(),
            border: None,
            label: Some(p.tooltip.as_str().into()),
            key: Some(p.key.clone()),
        });
        commands.push(RenderCommand::DrawText {
            position: p.center(),
            text: p.label.clone(),
            color: Color::WHITE.into(),
            font_size: (p.rect.w * 0.6).floor().max(MIN_LABEL_FONT),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            bold: false,
            scale_invariant: false,
        });
    }
    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> YearAxis {
        YearAxis::new(1600, 2024, 1000.0, 200.0).unwrap_or_else(|| unreachable!())
    }

    fn place(discoveries: &[Discovery]) -> Vec<DiscoveryPlacement> {
        let mut table = PositionTable::new();
        place_discoveries(discoveries, &axis(), 24.0, 30.0, 5.0, &mut table)
    }

    #[test]
    fn same_year_markers_are_staggered() {
        let placed = place(&[Discovery::new(1895, "X-rays"), Discovery::new(1895, "Radioactivity")]);
        assert_eq!(placed.len(), 2);
        let gap = placed[1].rect.x - placed[0].rect.x;
        assert!(gap >= 5.0, "gap {gap}");
        // Both lines still end at the true year position.
        let year_x = axis().x(1895);
        assert_eq!(placed[0].anchor, Point::new(year_x, 200.0));
        assert_eq!(placed[1].anchor, Point::new(year_x, 200.0));
    }

    #[test]
    fn sweep_is_in_year_order_and_keys_keep_source_index() {
        let placed = place(&[
            Discovery::new(1932, "Neutron"),
            Discovery {
                year: None,
                ..Discovery::new(0, "Undated")
            },
            Discovery::new(1897, "Electron"),
        ]);
        let keys: Vec<ItemKey> = placed.iter().map(|p| p.key.clone()).collect();
        assert_eq!(keys, vec![ItemKey::Discovery(2), ItemKey::Discovery(0)]);
    }

    #[test]
    fn markers_sit_above_the_axis_in_bounds() {
        let placed = place(&[Discovery::new(2024, "Late"), Discovery::new(2024, "Later")]);
        for p in &placed {
            assert_eq!(p.center().y, 170.0);
            assert!(p.rect.x >= 0.0 && p.rect.right() <= 1000.0);
        }
    }

    #[test]
    fn lines_run_from_marker_to_axis() {
        let placed = place(&[Discovery::new(1800, "A")]);
        let lines = discovery_line_commands(&placed);
        assert!(matches!(
            lines.as_slice(),
            [RenderCommand::DrawLine { from, to, .. }] if *from == placed[0].center() && *to == placed[0].anchor
        ));
    }
}

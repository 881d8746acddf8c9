//! Significant event boxes.
//!
//! Events are stacked into levels below the axis with a greedy interval
//! scheduler: in ascending start order, each box takes the first level
//! where it overlaps nothing. This may use more levels than an optimal
//! packing would. Level tops are fixed only after every box is assigned,
//! since a later, taller box can grow a level above earlier ones.

use paper_trails_protocol::{
    Color, ItemKey, Point, Rect, RenderCommand, SharedStr, TextAlign, TextBaseline, ThemeToken,
};

use super::axis::YearAxis;
use super::positions::PositionTable;
use crate::model::SignificantEvent;

/// Average glyph width relative to the font size, used to estimate wrapping.
const GLYPH_WIDTH: f64 = 0.6;
const SIDE_LINE_WIDTH: f64 = 1.5;

/// Geometry knobs for event boxes, in pixels unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventMetrics {
    /// Distance from the axis to the first level.
    pub base_offset: f64,
    pub text_size: f64,
    /// Line height as a multiple of `text_size`.
    pub line_height: f64,
    pub box_padding: f64,
    /// Gap between levels.
    pub level_gap: f64,
}

impl EventMetrics {
    fn line_advance(&self) -> f64 {
        self.text_size * self.line_height
    }

    fn box_height(&self, lines: usize) -> f64 {
        let min = self.text_size + 2.0 * self.box_padding;
        (lines as f64 * self.line_advance() + 2.0 * self.box_padding).max(min)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventPlacement {
    pub key: ItemKey,
    pub start_year: i32,
    pub end_year: i32,
    pub level: usize,
    pub rect: Rect,
    pub lines: Vec<String>,
    pub color: Color,
    pub tooltip: String,
}

#[derive(Debug, Default)]
struct Level {
    intervals: Vec<(f64, f64)>,
    max_height: f64,
}

impl Level {
    fn fits(&self, start_x: f64, end_x: f64) -> bool {
        !self
            .intervals
            .iter()
            .any(|&(s, e)| start_x < e && end_x > s)
    }
}

/// Greedy word wrap against an estimated glyph width. A single word wider
/// than the box stays on its own line.
pub fn wrap_title(title: &str, box_width: f64, metrics: &EventMetrics) -> Vec<String> {
    let available = box_width - 2.0 * metrics.box_padding;
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in title.split(' ') {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };
        let width = candidate.chars().count() as f64 * metrics.text_size * GLYPH_WIDTH;
        if width > available && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn place_events(
    events: &[SignificantEvent],
    axis: &YearAxis,
    metrics: &EventMetrics,
    positions: &mut PositionTable,
) -> Vec<EventPlacement> {
    let mut ordered: Vec<(usize, i32, i32, &SignificantEvent)> = events
        .iter()
        .enumerate()
        .filter_map(|(index, e)| match e.interval() {
            Some((start, end)) => Some((index, start, end, e)),
            None => {
                log::debug!("event {index} has no valid interval, skipped");
                None
            }
        })
        .collect();
    ordered.sort_by_key(|(_, start, _, _)| *start);

    let mut levels: Vec<Level> = Vec::new();
    let mut placements = Vec::with_capacity(ordered.len());

    for (index, start_year, end_year, event) in ordered {
        let start_x = axis.x(start_year);
        let end_x = axis.x(end_year);
        let width = (end_x - start_x).max(1.0);

        let lines = wrap_title(event.display_title(), width, metrics);
        let height = metrics.box_height(lines.len());

        let level = match levels.iter().position(|l| l.fits(start_x, end_x)) {
            Some(level) => level,
            None => {
                levels.push(Level::default());
                levels.len() - 1
            }
        };
        let slot = &mut levels[level];
        slot.intervals.push((start_x, end_x));
        slot.max_height = slot.max_height.max(height);

        placements.push(EventPlacement {
            key: ItemKey::Event(index),
            start_year,
            end_year,
            level,
            rect: Rect::new(start_x, 0.0, width, height),
            lines,
            color: event.color(),
            tooltip: format!("{} ({start_year}-{end_year})", event.display_title()),
        });
    }

    let mut tops = Vec::with_capacity(levels.len());
    let mut top = axis.axis_y() + metrics.base_offset;
    for level in &levels {
        tops.push(top);
        top += level.max_height + metrics.level_gap;
    }
    for p in &mut placements {
        p.rect.y = tops[p.level];
        positions.insert_first(p.key.clone(), Point::new(p.rect.x, p.rect.y));
    }
    log::debug!("{} events stacked on {} levels", placements.len(), levels.len());
    placements
}

/// Vertical lines from the axis to the top of each box, at both ends.
pub fn event_line_commands(placements: &[EventPlacement], axis: &YearAxis) -> Vec<RenderCommand> {
    placements
        .iter()
        .flat_map(|p| {
            let box_top = p.rect.y + 1.0;
            [p.rect.x, axis.x(p.end_year)].map(|x| RenderCommand::DrawLine {
                from: Point::new(x, axis.axis_y()),
                to: Point::new(x, box_top),
                color: p.color.into(),
                width: SIDE_LINE_WIDTH,
                key: None,
            })
        })
        .collect()
}

pub fn event_commands(placements: &[EventPlacement], metrics: &EventMetrics) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    commands.push(RenderCommand::BeginGroup {
        id: "events".into(),
        label: Some("Significant events".into()),
    });
    for p in placements {
        commands.push(RenderCommand::DrawRect {
            rect: p.rect,
            fill: p.color.into(),
            border: Some(ThemeToken::EventBorder.into()),
            label: Some(p.tooltip.as_str().into()),
            key: Some(p.key.clone()),
        });
        let text_color = p.color.contrast_text();
        let x = p.rect.x + p.rect.w / 2.0;
        for (i, line) in p.lines.iter().enumerate() {
            commands.push(RenderCommand::DrawText {
                position: Point::new(
                    x,
                    p.rect.y + metrics.box_padding + i as f64 * metrics.line_advance(),
                ),
                text: SharedStr::from(line.as_str()),
                color: text_color.into(),
                font_size: metrics.text_size,
                align: TextAlign::Center,
                baseline: TextBaseline::Hanging,
                bold: false,
                scale_invariant: true,
            });
        }
    }
    commands.push(RenderCommand::EndGroup);
    commands
}

//! Axis layout engine.
//!
//! [`compute_layout`] is a pure function of the dataset, configuration and
//! viewport size. It maps every dated item onto a canvas wider than the
//! viewport through a single [`YearAxis`], resolves collisions, and returns
//! the position table together with the render commands for the surface.

pub mod axis;
pub mod discoveries;
pub mod events;
pub mod links;
pub mod people;
pub mod positions;
pub mod publications;

pub use axis::{TickKind, YearAxis, YearTick};
pub use discoveries::DiscoveryPlacement;
pub use events::{EventMetrics, EventPlacement};
pub use links::PersonLink;
pub use people::{PortraitOffsets, PortraitPlacement, Row};
pub use positions::PositionTable;
pub use publications::PublicationPlacement;

use paper_trails_protocol::{RenderCommand, SharedStr, Size};
use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::highlight::HighlightIndex;
use crate::model::Dataset;
use crate::preferences::{DEFAULT_PORTRAIT, PortraitStyle};

/// Optional layers that can be switched off from the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerToggles {
    pub discoveries: bool,
    pub events: bool,
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            discoveries: true,
            events: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub layers: LayerToggles,
    pub portrait_style: PortraitStyle,
    pub default_portrait: SharedStr,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            layers: LayerToggles::default(),
            portrait_style: PortraitStyle::default(),
            default_portrait: DEFAULT_PORTRAIT.into(),
        }
    }
}

/// Result of one full layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Canvas size at scale 1.
    pub canvas: Size,
    /// `None` for an empty layout.
    pub axis: Option<YearAxis>,
    pub positions: PositionTable,
    pub commands: Vec<RenderCommand>,
    pub highlights: HighlightIndex,
    pub portraits: Vec<PortraitPlacement>,
    pub publications: Vec<PublicationPlacement>,
    pub links: Vec<PersonLink>,
    pub discoveries: Vec<DiscoveryPlacement>,
    pub events: Vec<EventPlacement>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.axis.is_none()
    }
}

/// Lay out the whole timeline for a viewport.
///
/// Publications are placed before portraits so each portrait's connecting
/// line can resolve its first publication from the table. A degenerate
/// viewport or year range yields an empty layout.
pub fn compute_layout(
    dataset: &Dataset,
    config: &TimelineConfig,
    viewport: Size,
    options: &LayoutOptions,
) -> Layout {
    if viewport.is_degenerate() {
        log::warn!(
            "viewport {}x{} is degenerate, skipping layout",
            viewport.width,
            viewport.height
        );
        return Layout::default();
    }
    let Some(axis) = YearAxis::for_viewport(config, viewport) else {
        log::warn!(
            "empty year range {}..{}, skipping layout",
            config.start_year,
            config.end_year
        );
        return Layout::default();
    };
    let axis_y = axis.axis_y();
    let mut positions = PositionTable::new();

    let publications =
        publications::place_publications(&dataset.people, &axis, config.publication_size, &mut positions);
    let portraits = people::place_portraits(
        &dataset.people,
        &axis,
        config.photo_size,
        PortraitOffsets {
            base: config.photo_base_offset * axis_y,
            stagger: config.photo_vertical_stagger * axis_y,
        },
        options.portrait_style,
        &options.default_portrait,
        &mut positions,
    );
    let links = links::connect_people(&portraits, &positions);

    let discoveries = if options.layers.discoveries {
        discoveries::place_discoveries(
            &dataset.discoveries,
            &axis,
            config.discovery_size,
            config.discovery_base_offset * axis_y,
            config.discovery_stagger_padding,
            &mut positions,
        )
    } else {
        Vec::new()
    };

    let metrics = EventMetrics {
        base_offset: config.event_base_offset * axis_y,
        text_size: config.event_text_size,
        line_height: config.event_line_height,
        box_padding: config.event_box_padding,
        level_gap: config.event_vertical_padding,
    };
    let events = if options.layers.events {
        events::place_events(&dataset.events, &axis, &metrics, &mut positions)
    } else {
        Vec::new()
    };

    let mut highlights = HighlightIndex::new();
    for key in portraits.iter().map(|p| &p.key).chain(publications.iter().map(|p| &p.key)) {
        highlights.insert(key);
    }

    let ticks = axis.ticks();
    let mut commands = axis::axis_commands(&axis, &ticks);
    commands.push(RenderCommand::BeginGroup {
        id: "lines".into(),
        label: None,
    });
    commands.extend(links::link_commands(&links));
    commands.extend(discoveries::discovery_line_commands(&discoveries));
    commands.extend(events::event_line_commands(&events, &axis));
    commands.push(RenderCommand::EndGroup);
    commands.extend(publications::publication_commands(&publications));
    commands.extend(people::portrait_commands(&portraits, &options.default_portrait));
    if options.layers.discoveries {
        commands.extend(discoveries::discovery_commands(&discoveries));
    }
    if options.layers.events {
        commands.extend(events::event_commands(&events, &metrics));
    }
    commands.push(RenderCommand::BeginGroup {
        id: "labels".into(),
        label: Some("Year labels".into()),
    });
    commands.extend(axis::label_commands(&axis, &ticks));
    commands.push(RenderCommand::EndGroup);

    log::info!(
        "layout: {}x{} canvas, {} people, {} publications, {} discoveries, {} events",
        axis.canvas_width(),
        viewport.height,
        portraits.len(),
        publications.len(),
        discoveries.len(),
        events.len()
    );

    Layout {
        canvas: Size::new(axis.canvas_width(), viewport.height),
        axis: Some(axis),
        positions,
        commands,
        highlights,
        portraits,
        publications,
        links,
        discoveries,
        events,
    }
}

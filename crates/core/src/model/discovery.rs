use paper_trails_protocol::Color;
use serde::{Deserialize, Serialize};

use super::{lenient_year, parse_color};

pub const DEFAULT_DISCOVERY_COLOR: Color = Color::rgb8(0xaa, 0xaa, 0xaa);

/// A dated point event, drawn as a labelled marker above the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    /// Short symbol shown inside the marker (e.g. "e⁻").
    #[serde(default)]
    pub particle: Option<String>,
    #[serde(default)]
    pub discoverer: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl Discovery {
    pub fn new(year: i32, title: impl Into<String>) -> Self {
        Self {
            year: Some(year),
            title: Some(title.into()),
            particle: None,
            discoverer: None,
            color: None,
            details: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled Discovery")
    }

    pub fn label(&self) -> &str {
        self.particle.as_deref().unwrap_or("?")
    }

    pub fn color(&self) -> Color {
        parse_color(
            self.color.as_deref(),
            DEFAULT_DISCOVERY_COLOR,
            self.display_title(),
        )
    }
}

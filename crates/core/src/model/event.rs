use paper_trails_protocol::Color;
use serde::{Deserialize, Serialize};

use super::{lenient_year, parse_color};

pub const DEFAULT_EVENT_COLOR: Color = Color::rgb8(0x88, 0x88, 0x88);

/// A multi-year interval drawn as a box below the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantEvent {
    #[serde(
        default,
        rename = "startYear",
        alias = "start_year",
        deserialize_with = "lenient_year"
    )]
    pub start_year: Option<i32>,
    #[serde(
        default,
        rename = "endYear",
        alias = "end_year",
        deserialize_with = "lenient_year"
    )]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl SignificantEvent {
    pub fn new(start_year: i32, end_year: i32, title: impl Into<String>) -> Self {
        Self {
            start_year: Some(start_year),
            end_year: Some(end_year),
            title: Some(title.into()),
            color: None,
            details: None,
        }
    }

    /// `(start, end)` when both years are present and `start < end`.
    pub fn interval(&self) -> Option<(i32, i32)> {
        match (self.start_year, self.end_year) {
            (Some(start), Some(end)) if start < end => Some((start, end)),
            _ => None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Event")
    }

    pub fn color(&self) -> Color {
        parse_color(self.color.as_deref(), DEFAULT_EVENT_COLOR, self.display_title())
    }
}

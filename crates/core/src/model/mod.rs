//! Records consumed by the layout engine.
//!
//! Source files are hand-edited, so year fields are read leniently: anything
//! that is not an integral number within [`YEARS`] becomes `None` and the
//! item is skipped by layout instead of failing the whole file.

pub mod dataset;
pub mod discovery;
pub mod event;
pub mod person;

pub use dataset::Dataset;
pub use discovery::Discovery;
pub use event::SignificantEvent;
pub use person::{Person, Publication};

use std::ops::RangeInclusive;

use paper_trails_protocol::Color;
use serde::{Deserialize, Deserializer};

/// Years the timeline can represent. Wide enough for any real data and
/// narrow enough that year differences never overflow.
pub const YEARS: RangeInclusive<i32> = -9999..=9999;

pub(crate) fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(year_from_value))
}

fn year_from_value(value: &serde_json::Value) -> Option<i32> {
    let year = match value.as_i64() {
        Some(year) => i32::try_from(year).ok()?,
        None => {
            let year = value.as_f64()?;
            let (min, max) = (f64::from(*YEARS.start()), f64::from(*YEARS.end()));
            if year.fract() != 0.0 || year < min || year > max {
                return None;
            }
            year as i32
        }
    };
    YEARS.contains(&year).then_some(year)
}

/// Accepts strings and numbers (e.g. `1867` or `"7 November 1867"`).
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse a data colour, falling back to `default` (and logging) on garbage.
pub(crate) fn parse_color(raw: Option<&str>, default: Color, what: &str) -> Color {
    match raw {
        None => default,
        Some(hex) => Color::from_hex(hex).unwrap_or_else(|| {
            log::warn!("invalid color `{hex}` on {what}; using default");
            default
        }),
    }
}

use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    // Axis
    AxisLine,
    YearTick,
    YearTickMajor,
    YearLabel,
    YearLabelMajor,
    CurrentYear,

    // Markers
    MarkerBorder,
    EventBorder,
}

/// Fill or stroke of a primitive: either a theme token or a colour taken
/// straight from the data set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Token(ThemeToken),
    Rgb(Color),
}

impl From<ThemeToken> for Paint {
    fn from(token: ThemeToken) -> Self {
        Paint::Token(token)
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Rgb(color)
    }
}

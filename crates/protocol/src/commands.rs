use serde::{Deserialize, Serialize};

use crate::key::ItemKey;
use crate::shared_str::SharedStr;
use crate::theme::Paint;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The layout engine emits a `Vec<RenderCommand>` for the whole canvas.
/// Surfaces consume the list sequentially; each command carries all the data
/// it needs. Commands tagged with an [`ItemKey`] are interactive: the surface
/// reports hover/activation of that key back to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a tooltip label.
    DrawRect {
        rect: Rect,
        fill: Paint,
        border: Option<Paint>,
        label: Option<SharedStr>,
        key: Option<ItemKey>,
    },

    /// Draw an image (a portrait) inside `rect` with a coloured border.
    ///
    /// `fallback` is used when `source` fails to load; `alternate` is the
    /// optional second image (the cartoon variant of a portrait).
    DrawImage {
        rect: Rect,
        source: SharedStr,
        alternate: Option<SharedStr>,
        fallback: SharedStr,
        border: Paint,
        alt: SharedStr,
        key: Option<ItemKey>,
    },

    /// Draw a text string at a position.
    ///
    /// Text marked `scale_invariant` keeps its on-screen size when the canvas
    /// is zoomed; surfaces counter-scale it around `position`.
    DrawText {
        position: Point,
        text: SharedStr,
        color: Paint,
        font_size: f64,
        align: TextAlign,
        baseline: TextBaseline,
        bold: bool,
        scale_invariant: bool,
    },

    /// Draw a line segment. Strokes are non-scaling.
    DrawLine {
        from: Point,
        to: Point,
        color: Paint,
        width: f64,
        key: Option<ItemKey>,
    },

    /// Push a uniform scale + translation (applied to all subsequent
    /// commands until the matching `PopTransform`).
    PushTransform { translate: Point, scale: f64 },

    /// Pop the most recent transform.
    PopTransform,

    /// Begin a logical group (axis, people, events, ...). Surfaces may use
    /// this for layer separation.
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

impl RenderCommand {
    /// Key of the interactive item this command belongs to, if any.
    pub fn key(&self) -> Option<&ItemKey> {
        match self {
            RenderCommand::DrawRect { key, .. }
            | RenderCommand::DrawImage { key, .. }
            | RenderCommand::DrawLine { key, .. } => key.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextBaseline {
    /// `position.y` is the top of the first line.
    Hanging,
    /// `position.y` is the vertical centre of the text.
    Middle,
    Alphabetic,
}

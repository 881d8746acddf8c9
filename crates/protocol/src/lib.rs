pub mod commands;
pub mod key;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign, TextBaseline};
pub use key::{ItemKey, KeyParseError};
pub use shared_str::SharedStr;
pub use theme::{Paint, ThemeToken};
pub use types::{Color, Point, Rect, Size};

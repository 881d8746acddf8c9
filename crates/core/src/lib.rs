pub mod config;
pub mod detail;
pub mod gesture;
pub mod highlight;
pub mod layout;
pub mod loader;
pub mod model;
pub mod preferences;
pub mod schedule;
pub mod svg;
pub mod timeline;
pub mod viewport;
pub mod wheel;

pub use config::{ConfigError, TimelineConfig};
pub use detail::{Detail, DetailKind, DetailRequest, PersonDetail};
pub use gesture::{GestureRecognizer, GestureResponse, GestureState};
pub use highlight::{HighlightChange, HighlightIndex, HoverTracker};
pub use layout::{LayerToggles, Layout, LayoutOptions, compute_layout};
pub use loader::{LoadError, RawResources, Resource, load_all};
pub use model::Dataset;
pub use preferences::{PortraitStyle, PreferenceStore, Theme};
pub use timeline::{Timeline, TimelineError};
pub use viewport::{SettleReport, ViewTransform, ViewportController};
pub use wheel::{WheelAction, WheelInput};

//! Browser bridge: owns one [`Timeline`] and exchanges plain values and
//! JSON strings with the page script, which applies render commands and
//! transforms to the DOM.

mod fetch;
mod logging;
mod storage;

use paper_trails_core::TimelineConfig;
use paper_trails_core::gesture::GestureResponse;
use paper_trails_core::layout::LayerToggles;
use paper_trails_core::preferences::{PortraitStyle, initial_theme, toggle_theme};
use paper_trails_core::timeline::Timeline;
use paper_trails_core::viewport::{SettleReport, ViewTransform};
use paper_trails_core::wheel::WheelInput;
use paper_trails_protocol::{ItemKey, Point, Size};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Change the console log level (`error`, `warn`, `info`, `debug`, ...).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logging::init(logging::parse_level(level));
}

/// Fetch the data resources below `base_url` and build a timeline.
///
/// `config_json` holds optional overrides of the default configuration.
/// Missing or malformed resources are logged and treated as empty.
#[wasm_bindgen]
pub async fn load_timeline(
    base_url: String,
    config_json: Option<String>,
) -> Result<TimelineHandle, JsError> {
    let config = match config_json {
        Some(json) => TimelineConfig::from_json(json.as_bytes())
            .map_err(|e| JsError::new(&e.to_string()))?,
        None => TimelineConfig::default(),
    };
    let config = config.with_end_year(current_year());
    let raw = fetch::fetch_all(&base_url).await;
    let dataset = paper_trails_core::load_all(raw);

    let store = LocalStorage::open();
    let theme = initial_theme(&store, storage::prefers_dark());
    let mut timeline = Timeline::new(config);
    let _ = timeline.set_theme(theme);
    let _ = timeline.set_dataset(dataset);
    Ok(TimelineHandle { timeline, store })
}

fn current_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

#[derive(Serialize)]
struct Frame {
    css: String,
    inverse_scale: f64,
    transform: ViewTransform,
}

impl From<ViewTransform> for Frame {
    fn from(transform: ViewTransform) -> Self {
        Self {
            css: transform.to_css(),
            inverse_scale: transform.inverse_scale(),
            transform,
        }
    }
}

#[derive(Serialize)]
struct InputOutcome {
    prevent_default: bool,
    needs_frame: bool,
    zoom_percent: Option<i32>,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("failed to serialize: {err}");
        "null".to_owned()
    })
}

/// Flat `[x0, y0, x1, y1, ...]` touch coordinates to points.
fn points(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1])).collect()
}

fn parse_key(key: &str) -> Option<ItemKey> {
    match key.parse() {
        Ok(key) => Some(key),
        Err(err) => {
            log::warn!("{err}");
            None
        }
    }
}

#[wasm_bindgen]
pub struct TimelineHandle {
    timeline: Timeline,
    store: LocalStorage,
}

impl TimelineHandle {
    fn outcome(&mut self, response: GestureResponse) -> String {
        to_json(&InputOutcome {
            prevent_default: response.prevent_default,
            needs_frame: self.timeline.take_frame_request(),
            zoom_percent: response.settled.map(|r| r.zoom_percent),
        })
    }
}

fn percent(report: Option<SettleReport>) -> Option<i32> {
    report.map(|r| r.zoom_percent)
}

#[wasm_bindgen]
impl TimelineHandle {
    /// Attach or re-measure the container immediately. Returns the zoom
    /// percentage once a layout exists.
    pub fn attach(&mut self, width: f64, height: f64) -> Option<i32> {
        let report = self.timeline.attach(Size::new(width, height)).ok().flatten();
        percent(report)
    }

    /// Window resize; returns the time at which [`Self::poll`] should run.
    pub fn on_resize(&mut self, width: f64, height: f64, now: f64) -> f64 {
        self.timeline.on_resize(Size::new(width, height), now)
    }

    /// Returns the zoom percentage when a debounced re-layout ran.
    pub fn poll(&mut self, now: f64) -> Option<i32> {
        let report = self.timeline.poll(now);
        percent(report)
    }

    /// Render commands of the current layout as JSON.
    pub fn commands(&self) -> String {
        to_json(&self.timeline.commands())
    }

    pub fn canvas_width(&self) -> f64 {
        self.timeline.layout().canvas.width
    }

    pub fn canvas_height(&self) -> f64 {
        self.timeline.layout().canvas.height
    }

    pub fn height(&self) -> f64 {
        self.timeline.height()
    }

    /// True when the page should request an animation frame.
    pub fn take_frame_request(&mut self) -> bool {
        self.timeline.take_frame_request()
    }

    /// Animation frame: the pending transform as JSON, if any.
    pub fn frame(&mut self) -> Option<String> {
        self.timeline.frame().map(|t| to_json(&Frame::from(t)))
    }

    pub fn zoom_in(&mut self) -> Option<i32> {
        self.timeline.zoom_in().ok().map(|r| r.zoom_percent)
    }

    pub fn zoom_out(&mut self) -> Option<i32> {
        self.timeline.zoom_out().ok().map(|r| r.zoom_percent)
    }

    pub fn reset_zoom(&mut self) -> Option<i32> {
        self.timeline.reset_zoom().ok().map(|r| r.zoom_percent)
    }

    pub fn set_zoom_percent(&mut self, percent: f64) -> Option<i32> {
        self.timeline.set_zoom_percent(percent).ok().map(|r| r.zoom_percent)
    }

    /// Grow (`steps > 0`) or shrink the timeline. Returns the new height.
    pub fn adjust_height(&mut self, steps: i32) -> f64 {
        let _ = self.timeline.adjust_height(steps);
        self.timeline.height()
    }

    /// Returns the zoom percentage when the wheel changed the view.
    pub fn wheel(
        &mut self,
        x: f64,
        y: f64,
        delta_x: f64,
        delta_y: f64,
        zoom_modifier: bool,
        shift: bool,
    ) -> Option<i32> {
        let input = WheelInput {
            position: Point::new(x, y),
            delta_x,
            delta_y,
            zoom_modifier,
            shift,
        };
        let report = self.timeline.wheel(&input).ok().flatten();
        percent(report)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, on_interactive: bool) {
        let _ = self.timeline.pointer_down(Point::new(x, y), on_interactive);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> String {
        let response = self.timeline.pointer_move(Point::new(x, y));
        self.outcome(response)
    }

    pub fn pointer_up(&mut self) -> String {
        let response = self.timeline.pointer_up();
        self.outcome(response)
    }

    pub fn pointer_leave(&mut self, buttons_held: bool) -> String {
        let response = self.timeline.pointer_leave(buttons_held);
        self.outcome(response)
    }

    pub fn touch_start(&mut self, touches: &[f64], on_interactive: bool) -> String {
        let response = self
            .timeline
            .touch_start(&points(touches), on_interactive)
            .unwrap_or_default();
        self.outcome(response)
    }

    pub fn touch_move(&mut self, touches: &[f64]) -> String {
        let response = self.timeline.touch_move(&points(touches));
        self.outcome(response)
    }

    pub fn touch_end(&mut self, remaining: &[f64]) -> String {
        let response = self.timeline.touch_end(&points(remaining));
        self.outcome(response)
    }

    /// Hover moved onto `key` (or off every item). Returns the highlight
    /// change as JSON.
    pub fn hover(&mut self, key: Option<String>) -> String {
        let key = key.as_deref().and_then(parse_key);
        to_json(&self.timeline.hover(key.as_ref()))
    }

    /// Detail dialog contents for an activated item, as JSON.
    pub fn activate(&self, key: &str) -> Option<String> {
        let key = parse_key(key)?;
        self.timeline.activate(&key).map(|detail| to_json(&detail))
    }

    pub fn set_layers(&mut self, discoveries: bool, events: bool) {
        let _ = self.timeline.set_layers(LayerToggles {
            discoveries,
            events,
        });
    }

    /// `cartoon` switches to cartoon portraits, anything else to photos.
    pub fn set_portrait_style(&mut self, style: &str) {
        let style = match style {
            "cartoon" => PortraitStyle::Cartoon,
            _ => PortraitStyle::Photo,
        };
        let _ = self.timeline.set_portrait_style(style);
    }

    pub fn theme(&self) -> String {
        self.timeline.theme().to_string()
    }

    /// Flip and persist the theme. Returns the new theme name.
    pub fn toggle_theme(&mut self) -> String {
        let next = toggle_theme(self.timeline.theme(), &mut self.store);
        let _ = self.timeline.set_theme(next);
        next.to_string()
    }

    pub fn export_svg(&self) -> String {
        self.timeline.export_svg()
    }

    /// The visible part of the timeline as SVG, once attached.
    pub fn export_view_svg(&self) -> Option<String> {
        self.timeline.export_view_svg().ok()
    }
}

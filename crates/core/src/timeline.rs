//! The composed timeline: data, layout, viewport and input handling.
//!
//! [`Timeline`] owns every piece of mutable state; the host feeds it input
//! events and the current time, and reads back render commands, the
//! settled transform and highlight/detail signals.

use paper_trails_protocol::{ItemKey, Point, RenderCommand, Size};
use thiserror::Error;

use crate::config::TimelineConfig;
use crate::detail::{Detail, detail_for};
use crate::gesture::{GestureRecognizer, GestureResponse};
use crate::highlight::{HighlightChange, HoverTracker};
use crate::layout::{LayerToggles, Layout, LayoutOptions, compute_layout};
use crate::model::Dataset;
use crate::preferences::{PortraitStyle, Theme};
use crate::schedule::{Debouncer, PaintQueue};
use crate::svg::render_svg;
use crate::viewport::{SettleReport, ViewTransform, ViewportController};
use crate::wheel::{WheelInput, apply_wheel};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("timeline container is not attached")]
    MissingSurface,
}

#[derive(Debug)]
pub struct Timeline {
    config: TimelineConfig,
    dataset: Option<Dataset>,
    /// Size of the visible container; `None` until the surface attaches.
    container: Option<Size>,
    height: f64,
    theme: Theme,
    options: LayoutOptions,
    layout: Layout,
    viewport: ViewportController,
    gestures: GestureRecognizer,
    resize: Debouncer,
    paint: PaintQueue,
    frame_wanted: bool,
    hover: HoverTracker,
}

impl Timeline {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            dataset: None,
            container: None,
            height: config.initial_height,
            theme: Theme::default(),
            options: LayoutOptions::default(),
            layout: Layout::default(),
            viewport: ViewportController::new(&config),
            gestures: GestureRecognizer::new(config.drag_threshold),
            resize: Debouncer::new(config.resize_debounce_ms),
            paint: PaintQueue::new(),
            frame_wanted: false,
            hover: HoverTracker::new(),
            config,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.layout.commands
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    /// Size the canvas is viewed through: container width by the chosen
    /// timeline height.
    fn surface(&self) -> Result<Size, TimelineError> {
        match self.container {
            Some(container) => Ok(Size::new(container.width, self.height)),
            None => {
                log::error!("{}", TimelineError::MissingSurface);
                Err(TimelineError::MissingSurface)
            }
        }
    }

    fn queue_paint(&mut self) {
        if self.paint.request(self.viewport.transform()) {
            self.frame_wanted = true;
        }
    }

    /// Whether the host must schedule an animation frame. Cleared on read.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_wanted)
    }

    /// Animation frame callback: the transform to paint, if one is pending.
    pub fn frame(&mut self) -> Option<ViewTransform> {
        self.paint.take()
    }

    // -- data & surface ----------------------------------------------------

    /// Deliver the loaded data. Layout runs from here on.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Result<Option<SettleReport>, TimelineError> {
        log::info!(
            "dataset: {} people, {} discoveries, {} events",
            dataset.people.len(),
            dataset.discoveries.len(),
            dataset.events.len()
        );
        self.dataset = Some(dataset);
        self.refresh()
    }

    /// Attach (or re-measure) the container without debouncing.
    pub fn attach(&mut self, container: Size) -> Result<Option<SettleReport>, TimelineError> {
        self.container = Some(container);
        self.relayout()
    }

    pub fn detach(&mut self) {
        self.container = None;
        self.gestures.cancel();
        self.resize.cancel();
    }

    /// Window resize: remember the new size and re-layout once resizing
    /// has been quiet for the debounce delay (see [`Self::poll`]).
    pub fn on_resize(&mut self, container: Size, now: f64) -> f64 {
        self.container = Some(container);
        self.resize.trigger(now)
    }

    /// Drive pending timers. Returns the settle report of a debounced
    /// re-layout when one ran.
    pub fn poll(&mut self, now: f64) -> Option<SettleReport> {
        if !self.resize.poll(now) {
            return None;
        }
        self.relayout().ok().flatten()
    }

    /// Re-layout if a surface is attached; settings changed before that
    /// simply take effect on attach.
    fn refresh(&mut self) -> Result<Option<SettleReport>, TimelineError> {
        if self.container.is_none() {
            return Ok(None);
        }
        self.relayout()
    }

    /// Full re-layout and re-settle. `Ok(None)` while the data has not
    /// arrived yet.
    pub fn relayout(&mut self) -> Result<Option<SettleReport>, TimelineError> {
        let surface = self.surface()?;
        let Some(dataset) = &self.dataset else {
            log::debug!("layout deferred until data is loaded");
            return Ok(None);
        };
        self.layout = compute_layout(dataset, &self.config, surface, &self.options);
        self.hover = HoverTracker::new();
        self.viewport.set_viewport_size(surface);
        self.viewport.set_content_size(self.layout.canvas);
        let report = self.viewport.settle();
        self.queue_paint();
        Ok(Some(report))
    }

    // -- controls ----------------------------------------------------------

    /// Grow or shrink the timeline by `steps` height increments.
    pub fn adjust_height(&mut self, steps: i32) -> Result<Option<SettleReport>, TimelineError> {
        let height = (self.height + f64::from(steps) * self.config.height_step)
            .max(self.config.min_height)
            .min(self.config.max_height);
        self.set_height(height)
    }

    pub fn set_height(&mut self, height: f64) -> Result<Option<SettleReport>, TimelineError> {
        self.surface()?;
        self.height = height.max(self.config.min_height).min(self.config.max_height);
        self.relayout()
    }

    pub fn set_layers(&mut self, layers: LayerToggles) -> Result<Option<SettleReport>, TimelineError> {
        self.options.layers = layers;
        self.refresh()
    }

    pub fn set_portrait_style(
        &mut self,
        style: PortraitStyle,
    ) -> Result<Option<SettleReport>, TimelineError> {
        self.options.portrait_style = style;
        self.refresh()
    }

    /// Switch theme; the default portrait follows it.
    pub fn set_theme(&mut self, theme: Theme) -> Result<Option<SettleReport>, TimelineError> {
        self.theme = theme;
        self.options.default_portrait = theme.default_portrait().into();
        self.refresh()
    }

    fn zoom_with(
        &mut self,
        op: impl FnOnce(&mut ViewportController) -> bool,
    ) -> Result<SettleReport, TimelineError> {
        self.surface()?;
        op(&mut self.viewport);
        let report = self.viewport.settle();
        self.queue_paint();
        Ok(report)
    }

    pub fn zoom_in(&mut self) -> Result<SettleReport, TimelineError> {
        self.zoom_with(ViewportController::zoom_in)
    }

    pub fn zoom_out(&mut self) -> Result<SettleReport, TimelineError> {
        self.zoom_with(ViewportController::zoom_out)
    }

    pub fn set_zoom_percent(&mut self, percent: f64) -> Result<SettleReport, TimelineError> {
        self.zoom_with(|vp| vp.set_zoom_percent(percent))
    }

    pub fn reset_zoom(&mut self) -> Result<SettleReport, TimelineError> {
        self.surface()?;
        let report = self.viewport.reset();
        self.queue_paint();
        Ok(report)
    }

    // -- input -------------------------------------------------------------

    pub fn wheel(&mut self, input: &WheelInput) -> Result<Option<SettleReport>, TimelineError> {
        self.surface()?;
        let report = apply_wheel(
            input,
            &mut self.viewport,
            self.config.zoom_step,
            self.config.wheel_pan_cap,
        );
        if report.is_some() {
            self.queue_paint();
        }
        Ok(report)
    }

    fn after_gesture(&mut self, response: GestureResponse) -> GestureResponse {
        if response.moved {
            self.queue_paint();
        }
        response
    }

    pub fn pointer_down(&mut self, pos: Point, on_interactive: bool) -> Result<(), TimelineError> {
        self.surface()?;
        self.gestures.pointer_down(pos, on_interactive, &self.viewport);
        Ok(())
    }

    pub fn pointer_move(&mut self, pos: Point) -> GestureResponse {
        let response = self.gestures.pointer_move(pos, &mut self.viewport);
        self.after_gesture(response)
    }

    pub fn pointer_up(&mut self) -> GestureResponse {
        let response = self.gestures.pointer_up(&mut self.viewport);
        self.after_gesture(response)
    }

    pub fn pointer_leave(&mut self, buttons_held: bool) -> GestureResponse {
        let response = self.gestures.pointer_leave(buttons_held, &mut self.viewport);
        self.after_gesture(response)
    }

    pub fn touch_start(
        &mut self,
        touches: &[Point],
        on_interactive: bool,
    ) -> Result<GestureResponse, TimelineError> {
        self.surface()?;
        Ok(self.gestures.touch_start(touches, on_interactive, &self.viewport))
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> GestureResponse {
        let response = self.gestures.touch_move(touches, &mut self.viewport);
        self.after_gesture(response)
    }

    pub fn touch_end(&mut self, remaining: &[Point]) -> GestureResponse {
        let response = self.gestures.touch_end(remaining, &mut self.viewport);
        self.after_gesture(response)
    }

    // -- item signals ------------------------------------------------------

    /// The surface reports the item under the pointer (or none).
    pub fn hover(&mut self, key: Option<&ItemKey>) -> HighlightChange {
        self.hover.update(key, &self.layout.highlights)
    }

    /// An item was clicked or tapped.
    pub fn activate(&self, key: &ItemKey) -> Option<Detail> {
        let dataset = self.dataset.as_ref()?;
        detail_for(key, dataset, &self.options.default_portrait)
    }

    /// The current layout as a standalone SVG document at scale 1.
    pub fn export_svg(&self) -> String {
        render_svg(&self.layout.commands, self.layout.canvas, self.theme)
    }

    /// What the viewport currently shows: the layout under the settled pan
    /// and zoom, at the viewport size.
    pub fn export_view_svg(&self) -> Result<String, TimelineError> {
        let viewport = self.surface()?;
        let mut commands = Vec::with_capacity(self.layout.commands.len() + 2);
        commands.push(self.transform().command());
        commands.extend(self.layout.commands.iter().cloned());
        commands.push(RenderCommand::PopTransform);
        Ok(render_svg(&commands, viewport, self.theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Publication, SignificantEvent};

    fn dataset() -> Dataset {
        let mut curie = Person::new("curie", "Marie Curie");
        curie.publications.push(Publication {
            year: Some(1898),
            title: Some("Polonium".into()),
            abstract_text: None,
        });
        Dataset {
            people: vec![curie],
            discoveries: Vec::new(),
            events: vec![SignificantEvent::new(1914, 1918, "World War I")],
        }
    }

    fn timeline() -> Timeline {
        Timeline::new(TimelineConfig::default().with_end_year(2024))
    }

    fn ready() -> Timeline {
        let mut t = timeline();
        let _ = t.attach(Size::new(800.0, 450.0));
        let _ = t.set_dataset(dataset());
        t
    }

    #[test]
    fn layout_waits_for_data() {
        let mut t = timeline();
        assert_eq!(t.attach(Size::new(800.0, 450.0)), Ok(None));
        assert!(t.layout().is_empty());
        let report = t.set_dataset(dataset());
        assert!(matches!(report, Ok(Some(_))));
        assert_eq!(t.layout().positions.person_count(), 1);
        assert_eq!(t.viewport().content_size(), Size::new(2120.0, 450.0));
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let mut t = timeline();
        assert_eq!(t.set_dataset(dataset()), Ok(None));
        assert_eq!(t.relayout(), Err(TimelineError::MissingSurface));
        assert_eq!(t.zoom_in(), Err(TimelineError::MissingSurface));
        assert_eq!(t.viewport().scale(), 1.0);
        assert!(t.layout().is_empty());
        assert_eq!(t.adjust_height(1), Err(TimelineError::MissingSurface));
        assert_eq!(t.height(), 450.0);
    }

    #[test]
    fn height_steps_are_clamped_and_relayout() {
        let mut t = ready();
        let _ = t.adjust_height(1);
        assert_eq!(t.height(), 500.0);
        assert_eq!(t.layout().canvas.height, 500.0);
        let _ = t.adjust_height(100);
        assert_eq!(t.height(), 800.0);
        let _ = t.adjust_height(-100);
        assert_eq!(t.height(), 200.0);
    }

    #[test]
    fn resize_is_debounced() {
        let mut t = ready();
        t.on_resize(Size::new(1200.0, 450.0), 0.0);
        t.on_resize(Size::new(1300.0, 450.0), 100.0);
        assert_eq!(t.poll(200.0), None);
        assert_eq!(t.layout().canvas.width, 2120.0);
        assert!(t.poll(350.0).is_some());
        assert_eq!(t.layout().canvas.width, 2600.0);
        assert_eq!(t.poll(1000.0), None);
    }

    #[test]
    fn paints_are_batched_per_frame() {
        let mut t = ready();
        assert!(t.take_frame_request());
        let _ = t.pointer_down(Point::new(400.0, 200.0), false);
        t.pointer_move(Point::new(380.0, 200.0));
        t.pointer_move(Point::new(360.0, 200.0));
        assert!(!t.take_frame_request());
        let painted = t.frame();
        assert_eq!(painted.map(|p| p.translate.x), Some(-40.0));
        assert_eq!(t.frame(), None);
        let response = t.pointer_up();
        assert!(response.settled.is_some());
        assert!(t.take_frame_request());
    }

    #[test]
    fn zoom_controls_report_percentages() {
        let mut t = ready();
        assert_eq!(t.zoom_in().map(|r| r.zoom_percent), Ok(110));
        assert_eq!(t.set_zoom_percent(300.0).map(|r| r.zoom_percent), Ok(300));
        assert_eq!(t.set_zoom_percent(900.0).map(|r| r.zoom_percent), Ok(500));
        assert_eq!(t.reset_zoom().map(|r| r.zoom_percent), Ok(100));
    }

    #[test]
    fn wheel_zoom_and_pan() {
        let mut t = ready();
        let zoom = WheelInput {
            position: Point::new(100.0, 100.0),
            delta_y: -1.0,
            zoom_modifier: true,
            ..WheelInput::default()
        };
        let report = t.wheel(&zoom);
        assert!(matches!(report, Ok(Some(r)) if r.zoom_percent == 110));
        let nothing = WheelInput::default();
        assert_eq!(t.wheel(&nothing), Ok(None));
    }

    #[test]
    fn hover_and_activate_items() {
        let mut t = ready();
        let change = t.hover(Some(&ItemKey::publication("curie", 1898, 0)));
        assert_eq!(change.enter.len(), 2);
        assert!(matches!(
            t.activate(&ItemKey::Event(0)),
            Some(Detail::Item(ref r)) if r.year_label == "1914 - 1918"
        ));
        assert!(t.activate(&ItemKey::Discovery(3)).is_none());
    }

    #[test]
    fn same_year_markers_open_their_own_publication() {
        let mut data = dataset();
        data.people[0].publications.push(Publication {
            year: Some(1898),
            title: Some("Radium".into()),
            abstract_text: None,
        });
        let mut t = timeline();
        let _ = t.attach(Size::new(800.0, 450.0));
        let _ = t.set_dataset(data);

        let keys: Vec<ItemKey> = t.layout().publications.iter().map(|p| p.key.clone()).collect();
        assert_eq!(keys.len(), 2);
        assert_ne!(keys[0], keys[1]);
        let titles: Vec<String> = keys
            .iter()
            .filter_map(|key| match t.activate(key) {
                Some(Detail::Item(request)) => Some(request.title),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["Polonium", "Radium"]);
    }

    #[test]
    fn theme_switches_default_portrait() {
        let mut t = ready();
        let _ = t.set_theme(Theme::Dark);
        let uses_dark_default = t.commands().iter().any(|c| {
            matches!(c, RenderCommand::DrawImage { source, .. } if source == "images/default_dark.png")
        });
        assert!(uses_dark_default);
        assert!(t.export_svg().contains("default_dark.png"));
    }

    #[test]
    fn view_export_follows_the_transform() {
        let mut t = timeline();
        assert_eq!(t.export_view_svg(), Err(TimelineError::MissingSurface));
        let _ = t.attach(Size::new(800.0, 450.0));
        let _ = t.set_dataset(dataset());
        let _ = t.set_zoom_percent(200.0);
        let transform = t.transform();
        let svg = t.export_view_svg().unwrap_or_default();
        assert!(svg.contains(r#"viewBox="0 0 800 450""#), "{svg}");
        assert!(svg.contains(&format!(
            r#"<g transform="translate({} {}) scale(2)">"#,
            transform.translate.x, transform.translate.y
        )));
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    }

    #[test]
    fn layers_toggle_relayouts() {
        let mut t = ready();
        assert_eq!(t.layout().events.len(), 1);
        let _ = t.set_layers(LayerToggles {
            discoveries: true,
            events: false,
        });
        assert!(t.layout().events.is_empty());
    }
}

//! Viewport controller: the single pan/zoom transform of the canvas.
//!
//! Content coordinates map to viewport coordinates as
//! `view = content * scale + translate`. Every mutation may leave the
//! transform provisionally out of bounds; [`ViewportController::settle`]
//! is the only place bounds are enforced.

use paper_trails_protocol::{Point, RenderCommand, Size};
use serde::Serialize;

use crate::config::TimelineConfig;

/// Uniform scale plus translation, as applied to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub translate: Point,
    pub scale: f64,
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        translate: Point::ORIGIN,
        scale: 1.0,
    };

    /// CSS `transform` value for a canvas with `transform-origin: 0 0`.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }

    /// Factor that keeps counter-scaled labels at their on-screen size.
    pub fn inverse_scale(&self) -> f64 {
        if self.scale > 0.0 { 1.0 / self.scale } else { 1.0 }
    }

    pub fn command(&self) -> RenderCommand {
        RenderCommand::PushTransform {
            translate: self.translate,
            scale: self.scale,
        }
    }

    pub fn content_to_view(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate.x,
            p.y * self.scale + self.translate.y,
        )
    }

    pub fn view_to_content(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.translate.x) / self.scale,
            (p.y - self.translate.y) / self.scale,
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What a settle pass produced, for the zoom percentage display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SettleReport {
    pub transform: ViewTransform,
    pub zoom_percent: i32,
    /// True when content or viewport had a zero dimension and no clamping
    /// was done.
    pub degenerate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    scale: f64,
    translate: Point,
    content: Size,
    viewport: Size,
    min_scale: f64,
    max_scale: f64,
    zoom_step: f64,
}

impl ViewportController {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            scale: 1.0,
            translate: Point::ORIGIN,
            content: Size::ZERO,
            viewport: Size::ZERO,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_step: config.zoom_step,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    pub fn content_size(&self) -> Size {
        self.content
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.content = size;
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            translate: self.translate,
            scale: self.scale,
        }
    }

    pub fn zoom_percent(&self) -> i32 {
        (self.scale * 100.0).round() as i32
    }

    pub fn view_to_content(&self, p: Point) -> Point {
        self.transform().view_to_content(p)
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }

    /// Zoom by `factor` keeping the content point under `anchor` fixed.
    /// Returns whether the scale changed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.zoom_from(anchor, self.scale, self.translate, self.scale * factor)
    }

    /// Set the scale to `target` (clamped) relative to a base state, keeping
    /// the content point that was under `anchor` in the base state fixed.
    ///
    /// Pinch gestures zoom from the state captured when the pinch began
    /// rather than compounding per-move factors.
    pub fn zoom_from(
        &mut self,
        anchor: Point,
        base_scale: f64,
        base_translate: Point,
        target: f64,
    ) -> bool {
        if !target.is_finite() || !(base_scale > 0.0) {
            return false;
        }
        let scale = self.clamp_scale(target);
        let ratio = scale / base_scale;
        let translate = Point::new(
            anchor.x - (anchor.x - base_translate.x) * ratio,
            anchor.y - (anchor.y - base_translate.y) * ratio,
        );
        if (scale - self.scale).abs() < f64::EPSILON && translate == self.translate {
            return false;
        }
        self.scale = scale;
        self.translate = translate;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(self.viewport.center(), 1.0 + self.zoom_step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(self.viewport.center(), 1.0 / (1.0 + self.zoom_step))
    }

    /// Slider input: absolute zoom percentage, anchored at the viewport centre.
    pub fn set_zoom_percent(&mut self, percent: f64) -> bool {
        self.zoom_from(
            self.viewport.center(),
            self.scale,
            self.translate,
            percent / 100.0,
        )
    }

    /// Provisional pan; bounds are applied by [`Self::settle`].
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translate.x += dx;
        self.translate.y += dy;
    }

    /// Provisional absolute translation, used by drags.
    pub fn set_translate(&mut self, translate: Point) {
        self.translate = translate;
    }

    /// Reconcile the transform with the visible bounds: content smaller than
    /// the viewport is centred, larger content may not leave a gap at
    /// either edge.
    pub fn settle(&mut self) -> SettleReport {
        let degenerate = self.content.is_degenerate() || self.viewport.is_degenerate();
        if degenerate {
            log::debug!("settle skipped: degenerate content or viewport");
        } else {
            self.translate = Point::new(
                settle_axis(self.translate.x, self.content.width, self.viewport.width, self.scale),
                settle_axis(
                    self.translate.y,
                    self.content.height,
                    self.viewport.height,
                    self.scale,
                ),
            );
        }
        SettleReport {
            transform: self.transform(),
            zoom_percent: self.zoom_percent(),
            degenerate,
        }
    }

    /// Back to scale 1 and no translation, then settle.
    pub fn reset(&mut self) -> SettleReport {
        self.scale = 1.0;
        self.translate = Point::ORIGIN;
        self.settle()
    }
}

fn settle_axis(translate: f64, content: f64, viewport: f64, scale: f64) -> f64 {
    let scaled = content * scale;
    if scaled <= viewport {
        (viewport - scaled) / 2.0
    } else {
        translate.min(0.0).max(viewport - scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewportController {
        let mut vp = ViewportController::new(&TimelineConfig::default());
        vp.set_viewport_size(Size::new(800.0, 450.0));
        vp.set_content_size(Size::new(2400.0, 450.0));
        vp
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn scale_is_clamped_to_limits() {
        let mut vp = controller();
        assert!(vp.zoom_at(Point::new(10.0, 10.0), 100.0));
        assert_eq!(vp.scale(), 5.0);
        assert!(!vp.zoom_at(Point::new(10.0, 10.0), 2.0));
        assert!(vp.zoom_at(Point::new(10.0, 10.0), 0.0001));
        assert_eq!(vp.scale(), 0.2);
        assert!(!vp.zoom_at(Point::ORIGIN, f64::NAN));
        assert!(!vp.zoom_at(Point::ORIGIN, -1.0));
        assert_eq!(vp.scale(), 0.2);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut vp = controller();
        vp.pan_by(-300.0, 0.0);
        let anchor = Point::new(123.0, 77.0);
        for factor in [1.1, 1.0 / 1.1, 2.5, 0.5] {
            let before = vp.view_to_content(anchor);
            vp.zoom_at(anchor, factor);
            let after = vp.view_to_content(anchor);
            assert!(close(before.x, after.x) && close(before.y, after.y), "{factor}");
        }
    }

    #[test]
    fn settle_clamps_wide_content() {
        let mut vp = controller();
        vp.set_translate(Point::new(-2000.0, 0.0));
        assert_eq!(vp.settle().transform.translate.x, -1600.0);
        vp.set_translate(Point::new(100.0, 0.0));
        assert_eq!(vp.settle().transform.translate.x, 0.0);
        vp.set_translate(Point::new(0.0, 0.0));
        assert_eq!(vp.settle().transform.translate.x, 0.0);
        vp.set_translate(Point::new(-700.0, 30.0));
        let report = vp.settle();
        assert_eq!(report.transform.translate, Point::new(-700.0, 0.0));
    }

    #[test]
    fn settle_centres_small_content() {
        let mut vp = controller();
        vp.zoom_at(Point::ORIGIN, 0.25);
        let report = vp.settle();
        // 2400 * 0.25 = 600 wide, 112.5 tall
        assert!(close(report.transform.translate.x, 100.0));
        assert!(close(report.transform.translate.y, (450.0 - 112.5) / 2.0));
        assert_eq!(report.zoom_percent, 25);
    }

    #[test]
    fn settle_is_idempotent() {
        let mut vp = controller();
        vp.zoom_at(Point::new(400.0, 225.0), 1.7);
        vp.pan_by(5000.0, -5000.0);
        let first = vp.settle();
        let second = vp.settle();
        assert_eq!(first, second);
    }

    #[test]
    fn reset_restores_identity() {
        let mut vp = controller();
        vp.zoom_at(Point::new(400.0, 225.0), 3.0);
        vp.pan_by(-123.0, 45.0);
        let report = vp.reset();
        assert_eq!(report.transform, ViewTransform::IDENTITY);
        assert_eq!(report.zoom_percent, 100);
        assert_eq!(vp.settle(), report);
    }

    #[test]
    fn degenerate_sizes_skip_clamping_but_report_zoom() {
        let mut vp = ViewportController::new(&TimelineConfig::default());
        vp.zoom_at(Point::ORIGIN, 1.5);
        vp.pan_by(999.0, 999.0);
        let report = vp.settle();
        assert!(report.degenerate);
        assert_eq!(report.zoom_percent, 150);
        assert_eq!(report.transform.translate, Point::new(999.0, 999.0));
    }

    #[test]
    fn buttons_and_slider_zoom_about_the_centre() {
        let mut vp = controller();
        let centre = Point::new(400.0, 225.0);
        let before = vp.view_to_content(centre);
        assert!(vp.zoom_in());
        assert!(close(vp.scale(), 1.1));
        assert!(vp.zoom_out());
        assert!(close(vp.scale(), 1.0));
        assert!(vp.set_zoom_percent(250.0));
        assert!(close(vp.scale(), 2.5));
        let after = vp.view_to_content(centre);
        assert!(close(before.x, after.x) && close(before.y, after.y));
    }

    #[test]
    fn css_and_inverse_scale() {
        let t = ViewTransform {
            translate: Point::new(-10.0, 5.5),
            scale: 2.0,
        };
        assert_eq!(t.to_css(), "translate(-10px, 5.5px) scale(2)");
        assert_eq!(t.inverse_scale(), 0.5);
        let p = Point::new(3.0, 4.0);
        assert_eq!(t.view_to_content(t.content_to_view(p)), p);
    }
}

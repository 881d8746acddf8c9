//! Drag and pinch recognition.
//!
//! Pointer drags and single-touch drags share one state machine:
//! `Idle → Armed → Dragging → Idle`. A press only arms; the canvas starts
//! moving once the pointer has travelled `threshold` pixels along either
//! axis, so clicks on the canvas don't nudge it. Two touches switch to
//! `Pinching`, which zooms about the initial midpoint.
//!
//! All positions are viewport coordinates (relative to the container).

use paper_trails_protocol::Point;

use crate::viewport::{SettleReport, ViewportController};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Armed {
        start: Point,
        start_translate: Point,
    },
    Dragging {
        start: Point,
        start_translate: Point,
    },
    Pinching {
        initial_distance: f64,
        midpoint: Point,
        start_scale: f64,
        start_translate: Point,
    },
}

/// What the host should do after feeding an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureResponse {
    /// The transform changed and needs repainting.
    pub moved: bool,
    /// Suppress the browser's default action (text selection, image
    /// ghost-drag, page scroll).
    pub prevent_default: bool,
    /// Set when the gesture ended and the viewport was settled.
    pub settled: Option<SettleReport>,
}

impl GestureResponse {
    fn moved() -> Self {
        Self {
            moved: true,
            prevent_default: true,
            settled: None,
        }
    }

    fn settled(report: SettleReport) -> Self {
        Self {
            moved: true,
            prevent_default: false,
            settled: Some(report),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureRecognizer {
    state: GestureState,
    threshold: f64,
}

impl GestureRecognizer {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: GestureState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Primary button press. Presses on interactive items (portraits,
    /// markers, controls) never arm a drag.
    pub fn pointer_down(&mut self, pos: Point, on_interactive: bool, viewport: &ViewportController) {
        if on_interactive || self.state != GestureState::Idle {
            return;
        }
        self.state = GestureState::Armed {
            start: pos,
            start_translate: viewport.translate(),
        };
    }

    pub fn pointer_move(&mut self, pos: Point, viewport: &mut ViewportController) -> GestureResponse {
        match self.state {
            GestureState::Armed {
                start,
                start_translate,
            } => {
                let (dx, dy) = (pos.x - start.x, pos.y - start.y);
                if dx.abs().max(dy.abs()) < self.threshold {
                    return GestureResponse::default();
                }
                self.state = GestureState::Dragging {
                    start,
                    start_translate,
                };
                viewport.set_translate(Point::new(start_translate.x + dx, start_translate.y + dy));
                GestureResponse::moved()
            }
            GestureState::Dragging {
                start,
                start_translate,
            } => {
                viewport.set_translate(Point::new(
                    start_translate.x + (pos.x - start.x),
                    start_translate.y + (pos.y - start.y),
                ));
                GestureResponse::moved()
            }
            GestureState::Idle | GestureState::Pinching { .. } => GestureResponse::default(),
        }
    }

    /// Button release: a drag settles exactly once, an armed press that
    /// never crossed the threshold is simply forgotten.
    pub fn pointer_up(&mut self, viewport: &mut ViewportController) -> GestureResponse {
        match self.state {
            GestureState::Dragging { .. } => {
                self.state = GestureState::Idle;
                GestureResponse::settled(viewport.settle())
            }
            GestureState::Armed { .. } => {
                self.state = GestureState::Idle;
                GestureResponse::default()
            }
            GestureState::Idle | GestureState::Pinching { .. } => GestureResponse::default(),
        }
    }

    /// The pointer left the tracked surface. Only ends the gesture when no
    /// button is held; otherwise the drag continues on re-entry.
    pub fn pointer_leave(
        &mut self,
        buttons_held: bool,
        viewport: &mut ViewportController,
    ) -> GestureResponse {
        if buttons_held {
            return GestureResponse::default();
        }
        self.pointer_up(viewport)
    }

    pub fn touch_start(
        &mut self,
        touches: &[Point],
        on_interactive: bool,
        viewport: &ViewportController,
    ) -> GestureResponse {
        match touches {
            [first, second, ..] => {
                self.state = GestureState::Pinching {
                    initial_distance: first.distance(*second),
                    midpoint: first.midpoint(*second),
                    start_scale: viewport.scale(),
                    start_translate: viewport.translate(),
                };
                GestureResponse {
                    prevent_default: true,
                    ..GestureResponse::default()
                }
            }
            [only] => {
                self.pointer_down(*only, on_interactive, viewport);
                GestureResponse::default()
            }
            [] => GestureResponse::default(),
        }
    }

    pub fn touch_move(&mut self, touches: &[Point], viewport: &mut ViewportController) -> GestureResponse {
        match (self.state, touches) {
            (
                GestureState::Pinching {
                    initial_distance,
                    midpoint,
                    start_scale,
                    start_translate,
                },
                [first, second, ..],
            ) => {
                if !(initial_distance > 0.0) {
                    return GestureResponse {
                        prevent_default: true,
                        ..GestureResponse::default()
                    };
                }
                let ratio = first.distance(*second) / initial_distance;
                let moved =
                    viewport.zoom_from(midpoint, start_scale, start_translate, start_scale * ratio);
                GestureResponse {
                    moved,
                    prevent_default: true,
                    settled: None,
                }
            }
            (GestureState::Armed { .. } | GestureState::Dragging { .. }, [only, ..]) => {
                self.pointer_move(*only, viewport)
            }
            _ => GestureResponse::default(),
        }
    }

    /// `remaining` are the touches still down after the lift.
    pub fn touch_end(
        &mut self,
        remaining: &[Point],
        viewport: &mut ViewportController,
    ) -> GestureResponse {
        match self.state {
            GestureState::Pinching { .. } if remaining.len() < 2 => {
                self.state = GestureState::Idle;
                GestureResponse::settled(viewport.settle())
            }
            GestureState::Armed { .. } | GestureState::Dragging { .. } if remaining.is_empty() => {
                self.pointer_up(viewport)
            }
            _ => GestureResponse::default(),
        }
    }

    /// Drop any gesture without touching the viewport.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

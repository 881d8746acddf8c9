use paper_trails_protocol::Point;

use crate::viewport::{SettleReport, ViewportController};

/// A wheel event as reported by the surface, in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    pub position: Point,
    pub delta_x: f64,
    pub delta_y: f64,
    /// Ctrl on most platforms, Cmd on macOS.
    pub zoom_modifier: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAction {
    Zoom { anchor: Point, factor: f64 },
    Pan { dx: f64, dy: f64 },
}

/// Map a wheel event to an action: modifier zooms about the cursor, shift
/// pans horizontally, a plain wheel pans vertically. Pans move by at most
/// `pan_cap` pixels per event. A zero delta maps to nothing.
pub fn wheel_action(input: &WheelInput, zoom_step: f64, pan_cap: f64) -> Option<WheelAction> {
    if input.zoom_modifier {
        return if input.delta_y < 0.0 {
            Some(WheelAction::Zoom {
                anchor: input.position,
                factor: 1.0 + zoom_step,
            })
        } else if input.delta_y > 0.0 {
            Some(WheelAction::Zoom {
                anchor: input.position,
                factor: 1.0 / (1.0 + zoom_step),
            })
        } else {
            None
        };
    }
    if input.shift {
        // Browsers report shift+wheel on either axis.
        let delta = if input.delta_x != 0.0 {
            input.delta_x
        } else {
            input.delta_y
        };
        return capped(delta, pan_cap).map(|dx| WheelAction::Pan { dx, dy: 0.0 });
    }
    capped(input.delta_y, pan_cap).map(|dy| WheelAction::Pan { dx: 0.0, dy })
}

/// Scrolling down (positive delta) moves the content up.
fn capped(delta: f64, cap: f64) -> Option<f64> {
    if delta == 0.0 || !delta.is_finite() {
        return None;
    }
    Some(-delta.signum() * delta.abs().min(cap))
}

/// Apply a wheel event to the viewport and settle. Returns `None` when
/// the event did nothing.
pub fn apply_wheel(
    input: &WheelInput,
    viewport: &mut ViewportController,
    zoom_step: f64,
    pan_cap: f64,
) -> Option<SettleReport> {
    match wheel_action(input, zoom_step, pan_cap)? {
        WheelAction::Zoom { anchor, factor } => {
            viewport.zoom_at(anchor, factor);
        }
        WheelAction::Pan { dx, dy } => viewport.pan_by(dx, dy),
    }
    Some(viewport.settle())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimelineConfig;
    use paper_trails_protocol::Size;

    fn input(delta_x: f64, delta_y: f64) -> WheelInput {
        WheelInput {
            position: Point::new(200.0, 100.0),
            delta_x,
            delta_y,
            ..WheelInput::default()
        }
    }

    #[test]
    fn modifier_zooms_about_the_cursor() {
        let zoom_in = WheelInput {
            zoom_modifier: true,
            ..input(0.0, -3.0)
        };
        assert_eq!(
            wheel_action(&zoom_in, 0.1, 50.0),
            Some(WheelAction::Zoom {
                anchor: Point::new(200.0, 100.0),
                factor: 1.1
            })
        );
        let zoom_out = WheelInput {
            zoom_modifier: true,
            ..input(0.0, 120.0)
        };
        assert!(matches!(
            wheel_action(&zoom_out, 0.1, 50.0),
            Some(WheelAction::Zoom { factor, .. }) if (factor - 1.0 / 1.1).abs() < 1e-12
        ));
        let still = WheelInput {
            zoom_modifier: true,
            ..input(5.0, 0.0)
        };
        assert_eq!(wheel_action(&still, 0.1, 50.0), None);
    }

    #[test]
    fn pans_are_capped() {
        assert_eq!(
            wheel_action(&input(0.0, 400.0), 0.1, 50.0),
            Some(WheelAction::Pan { dx: 0.0, dy: -50.0 })
        );
        assert_eq!(
            wheel_action(&input(0.0, -12.0), 0.1, 50.0),
            Some(WheelAction::Pan { dx: 0.0, dy: 12.0 })
        );
        let shifted = WheelInput {
            shift: true,
            ..input(0.0, 80.0)
        };
        assert_eq!(
            wheel_action(&shifted, 0.1, 50.0),
            Some(WheelAction::Pan { dx: -50.0, dy: 0.0 })
        );
        let shifted_x = WheelInput {
            shift: true,
            ..input(-30.0, 80.0)
        };
        assert_eq!(
            wheel_action(&shifted_x, 0.1, 50.0),
            Some(WheelAction::Pan { dx: 30.0, dy: 0.0 })
        );
        assert_eq!(wheel_action(&input(0.0, 0.0), 0.1, 50.0), None);
    }

    #[test]
    fn applied_wheel_settles() {
        let mut vp = ViewportController::new(&TimelineConfig::default());
        vp.set_viewport_size(Size::new(800.0, 450.0));
        vp.set_content_size(Size::new(2400.0, 450.0));
        let shifted = WheelInput {
            shift: true,
            ..input(0.0, -100.0)
        };
        // Panning right at the left edge is clamped straight back.
        let report = apply_wheel(&shifted, &mut vp, 0.1, 50.0);
        assert_eq!(report.map(|r| r.transform.translate.x), Some(0.0));
        assert_eq!(apply_wheel(&input(0.0, 0.0), &mut vp, 0.1, 50.0), None);
    }
}

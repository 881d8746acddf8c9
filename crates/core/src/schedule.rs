//! Timer-free scheduling helpers.
//!
//! The host passes the current time (milliseconds, e.g. `performance.now()`)
//! and drives the polls from its own timers and animation frames.

use crate::viewport::ViewTransform;

/// Coalesces a burst of triggers into one firing `delay_ms` after the last.
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Arm the timer, replacing any pending deadline. Returns the deadline.
    pub fn trigger(&mut self, now: f64) -> f64 {
        let deadline = now + self.delay_ms;
        self.deadline = Some(deadline);
        deadline
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Holds the latest transform until the next animation frame paints it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaintQueue {
    pending: Option<ViewTransform>,
}

impl PaintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `transform`, replacing any unpainted one. Returns true when no
    /// frame was pending, i.e. the host must request an animation frame.
    pub fn request(&mut self, transform: ViewTransform) -> bool {
        self.pending.replace(transform).is_none()
    }

    /// Called from the animation frame: the transform to paint, if any.
    pub fn take(&mut self) -> Option<ViewTransform> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paper_trails_protocol::Point;

    #[test]
    fn debounce_fires_once_after_the_last_trigger() {
        let mut d = Debouncer::new(250.0);
        d.trigger(0.0);
        d.trigger(100.0);
        assert!(!d.poll(300.0));
        assert_eq!(d.deadline(), Some(350.0));
        assert!(d.poll(350.0));
        assert!(!d.poll(400.0));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_the_deadline() {
        let mut d = Debouncer::new(250.0);
        d.trigger(0.0);
        d.cancel();
        assert!(!d.poll(1000.0));
    }

    #[test]
    fn paints_coalesce_to_the_latest_transform() {
        let mut q = PaintQueue::new();
        let a = ViewTransform {
            translate: Point::new(-1.0, 0.0),
            scale: 1.0,
        };
        let b = ViewTransform {
            translate: Point::new(-2.0, 0.0),
            scale: 1.5,
        };
        assert!(q.request(a));
        assert!(!q.request(b));
        assert_eq!(q.take(), Some(b));
        assert_eq!(q.take(), None);
        assert!(q.request(a));
    }
}

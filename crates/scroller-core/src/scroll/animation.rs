//! Scroll animation controller
//!
//! Moves the document's vertical scroll offset to a target over a duration,
//! one host frame at a time. The horizontal offset is held where it was when
//! the animation started.

use std::time::Duration;

use tracing::{debug, trace, warn};

use super::timing::{elapsed, is_complete, lerp, progress};
use crate::host::{Document, FrameScheduler};

/// Callback fired once when an animation finishes
pub type OnComplete = Box<dyn FnOnce()>;

/// Outcome of driving the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No animation to drive
    Idle,
    /// Another frame has been requested
    Running,
    /// The animation reached its target and its callback has fired
    Complete,
}

/// Active scroll animation state
struct ActiveAnimation {
    /// Host timestamp when the animation started
    start: Duration,
    /// Starting vertical offset
    begin: f64,
    /// Target vertical offset
    target: f64,
    /// Horizontal offset kept for every write
    scroll_x: f64,
    duration: Duration,
    on_complete: OnComplete,
}

/// Frame-driven vertical scroll animator
///
/// `scroll_to` starts an animation and requests the first frame. The host
/// calls `on_frame` for every frame it delivers until `Step::Complete`.
/// Hosts without frame scheduling get an instant jump instead.
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    /// Added to every animated vertical write
    overshoot: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl std::fmt::Debug for ScrollAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollAnimator")
            .field("animating", &self.is_animating())
            .field("target", &self.target())
            .field("overshoot", &self.overshoot)
            .finish()
    }
}

impl ScrollAnimator {
    pub fn new(overshoot: f64) -> Self {
        Self {
            animation: None,
            overshoot,
        }
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Target of the active animation
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.target)
    }

    /// Start scrolling to `target` over `duration`.
    ///
    /// `on_complete` fires exactly once: synchronously when the host has no
    /// frame scheduling, otherwise on the final frame.
    pub fn scroll_to<H, F>(
        &mut self,
        host: &mut H,
        target: f64,
        duration: Duration,
        on_complete: F,
    ) -> Step
    where
        H: Document + FrameScheduler,
        F: FnOnce() + 'static,
    {
        if let Some(previous) = self.animation.take() {
            warn!(target_y = previous.target, "Animation superseded before finishing");
            (previous.on_complete)();
        }

        let offset = host.scroll_offset();

        let Some(frame) = host.request_frame() else {
            debug!(target_y = target, "No frame scheduling, jumping to target");
            host.set_scroll_offset(offset.x, target);
            on_complete();
            return Step::Complete;
        };

        debug!(
            from = offset.y,
            target_y = target,
            duration_ms = duration.as_millis() as u64,
            frame = frame.0,
            "Starting scroll animation"
        );
        self.animation = Some(ActiveAnimation {
            start: host.now(),
            begin: offset.y,
            target,
            scroll_x: offset.x,
            duration,
            on_complete: Box::new(on_complete),
        });
        Step::Running
    }

    /// Advance the animation for a frame delivered at `timestamp`
    pub fn on_frame<H>(&mut self, host: &mut H, timestamp: Duration) -> Step
    where
        H: Document + FrameScheduler,
    {
        let Some(anim) = self.animation.as_ref() else {
            return Step::Idle;
        };

        let passed = elapsed(anim.start, timestamp);
        // A zero delta still writes once, then completes
        let done = is_complete(passed, anim.duration) || anim.begin == anim.target;
        let t = if done { 1.0 } else { progress(passed, anim.duration) };
        let current = lerp(anim.begin, anim.target, t);

        trace!(elapsed_ms = passed.as_millis() as u64, current, "Scroll frame");
        host.set_scroll_offset(anim.scroll_x, current + self.overshoot);

        if done {
            self.finish();
            return Step::Complete;
        }

        if host.request_frame().is_none() {
            debug!("Frame scheduling lost mid-animation, jumping to target");
            host.set_scroll_offset(anim.scroll_x, anim.target);
            self.finish();
            return Step::Complete;
        }

        Step::Running
    }

    fn finish(&mut self) {
        if let Some(anim) = self.animation.take() {
            debug!(target_y = anim.target, "Scroll animation complete");
            (anim.on_complete)();
        }
    }
}

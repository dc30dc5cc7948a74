//! Host capabilities consumed by the region cache and the animator
//!
//! A browser binding implements these over the real DOM; `SimulatedPage`
//! implements them in memory.

use std::time::Duration;

/// Viewport-relative vertical geometry of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

/// Current document scroll position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Handle returned for a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Document geometry and scrolling
pub trait Document {
    /// Resolved element reference
    type Element;

    /// Single-element lookup by selector
    fn resolve_element(&self, selector: &str) -> Option<Self::Element>;

    /// Current viewport-relative geometry of `element`
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    fn scroll_offset(&self) -> ScrollOffset;

    /// Every measurement of the document height the host can report.
    /// Engines disagree on which one is right, so callers take the largest.
    fn document_height_candidates(&self) -> Vec<f64>;

    fn viewport_height(&self) -> f64;

    fn set_scroll_offset(&mut self, x: f64, y: f64);
}

/// Per-frame callback scheduling
pub trait FrameScheduler {
    /// Ask for one frame callback. `None` means the host cannot schedule frames.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Current timestamp on the same clock frames are delivered with
    fn now(&self) -> Duration;
}

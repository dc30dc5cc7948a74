//! In-memory page for tests and the command line player
//!
//! Elements carry an absolute document top and height. Frames are requested
//! into a counter and delivered by whoever drives the page, against a virtual
//! clock advanced by hand.

use std::cell::Cell;
use std::time::Duration;

use crate::dispatcher::Dispatcher;
use crate::host::{Document, FrameHandle, FrameScheduler, Rect, ScrollOffset};
use crate::region::area_selector;
use crate::scroll::Step;

/// Index of an element on a `SimulatedPage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone)]
struct SimElement {
    name: String,
    top: f64,
    height: f64,
}

#[derive(Debug, Clone)]
pub struct SimulatedPage {
    attribute: String,
    elements: Vec<SimElement>,
    viewport_height: f64,
    document_height: f64,
    extra_heights: Vec<f64>,
    scroll: ScrollOffset,
    frames_supported: bool,
    pending_frames: usize,
    next_frame: u64,
    clock: Duration,
    writes: Vec<ScrollOffset>,
    lookups: Cell<usize>,
    rect_reads: Cell<usize>,
}

impl SimulatedPage {
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        Self {
            attribute: "data-scroller-area".to_string(),
            elements: Vec::new(),
            viewport_height,
            document_height,
            extra_heights: Vec::new(),
            scroll: ScrollOffset::default(),
            frames_supported: true,
            pending_frames: 0,
            next_frame: 0,
            clock: Duration::ZERO,
            writes: Vec::new(),
            lookups: Cell::new(0),
            rect_reads: Cell::new(0),
        }
    }

    /// Attribute that region elements are tagged with
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn with_region(mut self, name: &str, top: f64, height: f64) -> Self {
        self.add_region(name, top, height);
        self
    }

    /// Additional document height measurements reported next to `document_height`
    pub fn with_height_candidates(mut self, heights: Vec<f64>) -> Self {
        self.extra_heights = heights;
        self
    }

    pub fn without_frames(mut self) -> Self {
        self.frames_supported = false;
        self
    }

    pub fn add_region(&mut self, name: &str, top: f64, height: f64) {
        self.elements.push(SimElement {
            name: name.to_string(),
            top,
            height,
        });
    }

    /// Move a region to a new absolute top, as a reflow would
    pub fn move_region(&mut self, name: &str, top: f64) -> bool {
        match self.elements.iter_mut().find(|e| e.name == name) {
            Some(element) => {
                element.top = top;
                true
            }
            None => false,
        }
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    pub fn set_document_height(&mut self, height: f64) {
        self.document_height = height;
    }

    pub fn set_frames_supported(&mut self, supported: bool) {
        self.frames_supported = supported;
    }

    /// Move the virtual clock forward and return the new time
    pub fn advance(&mut self, dt: Duration) -> Duration {
        self.clock += dt;
        self.clock
    }

    /// Consume one requested frame, if any
    pub fn take_frame(&mut self) -> bool {
        if self.pending_frames == 0 {
            return false;
        }
        self.pending_frames -= 1;
        true
    }

    pub fn pending_frames(&self) -> usize {
        self.pending_frames
    }

    /// Every scroll write in order
    pub fn writes(&self) -> &[ScrollOffset] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Number of element lookups performed
    pub fn lookup_count(&self) -> usize {
        self.lookups.get()
    }

    /// Number of bounding rect reads performed
    pub fn rect_reads(&self) -> usize {
        self.rect_reads.get()
    }
}

impl Document for SimulatedPage {
    type Element = ElementId;

    fn resolve_element(&self, selector: &str) -> Option<ElementId> {
        self.lookups.set(self.lookups.get() + 1);
        self.elements
            .iter()
            .position(|e| area_selector(&self.attribute, &e.name) == selector)
            .map(ElementId)
    }

    fn bounding_rect(&self, element: &ElementId) -> Rect {
        self.rect_reads.set(self.rect_reads.get() + 1);
        let (top, height) = self
            .elements
            .get(element.0)
            .map(|e| (e.top, e.height))
            .unwrap_or_default();
        Rect {
            top: top - self.scroll.y,
            bottom: top + height - self.scroll.y,
        }
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn document_height_candidates(&self) -> Vec<f64> {
        let mut heights = vec![self.document_height, self.viewport_height];
        heights.extend_from_slice(&self.extra_heights);
        heights
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn set_scroll_offset(&mut self, x: f64, y: f64) {
        let max_y = (self.document_height - self.viewport_height).max(0.0);
        self.scroll = ScrollOffset {
            x,
            y: y.clamp(0.0, max_y),
        };
        self.writes.push(ScrollOffset { x, y });
    }
}

impl FrameScheduler for SimulatedPage {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if !self.frames_supported {
            return None;
        }
        self.pending_frames += 1;
        self.next_frame += 1;
        Some(FrameHandle(self.next_frame))
    }

    fn now(&self) -> Duration {
        self.clock
    }
}

impl Dispatcher<SimulatedPage> {
    /// Deliver requested frames `interval` apart until none are pending.
    /// Returns the number of frames delivered.
    pub fn run_frames(&mut self, interval: Duration) -> usize {
        let mut frames = 0;
        while self.host_mut().take_frame() {
            let now = self.host_mut().advance(interval);
            frames += 1;
            if self.on_frame(now) == Step::Idle {
                break;
            }
        }
        frames
    }
}

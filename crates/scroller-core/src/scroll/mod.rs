//! Smooth scrolling to a vertical offset
//!
//! - `timing` - Time calculation utilities (elapsed, progress, interpolation)
//! - `animation` - Frame-driven animator built on `timing`
//!
//! # Usage
//!
//! ```ignore
//! use scroller_core::scroll::{ScrollAnimator, Step};
//!
//! let mut animator = ScrollAnimator::new(1.0);
//! animator.scroll_to(&mut host, 900.0, Duration::from_millis(500), || {});
//!
//! // When the host delivers the requested frame
//! while let Step::Running = animator.on_frame(&mut host, timestamp) { /* wait for next frame */ }
//! ```

pub mod animation;
pub mod timing;

pub use animation::{ScrollAnimator, Step};

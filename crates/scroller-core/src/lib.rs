pub mod config;
pub mod dispatcher;
pub mod duration;
pub mod error;
pub mod host;
pub mod page;
pub mod region;
pub mod scroll;

pub use config::ScrollerConfig;
pub use dispatcher::{Activation, Dispatcher};
pub use duration::parse_duration;
pub use error::{Error, Result};
pub use host::{Document, FrameHandle, FrameScheduler, Rect, ScrollOffset};
pub use page::{ElementId, SimulatedPage};
pub use region::{Coordinate, Region, RegionCache};
pub use scroll::{ScrollAnimator, Step};

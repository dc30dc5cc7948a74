//! Activation entry point for scroll triggers
//!
//! A dispatcher owns one host, one region cache and one animator. Triggers
//! that arrive while an animation runs are dropped, not queued.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ScrollerConfig;
use crate::duration::parse_duration;
use crate::host::{Document, FrameScheduler};
use crate::region::RegionCache;
use crate::scroll::{ScrollAnimator, Step};
use crate::{Error, Result};

/// Outcome of an activation request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    /// Animation started, frames are pending
    Started { target: f64, duration: Duration },
    /// Host had no frame scheduling and jumped straight to the target
    Completed { target: f64 },
    /// Another animation is still running
    Suppressed,
    /// The region has no element on the page
    Unresolved,
}

/// "Animation in progress" guard shared with the completion callback
#[derive(Debug, Clone, Default)]
struct SingleFlight(Rc<Cell<bool>>);

impl SingleFlight {
    fn is_held(&self) -> bool {
        self.0.get()
    }

    fn acquire(&self) {
        self.0.set(true);
    }

    fn release(&self) {
        self.0.set(false);
    }
}

pub struct Dispatcher<H: Document> {
    host: H,
    config: ScrollerConfig,
    cache: RegionCache<H::Element>,
    animator: ScrollAnimator,
    running: SingleFlight,
}

impl<H> Dispatcher<H>
where
    H: Document + FrameScheduler,
{
    pub fn new(host: H, config: ScrollerConfig) -> Self {
        Self {
            cache: RegionCache::new(config.attribute_area.clone()),
            animator: ScrollAnimator::new(config.overshoot_px),
            running: SingleFlight::default(),
            host,
            config,
        }
    }

    /// Scroll to region `name`.
    ///
    /// `raw_duration` is the trigger's duration override in milliseconds;
    /// missing or invalid values use `default`.
    pub fn activate(
        &mut self,
        name: &str,
        raw_duration: Option<&str>,
        default: Duration,
    ) -> Result<Activation> {
        if self.running.is_held() {
            debug!(region = name, "Animation in progress, dropping trigger");
            return Ok(Activation::Suppressed);
        }

        self.cache.resolve(name, &self.host);
        match self.cache.ensure_coordinate(name, &self.host) {
            Ok(()) => {}
            Err(Error::RegionNotFound(_)) => {
                warn!(region = name, "No element for region, ignoring trigger");
                return Ok(Activation::Unresolved);
            }
            Err(e) => return Err(e),
        }

        let target = self.cache.get_coordinate(name)?;
        let duration = parse_duration(raw_duration, default);

        self.running.acquire();
        let guard = self.running.clone();
        let step = self
            .animator
            .scroll_to(&mut self.host, target, duration, move || guard.release());

        match step {
            Step::Complete => Ok(Activation::Completed { target }),
            _ => Ok(Activation::Started { target, duration }),
        }
    }

    /// `activate` with the configured default duration
    pub fn trigger(&mut self, name: &str, raw_duration: Option<&str>) -> Result<Activation> {
        let default = self.config.default_duration();
        self.activate(name, raw_duration, default)
    }

    /// Deliver a frame the host scheduled earlier
    pub fn on_frame(&mut self, timestamp: Duration) -> Step {
        self.animator.on_frame(&mut self.host, timestamp)
    }

    /// Report that the viewport geometry may have changed
    pub fn notify_resized(&mut self) {
        self.cache.notify_resized();
    }

    /// Set the resize flag from a raw host value.
    /// Only `"true"` and `"false"` are accepted; anything else leaves the flag untouched.
    pub fn set_resized_raw(&mut self, raw: &str) -> Result<()> {
        match raw.trim() {
            "true" => self.cache.set_resized(true),
            "false" => self.cache.set_resized(false),
            other => return Err(Error::InvalidResizeState(other.to_string())),
        }
        Ok(())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_held()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    pub fn cache(&self) -> &RegionCache<H::Element> {
        &self.cache
    }

    /// Resolve and measure `name` without scrolling
    pub fn locate(&mut self, name: &str) -> Result<f64> {
        self.cache.resolve(name, &self.host);
        self.cache.ensure_coordinate(name, &self.host)?;
        self.cache.get_coordinate(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SimulatedPage;

    const FRAME: Duration = Duration::from_millis(16);

    fn dispatcher(page: SimulatedPage) -> Dispatcher<SimulatedPage> {
        Dispatcher::new(page, ScrollerConfig::default())
    }

    fn landing() -> SimulatedPage {
        // max scroll offset = 1500 - 600 = 900
        SimulatedPage::new(600.0, 1500.0)
            .with_region("intro", 200.0, 300.0)
            .with_region("pricing", 1200.0, 200.0)
    }

    #[test]
    fn test_activate_clamps_and_animates() {
        let mut d = dispatcher(landing());

        let activation = d.trigger("pricing", None).unwrap();
        assert_eq!(
            activation,
            Activation::Started {
                target: 900.0,
                duration: Duration::from_millis(500)
            }
        );
        assert!(d.is_running());

        let frames = d.run_frames(FRAME);
        assert_eq!(frames, 32);
        assert!(!d.is_running());
        assert_eq!(d.host().writes().last().unwrap().y, 901.0);
    }

    #[test]
    fn test_overlapping_trigger_is_dropped() {
        let mut d = dispatcher(landing());

        d.trigger("pricing", Some("100")).unwrap();
        assert!(d.host_mut().take_frame());
        let now = d.host_mut().advance(FRAME);
        d.on_frame(now);
        let writes = d.host().writes().len();

        assert_eq!(d.trigger("intro", None).unwrap(), Activation::Suppressed);
        assert_eq!(d.host().writes().len(), writes);
        // The dropped trigger never reached the cache
        assert!(d.cache().region("intro").is_none());
        assert_eq!(d.host().pending_frames(), 1);

        d.run_frames(FRAME);
        assert!(!d.is_running());
        assert!(matches!(
            d.trigger("intro", None).unwrap(),
            Activation::Started { target, .. } if target == 200.0
        ));
    }

    #[test]
    fn test_unresolved_region_is_inert() {
        let mut d = dispatcher(landing());

        assert_eq!(d.trigger("faq", None).unwrap(), Activation::Unresolved);
        assert!(!d.is_running());
        assert!(d.host().writes().is_empty());
        assert_eq!(d.host().pending_frames(), 0);

        // Cached as unresolved: no second lookup
        d.trigger("faq", None).unwrap();
        assert_eq!(d.host().lookup_count(), 1);
    }

    #[test]
    fn test_without_frames_completes_synchronously() {
        let mut d = dispatcher(landing().without_frames());

        assert_eq!(
            d.trigger("intro", None).unwrap(),
            Activation::Completed { target: 200.0 }
        );
        assert!(!d.is_running());
        assert_eq!(d.host().writes().len(), 1);
        assert_eq!(d.host().writes()[0].y, 200.0);

        // Guard was released, so the next trigger goes through
        assert_eq!(
            d.trigger("pricing", None).unwrap(),
            Activation::Completed { target: 900.0 }
        );
    }

    #[test]
    fn test_duration_overrides() {
        let mut d = dispatcher(landing());

        let activation = d.activate("intro", Some("0"), Duration::from_millis(10000)).unwrap();
        assert_eq!(
            activation,
            Activation::Started {
                target: 200.0,
                duration: Duration::ZERO
            }
        );
        assert_eq!(d.run_frames(FRAME), 1);
        assert_eq!(d.host().writes().len(), 1);

        let activation = d
            .activate("pricing", Some("tumba-umba"), Duration::from_millis(10000))
            .unwrap();
        assert!(matches!(
            activation,
            Activation::Started { duration, .. } if duration == Duration::from_millis(10000)
        ));
    }

    #[test]
    fn test_resize_recomputes_on_next_trigger() {
        let mut d = dispatcher(landing().without_frames());
        d.trigger("intro", None).unwrap();
        d.locate("pricing").unwrap();

        d.host_mut().move_region("intro", 250.0);
        d.host_mut().move_region("pricing", 700.0);

        // Not reported yet: cached coordinate is used
        assert_eq!(
            d.trigger("intro", None).unwrap(),
            Activation::Completed { target: 200.0 }
        );

        d.notify_resized();
        d.notify_resized();
        assert!(d.cache().is_resized());
        assert_eq!(
            d.trigger("intro", None).unwrap(),
            Activation::Completed { target: 250.0 }
        );
        assert!(!d.cache().is_resized());
        assert_eq!(
            d.cache().region("pricing").unwrap().coordinate().unwrap().top,
            700.0
        );
    }

    #[test]
    fn test_raw_resize_state() {
        let mut d = dispatcher(landing());

        d.set_resized_raw("true").unwrap();
        assert!(d.cache().is_resized());
        d.set_resized_raw("false").unwrap();
        assert!(!d.cache().is_resized());

        d.notify_resized();
        let err = d.set_resized_raw("maybe").unwrap_err();
        assert!(matches!(err, Error::InvalidResizeState(ref raw) if raw == "maybe"));
        assert!(d.cache().is_resized());
    }

    #[test]
    fn test_dispatchers_do_not_share_guard() {
        let mut first = dispatcher(landing());
        let mut second = dispatcher(landing());

        first.trigger("pricing", None).unwrap();
        assert!(first.is_running());
        assert!(!second.is_running());
        assert!(matches!(
            second.trigger("pricing", None).unwrap(),
            Activation::Started { .. }
        ));
    }

    #[test]
    fn test_custom_area_attribute_from_config() {
        let config = ScrollerConfig {
            attribute_area: "data-section".to_string(),
            ..Default::default()
        };
        let page = landing().with_attribute("data-section");
        let mut d = Dispatcher::new(page, config);

        assert!(matches!(d.trigger("intro", None).unwrap(), Activation::Started { .. }));
    }
}

//! Time calculation utilities for scroll animations
//!
//! Timestamps are host clock readings measured from the host's origin.

use std::time::Duration;

/// Time passed between `start` and `now`, zero if the clock went backwards
#[inline]
pub fn elapsed(start: Duration, now: Duration) -> Duration {
    now.saturating_sub(start)
}

/// Check if an animation of `duration` is complete after `elapsed`
#[inline]
pub fn is_complete(elapsed: Duration, duration: Duration) -> bool {
    elapsed >= duration
}

/// Calculate animation progress (0.0 to 1.0)
///
/// A zero duration is always fully progressed.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    elapsed.min(duration).as_nanos() as f64 / duration.as_nanos() as f64
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
        assert!((lerp(400.0, 100.0, 0.5) - 250.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(Duration::ZERO, Duration::ZERO) - 1.0).abs() < 0.001);
        assert!((progress(Duration::from_millis(30), Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_caps_at_one() {
        let duration = Duration::from_millis(200);
        assert!((progress(Duration::from_millis(50), duration) - 0.25).abs() < 0.001);
        assert!((progress(Duration::from_millis(900), duration) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_elapsed_saturates() {
        let start = Duration::from_millis(100);
        assert_eq!(elapsed(start, Duration::from_millis(40)), Duration::ZERO);
        assert_eq!(elapsed(start, Duration::from_millis(140)), Duration::from_millis(40));
    }

    #[test]
    fn test_is_complete() {
        let duration = Duration::from_millis(100);
        assert!(!is_complete(Duration::from_millis(99), duration));
        assert!(is_complete(Duration::from_millis(100), duration));
        assert!(is_complete(Duration::ZERO, Duration::ZERO));
    }
}

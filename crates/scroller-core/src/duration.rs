//! Duration overrides attached to scroll triggers

use std::time::Duration;

use tracing::debug;

/// Parse a millisecond duration override, falling back to `default`.
///
/// Absent, empty, non-numeric, non-finite and out-of-range values fall back.
/// Whitespace-only and negative values mean an instant scroll, like `"0"`.
pub fn parse_duration(raw: Option<&str>, default: Duration) -> Duration {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return default;
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Duration::ZERO;
    }

    let parsed = raw
        .parse::<f64>()
        .ok()
        .filter(|ms| ms.is_finite())
        .and_then(|ms| Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).ok());

    parsed.unwrap_or_else(|| {
        debug!(raw, "Invalid duration override, using default");
        default
    })
}

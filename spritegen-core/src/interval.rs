//! Adaptive sampling interval selection.
//!
//! When no explicit interval is configured, the interval is chosen from the
//! video's total duration: short videos are sampled densely for fine
//! scrubbing granularity, long videos coarsely to bound the total thumbnail
//! count.

use crate::VideoMetadata;
use crate::config::SpriteConfig;

/// Duration bands for adaptive interval selection.
///
/// Each entry is `(duration_upper_bound_secs, interval_secs)`; the first
/// band whose (exclusive) upper bound exceeds the video duration wins. The
/// final band is open-ended.
const INTERVAL_BANDS: [(f64, f64); 10] = [
    (120.0, 1.0),
    (300.0, 2.0),
    (600.0, 3.0),
    (1800.0, 4.0),
    (3600.0, 5.0),
    (7200.0, 10.0),
    (9200.0, 15.0),
    (10800.0, 30.0),
    (21600.0, 60.0),
    (f64::INFINITY, 120.0),
];

/// Resolves the sampling interval for a run.
///
/// An explicit positive interval from the configuration always wins;
/// otherwise the interval is selected from [`INTERVAL_BANDS`] using the
/// video's total duration. Pure function of its inputs.
#[must_use]
pub fn select_interval(config: &SpriteConfig, metadata: &VideoMetadata) -> f64 {
    if let Some(interval) = config.interval {
        if interval > 0.0 {
            return interval;
        }
    }
    select_interval_for_duration(metadata.duration_seconds)
}

/// Selects the adaptive interval for a duration, ignoring any override.
#[must_use]
pub fn select_interval_for_duration(duration_seconds: f64) -> f64 {
    for (upper_bound, interval) in INTERVAL_BANDS {
        if duration_seconds < upper_bound {
            return interval;
        }
    }
    // Unreachable: the last band is open-ended, but keep the compiler happy
    // for NaN inputs.
    INTERVAL_BANDS[INTERVAL_BANDS.len() - 1].1
}

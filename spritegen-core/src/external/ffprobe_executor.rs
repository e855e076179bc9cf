//! FFprobe integration for media analysis
//!
//! This module provides the probing side of the external media engine:
//! duration and frame rate extraction via the `ffprobe` crate, behind a
//! trait so tests can substitute canned results. Probe results are raw;
//! fallback defaults are applied by the generator, not here.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Raw probe result for a media resource.
///
/// Either field may be absent when the corresponding stream data is missing
/// or unparseable; deciding what to do about that is the caller's job.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MediaProbe {
    /// Container duration in seconds.
    pub duration_seconds: Option<f64>,
    /// Video frame rate as a (numerator, denominator) fraction.
    pub frame_rate: Option<(u32, u32)>,
}

impl MediaProbe {
    /// Rounded frames per second, when a frame rate was probed. Clamped to
    /// at least 1 so sub-1fps sources still yield a positive rate.
    #[must_use]
    pub fn rounded_frame_rate(&self) -> Option<u32> {
        self.frame_rate.map(|(numerator, denominator)| {
            let rounded = (f64::from(numerator) / f64::from(denominator)).round();
            if rounded >= 1.0 { rounded as u32 } else { 1 }
        })
    }
}

/// Trait for probing media resources.
pub trait FfprobeExecutor {
    /// Probes `input_path` for duration and frame rate.
    fn probe(&self, input_path: &Path) -> CoreResult<MediaProbe>;
}

/// Concrete implementation of [`FfprobeExecutor`] using the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaProbe> {
        log::debug!(
            "Running ffprobe (via crate) for media info on: {}",
            input_path.display()
        );
        match ffprobe(input_path) {
            Ok(metadata) => {
                let duration_seconds = metadata
                    .format
                    .duration
                    .as_deref()
                    .and_then(|d| d.parse::<f64>().ok());

                // Prefer the declared video stream; fall back to the first
                // stream when codec types are missing.
                let video_stream = metadata
                    .streams
                    .iter()
                    .find(|s| s.codec_type.as_deref() == Some("video"))
                    .or_else(|| metadata.streams.first());

                let frame_rate = video_stream.and_then(|stream| {
                    parse_frame_rate_fraction(&stream.r_frame_rate)
                        .or_else(|| parse_frame_rate_fraction(&stream.avg_frame_rate))
                });

                Ok(MediaProbe {
                    duration_seconds,
                    frame_rate,
                })
            }
            Err(err) => {
                log::warn!("ffprobe failed for {}: {err:?}", input_path.display());
                Err(map_ffprobe_error(err, input_path))
            }
        }
    }
}

/// Parses a frame rate fraction string (e.g. "30000/1001" or "24/1") into a
/// (numerator, denominator) pair. Returns `None` for malformed fractions or
/// a zero denominator or numerator.
fn parse_frame_rate_fraction(rate: &str) -> Option<(u32, u32)> {
    let (num_str, den_str) = rate.split_once('/')?;
    let numerator: u32 = num_str.trim().parse().ok()?;
    let denominator: u32 = den_str.trim().parse().ok()?;
    if numerator == 0 || denominator == 0 {
        return None;
    }
    Some((numerator, denominator))
}

fn map_ffprobe_error(err: FfProbeError, input_path: &Path) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => {
            command_start_error(format!("ffprobe ({})", input_path.display()), io_err)
        }
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(
                format!("ffprobe ({})", input_path.display()),
                output.status,
                stderr,
            )
        }
        FfProbeError::Deserialize(err) => CoreError::FfprobeParse(format!(
            "ffprobe output deserialization for {}: {err}",
            input_path.display()
        )),
        _ => CoreError::FfprobeParse(format!(
            "Unknown ffprobe error for {}: {err:?}",
            input_path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_frame_rate() {
        let probe = |frame_rate| MediaProbe {
            duration_seconds: None,
            frame_rate,
        };
        assert_eq!(probe(Some((24, 1))).rounded_frame_rate(), Some(24));
        assert_eq!(probe(Some((30000, 1001))).rounded_frame_rate(), Some(30));
        assert_eq!(probe(Some((24000, 1001))).rounded_frame_rate(), Some(24));
        assert_eq!(probe(Some((1, 10))).rounded_frame_rate(), Some(1));
        assert_eq!(probe(None).rounded_frame_rate(), None);
    }

    #[test]
    fn test_parse_frame_rate_fraction() {
        assert_eq!(parse_frame_rate_fraction("24/1"), Some((24, 1)));
        assert_eq!(parse_frame_rate_fraction("30000/1001"), Some((30000, 1001)));
        assert_eq!(parse_frame_rate_fraction("0/0"), None);
        assert_eq!(parse_frame_rate_fraction("30/0"), None);
        assert_eq!(parse_frame_rate_fraction("0/1"), None);
        assert_eq!(parse_frame_rate_fraction(""), None);
        assert_eq!(parse_frame_rate_fraction("30"), None);
        assert_eq!(parse_frame_rate_fraction("a/b"), None);
    }
}

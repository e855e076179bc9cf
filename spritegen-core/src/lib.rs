//! Core library for generating scrubbing-preview sprite sheets and WebVTT
//! cue files using ffmpeg and ffprobe.
//!
//! This crate probes a source video, plans a grid layout of evenly spaced
//! thumbnail samples, drives a single ffmpeg select/scale/tile extraction,
//! and optionally emits a WebVTT cue sheet mapping time ranges to pixel
//! rectangles inside the produced sheets.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use spritegen_core::{SpriteConfig, SpriteGenerator, WebVttConfig};
//! use std::path::PathBuf;
//!
//! let mut config = SpriteConfig::new("movie.mp4", "previews");
//! config.multi_sheet = true;
//! config.webvtt = Some(WebVttConfig {
//!     output: PathBuf::from("previews/thumbs.vtt"),
//! });
//! config.validate().unwrap();
//!
//! let summary = SpriteGenerator::new(config).run().unwrap();
//! println!(
//!     "{} samples across {} sheet(s)",
//!     summary.plan.total_samples, summary.plan.sheet_count
//! );
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod external;
pub mod generator;
pub mod interval;
pub mod layout;
pub mod utils;
pub mod vtt;

// Re-exports for public API
pub use config::{SpriteConfig, WebVttConfig};
pub use error::{CoreError, CoreResult};
pub use generator::{GenerationState, GenerationSummary, SpriteGenerator};
pub use interval::select_interval;
pub use layout::{SamplePlan, SampleSlot};
pub use utils::{format_duration, parse_ffmpeg_time};
pub use vtt::{format_timestamp, render_cue_sheet, write_cue_sheet};

/// Stream metadata a run is planned against.
///
/// Fetched once per generation run from the prober (with fallbacks applied
/// by the generator) and immutable thereafter; never cached across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    /// Total duration in seconds; 0.0 when the prober could not tell.
    pub duration_seconds: f64,
    /// Rounded video frame rate in frames per second.
    pub frame_rate: u32,
}

// ============================================================================
// spritegen-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration surface for a sprite generation run.
// A SpriteConfig is created by the consumer of the library (like
// spritegen-cli), validated once, and passed to the SpriteGenerator. All
// defaults are resolved at construction time and never re-derived mid-run.
//
// KEY COMPONENTS:
// - SpriteConfig: Main configuration structure for a generation run
// - WebVttConfig: Optional cue sheet output settings
// - Default constants: Predefined values for grid shape and tile size

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default number of thumbnail rows per sprite sheet.
/// Only authoritative in multi-sheet mode; single-sheet mode derives the row
/// count from the total sample count instead.
pub const DEFAULT_ROW_COUNT: u32 = 5;

/// Default number of thumbnail columns per sprite sheet.
pub const DEFAULT_COL_COUNT: u32 = 5;

/// Default width of a single thumbnail tile in pixels.
pub const DEFAULT_TILE_WIDTH: u32 = 160;

/// Default height of a single thumbnail tile in pixels.
pub const DEFAULT_TILE_HEIGHT: u32 = 90;

/// Default basename prefix for generated sheet files (thumbs-01.jpg, ...).
pub const DEFAULT_FILENAME_PREFIX: &str = "thumbs";

/// Frame rate assumed when ffprobe cannot determine one.
pub const DEFAULT_FRAME_RATE: u32 = 24;

/// Default wall-clock deadline for the extraction step, in seconds.
/// An ffmpeg run that exceeds this is killed and the run fails; set
/// `extraction_timeout` to `None` to wait indefinitely.
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 3600;

/// File extension of generated sprite sheets.
pub const SHEET_EXTENSION: &str = "jpg";

/// Required file extension for the cue sheet output path.
pub const VTT_EXTENSION: &str = "vtt";

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Cue sheet (WebVTT) output settings.
///
/// Present on a [`SpriteConfig`] only when cue generation was requested;
/// the output path must carry the `.vtt` extension.
#[derive(Debug, Clone)]
pub struct WebVttConfig {
    /// Path the rendered cue sheet is written to.
    pub output: PathBuf,
}

/// Main configuration structure for a sprite generation run.
///
/// Created by the consumer of the library and passed to
/// [`crate::generator::SpriteGenerator`]. Call [`SpriteConfig::validate`]
/// before starting a run; an invalid combination of inputs is surfaced
/// immediately as [`CoreError::Config`] and no run is attempted.
#[derive(Debug, Clone)]
pub struct SpriteConfig {
    /// Path or URI of the source video (file or streaming manifest).
    pub input_path: PathBuf,
    /// Directory receiving the numbered sheet images; created if absent.
    pub output_dir: PathBuf,
    /// Rows per sheet (fixed grid in multi-sheet mode).
    pub row_count: u32,
    /// Columns per sheet.
    pub col_count: u32,
    /// Width of each thumbnail tile in pixels.
    pub tile_width: u32,
    /// Height of each thumbnail tile in pixels.
    pub tile_height: u32,
    /// Explicit sampling interval in seconds; `None` selects adaptively
    /// from the video duration.
    pub interval: Option<f64>,
    /// Fixed-grid mode that spills into additional sheets once full.
    pub multi_sheet: bool,
    /// Basename prefix for sheet files and cue references.
    pub filename_prefix: String,
    /// Cue sheet output settings; `None` disables cue generation.
    pub webvtt: Option<WebVttConfig>,
    /// Emit one extra trailing sample slot past the floor boundary,
    /// reproducing the inclusive loop bound of earlier revisions of this
    /// layout logic.
    pub include_boundary_sample: bool,
    /// Wall-clock deadline for the extraction step; `None` disables it.
    pub extraction_timeout: Option<Duration>,
}

impl SpriteConfig {
    /// Creates a configuration with the documented defaults for everything
    /// except the mandatory input and output paths.
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input_path: I, output_dir: O) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            row_count: DEFAULT_ROW_COUNT,
            col_count: DEFAULT_COL_COUNT,
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            interval: None,
            multi_sheet: false,
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            webvtt: None,
            include_boundary_sample: false,
            extraction_timeout: Some(Duration::from_secs(DEFAULT_EXTRACTION_TIMEOUT_SECS)),
        }
    }

    /// Validates the configured values as a whole.
    ///
    /// Checks performed:
    /// - grid dimensions and tile dimensions must be non-zero
    /// - an explicit interval must be positive and finite
    /// - the filename prefix must be non-empty
    /// - a cue output path, when present, must carry the `.vtt` extension
    pub fn validate(&self) -> CoreResult<()> {
        if self.row_count == 0 || self.col_count == 0 {
            return Err(CoreError::Config(format!(
                "grid dimensions must be at least 1x1 (got {}x{})",
                self.row_count, self.col_count
            )));
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(CoreError::Config(format!(
                "tile dimensions must be at least 1x1 pixels (got {}x{})",
                self.tile_width, self.tile_height
            )));
        }
        if let Some(interval) = self.interval {
            if !interval.is_finite() || interval <= 0.0 {
                return Err(CoreError::Config(format!(
                    "sampling interval must be a positive number of seconds (got {interval})"
                )));
            }
        }
        if self.filename_prefix.is_empty() {
            return Err(CoreError::Config(
                "filename prefix must not be empty".to_string(),
            ));
        }
        if let Some(webvtt) = &self.webvtt {
            let has_vtt_extension = webvtt
                .output
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(VTT_EXTENSION));
            if !has_vtt_extension {
                return Err(CoreError::Config(format!(
                    "cue sheet output '{}' must have a .{} extension",
                    webvtt.output.display(),
                    VTT_EXTENSION
                )));
            }
        }
        Ok(())
    }
}

//! FFmpeg command construction for sprite extraction
//!
//! Builds the single extraction request a generation run hands to ffmpeg:
//! "keep every STEP-th frame, scale each to the tile size, tile them into a
//! CxR grid, write numbered JPEG sheets". The filter chain mirrors the
//! layout plan exactly; the cue emitter depends on that correspondence.

use crate::config::{SHEET_EXTENSION, SpriteConfig};
use crate::layout::SamplePlan;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::{Path, PathBuf};

/// Builder for constructing video filter chains
#[derive(Debug, Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    /// Creates a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter to the chain
    #[must_use]
    pub fn add_filter(mut self, filter: String) -> Self {
        if !filter.is_empty() {
            self.filters.push(filter);
        }
        self
    }

    /// Builds the filter chain into a single filter string
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

/// Builds the select/scale/tile filter expression for a plan.
///
/// `STEP = round(fps × interval)`, clamped to at least 1 so a sub-frame
/// interval still selects every frame. The tile row count is clamped to at
/// least 1 to keep the engine request well-formed for degenerate plans
/// shorter than one grid row.
#[must_use]
pub fn sprite_filter(plan: &SamplePlan, frame_rate: u32) -> String {
    let step = (f64::from(frame_rate) * plan.interval_seconds).round().max(1.0) as u64;
    let rows = plan.row_count.max(1);

    VideoFilterChain::new()
        .add_filter(format!("select='not(mod(n,{step}))'"))
        .add_filter(format!("scale={}:{}", plan.tile_width, plan.tile_height))
        .add_filter(format!("tile={}x{}", plan.col_count, rows))
        .build()
        .unwrap_or_default()
}

/// Output pattern for numbered sheet files: `<output_dir>/<prefix>-%02d.jpg`.
///
/// ffmpeg numbers image outputs from 1, and `%02d` widens naturally past 99,
/// which keeps produced filenames in lockstep with the cue emitter's
/// references at any sheet count.
#[must_use]
pub fn sheet_output_pattern(output_dir: &Path, prefix: &str) -> PathBuf {
    output_dir.join(format!("{prefix}-%02d.{SHEET_EXTENSION}"))
}

/// Assembles the complete ffmpeg extraction command for a run.
///
/// `-vsync vfr` drops the timestamps the select filter discarded and `-an`
/// suppresses audio; both match what the tiling filter expects.
#[must_use]
pub fn build_sprite_command(config: &SpriteConfig, filter: &str, output_pattern: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-hide_banner");
    cmd.input(config.input_path.to_string_lossy().as_ref());
    cmd.arg("-filter_complex");
    cmd.arg(filter);
    cmd.args(["-vsync", "vfr"]);
    cmd.arg("-an");
    cmd.arg("-y");
    cmd.output(output_pattern.to_string_lossy().as_ref());
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VideoMetadata;
    use crate::layout;

    fn plan_for(config: &SpriteConfig, duration: f64) -> SamplePlan {
        layout::plan(
            config,
            &VideoMetadata {
                duration_seconds: duration,
                frame_rate: 24,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_filter_chain_joins_with_commas() {
        let chain = VideoFilterChain::new()
            .add_filter("a=1".to_string())
            .add_filter(String::new())
            .add_filter("b=2".to_string());
        assert_eq!(chain.build(), Some("a=1,b=2".to_string()));
        assert_eq!(VideoFilterChain::new().build(), None);
    }

    #[test]
    fn test_sprite_filter_single_sheet() {
        // 100s at 1s interval on 5 columns: 100 samples, 20 derived rows.
        let config = SpriteConfig::new("in.mp4", "out");
        let plan = plan_for(&config, 100.0);
        assert_eq!(
            sprite_filter(&plan, 24),
            "select='not(mod(n,24))',scale=160:90,tile=5x20"
        );
    }

    #[test]
    fn test_sprite_filter_multi_sheet_uses_configured_grid() {
        let mut config = SpriteConfig::new("in.mp4", "out");
        config.multi_sheet = true;
        config.interval = Some(10.0);
        let plan = plan_for(&config, 50.0);
        assert_eq!(
            sprite_filter(&plan, 30),
            "select='not(mod(n,300))',scale=160:90,tile=5x5"
        );
    }

    #[test]
    fn test_sprite_filter_step_rounds_and_clamps() {
        let mut config = SpriteConfig::new("in.mp4", "out");
        config.interval = Some(2.5);
        let plan = plan_for(&config, 100.0);
        // 29.97-style rate: 24 fps here, 24 * 2.5 = 60.
        assert_eq!(
            sprite_filter(&plan, 24),
            "select='not(mod(n,60))',scale=160:90,tile=5x8"
        );

        // A sub-frame interval never produces a zero step.
        config.interval = Some(0.01);
        let plan = plan_for(&config, 1.0);
        assert!(sprite_filter(&plan, 24).starts_with("select='not(mod(n,1))'"));
    }

    #[test]
    fn test_sheet_output_pattern() {
        let pattern = sheet_output_pattern(Path::new("/tmp/out"), "thumbs");
        assert_eq!(pattern, PathBuf::from("/tmp/out/thumbs-%02d.jpg"));
    }
}

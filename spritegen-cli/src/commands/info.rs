//! Implementation of the 'info' subcommand.
//!
//! Probes a video and prints the metadata plus the layout a generation run
//! with the same arguments would use, without touching ffmpeg.

use crate::cli::InfoArgs;
use crate::error::CliResult;
use crate::output::{print_heading, print_info, print_section, print_warning};

use spritegen_core::VideoMetadata;
use spritegen_core::config::{DEFAULT_FRAME_RATE, SpriteConfig};
use spritegen_core::external::check_dependency;
use spritegen_core::external::ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor};
use spritegen_core::format_duration;
use spritegen_core::layout;

pub fn run_info(args: InfoArgs) -> CliResult<()> {
    check_dependency("ffprobe")?;

    print_heading("Video Information");
    print_info("Input", args.input_path.display());

    let probe = CrateFfprobeExecutor::new().probe(&args.input_path)?;

    let duration_seconds = match probe.duration_seconds {
        Some(duration) => {
            print_info("Duration", format_duration(duration));
            duration
        }
        None => {
            print_warning("Duration could not be determined");
            0.0
        }
    };
    let frame_rate = match probe.rounded_frame_rate() {
        Some(fps) => {
            print_info("Frame rate", format!("{fps} fps"));
            fps
        }
        None => {
            print_warning(&format!(
                "Frame rate could not be determined; assuming {DEFAULT_FRAME_RATE} fps"
            ));
            DEFAULT_FRAME_RATE
        }
    };

    // Plan with the same rules the generate command would apply.
    let mut config = SpriteConfig::new(&args.input_path, ".");
    config.interval = args.interval;
    config.multi_sheet = args.multi_sheet;
    if let Some(rows) = args.rows {
        config.row_count = rows;
    }
    if let Some(cols) = args.cols {
        config.col_count = cols;
    }
    config.validate()?;

    let metadata = VideoMetadata {
        duration_seconds,
        frame_rate,
    };
    let plan = layout::plan(&config, &metadata)?;

    print_section("Planned Layout");
    print_info("Sampling interval", format!("{}s", plan.interval_seconds));
    print_info("Thumbnails", plan.total_samples);
    print_info("Sheets", plan.sheet_count);
    print_info(
        "Grid",
        format!("{} cols x {} rows", plan.col_count, plan.row_count),
    );
    print_info(
        "Tile size",
        format!("{}x{} px", plan.tile_width, plan.tile_height),
    );

    Ok(())
}

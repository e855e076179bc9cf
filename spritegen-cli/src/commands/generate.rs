//! Implementation of the 'generate' subcommand.
//!
//! Builds a core configuration from the CLI arguments, wires up progress
//! rendering, and delegates the run to spritegen-core.

use crate::cli::GenerateArgs;
use crate::error::CliResult;
use crate::output::{print_heading, print_info, print_success};
use crate::progress::ConsoleProgressHandler;

use spritegen_core::config::{SpriteConfig, WebVttConfig};
use spritegen_core::events::json_handler::JsonProgressHandler;
use spritegen_core::external::check_dependency;
use spritegen_core::generator::SpriteGenerator;

use std::sync::Arc;
use std::time::Duration;

use log::debug;

/// Builds the core configuration from the parsed arguments.
fn build_config(args: &GenerateArgs) -> SpriteConfig {
    let mut config = SpriteConfig::new(&args.input_path, &args.output_dir);
    if let Some(rows) = args.rows {
        config.row_count = rows;
    }
    if let Some(cols) = args.cols {
        config.col_count = cols;
    }
    if let Some(width) = args.tile_width {
        config.tile_width = width;
    }
    if let Some(height) = args.tile_height {
        config.tile_height = height;
    }
    config.interval = args.interval;
    config.multi_sheet = args.multi_sheet;
    if let Some(prefix) = &args.prefix {
        config.filename_prefix = prefix.clone();
    }
    config.webvtt = args
        .vtt
        .as_ref()
        .map(|output| WebVttConfig {
            output: output.clone(),
        });
    if let Some(timeout) = args.timeout {
        config.extraction_timeout = if timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(timeout))
        };
    }
    config.include_boundary_sample = args.boundary_sample;
    config
}

pub fn run_generate(args: GenerateArgs) -> CliResult<()> {
    let json_progress = args.json_progress;
    let config = build_config(&args);

    // Configuration problems surface before anything touches the system.
    config.validate()?;

    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;

    if !json_progress {
        print_heading("Sprite Generation");
        print_info("Input", config.input_path.display());
        print_info("Output directory", config.output_dir.display());
    }

    debug!("Resolved configuration: {config:?}");

    let mut generator = SpriteGenerator::new(config);
    if json_progress {
        generator.add_event_handler(Arc::new(JsonProgressHandler::new()));
    } else {
        generator.add_event_handler(Arc::new(ConsoleProgressHandler::new()));
    }

    let summary = generator.run()?;

    if !json_progress {
        print_success(&format!(
            "Generated {} thumbnail(s) across {} sheet(s) in {:.1}s",
            summary.plan.emitted_samples(),
            summary.plan.sheet_count.max(1),
            summary.elapsed.as_secs_f64()
        ));
    }
    Ok(())
}

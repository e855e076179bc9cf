// spritegen-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Spritegen: Scrubbing-preview sprite sheet generator",
    long_about = "Generates grids of evenly-spaced video thumbnails plus optional WebVTT cue \
                  files for player scrubbing previews, using ffmpeg via the spritegen-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates sprite sheets (and optionally a cue file) from a video
    Generate(GenerateArgs),
    /// Probes a video and prints the layout a generation run would use
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Source video file or streaming manifest
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// Directory where sprite sheets will be written (created if absent)
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Rows per sheet; only authoritative together with --multi-sheet
    #[arg(long, value_name = "COUNT")]
    pub rows: Option<u32>,

    /// Columns per sheet
    #[arg(long, value_name = "COUNT")]
    pub cols: Option<u32>,

    /// Width of each thumbnail tile in pixels
    #[arg(long, value_name = "PIXELS")]
    pub tile_width: Option<u32>,

    /// Height of each thumbnail tile in pixels
    #[arg(long, value_name = "PIXELS")]
    pub tile_height: Option<u32>,

    /// Sampling interval in seconds (selected adaptively from the duration when omitted)
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<f64>,

    /// Keep the configured grid fixed and spill into additional sheets once full
    #[arg(long)]
    pub multi_sheet: bool,

    /// Basename prefix for sheet files and cue references
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Write a WebVTT cue file to this path (requires a .vtt extension)
    #[arg(long, value_name = "VTT_PATH")]
    pub vtt: Option<PathBuf>,

    /// Deadline for the extraction step in seconds; 0 waits indefinitely
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Emit the legacy trailing boundary sample past the floor boundary
    #[arg(long)]
    pub boundary_sample: bool,

    /// Emit line-delimited JSON progress instead of the interactive display
    #[arg(long)]
    pub json_progress: bool,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Source video file or streaming manifest
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// Sampling interval in seconds to plan with (adaptive when omitted)
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<f64>,

    /// Plan with the fixed-grid multi-sheet layout
    #[arg(long)]
    pub multi_sheet: bool,

    /// Rows per sheet
    #[arg(long, value_name = "COUNT")]
    pub rows: Option<u32>,

    /// Columns per sheet
    #[arg(long, value_name = "COUNT")]
    pub cols: Option<u32>,
}

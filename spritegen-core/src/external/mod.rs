// ============================================================================
// spritegen-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every interaction with the external media engine.
// Frame extraction, scaling, and tiling are delegated entirely to ffmpeg;
// stream metadata comes from ffprobe. Both are reached through traits so the
// generator can be driven by mock implementations in tests.
//
// KEY COMPONENTS:
// - FfprobeExecutor / CrateFfprobeExecutor: metadata probing
// - FfmpegSpawner / FfmpegProcess / SidecarSpawner: process lifecycle
// - build_sprite_command: the single select/scale/tile extraction request
// - check_dependency: preflight verification that the tools exist

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_start_error};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains ffmpeg argument building logic for the sprite extraction request
pub mod ffmpeg_builder;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Contains traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

/// Mock implementations of the external tool traits for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::{VideoFilterChain, build_sprite_command, sheet_output_pattern, sprite_filter};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor, MediaProbe};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that a required external command is available and executable.
///
/// Runs `<cmd_name> -version` with all output discarded. Returns
/// `CoreError::DependencyNotFound` when the binary is missing and
/// `CoreError::CommandStart` when it exists but cannot be started.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    log::debug!("Checking availability of external tool: {cmd_name}");
    let status = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => Err(command_start_error(cmd_name, e)),
    }
}

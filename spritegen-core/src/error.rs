//! Error types for the spritegen-core library.
//!
//! All fallible operations in this crate return [`CoreResult`], and every
//! failure mode is a variant of [`CoreError`]. Probe failures are the one
//! deliberate exception to fail-fast behavior: the generator downgrades them
//! to logged fallbacks (see `generator.rs`) and only a zero duration in
//! single-sheet mode is promoted back into a hard [`CoreError::InvalidDuration`].

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for spritegen
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Command '{cmd}' failed with status {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, #[source] std::io::Error),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid video duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid cue sheet output path '{0}': expected a .{1} extension")]
    InvalidOutputPath(PathBuf, &'static str),

    #[error("Extraction exceeded the configured deadline of {0} seconds")]
    ExtractionTimeout(u64),
}

/// Result type for spritegen operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Creates a `CommandStart` error for a command that could not be spawned.
pub fn command_start_error<S: Into<String>>(cmd: S, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Creates a `CommandFailed` error from a command's exit status and captured stderr.
pub fn command_failed_error<S: Into<String>, E: Into<String>>(
    cmd: S,
    status: ExitStatus,
    stderr: E,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

/// Creates a `CommandWait` error for a command whose exit could not be awaited.
pub fn command_wait_error<S: Into<String>>(cmd: S, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

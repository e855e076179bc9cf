// spritegen-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Mock implementations of the external tool traits, letting generator tests
// run without ffmpeg/ffprobe installed. Compiled only for tests (via the
// "test-mocks" feature enabled by the self dev-dependency).

use super::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use super::ffprobe_executor::{FfprobeExecutor, MediaProbe};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::path::Path;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

/// Mock implementation of FfprobeExecutor returning a canned result.
#[derive(Debug, Clone, Default)]
pub struct MockFfprobeExecutor {
    probe_result: Option<MediaProbe>,
}

impl MockFfprobeExecutor {
    /// Probe succeeds with the given raw result.
    pub fn returning(probe: MediaProbe) -> Self {
        Self {
            probe_result: Some(probe),
        }
    }

    /// Probe fails outright.
    pub fn failing() -> Self {
        Self { probe_result: None }
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaProbe> {
        match &self.probe_result {
            Some(probe) => Ok(probe.clone()),
            None => Err(CoreError::FfprobeParse(format!(
                "Mock ffprobe error for {}",
                input_path.display()
            ))),
        }
    }
}

/// Shared observation state for a [`MockFfmpegSpawner`] and its processes.
#[derive(Debug, Default)]
pub struct MockSpawnerState {
    /// Argument vectors of every spawned command.
    pub received_args: Vec<Vec<String>>,
    /// Whether any spawned process was killed.
    pub killed: bool,
    /// Whether any spawned process was waited on.
    pub waited: bool,
}

/// Mock implementation of FfmpegProcess emitting scripted events.
pub struct MockFfmpegProcess {
    events_to_emit: Vec<FfmpegEvent>,
    exit_status: ExitStatus,
    state: Arc<Mutex<MockSpawnerState>>,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.clone() {
            handler(event)?;
        }
        Ok(())
    }

    fn kill(&mut self) -> CoreResult<()> {
        self.state.lock().unwrap().killed = true;
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.state.lock().unwrap().waited = true;
        Ok(self.exit_status)
    }
}

/// Mock implementation of FfmpegSpawner handing out scripted processes.
#[derive(Clone)]
pub struct MockFfmpegSpawner {
    events_to_emit: Vec<FfmpegEvent>,
    exit_status: ExitStatus,
    /// Observation state shared with every spawned process.
    pub state: Arc<Mutex<MockSpawnerState>>,
}

impl MockFfmpegSpawner {
    /// Every spawned process emits `events` and exits successfully.
    pub fn succeeding(events: Vec<FfmpegEvent>) -> Self {
        Self::with_status(events, ExitStatus::from_raw(0))
    }

    /// Every spawned process emits `events` and exits with code 1.
    pub fn exiting_with_failure(events: Vec<FfmpegEvent>) -> Self {
        Self::with_status(events, ExitStatus::from_raw(256))
    }

    fn with_status(events_to_emit: Vec<FfmpegEvent>, exit_status: ExitStatus) -> Self {
        Self {
            events_to_emit,
            exit_status,
            state: Arc::new(Mutex::new(MockSpawnerState::default())),
        }
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .as_inner()
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.state.lock().unwrap().received_args.push(args);

        Ok(MockFfmpegProcess {
            events_to_emit: self.events_to_emit.clone(),
            exit_status: self.exit_status,
            state: self.state.clone(),
        })
    }
}

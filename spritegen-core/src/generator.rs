// ============================================================================
// spritegen-core/src/generator.rs
// ============================================================================
//
// GENERATOR: Orchestration of a Sprite Generation Run
//
// This module drives one generation run end to end: probe the source,
// compute the layout plan, hand the extraction request to ffmpeg, and emit
// the cue sheet. The run is strictly sequential and owns all of its state;
// independent runs share nothing.
//
// STATE MACHINE:
//   Idle -> Probing -> Planning -> Extracting -> (EmittingCue ->) Done
// with Extracting -> Failed on an engine error and no automatic retry. The
// extraction step is bounded by a configurable wall-clock deadline; an
// engine that exceeds it is killed and the run fails.
//
// PROBE FALLBACKS:
// A probe failure is not fatal by itself. The frame rate falls back to 24
// and the duration to 0.0; a zero duration is then rejected by the planner
// in single-sheet mode, where the row count depends on it.

// ---- Internal crate imports ----
use crate::VideoMetadata;
use crate::config::{DEFAULT_FRAME_RATE, SpriteConfig};
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::events::{EventDispatcher, EventHandler, GenerationEvent};
use crate::external::ffmpeg_builder::{build_sprite_command, sheet_output_pattern, sprite_filter};
use crate::external::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarSpawner};
use crate::external::ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor, MediaProbe};
use crate::layout::{self, SamplePlan};
use crate::utils::parse_ffmpeg_time;
use crate::vtt::write_cue_sheet;

// ---- External crate imports ----
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

// ---- Standard library imports ----
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

// ============================================================================
// RUN STATE
// ============================================================================

/// Phase of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Probing,
    Planning,
    Extracting,
    EmittingCue,
    Done,
    Failed,
}

/// Result of a completed generation run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Metadata the run was planned against (after fallbacks).
    pub metadata: VideoMetadata,
    /// The layout plan shared by extraction and cue emission.
    pub plan: SamplePlan,
    /// Path of the written cue sheet, when one was requested.
    pub cue_sheet: Option<PathBuf>,
    /// Total wall-clock time of the run.
    pub elapsed: Duration,
}

// ============================================================================
// SPRITE GENERATOR
// ============================================================================

/// Orchestrates one sprite generation run.
///
/// Generic over the ffmpeg spawner and ffprobe executor so tests can inject
/// mocks; production code uses [`SpriteGenerator::new`] which wires up the
/// sidecar and ffprobe-crate implementations.
pub struct SpriteGenerator<S: FfmpegSpawner, P: FfprobeExecutor> {
    config: SpriteConfig,
    spawner: S,
    prober: P,
    dispatcher: EventDispatcher,
    state: GenerationState,
}

impl SpriteGenerator<SidecarSpawner, CrateFfprobeExecutor> {
    /// Creates a generator backed by the real external tools.
    pub fn new(config: SpriteConfig) -> Self {
        Self::with_executors(config, SidecarSpawner, CrateFfprobeExecutor::new())
    }
}

impl<S: FfmpegSpawner, P: FfprobeExecutor> SpriteGenerator<S, P> {
    /// Creates a generator with injected executors.
    pub fn with_executors(config: SpriteConfig, spawner: S, prober: P) -> Self {
        Self {
            config,
            spawner,
            prober,
            dispatcher: EventDispatcher::new(),
            state: GenerationState::Idle,
        }
    }

    /// Registers a handler for the run's lifecycle events.
    pub fn add_event_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.dispatcher.add_handler(handler);
    }

    /// Current phase of the run.
    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Executes the run. All failures surface here; there is no partial
    /// success and no retry.
    pub fn run(&mut self) -> CoreResult<GenerationSummary> {
        let result = self.run_inner();
        self.transition(match result {
            Ok(_) => GenerationState::Done,
            Err(_) => GenerationState::Failed,
        });
        result
    }

    fn run_inner(&mut self) -> CoreResult<GenerationSummary> {
        self.config.validate()?;
        let run_start = Instant::now();

        self.dispatcher.emit(GenerationEvent::RunStarted {
            input: self.config.input_path.clone(),
            output_dir: self.config.output_dir.clone(),
        });

        // Probe once per run; both the planner and the extraction step see
        // the same metadata.
        self.transition(GenerationState::Probing);
        let metadata = self.probe_metadata();
        self.dispatcher.emit(GenerationEvent::ProbeComplete {
            duration_seconds: metadata.duration_seconds,
            frame_rate: metadata.frame_rate,
        });

        self.transition(GenerationState::Planning);
        let plan = layout::plan(&self.config, &metadata)?;
        self.dispatcher.emit(GenerationEvent::PlanComputed {
            interval_seconds: plan.interval_seconds,
            total_samples: plan.total_samples,
            sheet_count: plan.sheet_count,
        });

        fs::create_dir_all(&self.config.output_dir)?;

        self.transition(GenerationState::Extracting);
        self.extract(&plan, metadata.frame_rate)?;

        let cue_sheet = if let Some(webvtt) = self.config.webvtt.clone() {
            self.transition(GenerationState::EmittingCue);
            write_cue_sheet(&plan, &webvtt.output)?;
            self.dispatcher.emit(GenerationEvent::CueSheetWritten {
                path: webvtt.output.clone(),
            });
            Some(webvtt.output)
        } else {
            None
        };

        let elapsed = run_start.elapsed();
        self.dispatcher
            .emit(GenerationEvent::RunComplete { elapsed });

        Ok(GenerationSummary {
            metadata,
            plan,
            cue_sheet,
            elapsed,
        })
    }

    fn transition(&mut self, next: GenerationState) {
        log::debug!("Generation state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Probes the input, applying the documented fallbacks: duration 0.0
    /// and frame rate 24 when the prober cannot supply them.
    fn probe_metadata(&self) -> VideoMetadata {
        let probe = match self.prober.probe(&self.config.input_path) {
            Ok(probe) => probe,
            Err(err) => {
                log::warn!(
                    "Probe failed for {}: {err}",
                    self.config.input_path.display()
                );
                self.dispatcher.emit(GenerationEvent::Warning {
                    message: format!("probe failed ({err}); using fallback metadata"),
                });
                MediaProbe::default()
            }
        };

        if probe.duration_seconds.is_none() {
            self.dispatcher.emit(GenerationEvent::Warning {
                message: "could not determine video duration".to_string(),
            });
        }

        let frame_rate = probe.rounded_frame_rate().unwrap_or_else(|| {
            log::warn!("Frame rate unavailable; assuming {DEFAULT_FRAME_RATE} fps");
            DEFAULT_FRAME_RATE
        });

        VideoMetadata {
            duration_seconds: probe.duration_seconds.unwrap_or(0.0),
            frame_rate,
        }
    }

    /// Spawns the single extraction request and drains its event stream,
    /// enforcing the configured deadline.
    fn extract(&self, plan: &SamplePlan, frame_rate: u32) -> CoreResult<()> {
        let filter = sprite_filter(plan, frame_rate);
        let output_pattern =
            sheet_output_pattern(&self.config.output_dir, &self.config.filename_prefix);
        let cmd = build_sprite_command(&self.config, &filter, &output_pattern);

        self.dispatcher.emit(GenerationEvent::ExtractionStarted {
            filter: filter.clone(),
        });

        let deadline = self.config.extraction_timeout;
        let extraction_start = Instant::now();
        let mut engine_error: Option<String> = None;
        let mut stderr_tail: Vec<String> = Vec::new();

        let mut process = self.spawner.spawn(cmd)?;
        let events_result = process.handle_events(|event| {
            if let Some(limit) = deadline {
                if extraction_start.elapsed() > limit {
                    return Err(CoreError::ExtractionTimeout(limit.as_secs()));
                }
            }
            match event {
                FfmpegEvent::Progress(progress) => {
                    self.dispatcher.emit(GenerationEvent::ExtractionProgress {
                        frame: u64::from(progress.frame),
                        seconds_processed: parse_ffmpeg_time(&progress.time),
                        speed: progress.speed,
                    });
                }
                FfmpegEvent::Error(message) => {
                    log::error!("ffmpeg reported an error: {message}");
                    engine_error = Some(message);
                }
                FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, message) => {
                    stderr_tail.push(message);
                }
                _ => {}
            }
            Ok(())
        });

        if let Err(err) = events_result {
            if matches!(err, CoreError::ExtractionTimeout(_)) {
                // Kill the engine, then reap it so no zombie outlives the run.
                let _ = process.kill();
                let _ = process.wait();
            }
            return Err(err);
        }

        let status = process.wait()?;
        if !status.success() {
            return Err(command_failed_error(
                "ffmpeg (sprite extraction)",
                status,
                stderr_tail.join("\n"),
            ));
        }
        if let Some(message) = engine_error {
            // The engine signalled an error even though it exited cleanly;
            // treat it as a failed run rather than trusting the status.
            return Err(command_failed_error(
                "ffmpeg (sprite extraction)",
                status,
                message,
            ));
        }

        self.dispatcher.emit(GenerationEvent::ExtractionComplete);
        Ok(())
    }
}

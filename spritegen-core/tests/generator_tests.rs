// spritegen-core/tests/generator_tests.rs
//
// Mock-driven tests of the generation run: state sequencing, probe
// fallbacks, the single extraction request handed to the engine, and the
// extraction deadline. No real ffmpeg/ffprobe is involved.

use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use spritegen_core::config::{SpriteConfig, WebVttConfig};
use spritegen_core::error::CoreError;
use spritegen_core::events::{EventHandler, GenerationEvent};
use spritegen_core::external::ffprobe_executor::MediaProbe;
use spritegen_core::external::mocks::{MockFfmpegSpawner, MockFfprobeExecutor};
use spritegen_core::generator::{GenerationState, SpriteGenerator};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

/// Event handler that records event names in arrival order.
struct EventRecorder(Mutex<Vec<&'static str>>);

impl EventRecorder {
    fn new() -> Arc<Self> {
        Arc::new(Self(Mutex::new(Vec::new())))
    }

    fn names(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

impl EventHandler for EventRecorder {
    fn handle(&self, event: &GenerationEvent) {
        let name = match event {
            GenerationEvent::RunStarted { .. } => "run_started",
            GenerationEvent::ProbeComplete { .. } => "probe_complete",
            GenerationEvent::PlanComputed { .. } => "plan_computed",
            GenerationEvent::ExtractionStarted { .. } => "extraction_started",
            GenerationEvent::ExtractionProgress { .. } => "extraction_progress",
            GenerationEvent::ExtractionComplete => "extraction_complete",
            GenerationEvent::CueSheetWritten { .. } => "cue_sheet_written",
            GenerationEvent::RunComplete { .. } => "run_complete",
            GenerationEvent::Warning { .. } => "warning",
        };
        self.0.lock().unwrap().push(name);
    }
}

fn probe(duration: f64, frame_rate: (u32, u32)) -> MockFfprobeExecutor {
    MockFfprobeExecutor::returning(MediaProbe {
        duration_seconds: Some(duration),
        frame_rate: Some(frame_rate),
    })
}

fn success_events() -> Vec<FfmpegEvent> {
    vec![
        FfmpegEvent::Log(LogLevel::Info, "frame=  100".to_string()),
        FfmpegEvent::Done,
    ]
}

#[test]
fn successful_run_writes_cue_and_issues_one_extraction() {
    let out = tempdir().unwrap();
    let cue_path = out.path().join("previews.vtt");

    let mut config = SpriteConfig::new("movie.mp4", out.path());
    config.webvtt = Some(WebVttConfig {
        output: cue_path.clone(),
    });

    let spawner = MockFfmpegSpawner::succeeding(success_events());
    let recorder = EventRecorder::new();
    let mut generator =
        SpriteGenerator::with_executors(config, spawner.clone(), probe(100.0, (24, 1)));
    generator.add_event_handler(recorder.clone());

    let summary = generator.run().unwrap();
    assert_eq!(generator.state(), GenerationState::Done);
    assert_eq!(summary.metadata.frame_rate, 24);
    assert_eq!(summary.plan.total_samples, 100);
    assert_eq!(summary.plan.row_count, 20);
    assert_eq!(summary.cue_sheet.as_deref(), Some(cue_path.as_path()));

    // The cue file landed on disk.
    let cue = std::fs::read_to_string(&cue_path).unwrap();
    assert!(cue.starts_with("WEBVTT\n\n"));
    assert_eq!(cue.matches("#xywh=").count(), 100);

    // Exactly one engine request, carrying the select/scale/tile filter and
    // the numbered output pattern.
    let state = spawner.state.lock().unwrap();
    assert_eq!(state.received_args.len(), 1);
    let args = state.received_args[0].join(" ");
    assert!(args.contains("select='not(mod(n,24))',scale=160:90,tile=5x20"));
    assert!(args.contains("-vsync vfr"));
    assert!(args.contains("-an"));
    assert!(args.contains("thumbs-%02d.jpg"));
    assert!(state.waited);
    assert!(!state.killed);

    assert_eq!(
        recorder.names(),
        vec![
            "run_started",
            "probe_complete",
            "plan_computed",
            "extraction_started",
            "extraction_complete",
            "cue_sheet_written",
            "run_complete",
        ]
    );
}

#[test]
fn probe_failure_falls_back_in_multi_sheet_mode() {
    let out = tempdir().unwrap();
    let mut config = SpriteConfig::new("movie.mp4", out.path());
    config.multi_sheet = true;

    let spawner = MockFfmpegSpawner::succeeding(success_events());
    let mut generator =
        SpriteGenerator::with_executors(config, spawner.clone(), MockFfprobeExecutor::failing());

    let summary = generator.run().unwrap();
    // Duration fell back to 0.0 (empty plan), frame rate to 24.
    assert_eq!(summary.metadata.duration_seconds, 0.0);
    assert_eq!(summary.metadata.frame_rate, 24);
    assert_eq!(summary.plan.total_samples, 0);
    assert_eq!(summary.plan.sheet_count, 0);

    // The fixed grid still shapes the engine request.
    let state = spawner.state.lock().unwrap();
    assert!(state.received_args[0].join(" ").contains("tile=5x5"));
}

#[test]
fn probe_failure_is_fatal_in_single_sheet_mode() {
    let out = tempdir().unwrap();
    let config = SpriteConfig::new("movie.mp4", out.path());

    let spawner = MockFfmpegSpawner::succeeding(success_events());
    let mut generator =
        SpriteGenerator::with_executors(config, spawner.clone(), MockFfprobeExecutor::failing());

    let result = generator.run();
    assert!(matches!(result, Err(CoreError::InvalidDuration(_))));
    assert_eq!(generator.state(), GenerationState::Failed);
    // The engine was never consulted.
    assert!(spawner.state.lock().unwrap().received_args.is_empty());
}

#[test]
fn fractional_frame_rate_is_rounded() {
    let out = tempdir().unwrap();
    let mut config = SpriteConfig::new("movie.mp4", out.path());
    config.interval = Some(10.0);

    let spawner = MockFfmpegSpawner::succeeding(success_events());
    // 30000/1001 = 29.97 rounds to 30.
    let mut generator =
        SpriteGenerator::with_executors(config, spawner.clone(), probe(50.0, (30000, 1001)));

    let summary = generator.run().unwrap();
    assert_eq!(summary.metadata.frame_rate, 30);
    let state = spawner.state.lock().unwrap();
    assert!(
        state.received_args[0]
            .join(" ")
            .contains("select='not(mod(n,300))'")
    );
}

#[test]
fn engine_exit_failure_fails_the_run() {
    let out = tempdir().unwrap();
    let config = SpriteConfig::new("movie.mp4", out.path());

    let spawner = MockFfmpegSpawner::exiting_with_failure(vec![FfmpegEvent::Log(
        LogLevel::Error,
        "Conversion failed!".to_string(),
    )]);
    let mut generator = SpriteGenerator::with_executors(config, spawner, probe(100.0, (24, 1)));

    match generator.run() {
        Err(CoreError::CommandFailed { stderr, .. }) => {
            assert!(stderr.contains("Conversion failed!"));
        }
        other => panic!("Expected CommandFailed, got: {other:?}"),
    }
    assert_eq!(generator.state(), GenerationState::Failed);
}

#[test]
fn engine_error_event_fails_the_run_despite_clean_exit() {
    let out = tempdir().unwrap();
    let config = SpriteConfig::new("movie.mp4", out.path());

    let spawner = MockFfmpegSpawner::succeeding(vec![FfmpegEvent::Error(
        "broken pipe".to_string(),
    )]);
    let mut generator = SpriteGenerator::with_executors(config, spawner, probe(100.0, (24, 1)));

    assert!(matches!(
        generator.run(),
        Err(CoreError::CommandFailed { .. })
    ));
}

#[test]
fn extraction_deadline_kills_the_engine() {
    let out = tempdir().unwrap();
    let mut config = SpriteConfig::new("movie.mp4", out.path());
    config.extraction_timeout = Some(Duration::ZERO);

    let spawner = MockFfmpegSpawner::succeeding(success_events());
    let mut generator =
        SpriteGenerator::with_executors(config, spawner.clone(), probe(100.0, (24, 1)));

    match generator.run() {
        Err(CoreError::ExtractionTimeout(seconds)) => assert_eq!(seconds, 0),
        other => panic!("Expected ExtractionTimeout, got: {other:?}"),
    }
    let state = spawner.state.lock().unwrap();
    assert!(state.killed);
    assert!(state.waited); // killed engines are still reaped
}

#[test]
fn invalid_configuration_aborts_before_any_probe() {
    let out = tempdir().unwrap();
    let mut config = SpriteConfig::new("movie.mp4", out.path());
    config.webvtt = Some(WebVttConfig {
        output: out.path().join("out.txt"),
    });

    let spawner = MockFfmpegSpawner::succeeding(success_events());
    let mut generator =
        SpriteGenerator::with_executors(config, spawner.clone(), probe(100.0, (24, 1)));

    assert!(matches!(generator.run(), Err(CoreError::Config(_))));
    assert!(spawner.state.lock().unwrap().received_args.is_empty());
}

#[test]
fn output_directory_is_created_if_absent() {
    let out = tempdir().unwrap();
    let nested = out.path().join("a").join("b");

    let config = SpriteConfig::new("movie.mp4", &nested);
    let spawner = MockFfmpegSpawner::succeeding(success_events());
    let mut generator = SpriteGenerator::with_executors(config, spawner, probe(100.0, (24, 1)));

    generator.run().unwrap();
    assert!(nested.is_dir());
}

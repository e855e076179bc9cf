//! Lifecycle events emitted during a generation run.
//!
//! The core never prints anything itself; it dispatches [`GenerationEvent`]s
//! through an [`EventDispatcher`] and consumers (the CLI, the JSON handler)
//! decide how to render them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub mod json_handler;

/// One observable step of a generation run.
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// A run began for the given input.
    RunStarted {
        input: PathBuf,
        output_dir: PathBuf,
    },

    /// Probing finished; fallbacks already applied.
    ProbeComplete {
        duration_seconds: f64,
        frame_rate: u32,
    },

    /// The layout plan was computed.
    PlanComputed {
        interval_seconds: f64,
        total_samples: u64,
        sheet_count: u64,
    },

    /// The ffmpeg extraction process was spawned.
    ExtractionStarted {
        filter: String,
    },

    /// Periodic extraction progress as reported by the engine.
    ExtractionProgress {
        /// Output frames (sheets) written so far.
        frame: u64,
        /// Source time processed so far, in seconds, when parseable.
        seconds_processed: Option<f64>,
        /// Processing speed relative to realtime.
        speed: f32,
    },

    /// The extraction process finished successfully.
    ExtractionComplete,

    /// The cue sheet was written.
    CueSheetWritten {
        path: PathBuf,
    },

    /// The run finished; all outputs are on disk.
    RunComplete {
        elapsed: Duration,
    },

    /// A non-fatal condition worth surfacing (probe fallbacks etc.).
    Warning {
        message: String,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &GenerationEvent);
}

/// Fans events out to any number of registered handlers.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: GenerationEvent) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

//! JSON progress handler for structured progress output
//!
//! This module provides a JSON-based event handler that outputs structured
//! progress information to stdout for consumption by external tools
//! (media pipelines, job queues) driving spritegen non-interactively.

use super::{EventHandler, GenerationEvent};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that outputs generation events as line-delimited JSON.
pub struct JsonProgressHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonProgressHandler {
    /// Create a new JSON progress handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a new JSON progress handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    /// Get current timestamp as seconds since Unix epoch
    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Write a JSON progress event to the output
    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }
}

impl Default for JsonProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for JsonProgressHandler {
    fn handle(&self, event: &GenerationEvent) {
        let timestamp = Self::get_timestamp();

        match event {
            GenerationEvent::RunStarted { input, output_dir } => {
                self.write_json(json!({
                    "type": "run_started",
                    "timestamp": timestamp,
                    "input": input.display().to_string(),
                    "output_dir": output_dir.display().to_string(),
                }));
            }
            GenerationEvent::ProbeComplete {
                duration_seconds,
                frame_rate,
            } => {
                self.write_json(json!({
                    "type": "probe_complete",
                    "timestamp": timestamp,
                    "duration_seconds": duration_seconds,
                    "frame_rate": frame_rate,
                }));
            }
            GenerationEvent::PlanComputed {
                interval_seconds,
                total_samples,
                sheet_count,
            } => {
                self.write_json(json!({
                    "type": "plan_computed",
                    "timestamp": timestamp,
                    "interval_seconds": interval_seconds,
                    "total_samples": total_samples,
                    "sheet_count": sheet_count,
                }));
            }
            GenerationEvent::ExtractionStarted { filter } => {
                self.write_json(json!({
                    "type": "extraction_started",
                    "timestamp": timestamp,
                    "filter": filter,
                }));
            }
            GenerationEvent::ExtractionProgress {
                frame,
                seconds_processed,
                speed,
            } => {
                self.write_json(json!({
                    "type": "extraction_progress",
                    "timestamp": timestamp,
                    "frame": frame,
                    "seconds_processed": seconds_processed,
                    "speed": speed,
                }));
            }
            GenerationEvent::ExtractionComplete => {
                self.write_json(json!({
                    "type": "extraction_complete",
                    "timestamp": timestamp,
                }));
            }
            GenerationEvent::CueSheetWritten { path } => {
                self.write_json(json!({
                    "type": "cue_sheet_written",
                    "timestamp": timestamp,
                    "path": path.display().to_string(),
                }));
            }
            GenerationEvent::RunComplete { elapsed } => {
                self.write_json(json!({
                    "type": "run_complete",
                    "timestamp": timestamp,
                    "elapsed_seconds": elapsed.as_secs_f64(),
                }));
            }
            GenerationEvent::Warning { message } => {
                self.write_json(json!({
                    "type": "warning",
                    "timestamp": timestamp,
                    "message": message,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};

    /// Writer that appends into a shared buffer for assertions.
    struct SharedBuf(Arc<StdMutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_events_serialize_as_line_delimited_json() {
        let buf = Arc::new(StdMutex::new(Vec::new()));
        let handler = JsonProgressHandler::with_writer(Box::new(SharedBuf(buf.clone())));

        handler.handle(&GenerationEvent::ProbeComplete {
            duration_seconds: 100.0,
            frame_rate: 24,
        });
        handler.handle(&GenerationEvent::ExtractionComplete);

        let output = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "probe_complete");
        assert_eq!(first["duration_seconds"], 100.0);
        assert_eq!(first["frame_rate"], 24);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["type"], "extraction_complete");
    }
}

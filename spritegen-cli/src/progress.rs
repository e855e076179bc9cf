// spritegen-cli/src/progress.rs
//
// Interactive progress rendering: an EventHandler that narrates the run and
// drives an indicatif bar while ffmpeg works through the source.

use crate::output::{print_info, print_success, print_warning};
use indicatif::{ProgressBar, ProgressStyle};
use spritegen_core::events::{EventHandler, GenerationEvent};
use spritegen_core::format_duration;
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    /// Source duration in milliseconds, once known and non-zero.
    duration_millis: Option<u64>,
    bar: Option<ProgressBar>,
}

/// Renders generation events for an interactive terminal.
#[derive(Default)]
pub struct ConsoleProgressHandler {
    inner: Mutex<Inner>,
}

impl ConsoleProgressHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{bar:40.cyan/blue} {percent:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl EventHandler for ConsoleProgressHandler {
    fn handle(&self, event: &GenerationEvent) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        match event {
            GenerationEvent::RunStarted { .. } => {}
            GenerationEvent::ProbeComplete {
                duration_seconds,
                frame_rate,
            } => {
                if *duration_seconds > 0.0 {
                    inner.duration_millis = Some((duration_seconds * 1000.0) as u64);
                    print_info("Duration", format_duration(*duration_seconds));
                } else {
                    print_info("Duration", "unknown");
                }
                print_info("Frame rate", format!("{frame_rate} fps"));
            }
            GenerationEvent::PlanComputed {
                interval_seconds,
                total_samples,
                sheet_count,
            } => {
                print_info("Sampling interval", format!("{interval_seconds}s"));
                print_info("Thumbnails", total_samples);
                print_info("Sheets", sheet_count);
            }
            GenerationEvent::ExtractionStarted { .. } => {
                let bar = match inner.duration_millis {
                    Some(total) => ProgressBar::new(total).with_style(Self::bar_style()),
                    None => ProgressBar::new_spinner(),
                };
                inner.bar = Some(bar);
            }
            GenerationEvent::ExtractionProgress {
                seconds_processed,
                speed,
                ..
            } => {
                if let Some(bar) = &inner.bar {
                    if let Some(seconds) = seconds_processed {
                        bar.set_position((seconds * 1000.0) as u64);
                    } else {
                        bar.tick();
                    }
                    if *speed > 0.0 {
                        bar.set_message(format!("{speed:.1}x"));
                    }
                }
            }
            GenerationEvent::ExtractionComplete => {
                if let Some(bar) = inner.bar.take() {
                    bar.finish_and_clear();
                }
                print_success("Extraction complete");
            }
            GenerationEvent::CueSheetWritten { path } => {
                print_success(&format!("Cue sheet written to {}", path.display()));
            }
            GenerationEvent::RunComplete { .. } => {}
            GenerationEvent::Warning { message } => {
                print_warning(message);
            }
        }
    }
}

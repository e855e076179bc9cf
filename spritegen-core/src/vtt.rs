//! WebVTT cue sheet emission.
//!
//! Renders a [`SamplePlan`] into the text track format browser players use
//! for scrubbing previews: one cue per sample slot, mapping a time range to
//! a `#xywh=` pixel rectangle inside the sheet image that holds its
//! thumbnail.
//!
//! Sheet references use the same `{prefix}-{NN}.jpg` numbering the
//! extraction step hands to ffmpeg (`%02d`, 1-based), so every cue resolves
//! to a file the engine actually produces. No escaping is applied to the
//! prefix; callers must supply filesystem- and cue-safe prefixes.

use std::fs;
use std::path::Path;

use crate::config::{SHEET_EXTENSION, VTT_EXTENSION};
use crate::error::{CoreError, CoreResult};
use crate::layout::SamplePlan;

/// Literal header tag opening every cue sheet.
const WEBVTT_HEADER: &str = "WEBVTT";

/// Formats a second offset as a zero-padded `HH:MM:SS.mmm` timestamp.
///
/// Hours are not wrapped at 24; a 30-hour offset renders as `30:00:00.000`.
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    let millis = total_millis % 1000;
    let total_seconds = total_millis / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

/// Filename of the sheet holding `sheet_index`, matching the `%02d` output
/// pattern of the extraction step (1-based, zero-padded to two digits,
/// widening naturally past 99 sheets).
#[must_use]
pub fn sheet_filename(prefix: &str, sheet_index: u64) -> String {
    format!("{prefix}-{:02}.{SHEET_EXTENSION}", sheet_index + 1)
}

/// Renders the cue sheet body for a plan.
#[must_use]
pub fn render_cue_sheet(plan: &SamplePlan) -> String {
    let mut output = String::from(WEBVTT_HEADER);
    output.push_str("\n\n");

    for slot in plan.slots() {
        output.push_str(&format_timestamp(slot.start_time));
        output.push_str(" --> ");
        output.push_str(&format_timestamp(slot.end_time));
        output.push('\n');
        output.push_str(&format!(
            "{}#xywh={},{},{},{}\n\n",
            sheet_filename(&plan.filename_prefix, slot.sheet_index),
            slot.pixel_x(plan),
            slot.pixel_y(plan),
            plan.tile_width,
            plan.tile_height,
        ));
    }

    output
}

/// Renders the cue sheet and writes it to `path`.
///
/// Fails with [`CoreError::InvalidOutputPath`] when the path's extension is
/// not `.vtt`; write failures surface as [`CoreError::Io`].
pub fn write_cue_sheet(plan: &SamplePlan, path: &Path) -> CoreResult<()> {
    let has_vtt_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(VTT_EXTENSION));
    if !has_vtt_extension {
        return Err(CoreError::InvalidOutputPath(
            path.to_path_buf(),
            VTT_EXTENSION,
        ));
    }

    log::debug!("Writing cue sheet to {}", path.display());
    fs::write(path, render_cue_sheet(plan))?;
    Ok(())
}

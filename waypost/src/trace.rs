//! Threshold trace replay.
//!
//! Replays a recorded scroll trace through the position tracker and prints
//! one sample per frame. This is the development surface for tuning the
//! threshold heuristic: record geometry from a real page, replay it here,
//! and watch the line move.

use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use serde::Deserialize;
use waypost_outline::{
  HeadingBand,
  PositionTracker,
  ScrollFrame,
  TrackerOptions,
};

/// A recorded scroll trace: fixed page geometry plus scroll events.
#[derive(Debug, Deserialize)]
pub struct Trace {
  /// Viewport height, px.
  pub viewport_height: f64,
  /// Total scrollable document height, px.
  pub document_height: f64,
  /// Heading geometry, in document order.
  pub headings: Vec<HeadingBand>,
  /// Scroll events in playback order.
  pub frames: Vec<TraceFrame>,
}

/// One recorded scroll event.
#[derive(Debug, Deserialize)]
pub struct TraceFrame {
  /// Scroll offset at the time of the event.
  pub scroll_top: f64,
  /// Event timestamp in milliseconds.
  #[serde(default)]
  pub now_ms: u64,
}

/// Load a trace file and print per-frame threshold samples.
///
/// # Errors
///
/// Returns an error when the trace file cannot be read or parsed.
pub fn run(options: &TrackerOptions, input: &Path) -> Result<()> {
  let content = fs::read_to_string(input)
    .wrap_err_with(|| format!("Failed to read trace: {}", input.display()))?;
  let trace: Trace = serde_json::from_str(&content).wrap_err_with(|| {
    format!("Failed to parse trace JSON from {}", input.display())
  })?;

  print_samples(options, &trace);
  Ok(())
}

#[allow(
  clippy::print_stdout,
  reason = "The table is this command's output"
)]
fn print_samples(options: &TrackerOptions, trace: &Trace) {
  let mut tracker = PositionTracker::new(options.clone());

  println!(
    "{:>5} {:>10} {:>5} {:>8} {:>8} {:>8} {:>8} {:>10}  current",
    "frame", "scroll", "dir", "above", "below", "badd", "adj", "threshold"
  );

  for (index, event) in trace.frames.iter().enumerate() {
    let frame = ScrollFrame {
      scroll_top:      event.scroll_top,
      viewport_height: trace.viewport_height,
      document_height: trace.document_height,
      now_ms:          event.now_ms,
    };

    let selection = tracker.observe(&frame, &trace.headings);

    if let Some(sample) = tracker.sample() {
      println!(
        "{index:>5} {:>10.1} {:>5} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>10.1}  {}",
        sample.scroll_top,
        if sample.scrolling_down { "down" } else { "up" },
        sample.pixels_above,
        sample.pixels_below,
        sample.bottom_add,
        sample.adjusted_bottom_add,
        sample.threshold,
        selection.as_deref().unwrap_or("-"),
      );
    }
  }
}

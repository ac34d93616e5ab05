//! Reading-position tracking.
//!
//! The tracker owns the virtual threshold line that decides which heading
//! is *current*: the last heading in document order whose top sits at or
//! above the line. The line is not fixed; it trails the scroll direction
//! and drifts toward the bottom of the page as the reader approaches the
//! end, so that late headings can still become current even when they
//! never reach the upper part of the viewport.
//!
//! All state lives in one [`PositionTracker`] constructed per page view.
//! The host feeds it one [`ScrollFrame`] per scroll or load event and
//! reflects the returned selection into its UI. Anchor clicks go through
//! [`PositionTracker::begin_anchor_jump`] / `settle_anchor_jump` so the
//! native scroll-to-anchor can finish before the line is re-pinned.

use serde::{Deserialize, Serialize};

const fn default_down_threshold() -> f64 {
  150.0
}

const fn default_up_threshold() -> f64 {
  300.0
}

const fn default_settle_fallback_ms() -> u64 {
  100
}

/// Tuning for the position tracker.
///
/// The defaults are empirically tuned for typical documentation layouts;
/// override them through configuration rather than editing call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerOptions {
  /// Threshold position (px from the viewport top) targeted while
  /// scrolling down.
  #[serde(default = "default_down_threshold")]
  pub down_threshold: f64,

  /// Threshold position targeted while scrolling up.
  #[serde(default = "default_up_threshold")]
  pub up_threshold: f64,

  /// How long scroll observations stay frozen after an anchor jump when
  /// the host never delivers the settle signal.
  #[serde(default = "default_settle_fallback_ms")]
  pub settle_fallback_ms: u64,
}

impl Default for TrackerOptions {
  fn default() -> Self {
    Self {
      down_threshold:     default_down_threshold(),
      up_threshold:       default_up_threshold(),
      settle_fallback_ms: default_settle_fallback_ms(),
    }
  }
}

/// One scroll observation, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollFrame {
  /// Distance scrolled from the top of the document.
  pub scroll_top:      f64,
  /// Height of the viewport.
  pub viewport_height: f64,
  /// Total scrollable height of the document.
  pub document_height: f64,
  /// Monotonic timestamp in milliseconds. Only consulted for the
  /// anchor-jump freeze window.
  #[serde(default)]
  pub now_ms:          u64,
}

/// Vertical extent of one heading, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBand {
  /// Anchor ID of the heading.
  pub id:     String,
  /// Top edge of the heading element.
  pub top:    f64,
  /// Bottom edge of the heading element.
  pub bottom: f64,
}

/// Heading selected as current, if any. `None` means the reader is above
/// the first heading and it is out of view.
pub type Selection = Option<String>;

/// Snapshot of every intermediate quantity behind one threshold update.
/// This is the diagnostic surface; `waypost trace` prints one per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSample {
  pub document_height:     f64,
  pub viewport_height:     f64,
  pub scroll_top:          f64,
  pub pixels_above:        f64,
  pub pixels_below:        f64,
  pub bottom_add:          f64,
  pub adjusted_bottom_add: f64,
  pub scrolling_down:      bool,
  pub threshold:           f64,
}

/// Stateful controller deciding the current heading from scroll geometry.
#[derive(Debug, Clone)]
pub struct PositionTracker {
  options:         TrackerOptions,
  threshold:       f64,
  last_scroll_top: f64,
  frozen_until_ms: Option<u64>,
  current:         Selection,
  last_sample:     Option<ThresholdSample>,
}

impl PositionTracker {
  #[must_use]
  pub const fn new(options: TrackerOptions) -> Self {
    let threshold = options.down_threshold;
    Self {
      options,
      threshold,
      last_scroll_top: 0.0,
      frozen_until_ms: None,
      current: None,
      last_sample: None,
    }
  }

  /// Current position of the threshold line, px from the viewport top.
  #[must_use]
  pub const fn threshold(&self) -> f64 {
    self.threshold
  }

  /// The most recent threshold update, for diagnostics.
  #[must_use]
  pub fn sample(&self) -> Option<&ThresholdSample> {
    self.last_sample.as_ref()
  }

  /// Feed one scroll observation and select the current heading.
  ///
  /// `bands` must be in document order. During an anchor-jump freeze
  /// window the frame is ignored and the previous selection is returned
  /// unchanged; recomputing from a frame taken mid-jump would flash an
  /// unrelated heading as current.
  pub fn observe(
    &mut self,
    frame: &ScrollFrame,
    bands: &[HeadingBand],
  ) -> Selection {
    if let Some(deadline) = self.frozen_until_ms {
      if frame.now_ms < deadline {
        return self.current.clone();
      }
      self.frozen_until_ms = None;
    }

    self.update_threshold(frame);
    self.select(frame, bands)
  }

  /// Freeze scroll observations while the host performs a scroll-to-anchor.
  ///
  /// Observations resume on [`Self::settle_anchor_jump`], or after
  /// [`TrackerOptions::settle_fallback_ms`] when the settle signal never
  /// arrives.
  pub fn begin_anchor_jump(&mut self, now_ms: u64) {
    self.frozen_until_ms =
      Some(now_ms.saturating_add(self.options.settle_fallback_ms));
  }

  /// Complete an anchor jump: pin the threshold to the jumped-to heading's
  /// bottom edge (viewport-relative, from the post-scroll frame) and
  /// reselect immediately.
  ///
  /// A late settle after the fallback deadline is still honored; the
  /// recompute is idempotent, so a stray native scroll in between is
  /// harmless.
  pub fn settle_anchor_jump(
    &mut self,
    frame: &ScrollFrame,
    heading_id: &str,
    bands: &[HeadingBand],
  ) -> Selection {
    self.frozen_until_ms = None;

    if let Some(band) = bands.iter().find(|band| band.id == heading_id) {
      self.threshold = band.bottom - frame.scroll_top;
    }

    self.select(frame, bands)
  }

  /// Move the threshold line for one frame.
  fn update_threshold(&mut self, frame: &ScrollFrame) {
    let ScrollFrame {
      scroll_top,
      viewport_height,
      document_height,
      ..
    } = *frame;

    // Pixels of document remaining below the viewport. Pushes the
    // threshold toward the bottom of the screen as the reader approaches
    // the end of the page.
    let pixels_below =
      (document_height - (scroll_top + viewport_height)).max(0.0);
    // Shortfall below the default downward threshold near the document
    // top; pulls the threshold back up when reaching the top.
    let pixels_above = (self.options.down_threshold - scroll_top).max(0.0);

    // Extra offset once the end of the document is close enough that the
    // remaining headings can never cross the default line.
    let bottom_add =
      (viewport_height - pixels_below - self.options.down_threshold).max(0.0);
    let mut adjusted_bottom_add = bottom_add;

    // The calculation above assumes the document is at least twice the
    // viewport height. Shrink the offset proportionally when it is not.
    if document_height < viewport_height * 2.0 {
      let max_pixels_below = document_height - viewport_height;
      let t = 1.0 - pixels_below / max_pixels_below.max(1.0);
      adjusted_bottom_add *= t.clamp(0.0, 1.0);
    }

    let scrolling_down = scroll_top >= self.last_scroll_top;

    if scrolling_down {
      // Move toward the downward default, descending at most as fast as
      // the scroll itself so the line trails the reader.
      let scrolled = scroll_top - self.last_scroll_top;
      let adjusted_default = self.options.down_threshold + adjusted_bottom_add;
      self.threshold = adjusted_default.max(self.threshold - scrolled);
    } else {
      // Move toward the upward default; near the bottom, transition the
      // line back up where it normally belongs.
      let scrolled = self.last_scroll_top - scroll_top;
      let adjusted_default = self.options.up_threshold - pixels_above
        + (adjusted_bottom_add - self.options.down_threshold).max(0.0);
      self.threshold = adjusted_default.min(self.threshold + scrolled);
    }

    if document_height <= viewport_height {
      self.threshold = 0.0;
    }

    self.last_sample = Some(ThresholdSample {
      document_height,
      viewport_height,
      scroll_top,
      pixels_above,
      pixels_below,
      bottom_add,
      adjusted_bottom_add,
      scrolling_down,
      threshold: self.threshold,
    });

    self.last_scroll_top = scroll_top;
  }

  /// Pick the last heading at or above the threshold line.
  fn select(
    &mut self,
    frame: &ScrollFrame,
    bands: &[HeadingBand],
  ) -> Selection {
    let mut last: Option<&HeadingBand> = None;
    for band in bands {
      if band.top - frame.scroll_top <= self.threshold {
        last = Some(band);
      } else {
        break;
      }
    }

    // Nothing above the line: fall back to the first heading, but only
    // when it is actually visible; otherwise nothing is current.
    let chosen = last.or_else(|| {
      bands
        .first()
        .filter(|band| band.top - frame.scroll_top < frame.viewport_height)
    });

    self.current = chosen.map(|band| band.id.clone());
    self.current.clone()
  }
}

//! # Waypost Outline
//!
//! Heading outlines and reading-position tracking for book-style
//! documentation sites. This crate scans a rendered page for headings,
//! builds the nested "on this page" navigation tree, renders it as markup,
//! and decides which heading is *current* as the reader scrolls.
//!
//! ## Quick Start
//!
//! ```rust
//! use waypost_outline::{OutlineOptions, scan_page_headings, Outline};
//!
//! let html = r##"<main>
//!   <h2 id="intro"><a href="#intro">Introduction</a></h2>
//!   <h3 id="setup"><a href="#setup">Setup</a></h3>
//! </main>"##;
//!
//! let headings = scan_page_headings(html);
//! let outline = Outline::build(&headings, &OutlineOptions::default());
//!
//! assert_eq!(outline.roots().len(), 1);
//! println!("{}", outline.to_html());
//! ```
//!
//! ## Position tracking
//!
//! [`PositionTracker`] is the stateful controller behind the "current
//! heading" highlight. It is pure logic over scroll geometry: the embedding
//! host feeds it one [`ScrollFrame`] per scroll event and reflects the
//! returned [`Selection`] into its UI. Anchor clicks use the freeze/settle
//! protocol ([`PositionTracker::begin_anchor_jump`]) so the native
//! scroll-to-anchor can finish before the threshold is re-pinned.

mod render;
mod scan;
mod tracker;
mod tree;
mod types;

pub use crate::{
  scan::scan_page_headings,
  tracker::{
    HeadingBand,
    PositionTracker,
    ScrollFrame,
    Selection,
    ThresholdSample,
    TrackerOptions,
  },
  tree::OutlineOptions,
  types::{Heading, HeadingLevel, Outline, OutlineNode},
};

//! Types for the waypost-outline public API and internal use.
use serde::{Deserialize, Serialize};

/// Heading depth recognized by the outline scanner.
///
/// Page titles (`h1`) belong to the chapter list, not the outline, so the
/// domain starts at `h2`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
  H2,
  H3,
  H4,
  H5,
  H6,
}

impl HeadingLevel {
  /// Map an element tag name (`"h2"`..`"h6"`, any case) to a level.
  /// Returns `None` for every other tag.
  #[must_use]
  pub fn from_tag_name(tag: &str) -> Option<Self> {
    match tag.to_ascii_lowercase().as_str() {
      "h2" => Some(Self::H2),
      "h3" => Some(Self::H3),
      "h4" => Some(Self::H4),
      "h5" => Some(Self::H5),
      "h6" => Some(Self::H6),
      _ => None,
    }
  }

  /// Numeric depth of the heading, matching the tag name digit.
  #[must_use]
  pub const fn depth(self) -> u8 {
    match self {
      Self::H2 => 2,
      Self::H3 => 3,
      Self::H4 => 4,
      Self::H5 => 5,
      Self::H6 => 6,
    }
  }

  /// The next deeper level, if any.
  #[must_use]
  pub const fn deeper(self) -> Option<Self> {
    match self {
      Self::H2 => Some(Self::H3),
      Self::H3 => Some(Self::H4),
      Self::H4 => Some(Self::H5),
      Self::H5 => Some(Self::H6),
      Self::H6 => None,
    }
  }
}

/// A heading captured from a rendered page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Nesting level (h2-h6).
  pub level:      HeadingLevel,
  /// Anchor ID of the heading element. Never empty; headings without an
  /// ID are skipped at scan time.
  pub id:         String,
  /// Inner HTML of the heading's anchor child, with highlight (`<mark>`)
  /// wrappers unwrapped.
  pub label_html: String,
}

/// One node of the "on this page" tree: a heading plus the headings nested
/// beneath it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutlineNode {
  /// The heading this node represents.
  pub heading:  Heading,
  /// Headings nested at deeper levels, in document order.
  pub children: Vec<OutlineNode>,
  /// Whether the rendered entry carries a fold toggle. Set for nodes with
  /// children at or below the configured fold level.
  pub foldable: bool,
}

impl OutlineNode {
  pub(crate) const fn new(heading: Heading) -> Self {
    Self {
      heading,
      children: Vec::new(),
      foldable: false,
    }
  }
}

/// The nested sub-navigation of a single page.
///
/// Built with [`Outline::build`](crate::Outline::build) from the
/// document-ordered heading sequence; rendered with
/// [`Outline::to_html`](crate::Outline::to_html).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outline {
  pub(crate) roots: Vec<OutlineNode>,
}

impl Outline {
  /// Top-level nodes of the outline, in document order.
  #[must_use]
  pub fn roots(&self) -> &[OutlineNode] {
    &self.roots
  }

  /// True when the page had no qualifying headings.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.roots.is_empty()
  }

  /// IDs of the ancestors of `id` (outermost first), including `id` itself
  /// as the last element. Returns `None` when the heading is not part of
  /// the outline. Hosts use this to expand collapsed groups around the
  /// current heading.
  #[must_use]
  pub fn ancestor_path(&self, id: &str) -> Option<Vec<&str>> {
    fn walk<'a>(
      nodes: &'a [OutlineNode],
      id: &str,
      path: &mut Vec<&'a str>,
    ) -> bool {
      for node in nodes {
        path.push(&node.heading.id);
        if node.heading.id == id || walk(&node.children, id, path) {
          return true;
        }
        path.pop();
      }
      false
    }

    let mut path = Vec::new();
    walk(&self.roots, id, &mut path).then_some(path)
  }
}

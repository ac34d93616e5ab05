//! Outline tree construction.
//!
//! Headings arrive as a flat, document-ordered sequence; the tree nests
//! every heading under the nearest preceding shallower one. Level jumps of
//! more than one step are legal input (authors skip levels all the time)
//! and synthesize intermediate list levels at render time.

use serde::{Deserialize, Serialize};

use crate::types::{Heading, Outline, OutlineNode};

const fn default_fold_level() -> u8 {
  3
}

/// Options controlling outline construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineOptions {
  /// Heading depth at which entries with sub-entries collapse by default
  /// and receive a fold toggle.
  #[serde(default = "default_fold_level")]
  pub fold_level: u8,
}

impl Default for OutlineOptions {
  fn default() -> Self {
    Self {
      fold_level: default_fold_level(),
    }
  }
}

impl Outline {
  /// Build the outline tree from a document-ordered heading sequence.
  ///
  /// An empty sequence yields an empty outline; callers are expected to
  /// skip injection in that case (see [`Outline::is_empty`]).
  #[must_use]
  pub fn build(headings: &[Heading], options: &OutlineOptions) -> Self {
    let mut roots: Vec<OutlineNode> = Vec::new();
    // Path of open nodes, outermost first.
    let mut stack: Vec<OutlineNode> = Vec::new();

    for heading in headings {
      while stack
        .last()
        .is_some_and(|open| open.heading.level >= heading.level)
      {
        let Some(done) = stack.pop() else {
          break;
        };
        attach(&mut stack, &mut roots, done);
      }
      stack.push(OutlineNode::new(heading.clone()));
    }
    while let Some(done) = stack.pop() {
      attach(&mut stack, &mut roots, done);
    }

    let mut outline = Self { roots };
    mark_foldable(&mut outline.roots, options.fold_level);
    outline
  }
}

/// Hand a finished node to its parent, or to the root list when the stack
/// is empty.
fn attach(
  stack: &mut Vec<OutlineNode>,
  roots: &mut Vec<OutlineNode>,
  done: OutlineNode,
) {
  match stack.last_mut() {
    Some(parent) => parent.children.push(done),
    None => roots.push(done),
  }
}

fn mark_foldable(nodes: &mut [OutlineNode], fold_level: u8) {
  for node in nodes {
    node.foldable = !node.children.is_empty()
      && node.heading.level.depth() >= fold_level;
    mark_foldable(&mut node.children, fold_level);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::HeadingLevel;

  fn heading(level: HeadingLevel, id: &str) -> Heading {
    Heading {
      level,
      id: id.to_string(),
      label_html: id.to_string(),
    }
  }

  #[test]
  fn test_nesting_follows_levels() {
    // Levels [2, 3, 3, 4, 2]: two top nodes, the first with two children,
    // whose first child has one level-4 child.
    let headings = vec![
      heading(HeadingLevel::H2, "a"),
      heading(HeadingLevel::H3, "a1"),
      heading(HeadingLevel::H3, "a2"),
      heading(HeadingLevel::H4, "a2x"),
      heading(HeadingLevel::H2, "b"),
    ];

    let outline = Outline::build(&headings, &OutlineOptions::default());
    assert_eq!(outline.roots().len(), 2);

    let first = &outline.roots()[0];
    assert_eq!(first.heading.id, "a");
    assert_eq!(first.children.len(), 2);
    assert_eq!(first.children[1].children.len(), 1);
    assert_eq!(first.children[1].children[0].heading.id, "a2x");

    assert_eq!(outline.roots()[1].heading.id, "b");
    assert!(outline.roots()[1].children.is_empty());
  }

  #[test]
  fn test_level_jump_nests_under_nearest_shallower() {
    let headings = vec![
      heading(HeadingLevel::H2, "top"),
      heading(HeadingLevel::H4, "deep"),
      heading(HeadingLevel::H3, "mid"),
    ];

    let outline = Outline::build(&headings, &OutlineOptions::default());
    assert_eq!(outline.roots().len(), 1);
    let top = &outline.roots()[0];
    assert_eq!(top.children.len(), 2);
    assert_eq!(top.children[0].heading.id, "deep");
    assert_eq!(top.children[1].heading.id, "mid");
  }

  #[test]
  fn test_foldable_marking() {
    let headings = vec![
      heading(HeadingLevel::H2, "a"),
      heading(HeadingLevel::H3, "b"),
      heading(HeadingLevel::H4, "c"),
    ];

    let outline = Outline::build(&headings, &OutlineOptions::default());
    let a = &outline.roots()[0];
    let b = &a.children[0];

    // h2 has children but sits above the fold level; h3 is at the fold
    // level with a child; h4 is a leaf.
    assert!(!a.foldable);
    assert!(b.foldable);
    assert!(!b.children[0].foldable);
  }

  #[test]
  fn test_ancestor_path() {
    let headings = vec![
      heading(HeadingLevel::H2, "a"),
      heading(HeadingLevel::H3, "b"),
      heading(HeadingLevel::H4, "c"),
      heading(HeadingLevel::H2, "d"),
    ];

    let outline = Outline::build(&headings, &OutlineOptions::default());
    assert_eq!(outline.ancestor_path("c"), Some(vec!["a", "b", "c"]));
    assert_eq!(outline.ancestor_path("d"), Some(vec!["d"]));
    assert_eq!(outline.ancestor_path("missing"), None);
  }

  #[test]
  fn test_empty_input() {
    let outline = Outline::build(&[], &OutlineOptions::default());
    assert!(outline.is_empty());
  }
}

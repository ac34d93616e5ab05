//! Heading extraction from rendered pages.
//!
//! The scanner walks the page's `<main>` region and captures every `h2`-`h6`
//! that is addressable (non-empty `id`) and carries the generator's anchor
//! link as its first element child. Everything else on the page is ignored,
//! so a page without qualifying headings simply produces no outline.

use kuchikikiki::NodeRef;
use tendril::TendrilSink;

use crate::types::{Heading, HeadingLevel};

/// Scan a rendered page for outline headings, in document order.
///
/// Degrades silently: a page without a `<main>` region or without
/// qualifying headings returns an empty vector.
#[must_use]
pub fn scan_page_headings(html: &str) -> Vec<Heading> {
  let document = kuchikikiki::parse_html().one(html);

  let Ok(main) = document.select_first("main") else {
    log::debug!("page has no <main> region, skipping outline scan");
    return Vec::new();
  };

  let mut headings = Vec::new();

  let Ok(candidates) = main.as_node().select("h2, h3, h4, h5, h6") else {
    return Vec::new();
  };

  for candidate in candidates {
    let node = candidate.as_node();
    let Some(element) = node.as_element() else {
      continue;
    };
    let Some(level) = HeadingLevel::from_tag_name(&element.name.local) else {
      continue;
    };

    let id = element
      .attributes
      .borrow()
      .get("id")
      .unwrap_or_default()
      .to_string();
    if id.is_empty() {
      continue;
    }

    // The first *element* child must be the anchor the generator wraps
    // heading text in; headings with bare text are not outline entries.
    let Some(anchor) = first_element_child(node) else {
      continue;
    };
    if !is_element(&anchor, "a") {
      continue;
    }

    unwrap_marks(&anchor);

    headings.push(Heading {
      level,
      id,
      label_html: inner_html(&anchor),
    });
  }

  headings
}

/// First child of `node` that is an element, skipping text and comments.
fn first_element_child(node: &NodeRef) -> Option<NodeRef> {
  node.children().find(|child| child.as_element().is_some())
}

/// True when `node` is an element with the given local tag name.
fn is_element(node: &NodeRef, tag: &str) -> bool {
  node
    .as_element()
    .is_some_and(|element| str::eq_ignore_ascii_case(&element.name.local, tag))
}

/// Splice every `<mark>` descendant's children into its place. Search-hit
/// highlighting must not leak into the sidebar copy of the label.
fn unwrap_marks(node: &NodeRef) {
  let Ok(marks) = node.select("mark") else {
    return;
  };

  // Collect first; detaching while iterating would skip siblings.
  let marks: Vec<_> = marks.collect();
  for mark in marks {
    let mark_node = mark.as_node();
    let mut next = mark_node.first_child();
    while let Some(child) = next {
      next = child.next_sibling();
      mark_node.insert_before(child);
    }
    mark_node.detach();
  }
}

/// Serialize the children of `node` as an HTML fragment.
fn inner_html(node: &NodeRef) -> String {
  let mut out = Vec::new();
  for child in node.children() {
    child.serialize(&mut out).ok();
  }
  String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_scan_requires_main() {
    let html = r##"<body><h2 id="a"><a href="#a">A</a></h2></body>"##;
    assert!(scan_page_headings(html).is_empty());
  }

  #[test]
  fn test_scan_skips_unqualified_headings() {
    let html = r##"<main>
      <h2 id="ok"><a href="#ok">Ok</a></h2>
      <h2><a href="#no-id">No id</a></h2>
      <h2 id="no-anchor">Bare text</h2>
      <h2 id="wrong-child"><span>Span first</span></h2>
      <h1 id="title"><a href="#title">Title</a></h1>
    </main>"##;

    let headings = scan_page_headings(html);
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].id, "ok");
    assert_eq!(headings[0].level, HeadingLevel::H2);
  }

  #[test]
  fn test_scan_unwraps_marks() {
    let html = r##"<main>
      <h2 id="hit"><a href="#hit">Use <mark>the <code>cli</code></mark> now</a></h2>
    </main>"##;

    let headings = scan_page_headings(html);
    assert_eq!(headings.len(), 1);
    assert!(!headings[0].label_html.contains("<mark>"));
    assert!(headings[0].label_html.contains("<code>cli</code>"));
    assert!(headings[0].label_html.contains("Use the"));
  }

  #[test]
  fn test_scan_preserves_document_order() {
    let html = r##"<main>
      <h2 id="one"><a href="#one">One</a></h2>
      <h3 id="two"><a href="#two">Two</a></h3>
      <h2 id="three"><a href="#three">Three</a></h2>
    </main>"##;

    let ids: Vec<_> = scan_page_headings(html)
      .into_iter()
      .map(|h| h.id)
      .collect();
    assert_eq!(ids, ["one", "two", "three"]);
  }
}

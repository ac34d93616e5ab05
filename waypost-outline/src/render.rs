//! Markup rendering for the "on this page" block.

use std::fmt::Write;

use crate::types::{Outline, OutlineNode};

impl Outline {
  /// Render the outline as the "on this page" navigation block.
  ///
  /// Produces the nested `<ol class="section">` structure wrapped in
  /// `div.on-this-page`, ready for insertion after the active sidebar
  /// entry. An empty outline renders to an empty string.
  #[must_use]
  pub fn to_html(&self) -> String {
    if self.roots.is_empty() {
      return String::new();
    }

    let mut out = String::from("<div class=\"on-this-page\">");
    render_list(&mut out, &self.roots, 2);
    out.push_str("</div>");
    out
  }
}

/// Render a sibling run as the list at `list_level`.
///
/// Nodes deeper than the list synthesize intermediate lists with no entry
/// of their own: a run of deeper siblings becomes a bare nested list, one
/// level at a time, until the levels meet.
fn render_list(out: &mut String, nodes: &[OutlineNode], list_level: u8) {
  out.push_str("<ol class=\"section\">");

  let mut i = 0;
  while i < nodes.len() {
    if nodes[i].heading.level.depth() == list_level {
      render_item(out, &nodes[i]);
      i += 1;
    } else {
      let start = i;
      while i < nodes.len() && nodes[i].heading.level.depth() > list_level {
        i += 1;
      }
      render_list(out, &nodes[start..i], list_level + 1);
    }
  }

  out.push_str("</ol>");
}

fn render_item(out: &mut String, node: &OutlineNode) {
  let id = html_escape::encode_double_quoted_attribute(&node.heading.id);

  out.push_str("<li class=\"header-item expanded\">");
  out.push_str("<span class=\"chapter-link-wrapper\">");
  let _ = write!(
    out,
    "<a class=\"header-in-summary\" href=\"#{id}\">{}</a>",
    node.heading.label_html
  );
  if node.foldable {
    out.push_str(
      "<a class=\"chapter-fold-toggle header-toggle\"><div>\u{2771}</div></a>",
    );
  }
  out.push_str("</span>");

  if !node.children.is_empty() {
    render_list(out, &node.children, node.heading.level.depth() + 1);
  }

  out.push_str("</li>");
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]

  use super::*;
  use crate::{
    tree::OutlineOptions,
    types::{Heading, HeadingLevel},
  };

  fn heading(level: HeadingLevel, id: &str) -> Heading {
    Heading {
      level,
      id: id.to_string(),
      label_html: format!("<strong>{id}</strong>"),
    }
  }

  fn build(levels: &[(HeadingLevel, &str)]) -> Outline {
    let headings: Vec<_> = levels
      .iter()
      .map(|(level, id)| heading(*level, id))
      .collect();
    Outline::build(&headings, &OutlineOptions::default())
  }

  #[test]
  fn test_empty_outline_renders_nothing() {
    let outline = build(&[]);
    assert_eq!(outline.to_html(), "");
  }

  #[test]
  fn test_simple_list() {
    let outline = build(&[
      (HeadingLevel::H2, "one"),
      (HeadingLevel::H2, "two"),
    ]);
    let html = outline.to_html();

    assert!(html.starts_with("<div class=\"on-this-page\">"));
    assert!(html.contains("href=\"#one\""));
    assert!(html.contains("<strong>two</strong>"));
    assert_eq!(html.matches("<li class=\"header-item expanded\">").count(), 2);
    assert_eq!(html.matches("<ol class=\"section\">").count(), 1);
  }

  #[test]
  fn test_level_jump_synthesizes_intermediate_list() {
    // h2 followed directly by h4: the level-3 list exists in the markup
    // but owns no entry.
    let outline = build(&[
      (HeadingLevel::H2, "top"),
      (HeadingLevel::H4, "deep"),
    ]);
    let html = outline.to_html();

    assert_eq!(html.matches("<ol class=\"section\">").count(), 3);
    assert_eq!(html.matches("<li").count(), 2);
    // The deep item's list chain sits inside the top item.
    let top_at = html.find("#top").expect("top rendered");
    let deep_at = html.find("#deep").expect("deep rendered");
    assert!(top_at < deep_at);
  }

  #[test]
  fn test_page_starting_below_h2_opens_bare_lists() {
    let outline = build(&[(HeadingLevel::H4, "only")]);
    let html = outline.to_html();

    // Levels 2 and 3 are synthesized with no visible entries.
    assert_eq!(html.matches("<ol class=\"section\">").count(), 3);
    assert_eq!(html.matches("<li").count(), 1);
  }

  #[test]
  fn test_fold_toggle_only_on_deep_parents() {
    let outline = build(&[
      (HeadingLevel::H2, "a"),
      (HeadingLevel::H3, "b"),
      (HeadingLevel::H4, "c"),
    ]);
    let html = outline.to_html();

    // Only the h3 parent gets a toggle: h2 is above the fold level and
    // the h4 leaf has no children.
    assert_eq!(html.matches("chapter-fold-toggle").count(), 1);
  }

  #[test]
  fn test_id_is_attribute_escaped() {
    let outline = build(&[(HeadingLevel::H2, "a\"b")]);
    let html = outline.to_html();

    assert!(html.contains("href=\"#a&quot;b\""));
  }
}

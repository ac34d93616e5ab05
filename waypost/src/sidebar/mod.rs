//! Sidebar chapter-list rendering and active-entry resolution.
//!
//! Every rendered page receives the same fixed chapter tree; what differs
//! per page is which entry is active, which ancestor groups are expanded,
//! and the injected "on this page" outline.

pub mod session;

use std::{fmt::Write, sync::LazyLock};

use regex::Regex;

use crate::toc::{Chapter, Toc, TocEntry};

/// Scheme-relative and absolute URLs are left alone by the link rewriter.
static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::expect_used, reason = "Pattern is a literal")]
  let pattern =
    Regex::new(r"^(?:[a-z+]+:)?//").expect("absolute URL pattern compiles");
  pattern
});

/// Normalize a page URL for active-entry matching: drop the fragment and
/// query, and map a trailing `/` to the directory's index page.
#[must_use]
pub fn normalize_page_url(url: &str) -> String {
  let page = url.split(['#', '?']).next().unwrap_or(url);
  if page.ends_with('/') {
    format!("{page}index.html")
  } else {
    page.to_string()
  }
}

/// Resolve the active chapter location for a page.
///
/// An exact location match wins; failing that, the root index page aliases
/// the first located chapter. `None` means the page is not part of the
/// book's navigation, in which case the sidebar renders without an active
/// entry and outline injection is skipped.
#[must_use]
pub fn resolve_active(toc: &Toc, page: &str) -> Option<String> {
  if toc.chapter_path(page).is_some() {
    return Some(page.to_string());
  }

  if page == "index.html" {
    return toc
      .first_located_chapter()
      .and_then(|chapter| chapter.location.clone());
  }

  None
}

/// Rewrite a chapter location into an href for a page at the given depth.
/// Fragment-only targets and absolute URLs pass through untouched.
#[must_use]
pub fn rewrite_href(location: &str, root_prefix: &str) -> String {
  if location.starts_with('#') || ABSOLUTE_URL.is_match(location) {
    location.to_string()
  } else {
    format!("{root_prefix}{location}")
  }
}

/// Render the chapter list for one page.
///
/// `active` is the resolved active location (see [`resolve_active`]);
/// `outline_html` is the pre-rendered "on this page" block placed directly
/// after the active entry's link wrapper.
#[must_use]
pub fn render(
  toc: &Toc,
  root_prefix: &str,
  active: Option<&str>,
  outline_html: Option<&str>,
) -> String {
  let mut out = String::from("<ol class=\"chapter\">");
  for entry in &toc.entries {
    match entry {
      TocEntry::Part { part } => {
        let _ = write!(
          out,
          "<li class=\"part-title\">{}</li>",
          html_escape::encode_text(part)
        );
      },
      TocEntry::Spacer { .. } => out.push_str("<li class=\"spacer\"></li>"),
      TocEntry::Chapter(chapter) => {
        render_chapter(&mut out, chapter, root_prefix, active, outline_html);
      },
    }
  }
  out.push_str("</ol>");
  out
}

fn render_chapter(
  out: &mut String,
  chapter: &Chapter,
  root_prefix: &str,
  active: Option<&str>,
  outline_html: Option<&str>,
) {
  let is_active =
    active.is_some_and(|page| chapter.location.as_deref() == Some(page));
  let expanded = active.is_some_and(|page| on_active_path(chapter, page));

  let li_class = if expanded {
    "chapter-item expanded"
  } else {
    "chapter-item"
  };
  let _ = write!(
    out,
    "<li class=\"{li_class}\"><span class=\"chapter-link-wrapper\">"
  );

  let mut label = String::new();
  if let Some(number) = &chapter.number {
    let _ = write!(label, "<strong aria-hidden=\"true\">{number}.</strong> ");
  }
  label.push_str(&html_escape::encode_text(&chapter.title));

  match &chapter.location {
    Some(location) => {
      let href = rewrite_href(location, root_prefix);
      let class = if is_active { " class=\"active\"" } else { "" };
      let _ = write!(
        out,
        "<a href=\"{}\"{class}>{label}</a>",
        html_escape::encode_double_quoted_attribute(&href)
      );
    },
    // Draft chapters are listed but not linked.
    None => {
      let _ = write!(out, "<span>{label}</span>");
    },
  }

  out.push_str("</span>");

  if is_active {
    if let Some(outline) = outline_html {
      out.push_str(outline);
    }
  }

  if !chapter.children.is_empty() {
    out.push_str("<ol class=\"section\">");
    for child in &chapter.children {
      render_chapter(out, child, root_prefix, active, outline_html);
    }
    out.push_str("</ol>");
  }

  out.push_str("</li>");
}

/// True when the chapter is the active one or contains it.
fn on_active_path(chapter: &Chapter, active: &str) -> bool {
  chapter.location.as_deref() == Some(active)
    || chapter
      .children
      .iter()
      .any(|child| on_active_path(child, active))
}

//! The build pipeline: walk the rendered book, render each page's chapter
//! list, and inject the page outline after the active entry.

use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use indicatif::{ParallelProgressIterator, ProgressBar};
use kuchikikiki::NodeRef;
use log::{debug, info};
use markup5ever::{QualName, local_name, ns};
use rayon::prelude::*;
use tendril::TendrilSink;
use walkdir::WalkDir;
use waypost_config::Config;
use waypost_outline::{Outline, scan_page_headings};

use crate::{sidebar, toc::Toc, utils};

/// Enhance every rendered page of the book.
///
/// # Errors
///
/// Returns an error when the TOC manifest cannot be loaded or any page
/// cannot be read or written. Pages that merely lack a sidebar container
/// or headings are passed through unchanged, not treated as failures.
pub fn enhance_book(config: &Config) -> Result<()> {
  let toc = Toc::from_file(&config.toc)?;

  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  if let Err(e) = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()
  {
    debug!("thread pool already initialized: {e}");
  }

  let pages = collect_pages(&config.book_dir);
  info!(
    "Found {} rendered pages in {}",
    pages.len(),
    config.book_dir.display()
  );

  let bar = ProgressBar::new(pages.len() as u64);
  pages
    .par_iter()
    .progress_with(bar)
    .try_for_each(|page| enhance_page(config, &toc, page))?;

  info!("Sidebar navigation written for {} pages", pages.len());
  Ok(())
}

/// All HTML pages under the book directory, in stable order.
fn collect_pages(book_dir: &Path) -> Vec<PathBuf> {
  let mut pages: Vec<PathBuf> = WalkDir::new(book_dir)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_file())
    .filter(|entry| {
      entry
        .path()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
    })
    .map(walkdir::DirEntry::into_path)
    .collect();
  pages.sort();
  pages
}

fn enhance_page(config: &Config, toc: &Toc, path: &Path) -> Result<()> {
  let rel = path.strip_prefix(&config.book_dir).wrap_err_with(|| {
    format!("Page outside the book directory: {}", path.display())
  })?;

  let html = fs::read_to_string(path)
    .wrap_err_with(|| format!("Failed to read page: {}", path.display()))?;

  let enhanced = enhance_page_html(config, toc, rel, &html);

  let output_path = config
    .output_dir
    .as_ref()
    .map_or_else(|| path.to_path_buf(), |dir| dir.join(rel));

  if let Some(parent) = output_path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create output directory: {}", parent.display())
    })?;
  }

  fs::write(&output_path, enhanced).wrap_err_with(|| {
    format!("Failed to write page: {}", output_path.display())
  })
}

/// Produce the enhanced HTML for one page.
///
/// Enhancement degrades silently: a page outside the TOC gets a sidebar
/// with no active entry and no outline, and a page without the sidebar
/// container is returned unchanged.
#[must_use]
pub fn enhance_page_html(
  config: &Config,
  toc: &Toc,
  page_rel: &Path,
  html: &str,
) -> String {
  let page = sidebar::normalize_page_url(&utils::page_url_path(page_rel));
  let root_prefix = utils::calculate_root_relative_path(page_rel);
  let active = sidebar::resolve_active(toc, &page);

  let outline_html = if active.is_some() && config.sidebar.inject_outline {
    let headings = scan_page_headings(html);
    let outline = Outline::build(&headings, &config.outline);
    (!outline.is_empty()).then(|| outline.to_html())
  } else {
    None
  };

  let sidebar_html = sidebar::render(
    toc,
    &root_prefix,
    active.as_deref(),
    outline_html.as_deref(),
  );

  inject_sidebar(html, &config.sidebar.container, &sidebar_html)
    .unwrap_or_else(|| {
      debug!(
        "no sidebar container in {}, page left unchanged",
        page_rel.display()
      );
      html.to_string()
    })
}

/// Fill the sidebar container with the rendered chapter list.
fn inject_sidebar(
  html: &str,
  container_selector: &str,
  sidebar_html: &str,
) -> Option<String> {
  let document = kuchikikiki::parse_html().one(html);
  let container = document.select_first(container_selector).ok()?;
  let container_node = container.as_node();

  // Replace whatever placeholder content the generator left behind.
  let mut child = container_node.first_child();
  while let Some(node) = child {
    child = node.next_sibling();
    node.detach();
  }

  for node in parse_fragment_nodes(sidebar_html) {
    container_node.append(node);
  }

  let mut out = Vec::new();
  document.serialize(&mut out).ok()?;
  String::from_utf8(out).ok()
}

/// Parse an HTML fragment into its top-level nodes.
fn parse_fragment_nodes(html: &str) -> Vec<NodeRef> {
  let ctx = QualName::new(None, ns!(html), local_name!("div"));
  let root = kuchikikiki::parse_fragment(ctx, Vec::new()).one(html);

  // The fragment parser wraps content in a synthetic <html> element.
  match root.first_child() {
    Some(first)
      if first
        .as_element()
        .is_some_and(|element| &*element.name.local == "html") =>
    {
      first.children().collect()
    },
    _ => root.children().collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::toc::{Chapter, TocEntry};

  fn toc() -> Toc {
    Toc {
      entries: vec![
        TocEntry::Chapter(Chapter {
          title:    "Intro".to_string(),
          location: Some("intro.html".to_string()),
          number:   None,
          children: Vec::new(),
        }),
        TocEntry::Chapter(Chapter {
          title:    "Usage".to_string(),
          location: Some("guide/usage.html".to_string()),
          number:   None,
          children: Vec::new(),
        }),
      ],
    }
  }

  const PAGE: &str = r##"<!DOCTYPE html>
<html><body>
<nav class="sidebar"><div class="sidebar-scrollbox">placeholder</div></nav>
<main>
<h2 id="first"><a href="#first">First</a></h2>
<h2 id="second"><a href="#second">Second</a></h2>
</main>
</body></html>"##;

  #[test]
  fn test_enhance_injects_sidebar_and_outline() {
    let config = Config::default();
    let html =
      enhance_page_html(&config, &toc(), Path::new("intro.html"), PAGE);

    assert!(html.contains("<ol class=\"chapter\">"));
    assert!(html.contains("class=\"active\""));
    assert!(html.contains("on-this-page"));
    assert!(html.contains("href=\"#second\""));
    assert!(!html.contains("placeholder"));
  }

  #[test]
  fn test_nested_page_gets_prefixed_links() {
    let config = Config::default();
    let html = enhance_page_html(
      &config,
      &toc(),
      Path::new("guide/usage.html"),
      PAGE,
    );

    assert!(html.contains("href=\"../intro.html\""));
  }

  #[test]
  fn test_page_outside_toc_gets_no_outline() {
    let config = Config::default();
    let html =
      enhance_page_html(&config, &toc(), Path::new("orphan.html"), PAGE);

    // Sidebar still renders, but nothing is active and no outline is
    // injected.
    assert!(html.contains("<ol class=\"chapter\">"));
    assert!(!html.contains("class=\"active\""));
    assert!(!html.contains("on-this-page"));
  }

  #[test]
  fn test_page_without_container_is_unchanged() {
    let config = Config::default();
    let page = "<html><body><main></main></body></html>";
    let html =
      enhance_page_html(&config, &toc(), Path::new("intro.html"), page);

    assert_eq!(html, page);
  }

  #[test]
  fn test_outline_disabled_by_config() {
    let mut config = Config::default();
    config.sidebar.inject_outline = false;

    let html =
      enhance_page_html(&config, &toc(), Path::new("intro.html"), PAGE);
    assert!(!html.contains("on-this-page"));
  }
}

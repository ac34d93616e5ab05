use std::path::Path;

/// Calculate the relative path prefix needed to reach the book root from a
/// given page path. For example: "guide/install.html" returns "../" and
/// "guide/nested/deep.html" returns "../../".
#[must_use]
pub fn calculate_root_relative_path(page_rel_path: &Path) -> String {
  let depth = page_rel_path.components().count();
  if depth <= 1 {
    String::new() // page is at root level
  } else {
    "../".repeat(depth - 1)
  }
}

/// Render a page path as a forward-slash URL path for TOC matching,
/// regardless of the host separator.
#[must_use]
pub fn page_url_path(page_rel_path: &Path) -> String {
  let parts: Vec<_> = page_rel_path
    .components()
    .map(|component| component.as_os_str().to_string_lossy())
    .collect();
  parts.join("/")
}

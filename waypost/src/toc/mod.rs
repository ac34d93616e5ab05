//! The book's fixed table of contents.
//!
//! The manifest is authored once per book (TOML or JSON) and rendered into
//! every page's sidebar. Chapters nest arbitrarily deep; part titles and
//! spacers structure the list without being navigable themselves.

pub mod number;

use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub use self::number::SectionNumber;

/// One entry of the table of contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TocEntry {
  /// Unnumbered section divider, e.g. "Part II: Reference".
  Part {
    /// Divider text.
    part: String,
  },

  /// Visual separator between entry groups.
  Spacer {
    /// Always `true`; the field's presence selects the variant.
    spacer: bool,
  },

  /// A chapter, optionally numbered, optionally with sub-chapters.
  Chapter(Chapter),
}

/// A navigable (or draft) chapter of the book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
  /// Text of the sidebar link.
  pub title: String,

  /// Page location relative to the book root, e.g. `guide/intro.html`.
  /// `None` marks a draft chapter: listed, but not linked.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,

  /// Chapter number, e.g. `1.2`. Rendered before the title.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub number: Option<SectionNumber>,

  /// Nested sub-chapters, in order.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<Chapter>,
}

/// The complete table of contents of one book.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toc {
  /// Top-level entries, in order.
  #[serde(default)]
  pub entries: Vec<TocEntry>,
}

impl Toc {
  /// Load a TOC manifest from a TOML or JSON file.
  ///
  /// # Errors
  ///
  /// Returns an error when the file cannot be read, has no recognized
  /// extension, or fails to parse.
  pub fn from_file(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).wrap_err_with(|| {
      format!("Failed to read TOC manifest: {}", path.display())
    })?;

    match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("json") => {
        serde_json::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse JSON TOC from {}", path.display())
        })
      },
      Some("toml") => {
        toml::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse TOML TOC from {}", path.display())
        })
      },
      _ => bail!("Unsupported TOC manifest format: {}", path.display()),
    }
  }

  /// Find the chapter whose location matches `page`, together with its
  /// ancestor chapters (outermost first, the match last).
  #[must_use]
  pub fn chapter_path(&self, page: &str) -> Option<Vec<&Chapter>> {
    fn walk<'a>(
      chapters: impl Iterator<Item = &'a Chapter>,
      page: &str,
      path: &mut Vec<&'a Chapter>,
    ) -> bool {
      for chapter in chapters {
        path.push(chapter);
        if chapter.location.as_deref() == Some(page)
          || walk(chapter.children.iter(), page, path)
        {
          return true;
        }
        path.pop();
      }
      false
    }

    let mut path = Vec::new();
    walk(self.chapters(), page, &mut path).then_some(path)
  }

  /// First chapter carrying a location, in entry order. This entry
  /// aliases the site index when no exact match exists.
  #[must_use]
  pub fn first_located_chapter(&self) -> Option<&Chapter> {
    fn first<'a>(
      chapters: impl Iterator<Item = &'a Chapter>,
    ) -> Option<&'a Chapter> {
      for chapter in chapters {
        if chapter.location.is_some() {
          return Some(chapter);
        }
        if let Some(found) = first(chapter.children.iter()) {
          return Some(found);
        }
      }
      None
    }

    first(self.chapters())
  }

  /// Top-level chapters, skipping parts and spacers.
  pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
    self.entries.iter().filter_map(|entry| {
      match entry {
        TocEntry::Chapter(chapter) => Some(chapter),
        TocEntry::Part { .. } | TocEntry::Spacer { .. } => None,
      }
    })
  }
}

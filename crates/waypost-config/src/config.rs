use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use waypost_outline::{OutlineOptions, TrackerOptions};

use crate::{error::ConfigError, sidebar::SidebarOptions};

fn default_book_dir() -> PathBuf {
  PathBuf::from("book")
}

fn default_toc_manifest() -> PathBuf {
  PathBuf::from("toc.toml")
}

/// Configuration options for waypost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Directory containing the rendered book pages.
  #[serde(default = "default_book_dir")]
  pub book_dir: PathBuf,

  /// Output directory for enhanced pages. When unset, pages are
  /// rewritten in place.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output_dir: Option<PathBuf>,

  /// Path to the table-of-contents manifest (TOML or JSON).
  #[serde(default = "default_toc_manifest")]
  pub toc: PathBuf,

  /// Number of threads to use for parallel processing
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub jobs: Option<usize>,

  /// Sidebar behavior.
  #[serde(default)]
  pub sidebar: SidebarOptions,

  /// Outline construction options.
  #[serde(default)]
  pub outline: OutlineOptions,

  /// Position-tracker tuning, embedded in the emitted trace tooling and
  /// exposed to hosts driving the tracker.
  #[serde(default)]
  pub tracker: TrackerOptions,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      book_dir:   default_book_dir(),
      output_dir: None,
      toc:        default_toc_manifest(),
      jobs:       None,
      sidebar:    SidebarOptions::default(),
      outline:    OutlineOptions::default(),
      tracker:    TrackerOptions::default(),
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Returns an error when the file cannot be read, has no recognized
  /// extension, or fails to parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("json") => Ok(serde_json::from_str(&content)?),
      Some("toml") => Ok(toml::from_str(&content)?),
      _ => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }

  /// Look for a config file in the current directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    ["waypost.toml", ".waypost.toml", "waypost.json"]
      .iter()
      .map(PathBuf::from)
      .find(|candidate| candidate.exists())
  }

  /// Validate option ranges before running the pipeline.
  ///
  /// # Errors
  ///
  /// Returns an error describing the first invalid option found.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.sidebar.container.trim().is_empty() {
      return Err(ConfigError::Config(
        "sidebar.container must not be empty".to_string(),
      ));
    }

    if !(2..=6).contains(&self.outline.fold_level) {
      return Err(ConfigError::Config(format!(
        "outline.fold_level must be between 2 and 6, got {}",
        self.outline.fold_level
      )));
    }

    if self.tracker.down_threshold < 0.0 || self.tracker.up_threshold < 0.0 {
      return Err(ConfigError::Config(
        "tracker thresholds must not be negative".to_string(),
      ));
    }

    if self.tracker.up_threshold < self.tracker.down_threshold {
      return Err(ConfigError::Config(format!(
        "tracker.up_threshold ({}) must not be below tracker.down_threshold \
         ({})",
        self.tracker.up_threshold, self.tracker.down_threshold
      )));
    }

    Ok(())
  }

  /// Generate a default configuration file at the given path.
  ///
  /// # Errors
  ///
  /// Returns an error when serialization or the write fails, or when the
  /// format is not `toml` or `json`.
  pub fn generate_default_config(
    format: &str,
    output: &Path,
  ) -> Result<(), ConfigError> {
    let config = Self::default();

    let content = match format {
      "toml" => {
        toml::to_string_pretty(&config)
          .map_err(|e| ConfigError::Config(e.to_string()))?
      },
      "json" => serde_json::to_string_pretty(&config)?,
      other => {
        return Err(ConfigError::Config(format!(
          "Unsupported config format: {other}"
        )));
      },
    };

    fs::write(output, content)?;
    log::info!("Wrote default configuration to {}", output.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Tests can unwrap")]

  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.book_dir, PathBuf::from("book"));
    assert_eq!(config.toc, PathBuf::from("toc.toml"));
    assert!(config.output_dir.is_none());
    assert_eq!(config.outline.fold_level, 3);
    assert!((config.tracker.down_threshold - 150.0).abs() < f64::EPSILON);
    assert!((config.tracker.up_threshold - 300.0).abs() < f64::EPSILON);
    assert_eq!(config.tracker.settle_fallback_ms, 100);
  }

  #[test]
  fn test_toml_round_trip() {
    let toml = r##"
book_dir = "out/book"
toc = "summary.toml"

[sidebar]
container = "#nav"

[outline]
fold_level = 4

[tracker]
down_threshold = 120.0
"##;

    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.book_dir, PathBuf::from("out/book"));
    assert_eq!(config.sidebar.container, "#nav");
    assert_eq!(config.outline.fold_level, 4);
    assert!((config.tracker.down_threshold - 120.0).abs() < f64::EPSILON);
    // Unset fields keep their defaults.
    assert!((config.tracker.up_threshold - 300.0).abs() < f64::EPSILON);

    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_validate_rejects_bad_fold_level() {
    let mut config = Config::default();
    config.outline.fold_level = 1;
    assert!(config.validate().is_err());

    config.outline.fold_level = 7;
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_validate_rejects_inverted_thresholds() {
    let mut config = Config::default();
    config.tracker.up_threshold = 100.0;
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_validate_rejects_empty_container() {
    let mut config = Config::default();
    config.sidebar.container = "  ".to_string();
    assert!(config.validate().is_err());
  }
}

//! Configuration loading for the CLI: discovery, file parsing, and merging
//! of command-line overrides on top of the file values.

use color_eyre::eyre::{Context, Result};
use log::info;
use waypost_config::Config;

use crate::cli::{Cli, Commands};

/// Load configuration from CLI and/or config file.
///
/// # Errors
///
/// Returns an error when an explicitly specified config file cannot be
/// loaded, or when the merged configuration fails validation.
pub fn load_config(cli: &Cli) -> Result<Config> {
  let mut config = if let Some(config_path) = &cli.config_file {
    // Config file explicitly specified via CLI
    Config::from_file(config_path).wrap_err_with(|| {
      format!("Failed to load config from {}", config_path.display())
    })?
  } else if let Some(discovered) = Config::find_config_file() {
    // Found a config file in a standard location
    info!("Using discovered config file: {}", discovered.display());
    Config::from_file(&discovered).wrap_err_with(|| {
      format!("Failed to load discovered config from {}", discovered.display())
    })?
  } else {
    Config::default()
  };

  merge_with_cli(&mut config, cli);
  config.validate()?;

  Ok(config)
}

/// Apply `build` subcommand overrides on top of the file configuration.
fn merge_with_cli(config: &mut Config, cli: &Cli) {
  if let Some(Commands::Build {
    book_dir,
    output_dir,
    toc,
    jobs,
    fold_level,
  }) = &cli.command
  {
    if let Some(book_dir) = book_dir {
      config.book_dir.clone_from(book_dir);
    }
    if let Some(output_dir) = output_dir {
      config.output_dir = Some(output_dir.clone());
    }
    if let Some(toc) = toc {
      config.toc.clone_from(toc);
    }
    if jobs.is_some() {
      config.jobs = *jobs;
    }
    if let Some(fold_level) = fold_level {
      config.outline.fold_level = *fold_level;
    }
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_build_overrides_take_precedence() {
    let cli = Cli {
      command:     Some(Commands::Build {
        book_dir:   Some(PathBuf::from("rendered")),
        output_dir: None,
        toc:        Some(PathBuf::from("nav.toml")),
        jobs:       Some(2),
        fold_level: Some(4),
      }),
      verbose:     false,
      config_file: None,
    };

    let mut config = Config::default();
    merge_with_cli(&mut config, &cli);

    assert_eq!(config.book_dir, PathBuf::from("rendered"));
    assert_eq!(config.toc, PathBuf::from("nav.toml"));
    assert_eq!(config.jobs, Some(2));
    assert_eq!(config.outline.fold_level, 4);
    // Untouched values keep their defaults.
    assert!(config.output_dir.is_none());
  }

  #[test]
  fn test_no_subcommand_leaves_config_unchanged() {
    let cli = Cli {
      command:     None,
      verbose:     false,
      config_file: None,
    };

    let mut config = Config::default();
    merge_with_cli(&mut config, &cli);

    assert_eq!(config.book_dir, PathBuf::from("book"));
  }
}

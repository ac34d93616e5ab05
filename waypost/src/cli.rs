use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for waypost
#[derive(Parser, Debug)]
#[command(author, version, about = "Waypost: sidebar navigation for rendered books")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to configuration file (TOML or JSON)
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the waypost CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new waypost configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "waypost.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render sidebars and inject page outlines across a rendered book.
  Build {
    /// Directory containing the rendered book pages.
    #[arg(short, long)]
    book_dir: Option<PathBuf>,

    /// Output directory for enhanced pages. Defaults to rewriting pages
    /// in place.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to the table-of-contents manifest (TOML or JSON).
    #[arg(short, long)]
    toc: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,

    /// Heading depth at which outline entries collapse by default.
    #[arg(long = "fold-level", value_parser = clap::value_parser!(u8).range(2..=6))]
    fold_level: Option<u8>,
  },

  /// Replay a recorded scroll trace and print threshold samples.
  Trace {
    /// Path to the JSON trace file.
    input: PathBuf,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use waypost::{
  cli::{Cli, Commands},
  pipeline,
  settings,
  trace,
};
use waypost_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Handle subcommands
  if let Some(command) = &cli.command {
    match command {
      Commands::Init {
        output,
        format,
        force,
      } => {
        // Check if file already exists and that we're not forcing overwrite
        if output.exists() && !force {
          bail!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output.display()
          );
        }

        // Create parent directories if needed
        if let Some(parent) = output.parent() {
          if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).wrap_err_with(|| {
              format!("Failed to create directory: {}", parent.display())
            })?;
            info!("Created directory: {}", parent.display());
          }
        }

        // Generate the config file
        Config::generate_default_config(format, output).wrap_err_with(
          || {
            format!(
              "Failed to generate configuration file: {}",
              output.display()
            )
          },
        )?;

        info!(
          "Configuration file created successfully. Edit it to customize \
           sidebar generation."
        );
        return Ok(());
      },

      Commands::Trace { input } => {
        let config = settings::load_config(&cli)?;
        return trace::run(&config.tracker, input);
      },

      // The Build command is merged into the configuration in
      // settings::load_config
      Commands::Build { .. } => {},
    }
  }

  // Create configuration from CLI and/or config file
  let config = settings::load_config(&cli)?;

  // Run the main enhancement process
  pipeline::enhance_book(&config)
}

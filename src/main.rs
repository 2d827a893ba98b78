//! mapprep - prepares a district map SVG for inline use in a web front-end.

mod cli;
mod config;
mod district;
mod logger;
mod pipeline;
mod svg;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::MapConfig;
use pipeline::Stages;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = MapConfig::load(&cli)?;

    match &cli.command {
        Commands::Annotate { dry_run, .. } => cli::annotate::annotate_map(&config, *dry_run),
        Commands::Namespaces { .. } => cli::filter::strip_map_namespaces(&config),
        Commands::Fill { .. } => cli::filter::recolor_map(&config),
        Commands::Background { .. } => cli::filter::strip_map_background(&config),
        Commands::Run {
            skip_namespaces,
            skip_fill,
            skip_background,
            ..
        } => {
            let stages = Stages {
                namespaces: !skip_namespaces,
                fill: !skip_fill,
                background: !skip_background,
            };
            cli::run::run_pipeline(&config, stages)
        }
    }
}

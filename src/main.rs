//! Quire - A static blog generator for markdown collections.

mod cli;
mod config;
mod content;
mod embed;
mod generator;
mod logger;
mod markdown;
mod route;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site, check::check_site};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config, false).map(|_| ()),
        Commands::Check { .. } => check_site(&config).map(|_| ()),
    }
}

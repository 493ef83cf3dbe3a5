//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Quire static blog generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: quire.toml)
    #[arg(short = 'C', long, default_value = "quire.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the site
    #[command(visible_alias = "b")]
    Build {
        /// Clean output directory completely before building
        #[arg(short, long)]
        clean: bool,

        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Validate config and content without writing output
    #[command(visible_alias = "c")]
    Check {
        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["quire", "build", "--clean", "-V"]).unwrap();
        assert!(cli.is_build());
        assert_eq!(cli.config, PathBuf::from("quire.toml"));
        assert!(matches!(
            cli.command,
            Commands::Build {
                clean: true,
                verbose: true
            }
        ));
    }

    #[test]
    fn test_parse_check_with_config() {
        let cli = Cli::try_parse_from(["quire", "-C", "site/quire.toml", "--color", "never", "c"])
            .unwrap();
        assert!(cli.is_check());
        assert_eq!(cli.config, PathBuf::from("site/quire.toml"));
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(Cli::try_parse_from(["quire"]).is_err());
    }
}

//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CollisionPolicy;

/// Prepare a district map SVG for inline use in a web front-end
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: mapprep.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "mapprep.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Give patch groups district ids and names
    #[command(visible_alias = "a")]
    Annotate {
        #[command(flatten)]
        io: IoArgs,

        /// District list (feature collection JSON)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        districts: Option<PathBuf>,

        /// How to handle two districts with the same id
        #[arg(long, value_enum)]
        collision: Option<CollisionPolicy>,

        /// Print the district to patch mapping without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Strip XML namespaces and metadata for inline embedding
    #[command(visible_alias = "ns")]
    Namespaces {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Replace a fill color
    #[command(visible_alias = "f")]
    Fill {
        #[command(flatten)]
        io: IoArgs,

        /// Color to replace (exact match)
        #[arg(long)]
        from: Option<String>,

        /// Replacement color
        #[arg(long)]
        to: Option<String>,
    },

    /// Remove background groups and shapes
    #[command(visible_alias = "bg")]
    Background {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Annotate, strip namespaces, recolor and remove background in one pass
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        io: IoArgs,

        /// District list (feature collection JSON)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        districts: Option<PathBuf>,

        /// Keep namespace declarations and metadata
        #[arg(long)]
        skip_namespaces: bool,

        /// Keep fill colors
        #[arg(long)]
        skip_fill: bool,

        /// Keep background groups and shapes
        #[arg(long)]
        skip_background: bool,
    },
}

/// Input/output SVG paths shared by every command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct IoArgs {
    /// Source SVG
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Destination SVG (must differ from the source)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotate() {
        let cli = Cli::parse_from([
            "mapprep",
            "annotate",
            "-d",
            "d.json",
            "-i",
            "map.svg",
            "--collision",
            "error",
            "--dry-run",
        ]);
        let Commands::Annotate {
            io,
            districts,
            collision,
            dry_run,
        } = cli.command
        else {
            panic!("expected annotate");
        };
        assert_eq!(districts, Some(PathBuf::from("d.json")));
        assert_eq!(io.input, Some(PathBuf::from("map.svg")));
        assert_eq!(io.output, None);
        assert_eq!(collision, Some(CollisionPolicy::Error));
        assert!(dry_run);
    }

    #[test]
    fn test_parse_run_flags_and_globals() {
        let cli = Cli::parse_from(["mapprep", "r", "--skip-fill", "-v", "-C", "other.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(
            cli.command,
            Commands::Run {
                skip_fill: true,
                skip_namespaces: false,
                skip_background: false,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_collision_rejected() {
        assert!(Cli::try_parse_from(["mapprep", "annotate", "--collision", "rename"]).is_err());
    }
}

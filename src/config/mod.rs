//! Tool configuration management for `mapprep.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # One file per TOML section
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # Config file lookup, path resolution
//! └── mod.rs         # MapConfig (this file)
//! ```
//!
//! The config file is optional: every field has a default reproducing the
//! asset layout of the web front-end (`src/assets/...`). Relative paths in the
//! file are resolved against the directory holding it; paths given on the
//! command line are used as-is.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{
    AnnotateConfig, BackgroundConfig, CollisionPolicy, FillConfig, NamespaceConfig, PathsConfig,
    RunConfig,
};

use util::{find_config_file, resolve_against};

use crate::{
    cli::{Cli, Commands, IoArgs},
    log,
};
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing mapprep.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    /// Input files
    #[serde(default)]
    pub paths: PathsConfig,

    /// District annotation
    #[serde(default)]
    pub annotate: AnnotateConfig,

    /// Namespace stripping
    #[serde(default)]
    pub namespace: NamespaceConfig,

    /// Fill color replacement
    #[serde(default)]
    pub fill: FillConfig,

    /// Background removal
    #[serde(default)]
    pub background: BackgroundConfig,

    /// Full pipeline
    #[serde(default)]
    pub run: RunConfig,
}

impl MapConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file; a missing file means
    /// defaults. CLI options are applied last.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                if let Some(root) = path.parent() {
                    config.normalize_paths(root);
                }
                log!("config"; "using {}", path.display());
                config
            }
            None => Self::default(),
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve every relative path in the file against the config directory.
    fn normalize_paths(&mut self, root: &Path) {
        for path in [
            &mut self.paths.districts,
            &mut self.paths.input,
            &mut self.annotate.output,
            &mut self.namespace.output,
            &mut self.fill.output,
            &mut self.background.output,
            &mut self.run.output,
        ] {
            *path = resolve_against(root, path);
        }
    }

    /// Check values that would make a transform meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.annotate.patch_prefix.is_empty() {
            diag.error_with_hint(
                "annotate.patch_prefix",
                "must not be empty",
                "groups are labeled like `patch_3`, so use \"patch_\"",
            );
        }
        if self.fill.from.is_empty() {
            diag.error("fill.from", "must not be empty");
        }
        if self.fill.to.is_empty() {
            diag.error("fill.to", "must not be empty");
        }
        if self.background.fills.iter().any(String::is_empty) {
            diag.error("background.fills", "colors must not be empty");
        }

        diag.into_result()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        match &cli.command {
            Commands::Annotate {
                io,
                districts,
                collision,
                ..
            } => {
                Self::update_option(&mut self.paths.districts, districts.as_ref());
                Self::update_option(&mut self.annotate.collision, collision.as_ref());
                self.apply_io(io, |c| &mut c.annotate.output);
            }
            Commands::Namespaces { io } => self.apply_io(io, |c| &mut c.namespace.output),
            Commands::Fill { io, from, to } => {
                Self::update_option(&mut self.fill.from, from.as_ref());
                Self::update_option(&mut self.fill.to, to.as_ref());
                self.apply_io(io, |c| &mut c.fill.output);
            }
            Commands::Background { io } => self.apply_io(io, |c| &mut c.background.output),
            Commands::Run { io, districts, .. } => {
                Self::update_option(&mut self.paths.districts, districts.as_ref());
                self.apply_io(io, |c| &mut c.run.output);
            }
        }
    }

    fn apply_io(&mut self, io: &IoArgs, output: impl FnOnce(&mut Self) -> &mut PathBuf) {
        Self::update_option(&mut self.paths.input, io.input.as_ref());
        Self::update_option(output(self), io.output.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

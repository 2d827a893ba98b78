//! `[annotate]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [annotate]
//! output = "src/assets/IstanbulHaritasi_updated.svg"
//! patch_prefix = "patch_"   # Generic group label prefix
//! reserved = 2              # Leading background groups (patch_1, patch_2)
//! collision = "suffix"      # keep | suffix | error
//! ```

use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// What to do when two district names normalize to the same id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Both groups get the same id.
    Keep,
    /// Later duplicates get a numeric suffix (`sisli2`).
    #[default]
    Suffix,
    /// Abort annotation.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    /// Output path of the annotated SVG.
    pub output: PathBuf,

    /// Prefix of the generic group labels (`patch_` for `patch_3`).
    pub patch_prefix: String,

    /// Number of leading groups holding background layers.
    pub reserved: usize,

    /// Id collision handling.
    pub collision: CollisionPolicy,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            output: "src/assets/IstanbulHaritasi_updated.svg".into(),
            patch_prefix: "patch_".into(),
            reserved: 2,
            collision: CollisionPolicy::default(),
        }
    }
}

impl AnnotateConfig {
    /// Generic label of the group at 1-based position `n`.
    pub fn label(&self, n: usize) -> String {
        format!("{}{}", self.patch_prefix, n)
    }

    /// Label of the group assigned to the district at `index`.
    pub fn label_for(&self, index: usize) -> String {
        self.label(index + self.reserved + 1)
    }

    /// Whether `id` looks like a generic group label (`patch_17`).
    pub fn is_label(&self, id: &str) -> bool {
        id.strip_prefix(self.patch_prefix.as_str())
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}

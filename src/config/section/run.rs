//! `[run]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [run]
//! output = "src/assets/IstanbulHaritasi_processed.svg"
//! ```

use serde::Deserialize;
use std::path::PathBuf;

/// Full pipeline settings (annotate → namespaces → fill → background).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Output path of the fully processed SVG.
    pub output: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output: "src/assets/IstanbulHaritasi_processed.svg".into(),
        }
    }
}

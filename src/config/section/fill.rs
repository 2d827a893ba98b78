//! `[fill]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [fill]
//! output = "src/assets/IstanbulHaritasi_visible.svg"
//! from = "#ffffff"
//! to = "#d3d3d3"
//! ```

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Output path of the recolored SVG.
    pub output: PathBuf,

    /// Color to replace (exact, case-sensitive).
    pub from: String,

    /// Replacement color.
    pub to: String,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            output: "src/assets/IstanbulHaritasi_visible.svg".into(),
            from: "#ffffff".into(),
            to: "#d3d3d3".into(),
        }
    }
}

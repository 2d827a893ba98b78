//! `[background]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [background]
//! output = "src/assets/IstanbulHaritasi_no_bg.svg"
//! labels = ["patch_1", "patch_2"]   # Groups removed with their content
//! fills = ["#212830", "#000000"]    # Self-closing paths with these style fills are removed
//! ```

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Output path of the SVG without background.
    pub output: PathBuf,

    /// Labels of the background groups.
    pub labels: Vec<String>,

    /// Style fill colors marking stray background shapes.
    pub fills: Vec<String>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            output: "src/assets/IstanbulHaritasi_no_bg.svg".into(),
            labels: vec!["patch_1".into(), "patch_2".into()],
            fills: vec!["#212830".into(), "#000000".into()],
        }
    }
}

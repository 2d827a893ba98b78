//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! districts = "src/assets/istanbul-district.json"
//! input = "src/assets/IstanbulHaritasi.svg"
//! ```

use serde::Deserialize;
use std::path::PathBuf;

/// Input files shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Feature collection JSON holding the district names.
    pub districts: PathBuf,

    /// Source SVG map.
    pub input: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            districts: "src/assets/istanbul-district.json".into(),
            input: "src/assets/IstanbulHaritasi.svg".into(),
        }
    }
}

//! `[namespace]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [namespace]
//! output = "src/assets/IstanbulHaritasi_fixed.svg"
//! declarations = ["xmlns:xlink", "xmlns:dc", "xmlns:cc", "xmlns:rdf"]
//! ```
//!
//! The default `xmlns` declaration is never removed.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Output path of the stripped SVG.
    pub output: PathBuf,

    /// Namespace declaration attributes to remove.
    pub declarations: Vec<String>,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            output: "src/assets/IstanbulHaritasi_fixed.svg".into(),
            declarations: ["xmlns:xlink", "xmlns:dc", "xmlns:cc", "xmlns:rdf"]
                .map(String::from)
                .to_vec(),
        }
    }
}

//! File handling shared across CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Read a whole SVG (or any UTF-8) file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Write `content` to `output`, refusing to overwrite `input`.
///
/// Parent directories of `output` are created as needed.
pub fn write_output(input: &Path, output: &Path, content: &str) -> Result<()> {
    if is_same_file(input, output) {
        bail!(
            "output {} is the input file; choose a different output path",
            output.display()
        );
    }

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(output, content).with_context(|| format!("failed to write {}", output.display()))
}

/// Whether two paths name the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

//! Single-stage filter commands: `namespaces`, `fill`, `background`.
//!
//! Each reads `paths.input`, applies one transform and writes the section's
//! output path.

use std::path::Path;

use anyhow::{Context, Result};

use super::common::{read_text, write_output};
use crate::config::MapConfig;
use crate::svg::{
    BackgroundReport, FillReport, NamespaceReport, remove_background, replace_fill,
    strip_namespaces,
};
use crate::utils::plural_count;
use crate::{debug, log};

pub fn strip_map_namespaces(config: &MapConfig) -> Result<()> {
    let input = &config.paths.input;
    let svg = read_text(input)?;
    let report = strip_namespaces(&svg, &config.namespace)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    log_namespaces(&report);
    finish(input, &config.namespace.output, &report.svg)
}

pub fn recolor_map(config: &MapConfig) -> Result<()> {
    let input = &config.paths.input;
    let svg = read_text(input)?;
    let report = replace_fill(&svg, &config.fill.from, &config.fill.to)?;
    log_fill(config, &report);
    finish(input, &config.fill.output, &report.svg)
}

pub fn strip_map_background(config: &MapConfig) -> Result<()> {
    let input = &config.paths.input;
    let svg = read_text(input)?;
    let report = remove_background(&svg, &config.background)
        .with_context(|| format!("failed to remove background from {}", input.display()))?;
    log_background(&report);
    finish(input, &config.background.output, &report.svg)
}

fn finish(input: &Path, output: &Path, svg: &str) -> Result<()> {
    write_output(input, output, svg)?;
    log!("done"; "wrote {}", output.display());
    Ok(())
}

// ============================================================================
// Reports
// ============================================================================

pub fn log_namespaces(report: &NamespaceReport) {
    log!(
        "namespaces";
        "{} -> {} bytes ({} removed)",
        report.size_before,
        report.size_after,
        report.bytes_removed()
    );
    debug!(
        "namespaces";
        "{}, {}, {}, {}",
        plural_count(report.declarations_removed, "declaration"),
        plural_count(report.xml_attrs_removed, "xml: attribute"),
        plural_count(report.hrefs_renamed, "xlink:href rename"),
        plural_count(report.metadata_removed, "metadata block")
    );
}

pub fn log_fill(config: &MapConfig, report: &FillReport) {
    log!(
        "fill";
        "{} -> {}: replaced {}",
        config.fill.from,
        config.fill.to,
        plural_count(report.replaced, "occurrence")
    );
    debug!("fill"; "{} now fill {}", report.target_count, config.fill.to);
}

pub fn log_background(report: &BackgroundReport) {
    if report.districts_before == 0 {
        log!("warn"; "input has no data-district attributes; run annotate first");
    }
    log!(
        "background";
        "removed {} and {}",
        plural_count(report.removed_groups.len(), "group"),
        plural_count(report.removed_shapes, "shape")
    );
    for label in &report.removed_groups {
        debug!("background"; "removed group {}", label);
    }
    for label in &report.missing_groups {
        log!("warn"; "background group {} not found", label);
    }
    log!(
        "background";
        "{} before, {} after",
        plural_count(report.districts_before, "district"),
        report.districts_after
    );
}

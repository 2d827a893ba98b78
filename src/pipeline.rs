//! Full map processing pipeline.
//!
//! Stages run in a fixed order on one in-memory document:
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌──────┐   ┌────────────┐
//! │ annotate │──►│ namespaces │──►│ fill │──►│ background │
//! └──────────┘   └────────────┘   └──────┘   └────────────┘
//! ```
//!
//! Background removal runs last so that the `data-district` attributes it
//! counts are already present, and the two background groups still carry
//! their generic labels when it looks for them.

use anyhow::{Context, Result};

use crate::config::MapConfig;
use crate::svg::{
    Annotation, BackgroundReport, FillReport, NamespaceReport, annotate, remove_background,
    replace_fill, strip_namespaces,
};

/// Optional stages; annotation always runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stages {
    pub namespaces: bool,
    pub fill: bool,
    pub background: bool,
}

impl Default for Stages {
    fn default() -> Self {
        Self {
            namespaces: true,
            fill: true,
            background: true,
        }
    }
}

/// Final document plus each stage's report.
///
/// The `svg` field of every stage report is moved into the next stage, so
/// only [`PipelineOutput::svg`] holds text.
#[derive(Debug)]
pub struct PipelineOutput {
    pub svg: String,
    pub annotation: Annotation,
    pub namespace: Option<NamespaceReport>,
    pub fill: Option<FillReport>,
    pub background: Option<BackgroundReport>,
}

/// Run every enabled stage over `svg`.
pub fn process(
    svg: &str,
    districts: &[String],
    config: &MapConfig,
    stages: Stages,
) -> Result<PipelineOutput> {
    let mut annotation =
        annotate(svg, districts, &config.annotate).context("annotate stage failed")?;
    let mut svg = std::mem::take(&mut annotation.svg);

    let namespace = if stages.namespaces {
        let mut report =
            strip_namespaces(&svg, &config.namespace).context("namespace stage failed")?;
        svg = std::mem::take(&mut report.svg);
        Some(report)
    } else {
        None
    };

    let fill = if stages.fill {
        let mut report = replace_fill(&svg, &config.fill.from, &config.fill.to)
            .context("fill stage failed")?;
        svg = std::mem::take(&mut report.svg);
        Some(report)
    } else {
        None
    };

    let background = if stages.background {
        let mut report =
            remove_background(&svg, &config.background).context("background stage failed")?;
        svg = std::mem::take(&mut report.svg);
        Some(report)
    } else {
        None
    };

    Ok(PipelineOutput {
        svg,
        annotation,
        namespace,
        fill,
        background,
    })
}

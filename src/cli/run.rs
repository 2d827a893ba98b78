//! `run` command: every stage in one pass.

use anyhow::{Context, Result};

use super::annotate::{log_annotation, read_districts};
use super::common::{read_text, write_output};
use super::filter::{log_background, log_fill, log_namespaces};
use crate::config::MapConfig;
use crate::log;
use crate::pipeline::{Stages, process};

pub fn run_pipeline(config: &MapConfig, stages: Stages) -> Result<()> {
    let districts = read_districts(config)?;
    let input = &config.paths.input;
    let svg = read_text(input)?;

    let out = process(&svg, &districts, config, stages)
        .with_context(|| format!("failed to process {}", input.display()))?;

    log_annotation(&out.annotation);
    if let Some(report) = &out.namespace {
        log_namespaces(report);
    }
    if let Some(report) = &out.fill {
        log_fill(config, report);
    }
    if let Some(report) = &out.background {
        log_background(report);
    }

    let output = &config.run.output;
    write_output(input, output, &out.svg)?;
    log!(
        "done";
        "{} -> {} ({} -> {} bytes)",
        input.display(),
        output.display(),
        svg.len(),
        out.svg.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::count_districts;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_pipeline_end_to_end() {
        let temp = TempDir::new().unwrap();
        let mut config = MapConfig::default();
        config.paths.districts = temp.path().join("districts.json");
        config.paths.input = temp.path().join("map.svg");
        config.run.output = temp.path().join("map_processed.svg");

        fs::write(
            &config.paths.districts,
            r#"{"features":[{"properties":{"name":"Adalar"}}]}"#,
        )
        .unwrap();
        fs::write(
            &config.paths.input,
            r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink">
 <g id="patch_1"><path d="M 0 0" style="fill: #ffffff"/></g>
 <g id="patch_2"><path d="M 0 0" style="fill: #212830"/></g>
 <g id="patch_3"><path d="M 1 1" style="fill: #ffffff"/></g>
</svg>"##,
        )
        .unwrap();

        run_pipeline(&config, Stages::default()).unwrap();

        let out = fs::read_to_string(&config.run.output).unwrap();
        assert!(out.contains(r#"<g id="adalar" data-district="Adalar">"#));
        assert!(out.contains(r#"<path id="pathAdalar" d="M 1 1" style="fill: #d3d3d3"/>"#));
        assert!(!out.contains("patch_"));
        assert!(!out.contains("xmlns:xlink"));
        assert_eq!(count_districts(&out).unwrap(), 1);
    }
}

//! `annotate` command.

use anyhow::{Context, Result};

use super::common::{read_text, write_output};
use crate::config::MapConfig;
use crate::district::load_districts;
use crate::svg::annotate::{Annotation, Outcome, annotate};
use crate::utils::plural_count;
use crate::{debug, log};

/// Load the district list named by the config.
pub fn read_districts(config: &MapConfig) -> Result<Vec<String>> {
    let districts = load_districts(&config.paths.districts)?;
    log!(
        "districts";
        "loaded {} from {}",
        plural_count(districts.len(), "district"),
        config.paths.districts.display()
    );
    for (index, name) in districts.iter().enumerate() {
        debug!("districts"; "{:>3}. {}", index + 1, name);
    }
    Ok(districts)
}

/// Annotate the input map and write it, or only print the mapping.
pub fn annotate_map(config: &MapConfig, dry_run: bool) -> Result<()> {
    let districts = read_districts(config)?;
    let input = &config.paths.input;
    let svg = read_text(input)?;

    let annotation = annotate(&svg, &districts, &config.annotate)
        .with_context(|| format!("failed to annotate {}", input.display()))?;
    log_annotation(&annotation);

    if dry_run {
        log!("annotate"; "dry run, nothing written");
        return Ok(());
    }

    let output = &config.annotate.output;
    write_output(input, output, &annotation.svg)?;
    log!(
        "done";
        "annotated {} of {} -> {}",
        annotation.annotated_count(),
        plural_count(districts.len(), "district"),
        output.display()
    );
    Ok(())
}

/// Per-district lines, collisions and missing labels.
pub fn log_annotation(annotation: &Annotation) {
    log!(
        "annotate";
        "found {}, need {}",
        plural_count(annotation.patch_count, "patch group"),
        annotation.districts.len()
    );

    for collision in &annotation.collisions {
        log!(
            "warn";
            "`{}` and `{}` both normalize to `{}`, using `{}`",
            collision.first,
            collision.second,
            collision.id,
            collision.resolved
        );
    }

    for report in &annotation.districts {
        let a = &report.assignment;
        match report.outcome {
            Outcome::Annotated { path_injected } => {
                log!("annotate"; "{} → {} ({})", a.label, a.id, a.name);
                if !path_injected {
                    log!("warn"; "{} holds no path, {} not set", a.label, a.path_id);
                }
            }
            Outcome::Missing => {
                log!("warn"; "{} not found, {} left unannotated", a.label, a.name);
            }
        }
    }

    let missing = annotation.missing().count();
    if missing > 0 {
        log!("warn"; "{} without a patch group", plural_count(missing, "district"));
    }
}

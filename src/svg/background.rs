//! Background removal.
//!
//! The map export starts with two full-canvas groups (`patch_1`, `patch_2`)
//! painting the backdrop. Both are dropped with their content, together with
//! any stray self-closing `<path/>` whose style fills it with a background
//! color. District annotations are counted before and after as a
//! post-condition report.

use quick_xml::events::{BytesStart, BytesText, Event};
use regex::Regex;
use thiserror::Error;

use super::{SvgError, SvgStream, attr_value, count_districts, is_group, is_path};
use crate::config::BackgroundConfig;

#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("invalid background fill color")]
    Fill(#[from] regex::Error),

    #[error(transparent)]
    Svg(#[from] SvgError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundReport {
    pub svg: String,
    /// Labels of the groups that were found and removed, in document order.
    pub removed_groups: Vec<String>,
    /// Labels configured but absent from the input.
    pub missing_groups: Vec<String>,
    /// Self-closing shapes removed for their fill.
    pub removed_shapes: usize,
    /// Elements carrying `data-district` before removal.
    pub districts_before: usize,
    /// Elements carrying `data-district` after removal.
    pub districts_after: usize,
}

/// Style matcher for the configured background fills.
fn fill_matcher(fills: &[String]) -> Result<Option<Regex>, regex::Error> {
    if fills.is_empty() {
        return Ok(None);
    }
    let alternatives: Vec<_> = fills.iter().map(|f| regex::escape(f)).collect();
    let pattern = format!(r"fill:[ \t\r\n]*(?:{})", alternatives.join("|"));
    Regex::new(&pattern).map(Some)
}

struct Remover<'c> {
    /// Background labels not removed yet; each is removed once.
    pending: Vec<&'c str>,
    fill: Option<Regex>,
    removed_groups: Vec<String>,
    removed_shapes: usize,
}

impl Remover<'_> {
    /// Whether `elem` is a background group; consumes its label.
    fn take_group(&mut self, elem: &BytesStart<'_>) -> Result<bool, SvgError> {
        let Some(id) = attr_value(elem, b"id")? else {
            return Ok(false);
        };
        let Some(pos) = self.pending.iter().position(|label| *label == id) else {
            return Ok(false);
        };
        self.pending.remove(pos);
        self.removed_groups.push(id);
        Ok(true)
    }

    fn is_background_shape(&self, elem: &BytesStart<'_>) -> Result<bool, SvgError> {
        let Some(fill) = &self.fill else {
            return Ok(false);
        };
        Ok(attr_value(elem, b"style")?.is_some_and(|style| fill.is_match(&style)))
    }
}

/// Remove the configured background groups and background-filled shapes.
pub fn remove_background(
    svg: &str,
    config: &BackgroundConfig,
) -> Result<BackgroundReport, BackgroundError> {
    let mut remover = Remover {
        pending: config.labels.iter().map(String::as_str).collect(),
        fill: fill_matcher(&config.fills)?,
        removed_groups: Vec::new(),
        removed_shapes: 0,
    };
    // whitespace following a removed group goes with it
    let mut trim_text = false;

    let mut stream = SvgStream::new(svg);
    loop {
        let event = stream.next()?;
        let trim = std::mem::take(&mut trim_text);

        match event {
            Event::Start(elem) if is_group(&elem) => {
                if remover.take_group(&elem)? {
                    stream.skip_element(&elem)?;
                    trim_text = true;
                } else {
                    stream.write(Event::Start(elem))?;
                }
            }
            Event::Empty(elem) if is_group(&elem) => {
                if remover.take_group(&elem)? {
                    trim_text = true;
                } else {
                    stream.write(Event::Empty(elem))?;
                }
            }
            Event::Empty(elem) if is_path(&elem) => {
                if remover.is_background_shape(&elem)? {
                    remover.removed_shapes += 1;
                } else {
                    stream.write(Event::Empty(elem))?;
                }
            }
            Event::Text(text) if trim => {
                let raw = String::from_utf8_lossy(&text);
                let rest = raw.trim_start();
                if !rest.is_empty() {
                    stream.write(Event::Text(BytesText::from_escaped(rest)))?;
                }
            }
            Event::Eof => break,
            event => stream.write(event)?,
        }
    }

    let out = stream.finish()?;
    let districts_before = count_districts(svg)?;
    let districts_after = count_districts(&out)?;

    Ok(BackgroundReport {
        svg: out,
        removed_groups: remover.removed_groups,
        missing_groups: remover.pending.into_iter().map(String::from).collect(),
        removed_shapes: remover.removed_shapes,
        districts_before,
        districts_after,
    })
}

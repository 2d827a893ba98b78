//! Fill color replacement.
//!
//! Matches both spellings a map export uses:
//! - style declarations: `fill:#ffffff`, `fill: #ffffff`
//! - presentation attributes: `fill="#ffffff"`
//!
//! Matching is exact and case-sensitive; `#FFFFFF` or `white` are not touched.

use regex::{NoExpand, Regex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub svg: String,
    /// Occurrences of the source color, both spellings.
    pub replaced: usize,
    /// Occurrences of the target color after replacement, both spellings.
    pub target_count: usize,
}

/// Both spellings of a fill declaration for one color.
struct FillPattern {
    style: Regex,
    attr: Regex,
}

impl FillPattern {
    fn new(color: &str) -> Result<Self, regex::Error> {
        let color = regex::escape(color);
        Ok(Self {
            style: Regex::new(&format!(r"fill:[ \t\r\n]*{color}"))?,
            attr: Regex::new(&format!(r#"fill="{color}""#))?,
        })
    }

    fn count(&self, text: &str) -> usize {
        self.style.find_iter(text).count() + self.attr.find_iter(text).count()
    }
}

/// Replace every fill of color `from` with `to`.
pub fn replace_fill(svg: &str, from: &str, to: &str) -> Result<FillReport, regex::Error> {
    let source = FillPattern::new(from)?;
    let replaced = source.count(svg);

    let style = format!("fill: {to}");
    let attr = format!(r#"fill="{to}""#);
    let svg = source.style.replace_all(svg, NoExpand(&style));
    let svg = source.attr.replace_all(&svg, NoExpand(&attr)).into_owned();

    let target_count = FillPattern::new(to)?.count(&svg);

    Ok(FillReport {
        svg,
        replaced,
        target_count,
    })
}

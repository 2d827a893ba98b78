//! Namespace stripping for inline embedding.
//!
//! JSX and most inline-SVG consumers reject prefixed attributes and RDF
//! metadata. This removes:
//! - configured `xmlns:*` declarations (the default `xmlns` stays)
//! - `<metadata>` elements and everything inside them
//! - `xml:*` attributes such as `xml:space`
//!
//! and renames `xlink:href` to `href`. A final pass collapses runs of spaces.

use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use regex::Regex;

use super::{SvgError, SvgStream, attributes, rebuild, renamed};
use crate::config::NamespaceConfig;

const METADATA: &[u8] = b"metadata";
const XML_PREFIX: &[u8] = b"xml:";
const XLINK_HREF: &[u8] = b"xlink:href";

static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"  +").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceReport {
    pub svg: String,
    pub size_before: usize,
    pub size_after: usize,
    pub declarations_removed: usize,
    pub xml_attrs_removed: usize,
    pub hrefs_renamed: usize,
    pub metadata_removed: usize,
}

impl NamespaceReport {
    pub fn bytes_removed(&self) -> usize {
        self.size_before.saturating_sub(self.size_after)
    }
}

enum Edit {
    Keep,
    Drop,
    Rename,
}

struct Stripper<'c> {
    declarations: &'c [String],
    report: NamespaceReport,
}

impl Stripper<'_> {
    fn classify(&self, key: &[u8]) -> Edit {
        if self.declarations.iter().any(|d| d.as_bytes() == key) || key.starts_with(XML_PREFIX) {
            Edit::Drop
        } else if key == XLINK_HREF {
            Edit::Rename
        } else {
            Edit::Keep
        }
    }

    /// Rewrite the tag only if one of its attributes needs an edit.
    fn strip<'a>(&mut self, elem: BytesStart<'a>) -> Result<BytesStart<'a>, SvgError> {
        let attrs = attributes(&elem)?;
        if attrs
            .iter()
            .all(|attr| matches!(self.classify(attr.key.as_ref()), Edit::Keep))
        {
            drop(attrs);
            return Ok(elem);
        }

        let mut kept = Vec::with_capacity(attrs.len());
        for attr in attrs {
            match self.classify(attr.key.as_ref()) {
                Edit::Keep => kept.push(attr),
                Edit::Rename => {
                    self.report.hrefs_renamed += 1;
                    kept.push(renamed(attr, b"href"));
                }
                Edit::Drop if attr.key.as_ref().starts_with(XML_PREFIX) => {
                    self.report.xml_attrs_removed += 1;
                }
                Edit::Drop => self.report.declarations_removed += 1,
            }
        }
        Ok(rebuild(&elem, kept))
    }
}

/// Strip namespace declarations, metadata and prefixed attributes.
pub fn strip_namespaces(svg: &str, config: &NamespaceConfig) -> Result<NamespaceReport, SvgError> {
    let mut stripper = Stripper {
        declarations: &config.declarations,
        report: NamespaceReport {
            size_before: svg.len(),
            ..NamespaceReport::default()
        },
    };
    let mut stream = SvgStream::new(svg);

    loop {
        match stream.next()? {
            Event::Start(elem) if elem.local_name().as_ref() == METADATA => {
                stream.skip_element(&elem)?;
                stripper.report.metadata_removed += 1;
            }
            Event::Empty(elem) if elem.local_name().as_ref() == METADATA => {
                stripper.report.metadata_removed += 1;
            }
            Event::Start(elem) => {
                let elem = stripper.strip(elem)?;
                stream.write(Event::Start(elem))?;
            }
            Event::Empty(elem) => {
                let elem = stripper.strip(elem)?;
                stream.write(Event::Empty(elem))?;
            }
            Event::Eof => break,
            event => stream.write(event)?,
        }
    }

    let stripped = stream.finish()?;
    let svg = RE_SPACES.replace_all(&stripped, " ").into_owned();

    let mut report = stripper.report;
    report.size_after = svg.len();
    report.svg = svg;
    Ok(report)
}

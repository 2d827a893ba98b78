//! Streaming SVG rewrites.
//!
//! Every transform walks the document event by event with `quick-xml` and
//! writes untouched events back verbatim, so only the elements a transform
//! targets change shape in the output.
//!
//! # Modules
//!
//! - [`annotate`]: district ids on `patch_N` groups
//! - [`namespace`]: namespace declaration and metadata stripping
//! - [`fill`]: fill color replacement
//! - [`background`]: background group and shape removal
//!
//! # Architecture
//!
//! ```text
//!   input text
//!       │
//!       ▼
//!  ┌───────────┐   Start/Empty ──► transform decides: keep / rebuild / drop
//!  │ SvgStream │   End/Text/...──► written back as read
//!  └─────┬─────┘
//!        ▼
//!   output text
//! ```

pub mod annotate;
pub mod background;
pub mod fill;
pub mod namespace;

use std::borrow::Cow;

use quick_xml::{
    Reader, Writer,
    events::{
        BytesStart, Event,
        attributes::{AttrError, Attribute},
    },
    name::QName,
};
use thiserror::Error;

pub use annotate::{Annotation, annotate};
pub use background::{BackgroundReport, remove_background};
pub use fill::{FillReport, replace_fill};
pub use namespace::{NamespaceReport, strip_namespaces};

const BOM: char = '\u{feff}';

/// Attribute carrying the original district display name.
pub const DISTRICT_ATTR: &[u8] = b"data-district";

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("XML parse error at position {position}")]
    Parse {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute")]
    Attr(#[from] AttrError),

    #[error("failed to write SVG")]
    Write(#[from] std::io::Error),

    #[error("rewritten SVG is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ============================================================================
// Event stream
// ============================================================================

/// Reader/writer pair over one in-memory document.
pub(crate) struct SvgStream<'a> {
    reader: Reader<&'a [u8]>,
    writer: Writer<Vec<u8>>,
}

impl<'a> SvgStream<'a> {
    /// A leading byte order mark is not parsed; it is copied to the output.
    pub fn new(svg: &'a str) -> Self {
        let mut out = Vec::with_capacity(svg.len());
        let body = match svg.strip_prefix(BOM) {
            Some(body) => {
                out.extend_from_slice(BOM.encode_utf8(&mut [0; 4]).as_bytes());
                body
            }
            None => svg,
        };

        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            writer: Writer::new(out),
        }
    }

    /// Read the next event, attaching the byte position to parse errors.
    pub fn next(&mut self) -> Result<Event<'a>, SvgError> {
        self.reader.read_event().map_err(|source| SvgError::Parse {
            position: self.reader.error_position() as u64,
            source,
        })
    }

    pub fn write(&mut self, event: Event<'_>) -> Result<(), SvgError> {
        self.writer.write_event(event)?;
        Ok(())
    }

    /// Consume everything up to and including the end tag matching `start`.
    pub fn skip_element(&mut self, start: &BytesStart<'_>) -> Result<(), SvgError> {
        self.reader
            .read_to_end(start.name())
            .map_err(|source| SvgError::Parse {
                position: self.reader.error_position() as u64,
                source,
            })?;
        Ok(())
    }

    pub fn finish(self) -> Result<String, SvgError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

// ============================================================================
// Element helpers
// ============================================================================

#[inline]
pub(crate) fn is_group(elem: &BytesStart<'_>) -> bool {
    elem.local_name().as_ref() == b"g"
}

#[inline]
pub(crate) fn is_path(elem: &BytesStart<'_>) -> bool {
    elem.local_name().as_ref() == b"path"
}

/// Raw (still escaped) value of attribute `key`.
pub(crate) fn attr_value(elem: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, SvgError> {
    for attr in elem.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(String::from_utf8_lossy(&attr.value).into_owned()));
        }
    }
    Ok(None)
}

/// Collect the attributes of `elem`, failing on the first malformed one.
pub(crate) fn attributes<'a>(elem: &'a BytesStart<'a>) -> Result<Vec<Attribute<'a>>, SvgError> {
    elem.attributes()
        .map(|attr| attr.map(requote).map_err(SvgError::from))
        .collect()
}

/// Build a new start tag with the same name and the given attributes.
pub(crate) fn rebuild<'b>(elem: &BytesStart<'_>, attrs: Vec<Attribute<'b>>) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);
    out.extend_attributes(attrs);
    out
}

/// Attribute with a rewritten key and the original raw value.
#[inline]
pub(crate) fn renamed<'a>(attr: Attribute<'a>, key: &'a [u8]) -> Attribute<'a> {
    Attribute {
        key: QName(key),
        value: attr.value,
    }
}

/// Rebuilt tags are written with double quotes; escape any `"` that was
/// legal inside a single-quoted value.
fn requote(attr: Attribute<'_>) -> Attribute<'_> {
    if !attr.value.contains(&b'"') {
        return attr;
    }
    let mut value = Vec::with_capacity(attr.value.len() + 8);
    for &b in attr.value.iter() {
        if b == b'"' {
            value.extend_from_slice(b"&quot;");
        } else {
            value.push(b);
        }
    }
    Attribute {
        key: attr.key,
        value: Cow::Owned(value),
    }
}

/// Count elements carrying attribute `key`.
pub fn count_attribute(svg: &str, key: &[u8]) -> Result<usize, SvgError> {
    let mut stream = SvgStream::new(svg);
    let mut count = 0;
    loop {
        match stream.next()? {
            Event::Start(elem) | Event::Empty(elem) => {
                if attr_value(&elem, key)?.is_some() {
                    count += 1;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(count)
}

/// Count elements carrying a `data-district` attribute.
pub fn count_districts(svg: &str) -> Result<usize, SvgError> {
    count_attribute(svg, DISTRICT_ATTR)
}

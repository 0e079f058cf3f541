//! XHTML event source.
//!
//! Reads content markup with quick-xml and drives a [`TreeBuilder`]. The
//! source is wrapped in a synthetic root so that fragments with several
//! top-level elements (the usual shape of a `content.xhtml`) parse as one
//! tree.
//!
//! Text stays in its source form: `&lt;` is passed on as `&lt;`, not `<`,
//! so default passthrough output remains valid HTML. Entity references such
//! as `&nbsp;` are re-emitted verbatim, CDATA sections are escaped, and
//! comments, processing instructions and doctypes are dropped.
//!
//! Attribute values are the exception: they are fully unescaped, HTML5 named
//! entities included, and escaped again when the open tag is serialized.

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::behavior::BehaviorRegistry;
use crate::builder::{FRAGMENT_ROOT, TreeBuilder};
use crate::element::{Attributes, ElementTree};
use crate::error::MarkupError;
use crate::util::escape_html;

/// Parse `source` into an element tree rooted at a fragment element.
///
/// # Errors
///
/// Returns [`MarkupError::Xml`] for malformed XML and
/// [`MarkupError::Unbalanced`] when tags do not nest.
pub fn parse(source: &str, registry: &BehaviorRegistry) -> Result<ElementTree, MarkupError> {
    let body = strip_declaration(source);
    let wrapped = format!("<{FRAGMENT_ROOT}>{body}</{FRAGMENT_ROOT}>");

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut builder = TreeBuilder::new(registry);
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if depth == 0 {
                    builder.open_fragment()?;
                } else {
                    let name = decode_name(&reader, e.name().as_ref());
                    let attributes = decode_attributes(&reader, &e)?;
                    builder.open(&name, attributes, false)?;
                }
                depth += 1;
            }
            Event::Empty(e) => {
                let name = decode_name(&reader, e.name().as_ref());
                let attributes = decode_attributes(&reader, &e)?;
                builder.open(&name, attributes, true)?;
                builder.close(&name)?;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                let name = if depth == 0 {
                    FRAGMENT_ROOT.to_owned()
                } else {
                    decode_name(&reader, e.name().as_ref())
                };
                builder.close(&name)?;
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                builder.text(&text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                builder.text(&format!("&{entity};"));
            }
            Event::CData(e) => {
                let text = reader.decoder().decode(&e)?;
                builder.text(&escape_html(&text));
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }

    builder.finish()
}

/// Drop a leading byte order mark and `<?xml ...?>` declaration, neither of
/// which may appear inside the wrapper element.
fn strip_declaration(source: &str) -> &str {
    let source = source.trim_start_matches('\u{feff}');
    let trimmed = source.trim_start();
    if trimmed.starts_with("<?xml")
        && let Some(end) = trimmed.find("?>")
    {
        return &trimmed[end + 2..];
    }
    source
}

fn decode_name<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader
        .decoder()
        .decode(name)
        .map_or_else(|_| String::from_utf8_lossy(name).into_owned(), Cow::into_owned)
}

fn decode_attributes<R: BufRead>(
    reader: &Reader<R>,
    e: &BytesStart<'_>,
) -> Result<Attributes, MarkupError> {
    let mut attributes = Attributes::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decode_name(reader, attr.key.as_ref());
        let raw = reader.decoder().decode(&attr.value)?;
        let value = match unescape_with(&raw, resolve_html5_entity) {
            Ok(value) => value.into_owned(),
            Err(error) => {
                // unknown entity: keep the text as written, it is escaped on output
                tracing::debug!(attribute = %key, %error, "Attribute value kept unresolved");
                raw.into_owned()
            }
        };
        attributes.insert(key, value);
    }
    Ok(attributes)
}

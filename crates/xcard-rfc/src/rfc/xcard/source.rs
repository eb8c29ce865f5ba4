//! Input adapters producing element events.
//!
//! Both adapters feed the same [`ContentSink`]: [`stream_xml`] pulls events
//! from a namespace-aware `quick-xml` reader, and [`replay`] walks an
//! in-memory [`XmlFragment`].

use std::io::BufRead;
use std::ops::ControlFlow;

use quick_xml::NsReader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use super::error::{XCardError, XCardResult};
use super::fragment::{Attribute, Child, Element, FragmentBuilder, XmlFragment};
use super::handler::ContentSink;
use super::namespace::{Namespace, QName};

/// Streams a document into `sink` until end of input or until the sink
/// asks to stop.
///
/// ## Errors
/// Returns an error if the document is not well-formed, uses an undeclared
/// namespace prefix or an undefined entity, or cannot be read. Input that
/// ends before the root element closes, or that has no root element, is not
/// well-formed.
pub(crate) fn stream_xml<R: BufRead>(
    reader: &mut NsReader<R>,
    sink: &mut impl ContentSink,
) -> XCardResult<()> {
    reader.config_mut().expand_empty_elements = true;
    let decoder = reader.decoder();
    let mut buf = Vec::new();
    // quick-xml does not report unclosed elements at end of input.
    let mut open = 0usize;
    let mut seen_root = false;

    loop {
        let (namespace, event) = reader.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(start) => {
                let name = qualified_name(namespace, &start, decoder)?;
                let attributes = attributes(&start, decoder)?;
                open += 1;
                seen_root = true;
                sink.start_element(name, attributes);
            }
            Event::End(_) => {
                open = open.saturating_sub(1);
                if sink.end_element().is_break() {
                    tracing::debug!("Stopped before end of input");
                    return Ok(());
                }
            }
            Event::Text(text) => {
                let text = decoder.decode(&text)?;
                sink.characters(&unescape(&text)?);
            }
            Event::CData(data) => sink.characters(&decoder.decode(&data)?),
            Event::GeneralRef(reference) => {
                let name = decoder.decode(&reference)?;
                sink.characters(&resolve_reference(&name)?);
            }
            Event::Eof if open > 0 => return Err(XCardError::UnexpectedEof { open }),
            Event::Eof if !seen_root => return Err(XCardError::NoRootElement),
            Event::Eof => return Ok(()),
            _ => {}
        }
        buf.clear();
    }
}

fn qualified_name(
    namespace: ResolveResult<'_>,
    start: &BytesStart<'_>,
    decoder: Decoder,
) -> XCardResult<QName> {
    let namespace = match namespace {
        ResolveResult::Bound(uri) => Namespace::from(std::str::from_utf8(uri.as_ref())?.to_owned()),
        ResolveResult::Unbound => Namespace::NONE,
        ResolveResult::Unknown(prefix) => {
            return Err(XCardError::UnboundPrefix(
                String::from_utf8_lossy(&prefix).into_owned(),
            ));
        }
    };
    let local_name = decoder.decode(start.local_name().as_ref())?.into_owned();
    Ok(QName::new(namespace, local_name))
}

/// Collects the attributes of an element, leaving out `xmlns` declarations.
fn attributes(start: &BytesStart<'_>, decoder: Decoder) -> XCardResult<Vec<Attribute>> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let name = decoder.decode(attr.key.local_name().as_ref())?.into_owned();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        attributes.push(Attribute::new(name, value));
    }
    Ok(attributes)
}

/// Expands `&name;` or `&#N;` to its text.
fn resolve_reference(name: &str) -> XCardResult<String> {
    let resolved = if let Some(code) = name.strip_prefix('#') {
        let code_point = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        code_point.and_then(char::from_u32).map(String::from)
    } else {
        resolve_predefined_entity(name).map(str::to_owned)
    };
    resolved.ok_or_else(|| XCardError::UnknownEntity(name.to_owned()))
}

/// Replays an element and its descendants into `sink`.
///
/// Stops early, returning [`ControlFlow::Break`], if the sink asks to.
pub(crate) fn replay(element: Element<'_>, sink: &mut impl ContentSink) -> ControlFlow<()> {
    sink.start_element(element.name().clone(), element.attributes().to_vec());
    for child in element.children() {
        match child {
            Child::Text(text) => sink.characters(text),
            Child::Element(child) => {
                if replay(child, sink).is_break() {
                    return ControlFlow::Break(());
                }
            }
        }
    }
    sink.end_element()
}

/// Builds a fragment from the root element of a document.
#[derive(Debug, Default)]
struct TreeSink {
    builder: Option<FragmentBuilder>,
    depth: usize,
}

impl ContentSink for TreeSink {
    fn start_element(&mut self, name: QName, attributes: Vec<Attribute>) {
        match &mut self.builder {
            Some(builder) => builder.open(name, attributes),
            None => self.builder = Some(FragmentBuilder::new(name, attributes)),
        }
        self.depth += 1;
    }

    fn characters(&mut self, text: &str) {
        if self.depth > 0
            && let Some(builder) = &mut self.builder
        {
            builder.text(text);
        }
    }

    fn end_element(&mut self) -> ControlFlow<()> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            return ControlFlow::Break(());
        }
        if let Some(builder) = &mut self.builder {
            builder.close();
        }
        ControlFlow::Continue(())
    }
}

impl XmlFragment {
    /// Parses a document into a fragment rooted at its root element.
    ///
    /// ## Errors
    /// Returns an error if the document is not well-formed or has no root
    /// element.
    pub fn parse(xml: &str) -> XCardResult<Self> {
        let mut reader = NsReader::from_str(xml);
        let mut sink = TreeSink::default();
        stream_xml(&mut reader, &mut sink)?;
        sink.builder
            .map(FragmentBuilder::finish)
            .ok_or(XCardError::NoRootElement)
    }
}

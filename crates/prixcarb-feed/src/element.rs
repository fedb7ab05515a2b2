//! Owned XML element tree built from `quick-xml` events.
//!
//! The feed is small enough to hold in memory, and mapping a station needs
//! random access to its children, so the whole document is materialized
//! before any mapping starts.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::FeedError;

/// One XML element with its attributes, trimmed text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}

/// Parse a whole XML document and return its root element.
///
/// Self-closing elements (`<prix ... />`) and empty open/close pairs produce
/// identical elements.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] on syntax errors, [`FeedError::EmptyDocument`]
/// when no root element exists, [`FeedError::Truncated`] when input ends
/// inside an element, and [`FeedError::MalformedFeed`] when a second root
/// element follows the first.
pub fn parse_document(xml: &str) -> Result<Element, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(open_element(&e)?),
            Event::Empty(e) => {
                let element = open_element(&e)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut root)?;
                }
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = stack.pop() {
        return Err(FeedError::Truncated(unclosed.name));
    }
    root.ok_or(FeedError::EmptyDocument)
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, FeedError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let attributes = start
        .attributes()
        .map(|attr| {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect::<Result<Vec<_>, FeedError>>()?;

    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), FeedError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(FeedError::MalformedFeed {
            tag: element.name,
            context: "document root".to_string(),
        });
    }
    *root = Some(element);
    Ok(())
}

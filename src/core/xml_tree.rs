//! Converts a Namecheap XML reply into an [`XmlValue`] tree.
//!
//! A leaf element without attributes becomes [`XmlValue::Text`]. Anything
//! with children or attributes becomes an [`XmlElement`]. Children are keyed
//! by tag name; a tag seen once among its siblings is [`OneOrMany::One`] and
//! a repeated tag is [`OneOrMany::Many`] in document order.
//!
//! Text is trimmed. When an element has element children its text is
//! dropped. Child elements, CDATA sections and comments each end a text run
//! (a CDATA section is a run of its own); the last non-empty run is the one
//! kept. Entity references stay part of the run they appear in.

use crate::utils::error::{NamecheapError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Key prefix for attributes in the serialized map shape.
pub const ATTRIBUTE_PREFIX: char = '_';
/// Key holding text content when an element also has attributes.
pub const TEXT_KEY: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(value) => std::slice::from_ref(value).iter(),
            Self::Many(values) => values.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    fn from_vec(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Self::One(value);
            }
        }
        Self::Many(values)
    }
}

impl<T: Serialize> Serialize for OneOrMany<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::One(value) => value.serialize(serializer),
            Self::Many(values) => values.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub children: BTreeMap<String, OneOrMany<XmlValue>>,
    pub attributes: BTreeMap<String, String>,
    /// Present only when the element has no element children.
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlValue {
    Text(String),
    Element(XmlElement),
}

impl XmlValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Text content, whether the node is a bare leaf or an element with attributes.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(element) => element.text.as_deref(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element()
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
    }

    pub fn child(&self, tag: &str) -> Option<&OneOrMany<XmlValue>> {
        self.as_element().and_then(|element| element.children.get(tag))
    }

    /// Follows `tags` through single children. All but the last step must be
    /// unrepeated; the last step may be repeated.
    pub fn path(&self, tags: &[&str]) -> Option<&OneOrMany<XmlValue>> {
        let (last, parents) = tags.split_last()?;
        let mut node = self;
        for tag in parents {
            match node.child(tag)? {
                OneOrMany::One(next) => node = next,
                OneOrMany::Many(_) => return None,
            }
        }
        node.child(last)
    }
}

impl Serialize for XmlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Element(element) => {
                let len = element.children.len()
                    + element.attributes.len()
                    + usize::from(element.text.is_some());
                let mut map = serializer.serialize_map(Some(len))?;
                for (tag, value) in &element.children {
                    map.serialize_entry(tag, value)?;
                }
                if let Some(text) = &element.text {
                    map.serialize_entry(TEXT_KEY, text)?;
                }
                for (name, value) in &element.attributes {
                    map.serialize_entry(&format!("{}{}", ATTRIBUTE_PREFIX, name), value)?;
                }
                map.end()
            }
        }
    }
}

/// Parsed document: root tag name plus its converted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root_name: String,
    pub root: XmlValue,
}

#[derive(Default)]
struct NodeBuilder {
    name: String,
    attributes: BTreeMap<String, String>,
    children: BTreeMap<String, Vec<XmlValue>>,
    pending_text: String,
    text: Option<String>,
}

impl NodeBuilder {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self> {
        let name = decode_utf8(start.name().as_ref(), position)?;
        let mut attributes = BTreeMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| NamecheapError::xml(e.to_string(), position))?;
            let key = decode_utf8(attr.key.as_ref(), position)?;
            let raw = decode_utf8(&attr.value, position)?;
            let value = quick_xml::escape::unescape(&raw)
                .map_err(|e| NamecheapError::xml(e.to_string(), position))?;
            attributes.insert(key, value.into_owned());
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    /// Closes the current text run. Only a non-empty run replaces the scalar.
    fn flush_text(&mut self) {
        let trimmed = self.pending_text.trim();
        if !trimmed.is_empty() {
            self.text = Some(trimmed.to_string());
        }
        self.pending_text.clear();
    }

    fn push_child(&mut self, name: String, value: XmlValue) {
        self.children.entry(name).or_default().push(value);
    }

    fn finish(mut self) -> (String, XmlValue) {
        self.flush_text();
        let value = if self.children.is_empty() && self.attributes.is_empty() {
            XmlValue::Text(self.text.unwrap_or_default())
        } else {
            let text = if self.children.is_empty() {
                Some(self.text.unwrap_or_default())
            } else {
                None
            };
            XmlValue::Element(XmlElement {
                children: self
                    .children
                    .into_iter()
                    .map(|(tag, values)| (tag, OneOrMany::from_vec(values)))
                    .collect(),
                attributes: self.attributes,
                text,
            })
        };
        (self.name, value)
    }
}

/// Parses `xml` into a tree. Fails on malformed input or a missing root.
pub fn parse(xml: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<NodeBuilder> = Vec::new();
    let mut document: Option<XmlDocument> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| NamecheapError::xml(e.to_string(), position))?;

        match event {
            Event::Start(start) => {
                ensure_single_root(&document, position)?;
                if let Some(parent) = stack.last_mut() {
                    parent.flush_text();
                }
                stack.push(NodeBuilder::open(&start, position)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&document, position)?;
                if let Some(parent) = stack.last_mut() {
                    parent.flush_text();
                }
                let node = NodeBuilder::open(&start, position)?;
                attach(&mut stack, &mut document, node);
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| NamecheapError::xml("unexpected closing tag", position))?;
                attach(&mut stack, &mut document, node);
            }
            Event::Text(text) => {
                if let Some(node) = stack.last_mut() {
                    node.pending_text.push_str(&decode_utf8(&text, position)?);
                }
            }
            Event::CData(cdata) => {
                if let Some(node) = stack.last_mut() {
                    node.flush_text();
                    node.pending_text.push_str(&decode_utf8(&cdata, position)?);
                    node.flush_text();
                }
            }
            // comments and processing instructions end the current text run
            Event::Comment(_) | Event::PI(_) => {
                if let Some(node) = stack.last_mut() {
                    node.flush_text();
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(node) = stack.last_mut() {
                    let name = decode_utf8(&reference, position)?;
                    node.pending_text.push(resolve_reference(&name, position)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(NamecheapError::xml(
            "unexpected end of document",
            reader.buffer_position() as u64,
        ));
    }
    document.ok_or_else(|| NamecheapError::xml("document has no root element", 0))
}

fn attach(stack: &mut [NodeBuilder], document: &mut Option<XmlDocument>, node: NodeBuilder) {
    let (name, value) = node.finish();
    match stack.last_mut() {
        Some(parent) => parent.push_child(name, value),
        None => {
            *document = Some(XmlDocument {
                root_name: name,
                root: value,
            })
        }
    }
}

fn ensure_single_root(document: &Option<XmlDocument>, position: u64) -> Result<()> {
    if document.is_some() {
        return Err(NamecheapError::xml("multiple root elements", position));
    }
    Ok(())
}

fn decode_utf8(bytes: &[u8], position: u64) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| NamecheapError::xml(e.to_string(), position))
}

fn resolve_reference(name: &str, position: u64) -> Result<char> {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name.strip_prefix('#').and_then(|code| {
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse::<u32>().ok(),
            };
            value.and_then(char::from_u32)
        }),
    };
    resolved.ok_or_else(|| NamecheapError::xml(format!("unknown entity &{};", name), position))
}

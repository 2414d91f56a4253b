use crate::{
    codec::xml::{ITEM_ELEMENT, escape_attribute, escape_text},
    value::Value,
};
use std::fmt;

///
/// XmlNode
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

///
/// XmlElement
///
/// In-memory element used when writing objects.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn push_element(&mut self, child: Self) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Append a value as content: scalars as text, lists as `<item>`
    /// children, `Null` as nothing.
    pub fn push_value(&mut self, value: &Value) {
        match value {
            Value::Null => {}
            Value::List(items) => {
                for item in items {
                    let mut child = Self::new(ITEM_ELEMENT);
                    child.push_value(item);
                    self.push_element(child);
                }
            }
            scalar => self.push_text(scalar.to_text()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Direct child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated direct text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_attribute(value, out);
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_to(out),
                XmlNode::Text(text) => escape_text(text, out),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    #[must_use]
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);

        out
    }
}

///
/// XmlDocument
///
/// Root element plus an optional `<?xml ...?>` prolog.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
    prolog: bool,
}

impl XmlDocument {
    pub const PROLOG: &'static str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

    #[must_use]
    pub const fn new(root: XmlElement) -> Self {
        Self { root, prolog: true }
    }

    #[must_use]
    pub const fn with_prolog(mut self, prolog: bool) -> Self {
        self.prolog = prolog;
        self
    }

    #[must_use]
    pub const fn root(&self) -> &XmlElement {
        &self.root
    }

    pub const fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    #[must_use]
    pub fn into_root(self) -> XmlElement {
        self.root
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prolog {
            f.write_str(Self::PROLOG)?;
        }

        f.write_str(&self.root.to_xml_string())
    }
}

//! Minimal XML surface for property values: an element tree for writing and
//! a pull reader for decoding.
//!
//! Layout:
//! `<Class><prop>text</prop><list><item>a</item><item>b</item></list></Class>`
//!
//! The element tree does not validate text: characters XML 1.0 forbids are
//! written as character references that only this reader accepts. Property
//! writes go through `check_text` and reject them instead.

mod element;
mod reader;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use thiserror::Error as ThisError;

pub use element::{XmlDocument, XmlElement, XmlNode};
pub use reader::{XmlEvent, XmlReader, XmlStart};

/// Child element name used for list items.
pub const ITEM_ELEMENT: &str = "item";

///
/// XmlError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum XmlError {
    #[error("malformed xml at byte {offset}")]
    Syntax { offset: usize },

    #[error("unexpected end of xml input")]
    UnexpectedEof,

    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEnd { expected: String, found: String },

    #[error("end tag </{found}> has no open element")]
    UnbalancedEnd { found: String },

    #[error("unknown entity '&{entity};'")]
    Entity { entity: String },

    #[error("unexpected element <{name}>")]
    UnexpectedElement { name: String },

    #[error("unexpected text content '{text}'")]
    UnexpectedText { text: String },

    #[error("expected element <{expected}>, found <{found}>")]
    ElementName { expected: String, found: String },

    #[error("character U+{code:04X} is not allowed in xml")]
    InvalidChar { code: u32 },
}

/// Reject characters outside the XML 1.0 `Char` production.
pub fn check_text(input: &str) -> Result<(), XmlError> {
    match input.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(XmlError::InvalidChar { code: u32::from(c) }),
        None => Ok(()),
    }
}

const fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{fffd}' | '\u{10000}'..)
}

///
/// XmlContext
///
/// Decoding policy handed to `read_xml`.
/// Strict contexts reject unknown elements; lenient ones skip them.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct XmlContext {
    strict: bool,
}

impl XmlContext {
    #[must_use]
    pub const fn new(strict: bool) -> Self {
        Self { strict }
    }

    #[must_use]
    pub const fn strict() -> Self {
        Self::new(true)
    }

    #[must_use]
    pub const fn lenient() -> Self {
        Self::new(false)
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }
}

// escape_text
// control characters other than tab and newline are written as character
// references; see the module docs
pub(crate) fn escape_text(input: &str, out: &mut String) {
    escape_into(input, out, false);
}

pub(crate) fn escape_attribute(input: &str, out: &mut String) {
    escape_into(input, out, true);
}

fn escape_into(input: &str, out: &mut String, attribute: bool) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&apos;"),
            '\t' | '\n' => out.push(c),
            c if u32::from(c) < 0x20 => {
                out.push_str(&format!("&#x{:x};", u32::from(c)));
            }
            c => out.push(c),
        }
    }
}

pub(crate) fn unescape(input: &str) -> Result<Cow<'_, str>, XmlError> {
    if !input.contains('&') {
        return Ok(Cow::Borrowed(input));
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);

        let after = &rest[amp + 1..];
        let semi = after.find(';').ok_or_else(|| XmlError::Entity {
            entity: after.chars().take(8).collect(),
        })?;

        out.push(decode_entity(&after[..semi])?);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

fn decode_entity(entity: &str) -> Result<char, XmlError> {
    let decoded = match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok()
            } else {
                None
            };

            code.and_then(char::from_u32)
        }
    };

    decoded.ok_or_else(|| XmlError::Entity {
        entity: entity.to_string(),
    })
}

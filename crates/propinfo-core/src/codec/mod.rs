//! Wire encodings a property participates in.
//!
//! Each format lives in its own module so a property descriptor composes
//! the capabilities it needs instead of carrying one monolithic contract:
//! - `json`: outputter policy and `Value` <-> JSON conversion
//! - `parser`: reusable typed parser over JSON and plain text
//! - `xml`: element tree writer and pull reader
//! - `sql`: column type names

pub mod json;
pub mod parser;
pub mod sql;
pub mod xml;

pub use json::{JsonOutputter, OutputMode};
pub use parser::ValueParser;
pub use xml::{XmlContext, XmlDocument, XmlElement, XmlError, XmlEvent, XmlReader};

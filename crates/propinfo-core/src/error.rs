use crate::{
    codec::xml::XmlError,
    value::{ValueParseError, ValueType},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// PropertyError
///
/// Failure of a single property operation. A failed write never leaves the
/// target object partially modified.
///

#[derive(Debug, ThisError)]
pub enum PropertyError {
    #[error("type mismatch on '{property}': expected {expected}, found {found}")]
    TypeMismatch {
        property: &'static str,
        expected: ValueType,
        found: &'static str,
    },

    #[error("wrong receiver for '{property}': expected an instance of {expected}")]
    WrongReceiver {
        property: &'static str,
        expected: &'static str,
    },

    #[error("required property '{property}' cannot be null")]
    MissingRequired { property: &'static str },

    #[error("cannot parse '{input}' for '{property}': {source}")]
    Parse {
        property: &'static str,
        input: String,
        #[source]
        source: ValueParseError,
    },

    #[error("cannot encode '{property}': {reason}")]
    Encoding {
        property: &'static str,
        reason: String,
    },

    #[error("unknown property '{property}' on class '{class}'")]
    UnknownProperty { class: &'static str, property: String },

    #[error("malformed '{class}' document: {reason}")]
    Malformed { class: &'static str, reason: String },

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl PropertyError {
    pub(crate) fn parse(property: &'static str, input: &str, source: ValueParseError) -> Self {
        Self::Parse {
            property,
            input: truncate_input(input),
            source,
        }
    }
}

///
/// BindingError
///
/// Owning-class binding failures. A property is bound exactly once, while
/// its class descriptor is built.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BindingError {
    #[error("property '{property}' is not bound to a class")]
    Unbound { property: &'static str },

    #[error("property '{property}' is already bound to '{bound}', cannot bind to '{requested}'")]
    AlreadyBound {
        property: &'static str,
        bound: &'static str,
        requested: &'static str,
    },
}

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Binding(#[from] BindingError),
}

///
/// ValidationErrors
///
/// Every problem found while validating one class declaration.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationErrors {
    class: &'static str,
    messages: Vec<String>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn new(class: &'static str) -> Self {
        Self {
            class,
            messages: Vec::new(),
        }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.class
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `Ok` when nothing was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class '{}': {}", self.class, self.messages.join("; "))
    }
}

// keep error messages bounded when the input is a whole document
pub(crate) fn truncate_input(input: &str) -> String {
    const MAX_INPUT_CHARS: usize = 64;

    if input.chars().count() <= MAX_INPUT_CHARS {
        return input.to_string();
    }

    let mut out: String = input.chars().take(MAX_INPUT_CHARS).collect();
    out.push('…');
    out
}

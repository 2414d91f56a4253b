use crate::{
    codec::json,
    value::{Value, ValueParseError, ValueType, parse_text},
};

///
/// ValueParser
///
/// Reusable parser for one declared value type. Created by a property's
/// `create_parser`; holds no borrowed state so it can be kept and reused.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ValueParser {
    value_type: ValueType,
}

impl ValueParser {
    #[must_use]
    pub const fn new(value_type: ValueType) -> Self {
        Self { value_type }
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Decode JSON text.
    pub fn parse_json(&self, input: &str) -> Result<Value, ValueParseError> {
        let parsed: serde_json::Value = serde_json::from_str(input)?;

        self.parse_json_value(&parsed)
    }

    /// Decode an already-parsed JSON value.
    pub fn parse_json_value(&self, input: &serde_json::Value) -> Result<Value, ValueParseError> {
        json::decode_value(input, self.value_type)
    }

    /// Decode the plain-text form (see [`Value::to_text`]).
    pub fn parse_text(&self, input: &str) -> Result<Value, ValueParseError> {
        parse_text(input, self.value_type)
    }
}

///
/// TESTS
///

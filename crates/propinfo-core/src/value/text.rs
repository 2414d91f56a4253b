//! Plain-text form of values, used by `set_from_string`, XML content, and
//! the string round-trip.

use crate::{
    codec::json,
    types::{Blob, BlobDecodeError, Float64, Timestamp, TimestampError, encode_hex},
    value::{Cardinality, Primitive, Value, ValueType},
};
use thiserror::Error as ThisError;

///
/// ValueParseError
///

#[derive(Debug, ThisError)]
pub enum ValueParseError {
    #[error("expected {expected}, found '{input}'")]
    Invalid { expected: Primitive, input: String },

    #[error("non-finite float '{input}'")]
    NonFinite { input: String },

    #[error("expected {expected}, found {found}")]
    Shape {
        expected: ValueType,
        found: &'static str,
    },

    #[error(transparent)]
    Blob(#[from] BlobDecodeError),

    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Value {
    /// Textual form accepted back by [`parse_text`] for the same value type.
    ///
    /// `Null` renders as the empty string; lists render as a JSON array.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Blob(bytes) => encode_hex(bytes),
            Self::Bool(v) => v.to_string(),
            Self::Float64(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::List(_) => json::encode_value(self).to_string(),
            Self::Null => String::new(),
            Self::Text(v) => v.clone(),
            Self::Timestamp(v) => v.to_string(),
            Self::Uint(v) => v.to_string(),
        }
    }
}

/// Parse text into a value of the given declared type.
///
/// - `Opt`: the empty string is `Null`, except for `Text` where it is the
///   empty string.
/// - `Many`: a JSON array (the empty string is the empty list).
pub fn parse_text(input: &str, value_type: ValueType) -> Result<Value, ValueParseError> {
    match value_type.cardinality() {
        Cardinality::One => parse_scalar(input, value_type.primitive()),
        Cardinality::Opt if input.is_empty() && value_type.primitive() != Primitive::Text => {
            Ok(Value::Null)
        }
        Cardinality::Opt => parse_scalar(input, value_type.primitive()),
        Cardinality::Many if input.trim().is_empty() => Ok(Value::List(Vec::new())),
        Cardinality::Many => {
            let parsed: serde_json::Value = serde_json::from_str(input)?;

            json::decode_value(&parsed, value_type)
        }
    }
}

/// Parse text into one scalar of the given primitive.
pub fn parse_scalar(input: &str, primitive: Primitive) -> Result<Value, ValueParseError> {
    let invalid = || ValueParseError::Invalid {
        expected: primitive,
        input: input.to_string(),
    };

    match primitive {
        Primitive::Blob => Ok(Value::Blob(Blob::from_hex(input)?.into_vec())),
        Primitive::Bool => match input.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
        Primitive::Float64 => {
            let raw: f64 = input.trim().parse().map_err(|_| invalid())?;

            Float64::try_new(raw)
                .map(Value::Float64)
                .ok_or_else(|| ValueParseError::NonFinite {
                    input: input.to_string(),
                })
        }
        Primitive::Int => input.trim().parse().map(Value::Int).map_err(|_| invalid()),
        Primitive::Text => Ok(Value::Text(input.to_string())),
        Primitive::Timestamp => Ok(Value::Timestamp(input.parse::<Timestamp>()?)),
        Primitive::Uint => input.trim().parse().map(Value::Uint).map_err(|_| invalid()),
    }
}

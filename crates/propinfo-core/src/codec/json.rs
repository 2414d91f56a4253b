use crate::{
    property::PropertyMeta,
    types::{Blob, Float64, Timestamp, encode_hex},
    value::{Cardinality, Primitive, Value, ValueParseError, ValueType},
};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

///
/// OutputMode
///
/// Which serialization channel an outputter writes for. Transient
/// properties are suppressed on their channel only.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Full,
    Network,
    Storage,
}

///
/// JsonOutputter
///
/// Owns JSON encoding policy: channel, pretty printing, null emission.
/// Properties append their values through it and never decide policy
/// themselves.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct JsonOutputter {
    mode: OutputMode,
    pretty: bool,
    emit_nulls: bool,
}

impl JsonOutputter {
    #[must_use]
    pub const fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            pretty: false,
            emit_nulls: false,
        }
    }

    #[must_use]
    pub const fn full() -> Self {
        Self::new(OutputMode::Full)
    }

    #[must_use]
    pub const fn network() -> Self {
        Self::new(OutputMode::Network)
    }

    #[must_use]
    pub const fn storage() -> Self {
        Self::new(OutputMode::Storage)
    }

    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub const fn with_emit_nulls(mut self, emit_nulls: bool) -> Self {
        self.emit_nulls = emit_nulls;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }

    #[must_use]
    pub const fn emits_nulls(&self) -> bool {
        self.emit_nulls
    }

    /// Whether a property with this metadata is written on this channel.
    #[must_use]
    pub const fn includes(&self, meta: &PropertyMeta) -> bool {
        match self.mode {
            OutputMode::Full => true,
            OutputMode::Network => !meta.is_network_transient(),
            OutputMode::Storage => !meta.is_storage_transient(),
        }
    }

    /// Whether one object member should be written at all.
    #[must_use]
    pub const fn should_write(&self, meta: &PropertyMeta, value: &Value) -> bool {
        self.includes(meta) && (self.emit_nulls || !value.is_null())
    }

    /// Append one encoded value to `out`.
    pub fn output_value(&self, out: &mut String, value: &Value) {
        out.push_str(&self.render(&encode_value(value)));
    }

    pub(crate) fn render(&self, json: &JsonValue) -> String {
        if self.pretty {
            format!("{json:#}")
        } else {
            json.to_string()
        }
    }
}

/// Encode a value as JSON.
///
/// Blobs are lowercase hex strings and timestamps use their text form, so
/// every value has exactly one encoding.
#[must_use]
pub fn encode_value(value: &Value) -> JsonValue {
    match value {
        Value::Blob(bytes) => JsonValue::String(encode_hex(bytes)),
        Value::Bool(v) => JsonValue::Bool(*v),
        Value::Float64(v) => Number::from_f64(v.get()).map_or(JsonValue::Null, JsonValue::Number),
        Value::Int(v) => JsonValue::from(*v),
        Value::List(items) => JsonValue::Array(items.iter().map(encode_value).collect()),
        Value::Null => JsonValue::Null,
        Value::Text(v) => JsonValue::String(v.clone()),
        Value::Timestamp(v) => JsonValue::String(v.to_string()),
        Value::Uint(v) => JsonValue::from(*v),
    }
}

/// Decode JSON into a value of the declared type.
pub fn decode_value(json: &JsonValue, value_type: ValueType) -> Result<Value, ValueParseError> {
    let shape = || ValueParseError::Shape {
        expected: value_type,
        found: json_kind(json),
    };

    match (value_type.cardinality(), json) {
        (Cardinality::Opt, JsonValue::Null) => Ok(Value::Null),
        (Cardinality::One | Cardinality::Opt, json) => {
            decode_scalar(json, value_type.primitive()).ok_or_else(shape)?
        }
        (Cardinality::Many, JsonValue::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let decoded = decode_scalar(item, value_type.primitive()).ok_or_else(|| {
                    ValueParseError::Shape {
                        expected: value_type,
                        found: json_kind(item),
                    }
                })??;
                out.push(decoded);
            }

            Ok(Value::List(out))
        }
        (Cardinality::Many, _) => Err(shape()),
    }
}

// None: wrong JSON shape for the primitive.
// Some(Err): right shape, bad payload.
fn decode_scalar(json: &JsonValue, primitive: Primitive) -> Option<Result<Value, ValueParseError>> {
    let value = match (primitive, json) {
        (Primitive::Blob, JsonValue::String(s)) => {
            return Some(Blob::from_hex(s).map(|b| Value::Blob(b.into_vec())).map_err(Into::into));
        }
        (Primitive::Bool, JsonValue::Bool(v)) => Value::Bool(*v),
        (Primitive::Float64, JsonValue::Number(n)) => {
            let raw = n.as_f64()?;
            return Some(Float64::try_new(raw).map(Value::Float64).ok_or_else(|| {
                ValueParseError::NonFinite {
                    input: n.to_string(),
                }
            }));
        }
        (Primitive::Int, JsonValue::Number(n)) => Value::Int(n.as_i64()?),
        (Primitive::Text, JsonValue::String(s)) => Value::Text(s.clone()),
        (Primitive::Timestamp, JsonValue::String(s)) => {
            return Some(s.parse::<Timestamp>().map(Value::Timestamp).map_err(Into::into));
        }
        (Primitive::Timestamp, JsonValue::Number(n)) => {
            Value::Timestamp(Timestamp::from_millis(n.as_i64()?))
        }
        (Primitive::Uint, JsonValue::Number(n)) => Value::Uint(n.as_u64()?),
        _ => return None,
    };

    Some(Ok(value))
}

/// JSON kind label for diagnostics.
#[must_use]
pub const fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

///
/// TESTS
///

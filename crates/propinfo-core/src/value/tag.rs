use crate::value::Value;

///
/// ValueTag
///
/// Stable canonical value-variant tag used by ordering surfaces.
///
/// IMPORTANT:
/// Tag values are part of stable behavior; ordered indexes built on one
/// version must iterate identically on the next.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Blob = 1,
    Bool = 2,
    Float64 = 3,
    Int = 4,
    List = 5,
    Null = 6,
    Text = 7,
    Timestamp = 8,
    Uint = 9,
}

impl ValueTag {
    /// Stable byte tag for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blob => "Blob",
            Self::Bool => "Bool",
            Self::Float64 => "Float64",
            Self::Int => "Int",
            Self::List => "List",
            Self::Null => "Null",
            Self::Text => "Text",
            Self::Timestamp => "Timestamp",
            Self::Uint => "Uint",
        }
    }
}

#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Blob(_) => ValueTag::Blob,
        Value::Bool(_) => ValueTag::Bool,
        Value::Float64(_) => ValueTag::Float64,
        Value::Int(_) => ValueTag::Int,
        Value::List(_) => ValueTag::List,
        Value::Null => ValueTag::Null,
        Value::Text(_) => ValueTag::Text,
        Value::Timestamp(_) => ValueTag::Timestamp,
        Value::Uint(_) => ValueTag::Uint,
    }
}

#[must_use]
pub(super) const fn canonical_rank(value: &Value) -> u8 {
    // Tags are 1-based for stability; rank is 0-based.
    canonical_tag(value).to_u8() - 1
}

mod compare;
mod tag;
mod text;


use crate::{
    codec::sql,
    types::{Float64, Timestamp},
};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use compare::{OrdValue, canonical_cmp, strict_order_cmp};
pub use tag::ValueTag;
pub use text::{ValueParseError, parse_scalar, parse_text};

///
/// Value
///
/// Runtime, type-erased property value.
///
/// Null        → the property's value is Option::None (i.e., SQL NULL).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Float64(Float64),
    Int(i64),
    /// Ordered list of scalar values.
    /// List order is preserved by every codec.
    List(Vec<Self>),
    Null,
    Text(String),
    Timestamp(Timestamp),
    Uint(u64),
}

impl Value {
    /// Stable canonical variant tag.
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    /// Stable rank used for cross-variant ordering.
    #[must_use]
    pub const fn canonical_rank(&self) -> u8 {
        tag::canonical_rank(self)
    }

    /// Stable human-readable kind label for diagnostics.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        self.tag().label()
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Scalar primitive carried by this value, if any.
    #[must_use]
    pub const fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Blob(_) => Some(Primitive::Blob),
            Self::Bool(_) => Some(Primitive::Bool),
            Self::Float64(_) => Some(Primitive::Float64),
            Self::Int(_) => Some(Primitive::Int),
            Self::Text(_) => Some(Primitive::Text),
            Self::Timestamp(_) => Some(Primitive::Timestamp),
            Self::Uint(_) => Some(Primitive::Uint),
            Self::List(_) | Self::Null => None,
        }
    }

    /// Shape check against a declared value type.
    ///
    /// This checks variants only; numeric range checks for narrow Rust
    /// integer types happen when the value is converted into the field.
    #[must_use]
    pub fn is_assignable_to(&self, value_type: ValueType) -> bool {
        match (value_type.cardinality(), self) {
            (Cardinality::Opt, Self::Null) => true,
            (Cardinality::One | Cardinality::Opt, value) => {
                value.primitive() == Some(value_type.primitive())
            }
            (Cardinality::Many, Self::List(items)) => items
                .iter()
                .all(|item| item.primitive() == Some(value_type.primitive())),
            (Cardinality::Many, _) => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Float64> for Value {
    fn from(v: Float64) -> Self {
        Self::Float64(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v)
    }
}

///
/// Primitive
///
/// Scalar value kinds a property can hold.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Primitive {
    Blob,
    Bool,
    Float64,
    Int,
    Text,
    Timestamp,
    Uint,
}

impl Primitive {
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        sql::primitive_sql_type(self)
    }
}

///
/// Cardinality
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

///
/// ValueType
///
/// Declared type of a property: a scalar primitive plus cardinality.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ValueType {
    primitive: Primitive,
    cardinality: Cardinality,
}

impl ValueType {
    #[must_use]
    pub const fn new(primitive: Primitive, cardinality: Cardinality) -> Self {
        Self {
            primitive,
            cardinality,
        }
    }

    #[must_use]
    pub const fn one(primitive: Primitive) -> Self {
        Self::new(primitive, Cardinality::One)
    }

    #[must_use]
    pub const fn opt(primitive: Primitive) -> Self {
        Self::new(primitive, Cardinality::Opt)
    }

    #[must_use]
    pub const fn many(primitive: Primitive) -> Self {
        Self::new(primitive, Cardinality::Many)
    }

    #[must_use]
    pub const fn primitive(self) -> Primitive {
        self.primitive
    }

    #[must_use]
    pub const fn cardinality(self) -> Cardinality {
        self.cardinality
    }

    #[must_use]
    pub const fn is_nullable(self) -> bool {
        matches!(self.cardinality, Cardinality::Opt)
    }

    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        sql::value_type_sql_type(self)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cardinality {
            Cardinality::One => write!(f, "{}", self.primitive),
            Cardinality::Opt => write!(f, "Option<{}>", self.primitive),
            Cardinality::Many => write!(f, "List<{}>", self.primitive),
        }
    }
}

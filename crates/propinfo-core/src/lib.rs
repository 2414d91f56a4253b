//! Core runtime for propinfo: values, typed property descriptors, class
//! descriptors, and the JSON / XML / text / SQL codecs they compose.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod codec;
pub mod config;
pub mod diff;
pub mod error;
pub mod index;
pub mod model;
pub mod property;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Maximum length for class and property identifiers.
pub const MAX_NAME_LEN: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No codecs, configuration, or errors are re-exported here.
///

pub mod prelude {
    pub use crate::{
        diff::{DiffMap, ValueChange},
        model::ClassInfo,
        property::{
            Accessor, ClassRef, Comparator, Expr, JsonCodec, Property, PropertyInfo,
            PropertyMeta, SqlMapping, TextCodec, XmlCodec,
        },
        traits::{FieldValue, Model},
        types::{Blob, Float64, Timestamp},
        value::{Cardinality, Primitive, Value, ValueType},
    };
}

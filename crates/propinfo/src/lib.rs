//! ## Crate layout
//! - `core`: the runtime crate, re-exported whole.
//! - `codec`: JSON outputter and parser, XML tree and reader, SQL helpers.
//! - `config`: codec policy loaded from TOML.
//! - `model`: class descriptors and their builder.
//! - `property`: typed property descriptors and the capability traits.
//! - `value`, `types`: the dynamic value model and its scalar wrappers.
//! - `Model`: derive macro that declares a class from a struct.
//!
//! The `prelude` module carries the vocabulary needed to declare and use
//! models; codecs and errors are imported from their modules.

pub use propinfo_core as core;
pub use propinfo_core::{
    MAX_NAME_LEN, codec, config, diff, error, index, model, property, traits, types, value,
};

// derive output names ::propinfo paths
extern crate self as propinfo;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use propinfo_derive::Model;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::{
        Model,
        index::PropertyIndex,
        property::ErasedProperty as _,
    };
}

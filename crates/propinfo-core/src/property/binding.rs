use crate::error::BindingError;
use std::{fmt, sync::OnceLock};

///
/// ClassRef
///
/// Identity of an owning class descriptor, held by every bound property.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClassRef {
    name: &'static str,
    path: &'static str,
}

impl ClassRef {
    #[must_use]
    pub const fn new(name: &'static str, path: &'static str) -> Self {
        Self { name, path }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Fully-qualified Rust path (for diagnostics).
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

///
/// OwnerSlot
///
/// Set-once owning-class slot. Written by the class builder before the
/// descriptor is published; every later read is lock-free.
///

#[derive(Debug, Default)]
pub struct OwnerSlot(OnceLock<ClassRef>);

impl OwnerSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Bind to `class`. Binding again to the same class is a no-op.
    pub fn bind(&self, property: &'static str, class: ClassRef) -> Result<(), BindingError> {
        let bound = *self.0.get_or_init(|| class);
        if bound == class {
            tracing::debug!(property, class = class.name(), "property bound to class");
            return Ok(());
        }

        Err(BindingError::AlreadyBound {
            property,
            bound: bound.name(),
            requested: class.name(),
        })
    }

    pub fn get(&self, property: &'static str) -> Result<ClassRef, BindingError> {
        self.0
            .get()
            .copied()
            .ok_or(BindingError::Unbound { property })
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.0.get().is_some()
    }
}

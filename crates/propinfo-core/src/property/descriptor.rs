use crate::{
    error::{BindingError, PropertyError},
    property::{
        Accessor, ClassRef, Comparator, Expr, JsonCodec, OwnerSlot, PropertyMeta, SqlMapping,
        TextCodec, XmlCodec,
    },
    traits::FieldValue,
    value::Value,
};
use std::fmt;

///
/// Property
///
/// Typed descriptor for field `T` of owner type `E`.
///
/// Field access goes through plain function pointers, so a descriptor is
/// `Send + Sync` and can be declared as a `static`.
///

pub struct Property<E, T> {
    meta: PropertyMeta,
    owner: OwnerSlot,
    get: fn(&E) -> &T,
    get_mut: fn(&mut E) -> &mut T,
}

impl<E, T: FieldValue> Property<E, T> {
    /// Descriptor with default flags; the value type comes from `T`.
    #[must_use]
    pub const fn new(name: &'static str, get: fn(&E) -> &T, get_mut: fn(&mut E) -> &mut T) -> Self {
        Self::with_meta(PropertyMeta::new(name, T::VALUE_TYPE), get, get_mut)
    }

    #[must_use]
    pub const fn with_meta(
        meta: PropertyMeta,
        get: fn(&E) -> &T,
        get_mut: fn(&mut E) -> &mut T,
    ) -> Self {
        Self {
            meta,
            owner: OwnerSlot::new(),
            get,
            get_mut,
        }
    }

    #[must_use]
    pub const fn meta(&self) -> &PropertyMeta {
        &self.meta
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.meta.name()
    }

    /// Borrow the typed field.
    pub fn field<'a>(&self, obj: &'a E) -> &'a T {
        (self.get)(obj)
    }

    /// Assign the typed field, honouring the required flag.
    pub fn set_field(&self, obj: &mut E, value: T) -> Result<(), PropertyError> {
        if self.meta.is_required() && value.to_value().is_null() {
            return Err(PropertyError::MissingRequired {
                property: self.meta.name(),
            });
        }

        *(self.get_mut)(obj) = value;

        Ok(())
    }
}

impl<E, T> fmt::Debug for Property<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("meta", &self.meta)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl<E, T: FieldValue> Accessor<E> for Property<E, T> {
    fn meta(&self) -> &PropertyMeta {
        &self.meta
    }

    fn owning_class(&self) -> Result<ClassRef, BindingError> {
        self.owner.get(self.meta.name())
    }

    fn bind_owner(&self, class: ClassRef) -> Result<(), BindingError> {
        self.owner.bind(self.meta.name(), class)
    }

    fn get(&self, obj: &E) -> Value {
        (self.get)(obj).to_value()
    }

    fn set(&self, obj: &mut E, value: Value) -> Result<(), PropertyError> {
        let property = self.meta.name();

        if self.meta.is_required() && value.is_null() {
            return Err(PropertyError::MissingRequired { property });
        }

        let typed = T::from_value(&value).ok_or(PropertyError::TypeMismatch {
            property,
            expected: self.meta.value_type(),
            found: value.kind_label(),
        })?;

        *(self.get_mut)(obj) = typed;
        tracing::trace!(property, kind = value.kind_label(), "property set");

        Ok(())
    }

    fn accepts(&self, value: &Value) -> bool {
        T::from_value(value).is_some()
    }
}

impl<E, T: FieldValue> Expr<E> for Property<E, T> {}
impl<E, T: FieldValue> Comparator<E> for Property<E, T> {}
impl<E, T: FieldValue> JsonCodec<E> for Property<E, T> {}
impl<E, T: FieldValue> XmlCodec<E> for Property<E, T> {}
impl<E, T: FieldValue> TextCodec<E> for Property<E, T> {}
impl<E, T: FieldValue> SqlMapping<E> for Property<E, T> {}

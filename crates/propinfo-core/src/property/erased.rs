use crate::{
    error::PropertyError,
    property::{Accessor, Property, PropertyMeta},
    traits::FieldValue,
    value::Value,
};
use std::any::{Any, type_name};

///
/// ErasedProperty
///
/// Receiver-erased view of a descriptor for callers that only hold
/// `&dyn Any`. A receiver of the wrong type is reported, never cast.
///

pub trait ErasedProperty: Send + Sync {
    fn erased_meta(&self) -> &PropertyMeta;

    /// Rust type name of the expected receiver.
    fn receiver_type(&self) -> &'static str;

    fn get_any(&self, obj: &dyn Any) -> Result<Value, PropertyError>;

    fn set_any(&self, obj: &mut dyn Any, value: Value) -> Result<(), PropertyError>;
}

impl<E: Any, T: FieldValue> ErasedProperty for Property<E, T> {
    fn erased_meta(&self) -> &PropertyMeta {
        self.meta()
    }

    fn receiver_type(&self) -> &'static str {
        type_name::<E>()
    }

    fn get_any(&self, obj: &dyn Any) -> Result<Value, PropertyError> {
        let obj = obj
            .downcast_ref::<E>()
            .ok_or_else(|| self.wrong_receiver())?;

        Ok(Accessor::get(self, obj))
    }

    fn set_any(&self, obj: &mut dyn Any, value: Value) -> Result<(), PropertyError> {
        let obj = obj
            .downcast_mut::<E>()
            .ok_or_else(|| self.wrong_receiver())?;

        Accessor::set(self, obj, value)
    }
}

impl<E: Any, T: FieldValue> Property<E, T> {
    fn wrong_receiver(&self) -> PropertyError {
        PropertyError::WrongReceiver {
            property: self.name(),
            expected: type_name::<E>(),
        }
    }
}

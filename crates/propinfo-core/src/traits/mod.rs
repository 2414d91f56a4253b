use crate::{
    model::ClassInfo,
    types::{Blob, Float64, Timestamp},
    value::{Primitive, Value, ValueType},
};

///
/// Model
///
/// A Rust type with a class descriptor. Usually implemented by
/// `#[derive(Model)]`.
///

pub trait Model: Sized + 'static {
    fn class_info() -> &'static ClassInfo<Self>;
}

///
/// FieldValue
///
/// Conversion boundary between a Rust field type and the runtime `Value`.
///
/// `from_value` returns `None` when the value has the wrong shape or does
/// not fit the Rust type (for example `Value::Int(300)` into an `i8`).
///

pub trait FieldValue {
    const VALUE_TYPE: ValueType;

    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

///
/// ScalarFieldValue
///
/// Field types with cardinality `One`; these can be wrapped in `Option`
/// and `Vec`.
///

pub trait ScalarFieldValue: FieldValue + Sized {
    const PRIMITIVE: Primitive;
}

impl<T: ScalarFieldValue> FieldValue for Option<T> {
    const VALUE_TYPE: ValueType = ValueType::opt(T::PRIMITIVE);

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl<T: ScalarFieldValue> FieldValue for Vec<T> {
    const VALUE_TYPE: ValueType = ValueType::many(T::PRIMITIVE);

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        items.iter().map(T::from_value).collect()
    }
}

impl FieldValue for String {
    const VALUE_TYPE: ValueType = ValueType::one(Primitive::Text);

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for Blob {
    const VALUE_TYPE: ValueType = ValueType::one(Primitive::Blob);

    fn to_value(&self) -> Value {
        Value::Blob(self.as_slice().to_vec())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Blob(v) => Some(Self::new(v.clone())),
            _ => None,
        }
    }
}

impl FieldValue for Float64 {
    const VALUE_TYPE: ValueType = ValueType::one(Primitive::Float64);

    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for Timestamp {
    const VALUE_TYPE: ValueType = ValueType::one(Primitive::Timestamp);

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

impl ScalarFieldValue for String {
    const PRIMITIVE: Primitive = Primitive::Text;
}

impl ScalarFieldValue for Blob {
    const PRIMITIVE: Primitive = Primitive::Blob;
}

impl ScalarFieldValue for Float64 {
    const PRIMITIVE: Primitive = Primitive::Float64;
}

impl ScalarFieldValue for Timestamp {
    const PRIMITIVE: Primitive = Primitive::Timestamp;
}

macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                const VALUE_TYPE: ValueType = ValueType::one(Primitive::$variant);

                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }

            impl ScalarFieldValue for $type {
                const PRIMITIVE: Primitive = Primitive::$variant;
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    bool => Bool,
);

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_integers_are_range_checked() {
        assert_eq!(i8::from_value(&Value::Int(-128)), Some(-128));
        assert_eq!(i8::from_value(&Value::Int(300)), None);
        assert_eq!(u16::from_value(&Value::Uint(70_000)), None);
        assert_eq!(u32::from_value(&Value::Int(1)), None);
    }

    #[test]
    fn option_maps_null_to_none() {
        assert_eq!(Option::<i32>::from_value(&Value::Null), Some(None));
        assert_eq!(Option::<i32>::from_value(&Value::Int(4)), Some(Some(4)));
        assert_eq!(Option::<i32>::from_value(&Value::Text("4".into())), None);
        assert_eq!(None::<String>.to_value(), Value::Null);
    }

    #[test]
    fn vec_requires_every_item_to_convert() {
        let ok = Value::List(vec![Value::Uint(1), Value::Uint(2)]);
        let bad = Value::List(vec![Value::Uint(1), Value::Uint(300)]);

        assert_eq!(Vec::<u8>::from_value(&ok), Some(vec![1, 2]));
        assert_eq!(Vec::<u8>::from_value(&bad), None);
        assert_eq!(Vec::<u8>::from_value(&Value::Uint(1)), None);
    }

    #[test]
    fn value_types_follow_the_rust_shape() {
        assert_eq!(<i16 as FieldValue>::VALUE_TYPE, ValueType::one(Primitive::Int));
        assert_eq!(
            <Option<Timestamp> as FieldValue>::VALUE_TYPE,
            ValueType::opt(Primitive::Timestamp)
        );
        assert_eq!(
            <Vec<String> as FieldValue>::VALUE_TYPE,
            ValueType::many(Primitive::Text)
        );
    }
}

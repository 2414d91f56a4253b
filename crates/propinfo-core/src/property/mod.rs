//! Property descriptors.
//!
//! The contract is split into capabilities that a descriptor composes:
//! - `Accessor`: identity, flags, typed get/set, owning class
//! - `Expr`: evaluation against an object (predicate operand)
//! - `Comparator`: ordering by this property
//! - `JsonCodec`, `XmlCodec`, `TextCodec`: wire formats
//! - `SqlMapping`: relational column type
//!
//! `PropertyInfo` is the composed contract and is implemented for every
//! type that provides all capabilities.

mod binding;
mod descriptor;
mod erased;
mod meta;


use crate::{
    codec::{
        JsonOutputter, ValueParser,
        xml::{ITEM_ELEMENT, XmlContext, XmlElement, XmlError, XmlReader, check_text},
    },
    diff::DiffMap,
    error::{BindingError, PropertyError, truncate_input},
    value::{Cardinality, Primitive, Value, ValueType, canonical_cmp, parse_scalar, parse_text},
};
use std::cmp::Ordering;

pub use binding::{ClassRef, OwnerSlot};
pub use descriptor::Property;
pub use erased::ErasedProperty;
pub use meta::PropertyMeta;

///
/// Accessor
///
/// Identity, flags, and typed access to one property of `E`.
///

pub trait Accessor<E>: Send + Sync {
    fn meta(&self) -> &PropertyMeta;

    /// Owning class; `Unbound` until the class descriptor is built.
    fn owning_class(&self) -> Result<ClassRef, BindingError>;

    /// Bind to the owning class. Called once by the class builder.
    fn bind_owner(&self, class: ClassRef) -> Result<(), BindingError>;

    /// Current value on `obj`.
    fn get(&self, obj: &E) -> Value;

    /// Assign `value` on `obj`; `obj` is untouched on error.
    fn set(&self, obj: &mut E, value: Value) -> Result<(), PropertyError>;

    fn name(&self) -> &'static str {
        self.meta().name()
    }

    fn value_type(&self) -> ValueType {
        self.meta().value_type()
    }

    fn is_required(&self) -> bool {
        self.meta().is_required()
    }

    fn is_network_transient(&self) -> bool {
        self.meta().is_network_transient()
    }

    fn is_storage_transient(&self) -> bool {
        self.meta().is_storage_transient()
    }

    /// Whether `value` fits the field, including integer width.
    fn accepts(&self, value: &Value) -> bool {
        value.is_assignable_to(self.value_type())
    }
}

///
/// Expr
///
/// A property used as an expression operand.
///

pub trait Expr<E>: Accessor<E> {
    fn evaluate(&self, obj: &E) -> Value {
        self.get(obj)
    }
}

///
/// Comparator
///
/// Canonical total order by this property's value.
///

pub trait Comparator<E>: Accessor<E> {
    fn compare(&self, left: &E, right: &E) -> Ordering {
        canonical_cmp(&self.get(left), &self.get(right))
    }

    /// Three-way comparison of a raw key against this property on `obj`.
    /// `Equal` exactly when `get(obj) == *key`.
    fn compare_property_to_object(&self, key: &Value, obj: &E) -> Ordering {
        canonical_cmp(key, &self.get(obj))
    }
}

///
/// JsonCodec
///

pub trait JsonCodec<E>: Accessor<E> {
    fn create_parser(&self) -> ValueParser {
        ValueParser::new(self.value_type())
    }

    /// Append the JSON encoding of `value` using the outputter's rules.
    fn write_json(
        &self,
        outputter: &JsonOutputter,
        out: &mut String,
        value: &Value,
    ) -> Result<(), PropertyError> {
        if !self.accepts(value) {
            return Err(PropertyError::Encoding {
                property: self.name(),
                reason: format!(
                    "{} '{}' does not fit {}",
                    value.kind_label(),
                    truncate_input(&value.to_text()),
                    self.value_type()
                ),
            });
        }

        outputter.output_value(out, value);

        Ok(())
    }

    /// Decode a JSON member and assign it on `obj`.
    fn read_json(&self, obj: &mut E, json: &serde_json::Value) -> Result<(), PropertyError> {
        let value = self
            .create_parser()
            .parse_json_value(json)
            .map_err(|err| PropertyError::parse(self.name(), &json.to_string(), err))?;

        self.set(obj, value)
    }
}

///
/// XmlCodec
///

pub trait XmlCodec<E>: Accessor<E> {
    /// Decode this property's value. The reader must be positioned just
    /// after the property's start tag; the matching end tag is consumed.
    fn read_xml(&self, ctx: &XmlContext, reader: &mut XmlReader) -> Result<Value, PropertyError> {
        read_xml_value(self.name(), self.value_type(), ctx, reader)
    }

    /// Append one child element holding the current value; `Null` is
    /// omitted. Text that XML cannot carry is an `Encoding` error.
    fn write_xml(&self, obj: &E, element: &mut XmlElement) -> Result<(), PropertyError> {
        let value = self.get(obj);
        if value.is_null() {
            return Ok(());
        }

        check_xml_value(&value).map_err(|err| PropertyError::Encoding {
            property: self.name(),
            reason: err.to_string(),
        })?;

        let mut child = XmlElement::new(self.name());
        child.push_value(&value);
        element.push_element(child);

        Ok(())
    }
}

///
/// TextCodec
///

pub trait TextCodec<E>: Accessor<E> {
    fn set_from_string(&self, obj: &mut E, input: &str) -> Result<(), PropertyError> {
        let value = parse_text(input, self.value_type())
            .map_err(|err| PropertyError::parse(self.name(), input, err))?;

        self.set(obj, value)
    }

    /// Text form that `set_from_string` accepts back.
    fn get_as_string(&self, obj: &E) -> String {
        self.get(obj).to_text()
    }
}

///
/// SqlMapping
///

pub trait SqlMapping<E>: Accessor<E> {
    fn sql_type(&self) -> &'static str {
        self.meta().sql_type()
    }
}

///
/// PropertyInfo
///
/// The full per-property contract.
///

pub trait PropertyInfo<E>:
    Accessor<E> + Expr<E> + Comparator<E> + JsonCodec<E> + XmlCodec<E> + TextCodec<E> + SqlMapping<E>
{
    /// Record `before -> after` under this property's name when the two
    /// objects disagree. Returns whether an entry was recorded.
    fn diff(&self, before: &E, after: &E, diff: &mut DiffMap) -> bool {
        let old = self.get(before);
        let new = self.get(after);
        if old == new {
            return false;
        }

        tracing::trace!(property = self.name(), "property differs");
        diff.record(self.name(), old, new);

        true
    }
}

impl<E, P> PropertyInfo<E> for P where
    P: Accessor<E>
        + Expr<E>
        + Comparator<E>
        + JsonCodec<E>
        + XmlCodec<E>
        + TextCodec<E>
        + SqlMapping<E>
        + ?Sized
{
}

fn check_xml_value(value: &Value) -> Result<(), XmlError> {
    match value {
        Value::Text(text) => check_text(text),
        Value::List(items) => items.iter().try_for_each(check_xml_value),
        _ => Ok(()),
    }
}

fn read_xml_value(
    property: &'static str,
    value_type: ValueType,
    ctx: &XmlContext,
    reader: &mut XmlReader,
) -> Result<Value, PropertyError> {
    let primitive = value_type.primitive();
    let parse = |text: &str| {
        parse_scalar(text, primitive).map_err(|err| PropertyError::parse(property, text, err))
    };

    match value_type.cardinality() {
        Cardinality::One => parse(&reader.read_text()?),
        Cardinality::Opt => {
            let text = reader.read_text()?;

            // an empty element is the empty string for text, absent otherwise
            if text.is_empty() && primitive != Primitive::Text {
                Ok(Value::Null)
            } else {
                parse(&text)
            }
        }
        Cardinality::Many => {
            let mut items = Vec::new();

            while let Some(start) = reader.next_element()? {
                if start.name != ITEM_ELEMENT {
                    if ctx.is_strict() {
                        return Err(XmlError::UnexpectedElement { name: start.name }.into());
                    }

                    tracing::warn!(property, element = %start.name, "skipping unknown xml element");
                    reader.skip_element()?;
                    continue;
                }

                items.push(parse(&reader.read_text()?)?);
            }

            Ok(Value::List(items))
        }
    }
}

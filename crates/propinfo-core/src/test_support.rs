//! Hand-declared model used by unit tests. Mirrors what `#[derive(Model)]`
//! generates.

use crate::{
    model::{ClassInfo, ClassInfoBuilder},
    property::{Property, PropertyMeta},
    traits::{FieldValue, Model},
    types::{Blob, Float64, Timestamp},
    value::{Cardinality, Primitive, Value, ValueType},
};
use proptest::prelude::*;
use std::sync::LazyLock;

///
/// Person
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Person {
    pub id: u64,
    pub name: String,
    pub age: i32,
    pub nickname: Option<String>,
    pub score: Float64,
    pub tags: Vec<String>,
    pub avatar: Blob,
    pub joined: Timestamp,
    pub active: bool,
}

pub(crate) static PERSON_ID: Property<Person, u64> =
    Property::new("id", |p| &p.id, |p| &mut p.id);

pub(crate) static PERSON_NAME: Property<Person, String> = Property::with_meta(
    PropertyMeta::new("name", <String as FieldValue>::VALUE_TYPE).required(),
    |p| &p.name,
    |p| &mut p.name,
);

pub(crate) static PERSON_AGE: Property<Person, i32> =
    Property::new("age", |p| &p.age, |p| &mut p.age);

pub(crate) static PERSON_NICKNAME: Property<Person, Option<String>> =
    Property::new("nickname", |p| &p.nickname, |p| &mut p.nickname);

pub(crate) static PERSON_SCORE: Property<Person, Float64> =
    Property::new("score", |p| &p.score, |p| &mut p.score);

pub(crate) static PERSON_TAGS: Property<Person, Vec<String>> =
    Property::new("tags", |p| &p.tags, |p| &mut p.tags);

pub(crate) static PERSON_AVATAR: Property<Person, Blob> = Property::with_meta(
    PropertyMeta::new("avatar", <Blob as FieldValue>::VALUE_TYPE).network_transient(),
    |p| &p.avatar,
    |p| &mut p.avatar,
);

pub(crate) static PERSON_JOINED: Property<Person, Timestamp> = Property::with_meta(
    PropertyMeta::new("joined", <Timestamp as FieldValue>::VALUE_TYPE).storage_transient(),
    |p| &p.joined,
    |p| &mut p.joined,
);

pub(crate) static PERSON_ACTIVE: Property<Person, bool> = Property::with_meta(
    PropertyMeta::new("active", <bool as FieldValue>::VALUE_TYPE).sql("SMALLINT"),
    |p| &p.active,
    |p| &mut p.active,
);

static PERSON_CLASS: LazyLock<ClassInfo<Person>> = LazyLock::new(|| {
    ClassInfoBuilder::new("Person")
        .path("propinfo_core::test_support::Person")
        .property(&PERSON_ID)
        .property(&PERSON_NAME)
        .property(&PERSON_AGE)
        .property(&PERSON_NICKNAME)
        .property(&PERSON_SCORE)
        .property(&PERSON_TAGS)
        .property(&PERSON_AVATAR)
        .property(&PERSON_JOINED)
        .property(&PERSON_ACTIVE)
        .build()
        .expect("Person class descriptor")
});

impl Model for Person {
    fn class_info() -> &'static ClassInfo<Self> {
        &PERSON_CLASS
    }
}

impl Person {
    pub(crate) fn sample() -> Self {
        Self {
            id: 7,
            name: "Ada".to_string(),
            age: 30,
            nickname: Some("ada <&> co".to_string()),
            score: Float64::try_new(4.5).expect("finite"),
            tags: vec!["math".to_string(), "engines".to_string()],
            avatar: Blob::new(vec![0xca, 0xfe]),
            joined: Timestamp::from_millis(1_700_000_000_123),
            active: true,
        }
    }
}

//
// proptest strategies
//

// years 1970..9999, so every timestamp has an RFC 3339 form
const MAX_RFC3339_MILLIS: i64 = 253_402_300_799_999;

pub(crate) fn arb_primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        Just(Primitive::Blob),
        Just(Primitive::Bool),
        Just(Primitive::Float64),
        Just(Primitive::Int),
        Just(Primitive::Text),
        Just(Primitive::Timestamp),
        Just(Primitive::Uint),
    ]
}

pub(crate) fn arb_value_type() -> impl Strategy<Value = ValueType> {
    let cardinality = prop_oneof![
        Just(Cardinality::One),
        Just(Cardinality::Opt),
        Just(Cardinality::Many),
    ];

    (arb_primitive(), cardinality).prop_map(|(p, c)| ValueType::new(p, c))
}

pub(crate) fn arb_scalar(primitive: Primitive) -> BoxedStrategy<Value> {
    match primitive {
        Primitive::Blob => prop::collection::vec(any::<u8>(), 0..8)
            .prop_map(Value::Blob)
            .boxed(),
        Primitive::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        Primitive::Float64 => any::<f64>()
            .prop_filter_map("finite", Float64::try_new)
            .prop_map(Value::Float64)
            .boxed(),
        Primitive::Int => any::<i64>().prop_map(Value::Int).boxed(),
        Primitive::Text => "\\PC{0,12}".prop_map(Value::Text).boxed(),
        Primitive::Timestamp => (0..=MAX_RFC3339_MILLIS)
            .prop_map(|millis| Value::Timestamp(Timestamp::from_millis(millis)))
            .boxed(),
        Primitive::Uint => any::<u64>().prop_map(Value::Uint).boxed(),
    }
}

/// Any value assignable to `value_type`.
pub(crate) fn arb_value_of(value_type: ValueType) -> BoxedStrategy<Value> {
    let scalar = arb_scalar(value_type.primitive());

    match value_type.cardinality() {
        Cardinality::One => scalar,
        Cardinality::Opt => prop_oneof![Just(Value::Null), scalar].boxed(),
        Cardinality::Many => prop::collection::vec(scalar, 0..4)
            .prop_map(Value::List)
            .boxed(),
    }
}

/// A declared type together with one of its values.
pub(crate) fn arb_typed_value() -> impl Strategy<Value = (ValueType, Value)> {
    arb_value_type().prop_flat_map(|vt| arb_value_of(vt).prop_map(move |v| (vt, v)))
}

/// Values of any shape, for ordering properties.
pub(crate) fn arb_any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_primitive().prop_flat_map(arb_scalar),
        Just(Value::Null),
        prop::collection::vec(arb_primitive().prop_flat_map(arb_scalar), 0..3).prop_map(Value::List),
    ]
}

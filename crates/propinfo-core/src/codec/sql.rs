use crate::value::{Cardinality, Primitive, ValueType};

/// Column type for a scalar primitive.
#[must_use]
pub const fn primitive_sql_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Blob => "BYTEA",
        Primitive::Bool => "BOOLEAN",
        Primitive::Float64 => "DOUBLE PRECISION",
        Primitive::Int => "BIGINT",
        Primitive::Text => "TEXT",
        Primitive::Timestamp => "TIMESTAMP",
        // u64 does not fit BIGINT
        Primitive::Uint => "NUMERIC(20)",
    }
}

/// Column type for a declared value type.
///
/// Lists are stored JSON-encoded in a text column; nullability is a column
/// constraint, not part of the type name.
#[must_use]
pub const fn value_type_sql_type(value_type: ValueType) -> &'static str {
    match value_type.cardinality() {
        Cardinality::One | Cardinality::Opt => primitive_sql_type(value_type.primitive()),
        Cardinality::Many => "TEXT",
    }
}

///
/// TESTS
///

use crate::value::Value;
use std::collections::{BTreeMap, btree_map};

///
/// ValueChange
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueChange {
    pub before: Value,
    pub after: Value,
}

///
/// DiffMap
///
/// Property name to `(before, after)` for every property whose values
/// differ between two objects. Iteration is ordered by property name.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiffMap(BTreeMap<&'static str, ValueChange>);

impl DiffMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a change, replacing any previous entry for `name`.
    pub fn record(&mut self, name: &'static str, before: Value, after: Value) {
        self.0.insert(name, ValueChange { before, after });
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValueChange> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, &'static str, ValueChange> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl<'a> IntoIterator for &'a DiffMap {
    type Item = (&'a &'static str, &'a ValueChange);
    type IntoIter = btree_map::Iter<'a, &'static str, ValueChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_replaces_previous_entry() {
        let mut diff = DiffMap::new();
        diff.record("age", Value::Int(30), Value::Int(31));
        diff.record("age", Value::Int(30), Value::Int(32));

        assert_eq!(diff.len(), 1);
        assert_eq!(
            diff.get("age"),
            Some(&ValueChange {
                before: Value::Int(30),
                after: Value::Int(32),
            })
        );
    }

    #[test]
    fn names_iterate_in_order() {
        let mut diff = DiffMap::new();
        diff.record("name", Value::Null, Value::from("b"));
        diff.record("age", Value::Null, Value::Int(1));

        assert_eq!(diff.names().collect::<Vec<_>>(), vec!["age", "name"]);
        assert!(diff.contains("name"));
        assert!(!diff.contains("tags"));
    }
}

use crate::{
    property::PropertyInfo,
    value::{OrdValue, Value, canonical_cmp},
};
use std::{cmp::Ordering, collections::BTreeMap, fmt, iter};

///
/// PropertyIndex
///
/// Ordered multimap of objects keyed by one property's value under the
/// canonical value order. Objects sharing a key keep insertion order.
///

pub struct PropertyIndex<E: 'static> {
    property: &'static dyn PropertyInfo<E>,
    entries: BTreeMap<OrdValue, Vec<E>>,
    len: usize,
}

impl<E: 'static> PropertyIndex<E> {
    #[must_use]
    pub const fn new(property: &'static dyn PropertyInfo<E>) -> Self {
        Self {
            property,
            entries: BTreeMap::new(),
            len: 0,
        }
    }

    #[must_use]
    pub fn property(&self) -> &'static dyn PropertyInfo<E> {
        self.property
    }

    pub fn insert(&mut self, obj: E) {
        let key = OrdValue(self.property.evaluate(&obj));
        self.entries.entry(key).or_default().push(obj);
        self.len += 1;
    }

    /// Remove the first object equal to `obj`.
    pub fn remove(&mut self, obj: &E) -> Option<E>
    where
        E: PartialEq,
    {
        let key = OrdValue(self.property.evaluate(obj));
        let bucket = self.entries.get_mut(&key)?;
        let pos = bucket.iter().position(|candidate| candidate == obj)?;
        let removed = bucket.remove(pos);

        if bucket.is_empty() {
            self.entries.remove(&key);
        }
        self.len -= 1;

        Some(removed)
    }

    /// Objects whose property value equals `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> &[E] {
        self.entries
            .get(&OrdValue(key.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Objects with `lower <= value <= upper`, in key order. Empty when
    /// `lower > upper`.
    pub fn range<'a>(&'a self, lower: &Value, upper: &Value) -> Box<dyn Iterator<Item = &'a E> + 'a> {
        if canonical_cmp(lower, upper) == Ordering::Greater {
            return Box::new(iter::empty());
        }

        let bounds = OrdValue(lower.clone())..=OrdValue(upper.clone());
        Box::new(self.entries.range(bounds).flat_map(|(_, bucket)| bucket))
    }

    /// Every object in key order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values().flatten()
    }

    /// Distinct keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.keys().map(OrdValue::as_value)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<E: 'static> fmt::Debug for PropertyIndex<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyIndex")
            .field("property", &self.property.name())
            .field("keys", &self.entries.len())
            .field("len", &self.len)
            .finish()
    }
}

///
/// TESTS
///

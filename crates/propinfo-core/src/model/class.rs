use crate::{
    codec::{JsonOutputter, XmlContext, XmlElement, XmlError, XmlReader},
    diff::DiffMap,
    error::PropertyError,
    property::{ClassRef, PropertyInfo},
    value::Value,
};
use serde_json::Value as JsonValue;
use std::{cmp::Ordering, fmt};

///
/// ClassInfo
///
/// Class descriptor: the ordered property descriptors of one owner type.
/// Built by [`ClassInfoBuilder`](super::ClassInfoBuilder), which binds
/// every property to this class.
///

pub struct ClassInfo<E: 'static> {
    class: ClassRef,
    properties: Vec<&'static dyn PropertyInfo<E>>,
}

impl<E: 'static> ClassInfo<E> {
    pub(super) const fn new(class: ClassRef, properties: Vec<&'static dyn PropertyInfo<E>>) -> Self {
        Self { class, properties }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.class.name()
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.class.path()
    }

    #[must_use]
    pub const fn class_ref(&self) -> ClassRef {
        self.class
    }

    /// Properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[&'static dyn PropertyInfo<E>] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'static dyn PropertyInfo<E>> {
        self.properties.iter().copied().find(|p| p.name() == name)
    }

    /// Every property whose value differs between `before` and `after`.
    #[must_use]
    pub fn diff(&self, before: &E, after: &E) -> DiffMap {
        let mut diff = DiffMap::new();
        for property in &self.properties {
            property.diff(before, after, &mut diff);
        }

        diff
    }

    /// Lexicographic order over the properties in declaration order.
    #[must_use]
    pub fn compare(&self, left: &E, right: &E) -> Ordering {
        self.properties
            .iter()
            .map(|p| p.compare(left, right))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// First required property holding `Null`, if any.
    pub fn validate_required(&self, obj: &E) -> Result<(), PropertyError> {
        match self
            .properties
            .iter()
            .find(|p| p.is_required() && p.get(obj).is_null())
        {
            Some(property) => Err(PropertyError::MissingRequired {
                property: property.name(),
            }),
            None => Ok(()),
        }
    }

    /// Write the `after` side of every entry. Either every entry is applied
    /// or `obj` is left untouched.
    pub fn apply_diff(&self, obj: &mut E, diff: &DiffMap) -> Result<(), PropertyError>
    where
        E: Clone,
    {
        let mut staged = obj.clone();
        for (name, change) in diff {
            let property = self.property(name).ok_or_else(|| self.unknown(name))?;
            property.set(&mut staged, change.after.clone())?;
        }

        *obj = staged;

        Ok(())
    }

    // json

    /// Encode `obj` as a JSON object, members in declaration order.
    pub fn to_json(&self, outputter: &JsonOutputter, obj: &E) -> Result<String, PropertyError> {
        let compact = outputter.with_pretty(false);
        let mut out = String::from("{");
        let mut first = true;

        for property in &self.properties {
            let value = property.get(obj);
            if !outputter.should_write(property.meta(), &value) {
                continue;
            }

            if !first {
                out.push(',');
            }
            first = false;

            out.push_str(&JsonValue::from(property.name()).to_string());
            out.push(':');
            property.write_json(&compact, &mut out, &value)?;
        }
        out.push('}');

        if !outputter.is_pretty() {
            return Ok(out);
        }

        let json: JsonValue = serde_json::from_str(&out).map_err(|err| PropertyError::Encoding {
            property: self.name(),
            reason: err.to_string(),
        })?;

        Ok(outputter.render(&json))
    }

    /// Decode a JSON object. Absent members keep their `Default` values;
    /// unknown members are rejected.
    pub fn from_json(&self, input: &str) -> Result<E, PropertyError>
    where
        E: Default,
    {
        let json: JsonValue =
            serde_json::from_str(input).map_err(|err| self.malformed(err.to_string()))?;

        let JsonValue::Object(members) = json else {
            return Err(self.malformed("expected a JSON object"));
        };

        let mut obj = E::default();
        for (key, member) in &members {
            let property = self.property(key).ok_or_else(|| self.unknown(key))?;
            property.read_json(&mut obj, member)?;
        }

        self.validate_required(&obj)?;

        Ok(obj)
    }

    // xml

    /// Element named after the class with one child per non-null property.
    pub fn to_xml(&self, obj: &E) -> Result<XmlElement, PropertyError> {
        let mut element = XmlElement::new(self.name());
        for property in &self.properties {
            property.write_xml(obj, &mut element)?;
        }

        Ok(element)
    }

    /// Decode the next element of `reader` as an instance of this class.
    pub fn from_xml(&self, ctx: &XmlContext, reader: &mut XmlReader) -> Result<E, PropertyError>
    where
        E: Default,
    {
        let root = reader
            .next_element()?
            .ok_or_else(|| self.malformed("missing root element"))?;

        if root.name != self.name() {
            return Err(XmlError::ElementName {
                expected: self.name().to_string(),
                found: root.name,
            }
            .into());
        }

        let mut obj = E::default();
        while let Some(start) = reader.next_element()? {
            match self.property(&start.name) {
                Some(property) => {
                    let value: Value = property.read_xml(ctx, reader)?;
                    property.set(&mut obj, value)?;
                }
                None if ctx.is_strict() => return Err(self.unknown(&start.name)),
                None => {
                    tracing::warn!(class = self.name(), element = %start.name, "skipping unknown xml element");
                    reader.skip_element()?;
                }
            }
        }

        self.validate_required(&obj)?;

        Ok(obj)
    }

    /// Decode a whole XML document; only comments and whitespace may follow
    /// the root element.
    pub fn from_xml_str(&self, ctx: &XmlContext, input: &str) -> Result<E, PropertyError>
    where
        E: Default,
    {
        let mut reader = XmlReader::new(input);
        let obj = self.from_xml(ctx, &mut reader)?;

        if reader.next_event()?.is_some() {
            return Err(self.malformed("content after the root element"));
        }

        Ok(obj)
    }

    fn unknown(&self, property: &str) -> PropertyError {
        PropertyError::UnknownProperty {
            class: self.name(),
            property: property.to_string(),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> PropertyError {
        PropertyError::Malformed {
            class: self.name(),
            reason: reason.into(),
        }
    }
}

impl<E: 'static> fmt::Debug for ClassInfo<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("class", &self.class)
            .field(
                "properties",
                &self.properties.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

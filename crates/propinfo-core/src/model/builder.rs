use crate::{
    MAX_NAME_LEN,
    error::{BuildError, ValidationErrors},
    model::ClassInfo,
    property::{ClassRef, PropertyInfo},
};
use std::collections::BTreeSet;

///
/// ClassInfoBuilder
///
/// Collects a class's property descriptors, validates the declaration, and
/// binds every descriptor to the class. Binding happens only after the
/// whole declaration is known to be valid.
///

pub struct ClassInfoBuilder<E: 'static> {
    name: &'static str,
    path: Option<&'static str>,
    properties: Vec<&'static dyn PropertyInfo<E>>,
}

impl<E: 'static> ClassInfoBuilder<E> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            path: None,
            properties: Vec::new(),
        }
    }

    /// Rust path of the owner type; defaults to the class name.
    #[must_use]
    pub const fn path(mut self, path: &'static str) -> Self {
        self.path = Some(path);
        self
    }

    #[must_use]
    pub fn property(mut self, property: &'static dyn PropertyInfo<E>) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn properties(
        mut self,
        properties: impl IntoIterator<Item = &'static dyn PropertyInfo<E>>,
    ) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn build(self) -> Result<ClassInfo<E>, BuildError> {
        let class = ClassRef::new(self.name, self.path.unwrap_or(self.name));

        self.validate(class).map_err(BuildError::Validation)?;

        for property in &self.properties {
            property.bind_owner(class)?;
        }

        tracing::debug!(
            class = class.name(),
            path = class.path(),
            properties = self.properties.len(),
            "class descriptor built"
        );

        Ok(ClassInfo::new(class, self.properties))
    }

    fn validate(&self, class: ClassRef) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new(self.name);

        validate_ident(&mut errs, "class", self.name);

        if self.properties.is_empty() {
            errs.add("class declares no properties");
        }

        let mut seen = BTreeSet::new();
        for property in &self.properties {
            let name = property.name();
            validate_ident(&mut errs, "property", name);

            if !seen.insert(name) {
                errs.add(format!("duplicate property name '{name}'"));
            }

            // a descriptor bound elsewhere cannot join this class
            if let Ok(bound) = property.owning_class()
                && bound != class
            {
                errs.add(format!(
                    "property '{name}' already belongs to class '{bound}'"
                ));
            }
        }

        errs.result()
    }
}

// identifiers: [A-Za-z_][A-Za-z0-9_]*, at most MAX_NAME_LEN bytes
fn validate_ident(errs: &mut ValidationErrors, kind: &str, ident: &str) {
    let mut chars = ident.chars();

    let Some(first) = chars.next() else {
        errs.add(format!("{kind} name is empty"));
        return;
    };

    if ident.len() > MAX_NAME_LEN {
        errs.add(format!(
            "{kind} name '{ident}' exceeds max length {MAX_NAME_LEN}"
        ));
    }

    if !(first.is_ascii_alphabetic() || first == '_')
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        errs.add(format!("{kind} name '{ident}' is not a valid identifier"));
    }
}

use crate::value::ValueType;

///
/// PropertyMeta
///
/// Immutable per-property facts. Built in const context so descriptors can
/// live in `static` items.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropertyMeta {
    name: &'static str,
    value_type: ValueType,
    required: bool,
    network_transient: bool,
    storage_transient: bool,
    sql_type: Option<&'static str>,
}

impl PropertyMeta {
    #[must_use]
    pub const fn new(name: &'static str, value_type: ValueType) -> Self {
        Self {
            name,
            value_type,
            required: false,
            network_transient: false,
            storage_transient: false,
            sql_type: None,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn network_transient(mut self) -> Self {
        self.network_transient = true;
        self
    }

    #[must_use]
    pub const fn storage_transient(mut self) -> Self {
        self.storage_transient = true;
        self
    }

    /// Transient on every channel.
    #[must_use]
    pub const fn transient(self) -> Self {
        self.network_transient().storage_transient()
    }

    /// Override the derived SQL column type.
    #[must_use]
    pub const fn sql(mut self, sql_type: &'static str) -> Self {
        self.sql_type = Some(sql_type);
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn is_network_transient(&self) -> bool {
        self.network_transient
    }

    #[must_use]
    pub const fn is_storage_transient(&self) -> bool {
        self.storage_transient
    }

    #[must_use]
    pub const fn sql_type(&self) -> &'static str {
        match self.sql_type {
            Some(sql_type) => sql_type,
            None => self.value_type.sql_type(),
        }
    }
}

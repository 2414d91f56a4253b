//! Codec policy loaded from TOML.
//!
//! ```toml
//! [json]
//! mode = "network"
//! pretty = true
//! emit_nulls = false
//!
//! [xml]
//! strict = true
//! prolog = true
//! ```

use crate::codec::{JsonOutputter, OutputMode, XmlContext};
use serde::Deserialize;
use std::{fs, io, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub json: JsonConfig,
    pub xml: XmlConfig,
}

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        tracing::debug!(?config, "config parsed");

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&input)
    }

    #[must_use]
    pub const fn outputter(&self) -> JsonOutputter {
        JsonOutputter::new(self.json.mode)
            .with_pretty(self.json.pretty)
            .with_emit_nulls(self.json.emit_nulls)
    }

    #[must_use]
    pub const fn xml_context(&self) -> XmlContext {
        XmlContext::new(self.xml.strict)
    }
}

///
/// JsonConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct JsonConfig {
    pub mode: OutputMode,
    pub pretty: bool,
    pub emit_nulls: bool,
}

///
/// XmlConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct XmlConfig {
    pub strict: bool,
    pub prolog: bool,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            strict: false,
            prolog: true,
        }
    }
}

///
/// TESTS
///

//! Codec configuration
//!
//! Configuration is plain serde data, normally read from a TOML table:
//!
//! ```toml
//! max_binary_len = 1048576
//! link_encoding = "bytes"
//! ```
//!
//! Missing keys fall back to [`CodecConfig::default`].

use crate::errors::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trait for configuration validation
pub trait ConfigValidation {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;
}

/// Binary representation used when writing links
///
/// Decoding accepts both forms whatever is configured here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkEncoding {
    /// Bare CBOR byte string holding the identifier bytes
    #[default]
    Bytes,
    /// DAG-CBOR link: tag 42 around `0x00 ++ identifier bytes`
    ///
    /// Requires an identifier whose binary form is a CID.
    Tagged,
}

/// Settings shared by every encode/decode call made through a [`crate::Codec`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Upper bound on bytes consumed by a single binary decode; `None` is unbounded
    pub max_binary_len: Option<usize>,
    /// How links are written in binary form
    pub link_encoding: LinkEncoding,
}

impl CodecConfig {
    /// Set the binary decode bound
    pub fn with_max_binary_len(mut self, max: usize) -> Self {
        self.max_binary_len = Some(max);
        self
    }

    /// Set the binary link representation
    pub fn with_link_encoding(mut self, encoding: LinkEncoding) -> Self {
        self.link_encoding = encoding;
        self
    }

    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DataError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }
}

impl ConfigValidation for CodecConfig {
    fn validate(&self) -> Result<()> {
        if self.max_binary_len == Some(0) {
            return Err(DataError::config(
                "max_binary_len must be greater than zero",
            ));
        }
        Ok(())
    }
}

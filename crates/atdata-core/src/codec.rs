//! Text and binary codec entry points
//!
//! [`Codec`] drives both wire formats for any [`WireScalar`]:
//!
//! - text: the JSON marker envelope from [`crate::envelope`];
//! - binary: DAG-CBOR through the [`Ipld`] data model, with CBOR `null`
//!   (`0xf6`) standing for an absent value.
//!
//! Absence is expressed by the caller as `None`. Text encoding rejects it,
//! binary encoding writes the null sentinel. Emptiness (zero-length bytes,
//! undefined links) is a property of the value itself and is handled by each
//! scalar.

use crate::config::{CodecConfig, ConfigValidation};
use crate::envelope::{self, Marker};
use crate::errors::{DataError, Result};
use ipld_core::ipld::Ipld;
use serde_ipld_dagcbor::DecodeError;
use std::io::{BufRead, Write};

/// CBOR encoding of `null`, written for absent values
pub const CBOR_NULL: u8 = 0xf6;

/// A scalar with a marker envelope and a native DAG-CBOR form
pub trait WireScalar: Marker {
    /// Convert to the IPLD value written in binary form
    fn to_ipld(&self, config: &CodecConfig) -> Result<Ipld>;

    /// Rebuild from a decoded IPLD value
    ///
    /// `null` never reaches this method; the codec handles it.
    fn from_ipld(ipld: Ipld, config: &CodecConfig) -> Result<Self>;
}

/// Stateless codec parameterized by a [`CodecConfig`]
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec after validating its configuration
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a value as its JSON marker envelope
    ///
    /// An absent value has no textual form and fails with [`DataError::NilValue`].
    pub fn encode_text<T: WireScalar>(&self, value: Option<&T>) -> Result<String> {
        let value = value.ok_or_else(|| DataError::nil_value(T::MARKER))?;
        let text = envelope::to_json_string(value)?;
        tracing::trace!(marker = T::MARKER, len = text.len(), "encoded text envelope");
        Ok(text)
    }

    /// Decode a value from its JSON marker envelope
    pub fn decode_text<T: WireScalar>(&self, text: &str) -> Result<T> {
        envelope::from_json_str(text).map_err(|error| {
            tracing::debug!(marker = T::MARKER, %error, "rejected text envelope");
            error
        })
    }

    /// Write a value in binary form
    ///
    /// An absent value writes exactly [`CBOR_NULL`] and succeeds.
    pub fn encode_binary<T: WireScalar, W: Write>(
        &self,
        value: Option<&T>,
        mut writer: W,
    ) -> Result<()> {
        let ipld = match value {
            Some(value) => value.to_ipld(&self.config)?,
            None => Ipld::Null,
        };
        let bytes =
            serde_ipld_dagcbor::to_vec(&ipld).map_err(|e| DataError::encode(e.to_string()))?;
        writer
            .write_all(&bytes)
            .map_err(|e| DataError::encode(format!("failed to write {}: {e}", T::MARKER)))?;
        tracing::trace!(marker = T::MARKER, len = bytes.len(), "encoded binary value");
        Ok(())
    }

    /// Read one value in binary form; `null` is rejected
    pub fn decode_binary<T: WireScalar, R: BufRead>(&self, reader: R) -> Result<T> {
        self.decode_binary_nullable::<T, R>(reader)?.ok_or_else(|| {
            tracing::debug!(marker = T::MARKER, "rejected null binary value");
            DataError::decode(format!("unexpected null where {} was required", T::MARKER))
        })
    }

    /// Read one value in binary form; `null` decodes to `None`
    ///
    /// Exactly one CBOR item is consumed. Anything after it stays in the
    /// reader, so pass `&mut reader` to decode consecutive values.
    pub fn decode_binary_nullable<T: WireScalar, R: BufRead>(
        &self,
        reader: R,
    ) -> Result<Option<T>> {
        match self.read_item::<T, R>(reader)? {
            Ipld::Null => Ok(None),
            other => T::from_ipld(other, &self.config).map(Some),
        }
    }

    /// Read a single item, honoring `max_binary_len`
    fn read_item<T: WireScalar, R: BufRead>(&self, reader: R) -> Result<Ipld> {
        let max = match self.config.max_binary_len {
            Some(max) => max,
            None => {
                return serde_ipld_dagcbor::de::from_reader_once::<Ipld, _>(reader)
                    .map_err(|e| malformed(T::MARKER, e))
            }
        };

        let mut limited = reader.take(u64::try_from(max).unwrap_or(u64::MAX));
        match serde_ipld_dagcbor::de::from_reader_once::<Ipld, _>(&mut limited) {
            Err(DecodeError::Eof) if limited.limit() == 0 => {
                tracing::debug!(marker = T::MARKER, max, "binary input over limit");
                Err(DataError::decode(format!(
                    "{} binary value exceeds {max} bytes",
                    T::MARKER
                )))
            }
            other => other.map_err(|e| malformed(T::MARKER, e)),
        }
    }
}

fn malformed(marker: &str, error: DecodeError<std::io::Error>) -> DataError {
    tracing::debug!(marker, %error, "rejected binary value");
    DataError::decode(format!("malformed {marker} binary value: {error}"))
}

/// Name of an IPLD kind, for error messages
pub(crate) fn ipld_kind(ipld: &Ipld) -> &'static str {
    match ipld {
        Ipld::Null => "null",
        Ipld::Bool(_) => "boolean",
        Ipld::Integer(_) => "integer",
        Ipld::Float(_) => "float",
        Ipld::String(_) => "string",
        Ipld::Bytes(_) => "bytes",
        Ipld::List(_) => "list",
        Ipld::Map(_) => "map",
        Ipld::Link(_) => "link",
    }
}

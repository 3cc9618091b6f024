//! The `bytes` scalar
//!
//! JSON form: `{"$bytes": "<standard base64, no padding>"}`.
//! Binary form: a CBOR byte string.
//!
//! A zero-length [`ByteString`] is a real value and encodes as `{"$bytes":""}`
//! or `0x40`. Only an absent value (`None`) has no textual form.

use crate::codec::{ipld_kind, Codec, WireScalar};
use crate::config::CodecConfig;
use crate::envelope::{self, Marker};
use crate::errors::{DataError, Result};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use ipld_core::ipld::Ipld;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::{BufRead, Write};
use std::ops::Deref;

/// Marker key of the JSON envelope
pub const BYTES_MARKER: &str = "$bytes";

/// Opaque octet payload
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    /// Wrap raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Borrow the payload
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take the payload
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is zero-length
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteString({})", STANDARD_NO_PAD.encode(&self.0))
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<ByteString> for Vec<u8> {
    fn from(bytes: ByteString) -> Self {
        bytes.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for ByteString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl Marker for ByteString {
    const MARKER: &'static str = BYTES_MARKER;

    fn to_payload(&self) -> Result<String> {
        Ok(STANDARD_NO_PAD.encode(&self.0))
    }

    fn from_payload(payload: &str) -> Result<Self> {
        STANDARD_NO_PAD
            .decode(payload)
            .map(Self)
            .map_err(|e| DataError::decode(format!("invalid {BYTES_MARKER} base64: {e}")))
    }
}

impl WireScalar for ByteString {
    fn to_ipld(&self, _config: &CodecConfig) -> Result<Ipld> {
        Ok(Ipld::Bytes(self.0.clone()))
    }

    fn from_ipld(ipld: Ipld, _config: &CodecConfig) -> Result<Self> {
        match ipld {
            Ipld::Bytes(bytes) => Ok(Self(bytes)),
            other => Err(DataError::decode(format!(
                "expected CBOR byte string for {BYTES_MARKER}, found {}",
                ipld_kind(&other)
            ))),
        }
    }
}

impl Serialize for ByteString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            envelope::serialize_envelope(self, serializer)
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for ByteString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            envelope::deserialize_envelope(deserializer)
        } else {
            serde_bytes::ByteBuf::deserialize(deserializer).map(|buf| Self(buf.into_vec()))
        }
    }
}

/// Encode as `{"$bytes": ...}`; `None` fails with [`DataError::NilValue`]
pub fn encode_text(value: Option<&ByteString>) -> Result<String> {
    Codec::default().encode_text(value)
}

/// Decode from `{"$bytes": ...}`
pub fn decode_text(text: &str) -> Result<ByteString> {
    Codec::default().decode_text(text)
}

/// Write as a CBOR byte string; `None` writes the single byte `0xf6`
pub fn encode_binary<W: Write>(value: Option<&ByteString>, writer: W) -> Result<()> {
    Codec::default().encode_binary(value, writer)
}

/// Read one CBOR byte string
pub fn decode_binary<R: BufRead>(reader: R) -> Result<ByteString> {
    Codec::default().decode_binary(reader)
}

/// Read one CBOR byte string or `null`
pub fn decode_binary_nullable<R: BufRead>(reader: R) -> Result<Option<ByteString>> {
    Codec::default().decode_binary_nullable(reader)
}

//! The `cid-link` scalar
//!
//! JSON form: `{"$link": "<canonical identifier string>"}`.
//! Binary form: a CBOR byte string holding the identifier bytes, or a
//! DAG-CBOR link (tag 42) when [`LinkEncoding::Tagged`] is configured. Both
//! forms are read back regardless of the configured encoding.
//!
//! A [`Link`] is either undefined (the zero value, no identifier) or defined.
//! Undefined links cannot be encoded in either format; an absent link
//! (`None`) still encodes to CBOR `null` in binary form.

use crate::codec::{ipld_kind, Codec, WireScalar};
use crate::config::{CodecConfig, LinkEncoding};
use crate::envelope::{self, Marker};
use crate::errors::{DataError, Result};
use crate::identifier::Identifier;
use ipld_core::cid::Cid;
use ipld_core::ipld::Ipld;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Marker key of the JSON envelope
pub const LINK_MARKER: &str = "$link";

/// Link to content by identifier
#[derive(Clone, PartialEq)]
pub struct Link<I: Identifier = Cid> {
    id: Option<I>,
}

impl<I: Identifier> Link<I> {
    /// Wrap a parsed identifier
    pub fn new(id: I) -> Self {
        Self { id: Some(id) }
    }

    /// The zero value: no identifier
    pub fn undefined() -> Self {
        Self { id: None }
    }

    /// Parse an identifier string into a defined link
    pub fn parse(text: &str) -> Result<Self> {
        I::parse(text).map(Self::new)
    }

    /// Whether this link holds an identifier
    pub fn is_defined(&self) -> bool {
        self.id.is_some()
    }

    /// The wrapped identifier, if defined
    pub fn identifier(&self) -> Option<&I> {
        self.id.as_ref()
    }

    /// Canonical string of the wrapped identifier, if defined
    pub fn canonical_string(&self) -> Option<String> {
        self.id.as_ref().map(I::canonical_string)
    }

    fn defined(&self) -> Result<&I> {
        self.id.as_ref().ok_or(DataError::UndefinedLink)
    }
}

impl<I: Identifier> Default for Link<I> {
    fn default() -> Self {
        Self::undefined()
    }
}

impl<I: Identifier> From<I> for Link<I> {
    fn from(id: I) -> Self {
        Self::new(id)
    }
}

impl FromStr for Link<Cid> {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Renders the canonical string; undefined links render as an empty string.
impl<I: Identifier> fmt::Display for Link<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => f.write_str(&id.canonical_string()),
            None => Ok(()),
        }
    }
}

impl<I: Identifier> fmt::Debug for Link<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "Link({})", id.canonical_string()),
            None => f.write_str("Link(undefined)"),
        }
    }
}

impl<I: Identifier> Marker for Link<I> {
    const MARKER: &'static str = LINK_MARKER;

    fn to_payload(&self) -> Result<String> {
        self.defined().map(I::canonical_string)
    }

    fn from_payload(payload: &str) -> Result<Self> {
        Self::parse(payload)
    }
}

impl<I: Identifier> WireScalar for Link<I> {
    fn to_ipld(&self, config: &CodecConfig) -> Result<Ipld> {
        let bytes = self.defined()?.to_bytes();
        match config.link_encoding {
            LinkEncoding::Tagged => Cid::try_from(bytes.as_slice())
                .map(Ipld::Link)
                .map_err(|e| DataError::encode(format!("identifier is not a CID: {e}"))),
            LinkEncoding::Bytes => Ok(Ipld::Bytes(bytes)),
        }
    }

    fn from_ipld(ipld: Ipld, _config: &CodecConfig) -> Result<Self> {
        let bytes = match ipld {
            Ipld::Link(cid) => cid.to_bytes(),
            Ipld::Bytes(bytes) => bytes,
            other => {
                return Err(DataError::decode(format!(
                    "expected CBOR link or bytes for {LINK_MARKER}, found {}",
                    ipld_kind(&other)
                )))
            }
        };
        I::from_bytes(&bytes)
            .map(Self::new)
            .map_err(|e| DataError::decode(format!("malformed {LINK_MARKER} identifier: {e}")))
    }
}

/// Inside serde records a link is written as an IPLD link (tag 42 under
/// DAG-CBOR). Either binary form is accepted when reading.
impl Serialize for Link<Cid> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            return envelope::serialize_envelope(self, serializer);
        }
        self.defined()
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Link<Cid> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            envelope::deserialize_envelope(deserializer)
        } else {
            let ipld = Ipld::deserialize(deserializer)?;
            Self::from_ipld(ipld, &CodecConfig::default()).map_err(de::Error::custom)
        }
    }
}

/// Encode as `{"$link": ...}`
///
/// `None` fails with [`DataError::NilValue`], an undefined link with
/// [`DataError::UndefinedLink`].
pub fn encode_text<I: Identifier>(link: Option<&Link<I>>) -> Result<String> {
    Codec::default().encode_text(link)
}

/// Decode from `{"$link": ...}`
pub fn decode_text<I: Identifier>(text: &str) -> Result<Link<I>> {
    Codec::default().decode_text(text)
}

/// Write as a CBOR byte string; `None` writes the single byte `0xf6`
pub fn encode_binary<I: Identifier, W: Write>(link: Option<&Link<I>>, writer: W) -> Result<()> {
    Codec::default().encode_binary(link, writer)
}

/// Read one binary link, tagged or not
pub fn decode_binary<I: Identifier, R: BufRead>(reader: R) -> Result<Link<I>> {
    Codec::default().decode_binary(reader)
}

/// Read one binary link or `null`
pub fn decode_binary_nullable<I: Identifier, R: BufRead>(reader: R) -> Result<Option<Link<I>>> {
    Codec::default().decode_binary_nullable(reader)
}

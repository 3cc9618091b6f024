//! Byte-string and content-identifier link scalars
//!
//! This crate provides the two special scalar kinds of the atproto data model
//! and their codecs for both wire formats:
//!
//! | Scalar | JSON | DAG-CBOR |
//! |---|---|---|
//! | [`ByteString`] | `{"$bytes": "<base64, no padding>"}` | byte string |
//! | [`Link`] | `{"$link": "<cid string>"}` | byte string of the identifier (tag 42 link on request) |
//!
//! # Absent, empty, undefined
//!
//! Callers pass `Option<&T>` to the encoders. `None` means the field is
//! absent: text encoding refuses it ([`DataError::NilValue`]) and binary
//! encoding writes CBOR `null` (`0xf6`). An empty [`ByteString`] is a real
//! value. An undefined [`Link`] holds no identifier and cannot be encoded
//! at all ([`DataError::UndefinedLink`]).
//!
//! Binary decoders read exactly one CBOR item and leave the rest of the
//! stream in place.
//!
//! # Example
//!
//! ```
//! use atdata_core::{bytes, link, ByteString, Link};
//!
//! let payload = ByteString::new("test data");
//! let text = bytes::encode_text(Some(&payload))?;
//! assert_eq!(text, r#"{"$bytes":"dGVzdCBkYXRh"}"#);
//!
//! let cid: Link = "bafyreibfd77vb2setujncomtz3j6xswrmiuxlykora6nogxbr4arhqu2ye".parse()?;
//! let mut buf = Vec::new();
//! link::encode_binary(Some(&cid), &mut buf)?;
//! let back: Link = link::decode_binary(buf.as_slice())?;
//! assert_eq!(back, cid);
//! # Ok::<(), atdata_core::DataError>(())
//! ```

pub mod bytes;
pub mod codec;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod identifier;
pub mod link;

pub use bytes::{ByteString, BYTES_MARKER};
pub use codec::{Codec, WireScalar, CBOR_NULL};
pub use config::{CodecConfig, ConfigValidation, LinkEncoding};
pub use envelope::Marker;
pub use errors::{DataError, Result};
pub use identifier::Identifier;
pub use link::{Link, LINK_MARKER};

/// Identifier library used by the default [`Link`]
pub use ipld_core::cid;
pub use ipld_core::cid::Cid;

//! Content identifier seam
//!
//! Links only need four things from an identifier: parse it from text, render
//! its canonical text, and move it to and from raw bytes. [`Identifier`]
//! captures exactly that so the concrete library stays out of the codec
//! logic. The default implementation is the multiformats [`Cid`].

use crate::errors::{DataError, Result};
use ipld_core::cid::Cid;
use std::fmt;

/// Parsed content identifier usable inside a [`crate::Link`]
pub trait Identifier: Clone + PartialEq + fmt::Debug + Sized {
    /// Parse an identifier from its string form
    ///
    /// Fails with [`DataError::InvalidIdentifier`] on syntactically invalid input.
    fn parse(text: &str) -> Result<Self>;

    /// Canonical string form
    fn canonical_string(&self) -> String;

    /// Canonical binary form
    ///
    /// Written as a CBOR byte string by default. The tagged link form
    /// ([`crate::LinkEncoding::Tagged`]) goes through [`Cid`] and fails with
    /// [`DataError::Encode`] unless these bytes are a valid CID.
    fn to_bytes(&self) -> Vec<u8>;

    /// Parse an identifier from its binary form
    ///
    /// Fails with [`DataError::InvalidIdentifier`] on malformed bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

impl Identifier for Cid {
    fn parse(text: &str) -> Result<Self> {
        Cid::try_from(text).map_err(|e| DataError::invalid_identifier(format!("{text:?}: {e}")))
    }

    fn canonical_string(&self) -> String {
        self.to_string()
    }

    fn to_bytes(&self) -> Vec<u8> {
        Cid::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Cid::try_from(bytes).map_err(|e| DataError::invalid_identifier(e.to_string()))
    }
}

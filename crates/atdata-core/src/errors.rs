//! Error type for the scalar codecs
//!
//! Every codec operation returns [`Result`]. Failures are reported to the
//! immediate caller; nothing in this crate retries or substitutes defaults.

use thiserror::Error;

/// Unified error type for byte-string and link codec operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Text encode of an absent value; absence has no textual form
    #[error("cannot encode nil {kind}")]
    NilValue {
        /// Marker of the scalar kind that was absent (e.g. `$bytes`)
        kind: &'static str,
    },

    /// Encode of a link that holds no parsed identifier
    #[error("tried to encode undefined cid-link")]
    UndefinedLink,

    /// Malformed envelope or binary input
    #[error("Decode error: {message}")]
    Decode {
        /// Error message describing the malformed input
        message: String,
    },

    /// Identifier string rejected by the identifier parser
    #[error("Invalid identifier: {message}")]
    InvalidIdentifier {
        /// Error message reported by the parser
        message: String,
    },

    /// Underlying encoder or writer failure
    #[error("Encode error: {message}")]
    Encode {
        /// Error message describing the encoder failure
        message: String,
    },

    /// Invalid or unreadable codec configuration
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },
}

impl DataError {
    /// Create a nil value error for the given scalar marker
    pub fn nil_value(kind: &'static str) -> Self {
        Self::NilValue { kind }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if the error came from malformed text or binary input
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if the error came from rejecting external input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::InvalidIdentifier { .. })
    }

    /// Check if the error came from trying to encode a missing value
    pub fn is_missing_value(&self) -> bool {
        matches!(self, Self::NilValue { .. } | Self::UndefinedLink)
    }
}

/// Standard Result type for codec operations
pub type Result<T> = std::result::Result<T, DataError>;

impl From<toml::de::Error> for DataError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

//! Marker envelopes for the textual wire format
//!
//! Both scalar kinds share one JSON shape: an object whose single
//! significant key is a reserved marker and whose value is a string payload.
//!
//! ```text
//! {"$bytes": "dGVzdCBkYXRh"}
//! {"$link":  "bafyrei..."}
//! ```
//!
//! A type opts in by implementing [`Marker`]; everything else (building the
//! object, locating the marker, rejecting malformed shapes) lives here.
//! Keys other than the marker are ignored on decode.

use crate::errors::{DataError, Result};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::{self, SerializeMap};
use serde::{Deserializer, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// A scalar whose textual form is `{MARKER: payload}`
pub trait Marker: Sized {
    /// Reserved key wrapping the payload
    const MARKER: &'static str;

    /// Render the string payload
    fn to_payload(&self) -> Result<String>;

    /// Rebuild the value from a string payload
    fn from_payload(payload: &str) -> Result<Self>;
}

/// Build the envelope as a JSON value
pub fn to_json_value<T: Marker>(value: &T) -> Result<Value> {
    let payload = value.to_payload()?;
    let mut object = Map::with_capacity(1);
    object.insert(T::MARKER.to_owned(), Value::String(payload));
    Ok(Value::Object(object))
}

/// Serialize the envelope to a compact JSON string
pub fn to_json_string<T: Marker>(value: &T) -> Result<String> {
    let envelope = to_json_value(value)?;
    serde_json::to_string(&envelope).map_err(|e| DataError::encode(e.to_string()))
}

/// Extract and decode the marker payload from a parsed JSON value
pub fn from_json_value<T: Marker>(value: &Value) -> Result<T> {
    let object = value.as_object().ok_or_else(|| {
        DataError::decode(format!(
            "expected {} envelope object, found {}",
            T::MARKER,
            json_kind(value)
        ))
    })?;

    match object.get(T::MARKER) {
        Some(Value::String(payload)) => T::from_payload(payload),
        Some(other) => Err(DataError::decode(format!(
            "{} must be a string, found {}",
            T::MARKER,
            json_kind(other)
        ))),
        None => Err(DataError::decode(format!("missing {} field", T::MARKER))),
    }
}

/// Parse JSON text and decode the marker payload
pub fn from_json_str<T: Marker>(text: &str) -> Result<T> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DataError::decode(format!("malformed {} envelope: {e}", T::MARKER)))?;
    from_json_value(&value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Write the envelope through any serde serializer
///
/// Used by the human-readable branch of the scalar `Serialize` impls.
pub(crate) fn serialize_envelope<T, S>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    T: Marker,
    S: Serializer,
{
    let payload = value
        .to_payload()
        .map_err(<S::Error as ser::Error>::custom)?;
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(T::MARKER, &payload)?;
    map.end()
}

/// Read the envelope through any serde deserializer
pub(crate) fn deserialize_envelope<'de, T, D>(
    deserializer: D,
) -> std::result::Result<T, D::Error>
where
    T: Marker,
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(EnvelopeVisitor(PhantomData))
}

struct EnvelopeVisitor<T>(PhantomData<T>);

impl<'de, T: Marker> Visitor<'de> for EnvelopeVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object with a string {} field", T::MARKER)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<T, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut payload: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == T::MARKER {
                if payload.is_some() {
                    return Err(de::Error::duplicate_field(T::MARKER));
                }
                payload = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        let payload =
            payload.ok_or_else(|| <A::Error as de::Error>::missing_field(T::MARKER))?;
        T::from_payload(&payload).map_err(de::Error::custom)
    }
}

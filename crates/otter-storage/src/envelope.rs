//! Timestamp envelope wrapped around every stored value
//!
//! Values are written as JSON text of the form
//! `{"date": "...", "time": 1760875380000, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::clock::Clock;
use crate::error::StorageResult;

/// A stored value together with the moment it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Informational rendering of the write time.
    #[serde(default)]
    pub date: String,
    /// Unix time in milliseconds at write.
    pub time: i64,
    pub data: JsonValue,
}

impl Envelope {
    pub fn new(clock: &dyn Clock, data: JsonValue) -> Self {
        Self {
            date: clock.date_string(),
            time: clock.now_millis(),
            data,
        }
    }
}

/// Result of decoding the text found in the backing store.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Written by this crate (or something producing the same shape).
    Envelope(Envelope),
    /// Valid JSON that is not an envelope.
    Foreign(JsonValue),
    /// Not JSON at all; the stored text unchanged.
    Raw(String),
}

impl Decoded {
    /// Payload of the record, if it has a non-null `data` field.
    pub fn data(&self) -> Option<&JsonValue> {
        let data = match self {
            Decoded::Envelope(envelope) => Some(&envelope.data),
            Decoded::Foreign(value) => value.get("data"),
            Decoded::Raw(_) => None,
        };
        data.filter(|value| !value.is_null())
    }

    pub fn into_data(self) -> Option<JsonValue> {
        let data = match self {
            Decoded::Envelope(envelope) => Some(envelope.data),
            Decoded::Foreign(JsonValue::Object(mut map)) => map.remove("data"),
            Decoded::Foreign(_) | Decoded::Raw(_) => None,
        };
        data.filter(|value| !value.is_null())
    }

    /// Write time in milliseconds, when the record carries one.
    pub fn time(&self) -> Option<f64> {
        match self {
            Decoded::Envelope(envelope) => Some(envelope.time as f64),
            Decoded::Foreign(value) => value.get("time").and_then(JsonValue::as_f64),
            Decoded::Raw(_) => None,
        }
    }

    pub fn as_envelope(&self) -> Option<&Envelope> {
        match self {
            Decoded::Envelope(envelope) => Some(envelope),
            _ => None,
        }
    }
}

/// Serialize `data` inside a fresh envelope stamped by `clock`.
pub fn encode<T: Serialize + ?Sized>(clock: &dyn Clock, data: &T) -> StorageResult<String> {
    let envelope = Envelope::new(clock, serde_json::to_value(data)?);
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode stored text, falling back to the raw string when it is not JSON.
pub fn decode(raw: &str) -> Decoded {
    if let Ok(envelope) = serde_json::from_str::<Envelope>(raw) {
        return Decoded::Envelope(envelope);
    }
    match serde_json::from_str::<JsonValue>(raw) {
        Ok(value) => Decoded::Foreign(value),
        Err(_) => Decoded::Raw(raw.to_string()),
    }
}

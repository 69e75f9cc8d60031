//! Wire types for the reconciliation API response.
//!
//! ```json
//! { "reconciliation": [
//!     { "invoice_number": "INV-001", "vendor": "Acme", "amount": 250.00,
//!       "status": "Matched", "po_number": "PO-77" }
//! ] }
//! ```
//!
//! Records are decoded once per request and never mutated afterwards.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::value::RawValue;

use crate::error::{FetchError, Result};

/// Invoice amount as sent by the upstream, either a JSON number or a string.
///
/// Numbers keep their source token (`250.00` stays `250.00`); strings keep
/// their unescaped contents. No currency formatting is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    Number(String),
    Text(String),
}

impl Amount {
    /// Display text: the number token or the string contents.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number(token) | Self::Text(token) => token,
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // RawValue keeps the exact token, so numbers are never re-formatted.
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let token = raw.get();
        match token.as_bytes().first() {
            Some(b'"') => serde_json::from_str::<String>(token)
                .map(Self::Text)
                .map_err(de::Error::custom),
            Some(b'-' | b'0'..=b'9') => Ok(Self::Number(token.to_owned())),
            _ => Err(de::Error::invalid_value(
                de::Unexpected::Other(token),
                &"a number or a string",
            )),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Number(token) => RawValue::from_string(token.clone())
                .map_err(ser::Error::custom)?
                .serialize(serializer),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// One invoice's reconciliation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRecord {
    pub invoice_number: String,
    pub vendor: String,
    pub amount: Amount,
    /// Free-form; never checked against a fixed set of values.
    pub status: String,
    #[serde(default)]
    pub po_number: Option<String>,
}

/// Top-level response document.
///
/// A missing key and an explicit `null` both decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResponse {
    #[serde(default)]
    pub reconciliation: Option<Vec<ReconciliationRecord>>,
}

impl ReconciliationResponse {
    pub fn new(records: Vec<ReconciliationRecord>) -> Self {
        Self {
            reconciliation: Some(records),
        }
    }

    /// Decode a response body.
    ///
    /// The body must be a JSON object; anything else (invalid JSON, an array,
    /// a scalar) or a record missing a required field is [`FetchError::Malformed`].
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        // Checked on the raw document so amount tokens survive untouched.
        let document: &RawValue = serde_json::from_slice(body)?;
        let text = document.get().trim_start();
        if !text.starts_with('{') {
            return Err(FetchError::malformed(format!(
                "expected a JSON object, got {}",
                json_type_name(text)
            )));
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Records in upstream order; empty when the key was absent or null.
    pub fn records(&self) -> &[ReconciliationRecord] {
        self.reconciliation.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

fn json_type_name(token: &str) -> &'static str {
    match token.as_bytes().first() {
        Some(b'n') => "null",
        Some(b't' | b'f') => "a boolean",
        Some(b'"') => "a string",
        Some(b'[') => "an array",
        Some(b'{') => "an object",
        _ => "a number",
    }
}

//! Opaque webhook payload.
//!
//! [`RawPayload`] wraps an arbitrary [`serde_json::Value`]. The receiver
//! never validates its shape; it only reads single top-level fields for
//! display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ReceiverError;

/// Sentinel shown when a display field is absent.
pub const MISSING_FIELD: &str = "N/A";

/// A webhook body as received, parsed into a JSON tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(serde_json::Value);

impl RawPayload {
    /// Parses raw request bytes as JSON, ignoring any declared content type.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::InvalidJson`] if the bytes are not a single
    /// valid JSON document (an empty body included).
    pub fn parse(bytes: &[u8]) -> Result<Self, ReceiverError> {
        serde_json::from_slice(bytes)
            .map(Self)
            .map_err(|e| ReceiverError::InvalidJson(e.to_string()))
    }

    /// Returns the inner JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Compact JSON text, as stored in the `raw_log` column.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        self.0.to_string()
    }

    /// Two-space indented JSON text.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        // Serializing a `Value` cannot fail: all map keys are strings.
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.to_canonical_string())
    }

    /// Reads a top-level field for display.
    ///
    /// Strings are returned unquoted, other values as JSON text. Returns
    /// [`MISSING_FIELD`] when the field is absent or the payload is not an
    /// object.
    #[must_use]
    pub fn display_field(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => MISSING_FIELD.to_string(),
        }
    }
}

impl From<serde_json::Value> for RawPayload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for RawPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_accepts_any_json_document() {
        let bodies: [&[u8]; 6] = [b"{\"a\":1}", b"[1,2,3]", b"\"text\"", b"42", b"null", b" true "];
        for body in bodies {
            assert!(RawPayload::parse(body).is_ok(), "rejected {body:?}");
        }
    }

    #[test]
    fn parse_rejects_malformed_bodies() {
        let bodies: [&[u8]; 4] = [b"not-json", b"", b"{\"a\":", b"{} {}"];
        for body in bodies {
            let Err(err) = RawPayload::parse(body) else {
                panic!("accepted {body:?}");
            };
            assert!(matches!(err, ReceiverError::InvalidJson(_)));
        }
    }

    #[test]
    fn canonical_string_parses_back_to_same_value() {
        let value = json!({"pagado": true, "monto": 100, "items": [1, {"x": null}]});
        let payload = RawPayload::from(value.clone());
        let Ok(back) = serde_json::from_str::<serde_json::Value>(&payload.to_canonical_string())
        else {
            panic!("canonical string is not JSON");
        };
        assert_eq!(back, value);
    }

    #[test]
    fn canonical_string_keeps_out_of_range_numbers_verbatim() {
        let body = br#"{"amount":123456789012345678901234567890,"rate":0.10000000000000000000001}"#;
        let Ok(payload) = RawPayload::parse(body) else {
            panic!("payload rejected");
        };
        assert_eq!(payload.to_canonical_string().as_bytes(), body.as_slice());
    }

    #[test]
    fn display_field_unquotes_strings() {
        let payload = RawPayload::from(json!({"id": "evt_42"}));
        assert_eq!(payload.display_field("id"), "evt_42");
    }

    #[test]
    fn display_field_renders_non_strings_as_json() {
        let payload = RawPayload::from(json!({"pagado": true, "id": 7}));
        assert_eq!(payload.display_field("pagado"), "true");
        assert_eq!(payload.display_field("id"), "7");
    }

    #[test]
    fn display_field_defaults_to_sentinel() {
        assert_eq!(RawPayload::from(json!({})).display_field("id"), MISSING_FIELD);
        assert_eq!(RawPayload::from(json!([1, 2])).display_field("id"), MISSING_FIELD);
    }

    #[test]
    fn pretty_string_is_indented() {
        let payload = RawPayload::from(json!({"id": "evt_42"}));
        assert_eq!(payload.to_pretty_string(), "{\n  \"id\": \"evt_42\"\n}");
    }
}

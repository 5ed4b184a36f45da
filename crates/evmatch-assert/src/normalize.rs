//! Payload normalization applied before comparison.
//!
//! Some emitters store the payload as a JSON-encoded string rather than a
//! nested mapping. Comparing such strings directly is brittle (key order and
//! whitespace vary), so the string is decoded first when the tolerance set
//! asks for it.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

/// Decode the string held under `field`, if any.
///
/// Returns the input unchanged (borrowed) unless `value` is a mapping whose
/// `field` holds a string that parses as JSON. In that case a copy is
/// returned with just that field replaced. Strings that fail to parse are
/// left as they are.
pub fn normalize_payload<'a>(value: &'a Value, field: &str) -> Cow<'a, Value> {
    let Some(Value::String(encoded)) = value.get(field) else {
        return Cow::Borrowed(value);
    };

    match serde_json::from_str::<Value>(encoded) {
        Ok(decoded) => {
            let mut copy = value.clone();
            if let Some(slot) = copy.get_mut(field) {
                *slot = decoded;
            }
            Cow::Owned(copy)
        }
        Err(e) => {
            debug!(field, error = %e, "payload is not valid JSON; comparing raw string");
            Cow::Borrowed(value)
        }
    }
}

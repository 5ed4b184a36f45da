use serde::{Deserialize, Serialize};

/// Names of the top-level fields that tolerance flags refer to.
///
/// Events carry their payload under `event` and their metadata under
/// `context`. Both names can be overridden for records laid out differently.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Field holding the payload; target of `string_payload` and
    /// `payload_extra_fields`.
    pub payload: String,
    /// Field holding the context; target of `context_extra_fields`.
    pub context: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            payload: "event".into(),
            context: "context".into(),
        }
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use evmatch_tolerance::{FieldNames, Preset, ToleranceSet};

use crate::error::{MatchError, MatchResult};

/// Configuration for a [`Matcher`](crate::Matcher).
///
/// Loaded from TOML, for example:
///
/// ```toml
/// tolerance = ["root_extra_fields", "string_payload"]
///
/// [fields]
/// payload = "data"
/// ```
///
/// An explicit `tolerance` list wins over `preset`. With neither, the
/// default preset applies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Explicit tolerance flags.
    pub tolerance: Option<ToleranceSet>,
    /// Named preset, used when `tolerance` is not set.
    pub preset: Option<Preset>,
    /// Names of the payload and context fields.
    pub fields: FieldNames,
}

impl MatcherConfig {
    /// Every extra key is reported and nothing is normalized.
    pub fn strict() -> Self {
        Self::with_preset(Preset::Strict)
    }

    /// Extra keys are tolerated at the root, context and payload.
    pub fn lenient() -> Self {
        Self::with_preset(Preset::Lenient)
    }

    /// A configuration selecting `preset`, with standard field names.
    pub fn with_preset(preset: Preset) -> Self {
        Self {
            preset: Some(preset),
            ..Default::default()
        }
    }

    /// The tolerance set the caller asked for, if any.
    ///
    /// `None` means the default preset.
    pub fn requested_tolerance(&self) -> Option<ToleranceSet> {
        match (&self.tolerance, self.preset) {
            (Some(set), _) => Some(set.clone()),
            (None, Some(preset)) => Some(preset.to_set()),
            (None, None) => None,
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> MatchResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> MatchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

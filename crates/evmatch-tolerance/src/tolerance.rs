use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToleranceError;
use crate::fields::FieldNames;
use crate::strictness::StrictnessTable;

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

/// A single relaxation of the default strict comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tolerance {
    /// Parse a JSON-encoded string payload on both sides before comparing.
    /// Unparseable strings are compared as they are.
    StringPayload,
    /// Extra top-level keys in the actual value are not reported.
    RootExtraFields,
    /// Extra keys directly under the context field are not reported.
    ContextExtraFields,
    /// Extra keys directly under the payload field are not reported.
    PayloadExtraFields,
}

impl Tolerance {
    /// Every flag, in set order.
    pub const ALL: [Tolerance; 4] = [
        Tolerance::StringPayload,
        Tolerance::RootExtraFields,
        Tolerance::ContextExtraFields,
        Tolerance::PayloadExtraFields,
    ];

    /// The external name of the flag.
    pub fn name(self) -> &'static str {
        match self {
            Self::StringPayload => "string_payload",
            Self::RootExtraFields => "root_extra_fields",
            Self::ContextExtraFields => "context_extra_fields",
            Self::PayloadExtraFields => "payload_extra_fields",
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tolerance {
    type Err = ToleranceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| ToleranceError::UnknownFlag(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ToleranceSet
// ---------------------------------------------------------------------------

/// An unordered collection of [`Tolerance`] flags.
///
/// Only membership matters. The set serializes as a sorted list of flag
/// names. `ToleranceSet::default()` is the default preset, not the empty set;
/// use [`ToleranceSet::strict`] for that.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToleranceSet {
    flags: BTreeSet<Tolerance>,
}

impl Default for ToleranceSet {
    /// String payloads are parsed and extra root and context keys are
    /// tolerated. Extra payload keys are still reported so that fields added
    /// to a payload by mistake are caught.
    fn default() -> Self {
        [
            Tolerance::StringPayload,
            Tolerance::RootExtraFields,
            Tolerance::ContextExtraFields,
        ]
        .into_iter()
        .collect()
    }
}

impl ToleranceSet {
    /// No tolerances: every extra key is reported and nothing is normalized.
    pub fn strict() -> Self {
        Self {
            flags: BTreeSet::new(),
        }
    }

    /// The default preset plus `payload_extra_fields`.
    pub fn lenient() -> Self {
        Self::default().with(Tolerance::PayloadExtraFields)
    }

    /// The caller's set when one was given, otherwise the default preset.
    ///
    /// An explicit set is used as is; it is never merged with the default.
    pub fn resolve(tolerance: Option<&ToleranceSet>) -> Self {
        match tolerance {
            Some(set) => set.clone(),
            None => Self::default(),
        }
    }

    /// Returns `true` if `flag` is in the set.
    pub fn contains(&self, flag: Tolerance) -> bool {
        self.flags.contains(&flag)
    }

    /// Add a flag. Returns `false` if it was already present.
    pub fn insert(&mut self, flag: Tolerance) -> bool {
        self.flags.insert(flag)
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, flag: Tolerance) -> Self {
        self.flags.insert(flag);
        self
    }

    /// The flags in set order.
    pub fn iter(&self) -> impl Iterator<Item = Tolerance> + '_ {
        self.flags.iter().copied()
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` for the strict (empty) set.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Strictness table for the standard `event` / `context` layout.
    pub fn strictness(&self) -> StrictnessTable {
        self.strictness_with(&FieldNames::default())
    }

    /// Strictness table for a record whose payload and context live under
    /// `fields`.
    pub fn strictness_with(&self, fields: &FieldNames) -> StrictnessTable {
        let mut table = StrictnessTable::strict();
        for flag in self.iter() {
            match flag {
                Tolerance::RootExtraFields => table.relax_root(),
                Tolerance::ContextExtraFields => table.relax([fields.context.as_str()]),
                Tolerance::PayloadExtraFields => table.relax([fields.payload.as_str()]),
                Tolerance::StringPayload => {}
            }
        }
        table
    }
}

impl FromIterator<Tolerance> for ToleranceSet {
    fn from_iter<I: IntoIterator<Item = Tolerance>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}

impl Extend<Tolerance> for ToleranceSet {
    fn extend<I: IntoIterator<Item = Tolerance>>(&mut self, iter: I) {
        self.flags.extend(iter);
    }
}

impl fmt::Display for ToleranceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(flag.name())?;
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// Preset
// ---------------------------------------------------------------------------

/// Named tolerance sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Strict,
    Default,
    Lenient,
}

impl Preset {
    /// Every preset, strictest first.
    pub const ALL: [Preset; 3] = [Preset::Strict, Preset::Default, Preset::Lenient];

    /// The preset's external name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Default => "default",
            Self::Lenient => "lenient",
        }
    }

    /// The flags this preset stands for.
    pub fn to_set(self) -> ToleranceSet {
        match self {
            Self::Strict => ToleranceSet::strict(),
            Self::Default => ToleranceSet::default(),
            Self::Lenient => ToleranceSet::lenient(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ToleranceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ToleranceError::UnknownPreset(s.to_string()))
    }
}

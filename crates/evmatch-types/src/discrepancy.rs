//! Reported differences between an expected and an actual value.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::KeyPath;

/// The three kinds of difference the diff engine reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Key present in expected, absent in actual.
    Missing,
    /// Key present in actual, absent in expected.
    Unexpected,
    /// Values at the same path differ.
    Mismatch,
}

/// A single difference between expected and actual.
///
/// The `Display` output is the stable, human-readable form that test
/// expectations match against:
///
/// - `<path>: not found in actual`
/// - `<path>: only defined in actual`
/// - `<path>: <expected> != <actual> (expected != actual)`
///
/// Values are rendered as compact JSON, so `1`, `"1"` and `true` stay
/// distinguishable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    /// A key the expected value defines is missing from the actual value.
    Missing { path: KeyPath },
    /// The actual value defines a key the expected value does not.
    Unexpected { path: KeyPath },
    /// The values at `path` are not equal.
    Mismatch {
        path: KeyPath,
        expected: Value,
        actual: Value,
    },
}

impl Discrepancy {
    /// Where the difference was found.
    pub fn path(&self) -> &KeyPath {
        match self {
            Self::Missing { path } | Self::Unexpected { path } | Self::Mismatch { path, .. } => {
                path
            }
        }
    }

    /// Which kind of difference this is.
    pub fn kind(&self) -> DiscrepancyKind {
        match self {
            Self::Missing { .. } => DiscrepancyKind::Missing,
            Self::Unexpected { .. } => DiscrepancyKind::Unexpected,
            Self::Mismatch { .. } => DiscrepancyKind::Mismatch,
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "{path}: not found in actual"),
            Self::Unexpected { path } => write!(f, "{path}: only defined in actual"),
            // `Value`'s Display is compact JSON.
            Self::Mismatch {
                path,
                expected,
                actual,
            } => write!(f, "{path}: {expected} != {actual} (expected != actual)"),
        }
    }
}

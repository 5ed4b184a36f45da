//! Failure report for a comparison that found differences.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use evmatch_tolerance::ToleranceSet;
use evmatch_types::Discrepancy;

const INDENT: usize = 4;

/// A failed comparison: every discrepancy plus the inputs that produced them.
///
/// `Display` renders the report shown when an assertion fails: one bulleted
/// line per discrepancy, followed by indented dumps of the expected value,
/// the actual value and the tolerance set that was in effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventMismatch {
    /// The differences, in report order. Never empty.
    pub discrepancies: Vec<Discrepancy>,
    /// The expected value as the caller passed it.
    pub expected: Value,
    /// The actual value as the caller passed it.
    pub actual: Value,
    /// The resolved tolerance set.
    pub tolerance: ToleranceSet,
}

impl EventMismatch {
    /// The human-readable line for each discrepancy.
    pub fn messages(&self) -> Vec<String> {
        self.discrepancies.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for EventMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unexpected differences found in structs:")?;
        writeln!(f)?;
        for discrepancy in &self.discrepancies {
            writeln!(f, "* {discrepancy}")?;
        }
        writeln!(f)?;
        writeln!(f, "Expected:")?;
        writeln!(f, "{}", block_indent(&self.expected))?;
        writeln!(f, "Actual:")?;
        writeln!(f, "{}", block_indent(&self.actual))?;
        writeln!(f, "Tolerating:")?;
        write!(f, "{}", block_indent(&self.tolerance))
    }
}

impl std::error::Error for EventMismatch {}

/// Pretty-print `value` as JSON with every line indented.
pub fn block_indent<T: Serialize + ?Sized>(value: &T) -> String {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("<unrenderable value: {e}>"));
    let pad = " ".repeat(INDENT);
    pretty
        .lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

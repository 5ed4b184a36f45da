//! Recursive comparison of nested values.
//!
//! Output order is fixed: at each mapping, keys missing from actual come
//! first, then keys only actual defines, then the differences found inside
//! shared keys. Keys within each group are visited in sorted order, so the
//! same inputs always produce the same list.

use std::collections::BTreeSet;

use serde_json::{Map, Number, Value};

use evmatch_types::{Discrepancy, DiscrepancyKind, KeyPath, StrictnessPredicate};

/// The result of comparing an expected value with an actual value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructDiff {
    /// The differences, in report order.
    pub discrepancies: Vec<Discrepancy>,
}

impl StructDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the values match.
    pub fn is_empty(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Number of discrepancies.
    pub fn len(&self) -> usize {
        self.discrepancies.len()
    }

    /// Iterate over the discrepancies in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Discrepancy> {
        self.discrepancies.iter()
    }

    /// Number of keys expected but not found.
    pub fn missing(&self) -> usize {
        self.count(DiscrepancyKind::Missing)
    }

    /// Number of reported keys that only actual defines.
    pub fn unexpected(&self) -> usize {
        self.count(DiscrepancyKind::Unexpected)
    }

    /// Number of value mismatches.
    pub fn mismatches(&self) -> usize {
        self.count(DiscrepancyKind::Mismatch)
    }

    /// The human-readable line for each discrepancy.
    pub fn messages(&self) -> Vec<String> {
        self.discrepancies.iter().map(ToString::to_string).collect()
    }

    fn count(&self, kind: DiscrepancyKind) -> usize {
        self.discrepancies
            .iter()
            .filter(|d| d.kind() == kind)
            .count()
    }
}

impl IntoIterator for StructDiff {
    type Item = Discrepancy;
    type IntoIter = std::vec::IntoIter<Discrepancy>;

    fn into_iter(self) -> Self::IntoIter {
        self.discrepancies.into_iter()
    }
}

impl<'a> IntoIterator for &'a StructDiff {
    type Item = &'a Discrepancy;
    type IntoIter = std::slice::Iter<'a, Discrepancy>;

    fn into_iter(self) -> Self::IntoIter {
        self.discrepancies.iter()
    }
}

/// Compare `expected` against `actual` starting at the root.
pub fn compare<P>(expected: &Value, actual: &Value, strictness: &P) -> StructDiff
where
    P: StrictnessPredicate + ?Sized,
{
    compare_at(expected, actual, strictness, &KeyPath::root())
}

/// Compare `expected` against `actual`, reporting paths relative to `path`.
///
/// `path` is also the location handed to `strictness` for the top-level
/// mapping, so comparing a sub-value at its real location keeps the same
/// strictness decisions as comparing the whole document.
pub fn compare_at<P>(expected: &Value, actual: &Value, strictness: &P, path: &KeyPath) -> StructDiff
where
    P: StrictnessPredicate + ?Sized,
{
    let mut discrepancies = Vec::new();
    walk(expected, actual, strictness, path, &mut discrepancies);
    StructDiff { discrepancies }
}

fn walk<P>(
    expected: &Value,
    actual: &Value,
    strictness: &P,
    path: &KeyPath,
    out: &mut Vec<Discrepancy>,
) where
    P: StrictnessPredicate + ?Sized,
{
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            walk_mappings(expected, actual, strictness, path, out);
        }
        _ => {
            if !values_equal(expected, actual) {
                out.push(Discrepancy::Mismatch {
                    path: path.clone(),
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
    }
}

/// Value equality where numbers compare by value, so `1` equals `1.0`.
fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(e), Value::Number(a)) => numbers_equal(e, a),
        (Value::Array(e), Value::Array(a)) => {
            e.len() == a.len() && e.iter().zip(a).all(|(e, a)| values_equal(e, a))
        }
        (Value::Object(e), Value::Object(a)) => {
            e.len() == a.len()
                && e.iter()
                    .all(|(key, e)| a.get(key).is_some_and(|a| values_equal(e, a)))
        }
        _ => expected == actual,
    }
}

fn numbers_equal(expected: &Number, actual: &Number) -> bool {
    // Integers compare exactly; f64 would lose precision above 2^53.
    if let (Some(e), Some(a)) = (expected.as_i64(), actual.as_i64()) {
        return e == a;
    }
    if let (Some(e), Some(a)) = (expected.as_u64(), actual.as_u64()) {
        return e == a;
    }
    if !expected.is_f64() && !actual.is_f64() {
        // One negative, one above i64::MAX.
        return false;
    }
    match (expected.as_f64(), actual.as_f64()) {
        (Some(e), Some(a)) => e == a,
        _ => false,
    }
}

fn walk_mappings<P>(
    expected: &Map<String, Value>,
    actual: &Map<String, Value>,
    strictness: &P,
    path: &KeyPath,
    out: &mut Vec<Discrepancy>,
) where
    P: StrictnessPredicate + ?Sized,
{
    let expected_keys: BTreeSet<&str> = expected.keys().map(String::as_str).collect();
    let actual_keys: BTreeSet<&str> = actual.keys().map(String::as_str).collect();

    for key in expected_keys.difference(&actual_keys) {
        out.push(Discrepancy::Missing {
            path: path.child(*key),
        });
    }

    if strictness.is_strict(path) {
        for key in actual_keys.difference(&expected_keys) {
            out.push(Discrepancy::Unexpected {
                path: path.child(*key),
            });
        }
    }

    for key in expected_keys.intersection(&actual_keys) {
        if let (Some(e), Some(a)) = (expected.get(*key), actual.get(*key)) {
            walk(e, a, strictness, &path.child(*key), out);
        }
    }
}

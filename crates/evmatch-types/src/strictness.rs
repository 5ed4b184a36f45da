//! Location-aware strictness decisions.

use crate::path::KeyPath;

/// Decides, per location, whether keys that only the actual value defines
/// must be reported.
///
/// The diff engine consults this once per mapping it walks and knows nothing
/// else about how the answer is derived. Any `Fn(&KeyPath) -> bool` is a
/// predicate.
pub trait StrictnessPredicate {
    /// Returns `true` when extra actual-only keys directly under `path` are
    /// discrepancies.
    fn is_strict(&self, path: &KeyPath) -> bool;
}

impl<F> StrictnessPredicate for F
where
    F: Fn(&KeyPath) -> bool,
{
    fn is_strict(&self, path: &KeyPath) -> bool {
        self(path)
    }
}

/// Reports extra keys everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlwaysStrict;

impl StrictnessPredicate for AlwaysStrict {
    fn is_strict(&self, _path: &KeyPath) -> bool {
        true
    }
}

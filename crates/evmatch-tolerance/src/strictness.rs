use std::collections::BTreeSet;

use evmatch_types::{KeyPath, StrictnessPredicate};

/// Explicit location-to-strictness table.
///
/// Every location is strict except the ones listed as relaxed. Relaxation is
/// exact: relaxing `context` does not relax `context.user`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrictnessTable {
    relaxed: BTreeSet<KeyPath>,
}

impl StrictnessTable {
    /// A table that is strict everywhere.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Tolerate extra keys directly under `path`.
    pub fn relax(&mut self, path: impl Into<KeyPath>) {
        self.relaxed.insert(path.into());
    }

    /// Tolerate extra top-level keys.
    pub fn relax_root(&mut self) {
        self.relaxed.insert(KeyPath::root());
    }

    /// The relaxed locations, in path order.
    pub fn relaxed(&self) -> impl Iterator<Item = &KeyPath> {
        self.relaxed.iter()
    }
}

impl StrictnessPredicate for StrictnessTable {
    fn is_strict(&self, path: &KeyPath) -> bool {
        !self.relaxed.contains(path)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a value inside a nested mapping.
///
/// A `KeyPath` is the ordered list of keys walked from the root to reach a
/// value. The root itself is the empty path. Paths render as their keys joined
/// with `.`, so `["context", "user_id"]` displays as `context.user_id` and the
/// root displays as the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path extended by one key. `self` is left untouched.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(key.into());
        Self { segments }
    }

    /// Returns `true` for the empty path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of keys in the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Same as [`Self::is_root`]; pairs with [`Self::len`].
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// The keys, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The innermost key, or `None` at the root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(keys: [&str; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

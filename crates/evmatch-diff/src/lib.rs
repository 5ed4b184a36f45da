//! Structural diff engine for evmatch.
//!
//! Walks an expected and an actual [`serde_json::Value`] side by side and
//! lists every place they differ, addressed by [`KeyPath`]. Mappings are
//! compared key by key; everything else (scalars and arrays) is compared by
//! value equality.
//!
//! Whether keys that only the actual value defines count as differences is
//! decided per location by a [`StrictnessPredicate`].
//!
//! # Key Types
//!
//! - [`StructDiff`] -- Ordered list of [`Discrepancy`] values
//! - [`compare`] / [`compare_at`] -- The recursive comparison
//!
//! [`KeyPath`]: evmatch_types::KeyPath
//! [`StrictnessPredicate`]: evmatch_types::StrictnessPredicate
//! [`Discrepancy`]: evmatch_types::Discrepancy

pub mod struct_diff;

pub use struct_diff::{compare, compare_at, StructDiff};

//! Tolerance policy for evmatch.
//!
//! A comparison is strict by default: every key the actual value defines must
//! also be expected. Tolerance flags relax that at specific locations, or
//! normalize a JSON-encoded payload before comparing. Flags are grouped into a
//! [`ToleranceSet`], and three presets cover the common cases.
//!
//! The diff engine never sees the flags. A set is turned into a
//! [`StrictnessTable`] (an explicit map from location to strictness) before
//! comparison starts.
//!
//! # Quick Start
//!
//! ```rust
//! use evmatch_tolerance::{Tolerance, ToleranceSet};
//! use evmatch_types::{KeyPath, StrictnessPredicate};
//!
//! let tolerance = ToleranceSet::default();
//! assert!(tolerance.contains(Tolerance::StringPayload));
//!
//! let table = tolerance.strictness();
//! assert!(!table.is_strict(&KeyPath::root()));
//! assert!(table.is_strict(&KeyPath::from(["event"])));
//! ```

pub mod error;
pub mod fields;
pub mod strictness;
pub mod tolerance;

pub use error::{ToleranceError, ToleranceResult};
pub use fields::FieldNames;
pub use strictness::StrictnessTable;
pub use tolerance::{Preset, Tolerance, ToleranceSet};

//! Event assertions for tests.
//!
//! Compares an expected event with the one a system actually emitted and,
//! instead of a bare "left != right", lists every difference by its dotted
//! path:
//!
//! ```text
//! * context.user_id: 1 != 2 (expected != actual)
//! * event.course_id: not found in actual
//! ```
//!
//! How strict the comparison is depends on a [`ToleranceSet`]. Passing `None`
//! uses [`ToleranceSet::default`], which ignores extra root and context keys
//! and parses JSON-encoded payloads, but still reports extra payload keys.
//!
//! # Quick Start
//!
//! ```rust
//! use evmatch_assert::{assert_match, events_match, get_differences, ToleranceSet};
//! use serde_json::json;
//!
//! let expected = json!({"name": "page_view", "event": {"page": 3}});
//! let actual = json!({"name": "page_view", "time": "now", "event": "{\"page\": 3}"});
//!
//! assert_match(&expected, &actual, None);
//! assert!(!events_match(&expected, &actual, Some(&ToleranceSet::strict())));
//! assert_eq!(
//!     get_differences(&expected, &actual, Some(&ToleranceSet::strict())),
//!     vec![
//!         "time: only defined in actual".to_string(),
//!         r#"event: {"page":3} != "{\"page\": 3}" (expected != actual)"#.to_string(),
//!     ],
//! );
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod report;

pub use config::MatcherConfig;
pub use error::{MatchError, MatchResult};
pub use matcher::{
    assert_exact_match, assert_match, check_match, diff_events, events_match, get_differences,
    Matcher,
};
pub use normalize::normalize_payload;
pub use report::EventMismatch;

// Re-export key types
pub use evmatch_diff::StructDiff;
pub use evmatch_tolerance::{FieldNames, Preset, Tolerance, ToleranceSet};
pub use evmatch_types::{Discrepancy, DiscrepancyKind, KeyPath};

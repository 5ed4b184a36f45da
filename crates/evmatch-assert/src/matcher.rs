use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use evmatch_diff::{compare, StructDiff};
use evmatch_tolerance::{FieldNames, StrictnessTable, Tolerance, ToleranceSet};

use crate::config::MatcherConfig;
use crate::error::MatchResult;
use crate::normalize::normalize_payload;
use crate::report::EventMismatch;

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Compares expected and actual events under one resolved tolerance set.
///
/// The free functions in this module build a fresh `Matcher` per call. Build
/// one directly to reuse a configuration or to use non-standard field names.
#[derive(Clone, Debug)]
pub struct Matcher {
    tolerance: ToleranceSet,
    fields: FieldNames,
    strictness: StrictnessTable,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Matcher {
    /// A matcher for the standard `event` / `context` layout. `None` selects
    /// the default preset.
    pub fn new(tolerance: Option<&ToleranceSet>) -> Self {
        Self::with_fields(tolerance, FieldNames::default())
    }

    /// A matcher that tolerates nothing.
    pub fn exact() -> Self {
        Self::new(Some(&ToleranceSet::strict()))
    }

    /// A matcher for records whose payload and context live under `fields`.
    pub fn with_fields(tolerance: Option<&ToleranceSet>, fields: FieldNames) -> Self {
        let tolerance = ToleranceSet::resolve(tolerance);
        let strictness = tolerance.strictness_with(&fields);
        Self {
            tolerance,
            fields,
            strictness,
        }
    }

    /// A matcher built from a loaded configuration.
    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::with_fields(config.requested_tolerance().as_ref(), config.fields.clone())
    }

    /// The resolved tolerance set.
    pub fn tolerance(&self) -> &ToleranceSet {
        &self.tolerance
    }

    /// The payload and context field names.
    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    /// Compare the two values and return every discrepancy.
    pub fn diff(&self, expected: &Value, actual: &Value) -> StructDiff {
        let (expected, actual) = if self.tolerance.contains(Tolerance::StringPayload) {
            (
                normalize_payload(expected, &self.fields.payload),
                normalize_payload(actual, &self.fields.payload),
            )
        } else {
            (Cow::Borrowed(expected), Cow::Borrowed(actual))
        };

        let diff = compare(&expected, &actual, &self.strictness);
        debug!(
            discrepancies = diff.len(),
            tolerance = %self.tolerance,
            "event comparison complete"
        );
        diff
    }

    /// The discrepancies as report lines.
    pub fn differences(&self, expected: &Value, actual: &Value) -> Vec<String> {
        self.diff(expected, actual).messages()
    }

    /// Returns `true` if no discrepancies are found.
    pub fn matches(&self, expected: &Value, actual: &Value) -> bool {
        self.diff(expected, actual).is_empty()
    }

    /// `Ok(())` if the values match, otherwise the full mismatch report.
    pub fn check(&self, expected: &Value, actual: &Value) -> MatchResult<()> {
        let diff = self.diff(expected, actual);
        if diff.is_empty() {
            return Ok(());
        }
        Err(EventMismatch {
            discrepancies: diff.discrepancies,
            expected: expected.clone(),
            actual: actual.clone(),
            tolerance: self.tolerance.clone(),
        }
        .into())
    }

    /// Panic with the mismatch report if the values differ.
    #[track_caller]
    pub fn assert(&self, expected: &Value, actual: &Value) {
        if let Err(err) = self.check(expected, actual) {
            panic!("{err}");
        }
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Every discrepancy between `expected` and `actual`, as report lines.
///
/// `tolerance` of `None` selects [`ToleranceSet::default`].
pub fn get_differences(
    expected: &Value,
    actual: &Value,
    tolerance: Option<&ToleranceSet>,
) -> Vec<String> {
    Matcher::new(tolerance).differences(expected, actual)
}

/// Like [`get_differences`], keeping the typed discrepancies.
pub fn diff_events(expected: &Value, actual: &Value, tolerance: Option<&ToleranceSet>) -> StructDiff {
    Matcher::new(tolerance).diff(expected, actual)
}

/// Returns `true` iff [`get_differences`] would return nothing.
pub fn events_match(expected: &Value, actual: &Value, tolerance: Option<&ToleranceSet>) -> bool {
    Matcher::new(tolerance).matches(expected, actual)
}

/// Non-panicking [`assert_match`].
pub fn check_match(
    expected: &Value,
    actual: &Value,
    tolerance: Option<&ToleranceSet>,
) -> MatchResult<()> {
    Matcher::new(tolerance).check(expected, actual)
}

/// Panic with a report listing every discrepancy if the values differ.
#[track_caller]
pub fn assert_match(expected: &Value, actual: &Value, tolerance: Option<&ToleranceSet>) {
    Matcher::new(tolerance).assert(expected, actual);
}

/// [`assert_match`] with no tolerances at all.
#[track_caller]
pub fn assert_exact_match(expected: &Value, actual: &Value) {
    Matcher::exact().assert(expected, actual);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;
    use proptest::prelude::*;
    use serde_json::json;

    fn only(flags: &[Tolerance]) -> ToleranceSet {
        flags.iter().copied().collect()
    }

    // -----------------------------------------------------------------------
    // Differences
    // -----------------------------------------------------------------------

    #[test]
    fn identical_events_match_strictly() {
        let event = json!({
            "name": "problem_check",
            "context": {"user_id": 7, "course_id": "c1"},
            "event": {"answers": [1, 2], "success": true},
        });
        assert!(get_differences(&event, &event, Some(&ToleranceSet::strict())).is_empty());
        assert!(events_match(&event, &event, Some(&ToleranceSet::strict())));
    }

    #[test]
    fn nested_value_mismatch_path() {
        let expected = json!({"a": {"b": 1}});
        let actual = json!({"a": {"b": 2}});

        let diff = diff_events(&expected, &actual, Some(&ToleranceSet::strict()));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.discrepancies[0].path().to_string(), "a.b");
        assert_eq!(
            get_differences(&expected, &actual, Some(&ToleranceSet::strict())),
            vec!["a.b: 1 != 2 (expected != actual)"]
        );
    }

    #[test]
    fn missing_key_detected() {
        let expected = json!({"a": 1, "b": 2});
        let actual = json!({"a": 1});
        assert_eq!(
            get_differences(&expected, &actual, Some(&ToleranceSet::strict())),
            vec!["b: not found in actual"]
        );
    }

    #[test]
    fn extra_root_key_toggled_by_tolerance() {
        let expected = json!({"a": 1});
        let actual = json!({"a": 1, "extra": 9});

        assert_eq!(
            get_differences(&expected, &actual, Some(&ToleranceSet::strict())),
            vec!["extra: only defined in actual"]
        );
        assert!(get_differences(&expected, &actual, Some(&only(&[Tolerance::RootExtraFields])))
            .is_empty());
    }

    #[test]
    fn default_tolerates_context_but_not_payload() {
        let expected = json!({"context": {"x": 1}, "event": {"y": 1}});
        let actual = json!({"context": {"x": 1, "host": "h"}, "event": {"y": 1, "z": 2}});

        assert_eq!(
            get_differences(&expected, &actual, Some(&ToleranceSet::default())),
            vec!["event.z: only defined in actual"]
        );
        assert_eq!(
            get_differences(&expected, &actual, None),
            vec!["event.z: only defined in actual"]
        );
        assert!(events_match(&expected, &actual, Some(&ToleranceSet::lenient())));
    }

    #[test]
    fn context_tolerance_does_not_reach_deeper() {
        let expected = json!({"context": {"module": {"id": 1}}});
        let actual = json!({"context": {"module": {"id": 1, "name": "m"}}});
        assert_eq!(
            get_differences(&expected, &actual, Some(&ToleranceSet::lenient())),
            vec!["context.module.name: only defined in actual"]
        );
    }

    #[test]
    fn string_payload_is_decoded_when_tolerated() {
        let expected = json!({"event": {"y": 1}});
        let actual = json!({"event": "{\"y\": 1}"});

        assert!(get_differences(&expected, &actual, Some(&only(&[Tolerance::StringPayload])))
            .is_empty());
        assert!(events_match(&expected, &actual, None));

        let strict = diff_events(&expected, &actual, Some(&ToleranceSet::strict()));
        assert_eq!(strict.mismatches(), 1);
        assert_eq!(strict.discrepancies[0].path().to_string(), "event");
    }

    #[test]
    fn string_payload_decoded_on_both_sides() {
        let expected = json!({"event": "{\"b\": 2, \"a\": 1}"});
        let actual = json!({"event": "{\"a\":1,\"b\":2}"});
        assert!(events_match(&expected, &actual, Some(&only(&[Tolerance::StringPayload]))));
        assert!(!events_match(&expected, &actual, Some(&ToleranceSet::strict())));
    }

    #[test]
    fn malformed_string_payload_compares_raw() {
        let expected = json!({"event": "{broken"});
        let actual = json!({"event": "{broken!"});
        assert_eq!(
            get_differences(&expected, &actual, None),
            vec![r#"event: "{broken" != "{broken!" (expected != actual)"#]
        );
        assert!(events_match(&expected, &expected, None));
    }

    #[test]
    fn decoded_payload_stays_strict_under_default() {
        let expected = json!({"event": {"y": 1}});
        let actual = json!({"event": "{\"y\": 1, \"z\": 2}"});
        assert_eq!(
            get_differences(&expected, &actual, None),
            vec!["event.z: only defined in actual"]
        );
    }

    #[test]
    fn type_mismatches_are_ordinary_discrepancies() {
        let expected = json!({"a": null, "b": {}, "c": [1]});
        let actual = json!({"a": 0, "b": "x", "c": {"0": 1}});
        let diff = diff_events(&expected, &actual, Some(&ToleranceSet::strict()));
        assert_eq!(diff.mismatches(), 3);
    }

    #[test]
    fn integer_and_float_fixtures_match() {
        let strict = ToleranceSet::strict();
        assert!(get_differences(&json!({"n": 1}), &json!({"n": 1.0}), Some(&strict)).is_empty());
        assert!(events_match(
            &json!({"event": {"scores": [1, 2]}}),
            &json!({"event": "{\"scores\": [1.0, 2.0]}"}),
            None,
        ));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let expected = json!({"z": 1, "a": {"q": 1, "p": 2}, "m": 3});
        let actual = json!({"a": {"p": 3}, "m": 4, "n": 5});
        let first = get_differences(&expected, &actual, Some(&ToleranceSet::strict()));
        let second = get_differences(&expected, &actual, Some(&ToleranceSet::strict()));
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    #[test]
    fn assert_match_passes_silently() {
        let event = json!({"name": "x", "event": {"y": 1}});
        let actual = json!({"name": "x", "time": 1, "event": {"y": 1}});
        assert_match(&event, &actual, None);
        assert_exact_match(&event, &event);
    }

    #[test]
    #[should_panic(expected = "* extra: only defined in actual")]
    fn assert_exact_match_rejects_extra_root_key() {
        assert_exact_match(&json!({"a": 1}), &json!({"a": 1, "extra": 9}));
    }

    #[test]
    #[should_panic(expected = "Unexpected differences found in structs:")]
    fn assert_match_panics_on_mismatch() {
        assert_match(&json!({"a": 1}), &json!({"a": 2}), None);
    }

    #[test]
    fn check_match_carries_report() {
        let expected = json!({"a": 1, "b": 2});
        let actual = json!({"a": 1, "c": 3});

        let err = check_match(&expected, &actual, None).unwrap_err();
        let mismatch = err.as_mismatch().unwrap();
        assert_eq!(mismatch.messages(), vec!["b: not found in actual"]);
        assert_eq!(mismatch.expected, expected);
        assert_eq!(mismatch.actual, actual);
        assert_eq!(mismatch.tolerance, ToleranceSet::default());

        let report = err.to_string();
        assert!(report.starts_with("Unexpected differences found in structs:\n\n* b: not found in actual\n\nExpected:\n"));
        assert!(report.contains("Tolerating:\n    [\n      \"string_payload\","));
    }

    #[test]
    fn report_dumps_original_values_not_normalized_ones() {
        let expected = json!({"event": {"y": 1}});
        let actual = json!({"event": "{\"y\": 2}"});

        let err = check_match(&expected, &actual, None).unwrap_err();
        match err {
            MatchError::Mismatch(mismatch) => {
                assert_eq!(mismatch.actual, actual);
                assert_eq!(mismatch.messages(), vec!["event.y: 1 != 2 (expected != actual)"]);
            }
            other => panic!("expected Mismatch, got {:?}", other),
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let expected = json!({"event": "{\"y\": 1}"});
        let actual = json!({"event": "{\"y\": 2}"});
        let _ = get_differences(&expected, &actual, None);
        assert_eq!(expected, json!({"event": "{\"y\": 1}"}));
        assert_eq!(actual, json!({"event": "{\"y\": 2}"}));
    }

    // -----------------------------------------------------------------------
    // Matcher configuration
    // -----------------------------------------------------------------------

    #[test]
    fn matcher_resolves_default() {
        assert_eq!(Matcher::default().tolerance(), &ToleranceSet::default());
        assert_eq!(Matcher::exact().tolerance(), &ToleranceSet::strict());
        assert_eq!(Matcher::default().fields(), &FieldNames::default());
    }

    #[test]
    fn matcher_with_custom_fields() {
        let config = MatcherConfig::from_toml_str(
            r#"
            preset = "default"

            [fields]
            payload = "data"
            context = "meta"
            "#,
        )
        .unwrap();
        let matcher = Matcher::from_config(&config);

        let expected = json!({"meta": {"a": 1}, "data": {"b": 1}});
        let actual = json!({"meta": {"a": 1, "x": 0}, "data": "{\"b\": 1, \"y\": 0}"});
        assert_eq!(
            matcher.differences(&expected, &actual),
            vec!["data.y: only defined in actual"]
        );
    }

    #[test]
    fn matcher_from_default_config_uses_default_preset() {
        let matcher = Matcher::from_config(&MatcherConfig::default());
        assert_eq!(matcher.tolerance(), &ToleranceSet::default());
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    fn arb_event() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            (-1000i64..1000).prop_map(Value::from),
            "[a-z{}\":0-9 ]{0,10}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 24, 5, |inner| {
            proptest::collection::btree_map(
                prop_oneof![Just("event".to_string()), Just("context".to_string()), "[a-d]{1,2}"],
                inner,
                0..5,
            )
            .prop_map(|m| Value::Object(m.into_iter().collect()))
        })
    }

    fn arb_tolerance() -> impl Strategy<Value = ToleranceSet> {
        proptest::sample::subsequence(Tolerance::ALL.to_vec(), 0..=4)
            .prop_map(|flags| flags.into_iter().collect())
    }

    proptest! {
        #[test]
        fn reflexive_under_strict(v in arb_event()) {
            prop_assert!(get_differences(&v, &v, Some(&ToleranceSet::strict())).is_empty());
        }

        #[test]
        fn check_and_match_agree(
            e in arb_event(),
            a in arb_event(),
            tolerance in arb_tolerance(),
        ) {
            let differences = get_differences(&e, &a, Some(&tolerance));
            prop_assert_eq!(events_match(&e, &a, Some(&tolerance)), differences.is_empty());
            prop_assert_eq!(check_match(&e, &a, Some(&tolerance)).is_ok(), differences.is_empty());
        }
    }
}

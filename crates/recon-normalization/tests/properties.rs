//! Property tests for the normalizers.

use proptest::prelude::*;

use recon_normalization::{
    AdherenceBucket, CANONICAL_ID_LENGTH, bucket_adherence, clean_identifier,
    is_canonical_identifier,
};

fn expected_bucket(value: f64) -> &'static str {
    if !(0.0..=100.0).contains(&value) {
        "Outlier"
    } else if value >= 75.0 {
        "High"
    } else if value >= 50.0 {
        "Medium"
    } else {
        "Low"
    }
}

proptest! {
    #[test]
    fn clean_identifier_is_idempotent(raw in ".{0,24}") {
        let once = clean_identifier(&raw);
        prop_assert_eq!(clean_identifier(&once), once.clone());
        prop_assert!(once.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn canonical_labels_are_unchanged(
        label in prop::sample::select(vec!["high", "medium", "low"]),
        upper in any::<bool>(),
        pad_left in " {0,3}",
        pad_right in " {0,3}",
    ) {
        let cased = if upper { label.to_uppercase() } else { label.to_string() };
        let raw = format!("{pad_left}{cased}{pad_right}");
        let resolved = bucket_adherence(&raw);
        let expected = AdherenceBucket::from_label(label).map(|b| b.as_str());
        prop_assert_eq!(Some(resolved.value()), expected);
        prop_assert!(!resolved.is_changed());
    }

    #[test]
    fn numeric_bucket_is_a_function_of_value(value in -500.0f64..500.0, percent in any::<bool>()) {
        let raw = if percent { format!("{value}%") } else { format!("{value}") };
        let resolved = bucket_adherence(&raw);
        prop_assert_eq!(resolved.value(), expected_bucket(value));
        prop_assert!(resolved.is_changed());
    }

    #[test]
    fn alphabetic_input_is_invalid(raw in "[a-zA-Z]{1,12}") {
        prop_assume!(AdherenceBucket::from_label(&raw).is_none());
        // Words that parse as floats.
        prop_assume!(raw.parse::<f64>().is_err());
        let resolved = bucket_adherence(&raw);
        prop_assert_eq!(resolved.value(), "Invalid");
        prop_assert!(resolved.note().is_some_and(|note| note.contains(&raw)));
    }

    #[test]
    fn five_digit_strings_are_canonical(raw in "[0-9]{5}") {
        prop_assert!(is_canonical_identifier(&raw, CANONICAL_ID_LENGTH));
        prop_assert_eq!(clean_identifier(&raw), raw);
    }
}

//! HCP identifier cleaning.

/// Length of a canonical HCP identifier.
pub const CANONICAL_ID_LENGTH: usize = 5;

/// Keeps only ASCII digits.
///
/// Idempotent: cleaning an already-clean identifier returns it unchanged.
pub fn clean_identifier(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// True if `value` is exactly `length` ASCII digits.
pub fn is_canonical_identifier(value: &str, length: usize) -> bool {
    value.len() == length && value.bytes().all(|byte| byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_separators_and_letters() {
        assert_eq!(clean_identifier("12-345"), "12345");
        assert_eq!(clean_identifier(" HCP 00123 "), "00123");
        assert_eq!(clean_identifier("n/a"), "");
    }

    #[test]
    fn canonical_requires_exact_digit_length() {
        assert!(is_canonical_identifier("12345", CANONICAL_ID_LENGTH));
        assert!(!is_canonical_identifier("1234", CANONICAL_ID_LENGTH));
        assert!(!is_canonical_identifier("123456", CANONICAL_ID_LENGTH));
        assert!(!is_canonical_identifier("1234a", CANONICAL_ID_LENGTH));
        assert!(!is_canonical_identifier("12.45", CANONICAL_ID_LENGTH));
    }
}

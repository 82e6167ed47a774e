//! Stateless predicates over raw CSV cell values.
//!
//! These functions only check the *shape* of a string; coercion to typed
//! values happens later, inside the transformer. Existence checks against the
//! host system live in [`crate::registry`], not here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DefaultPlacement, PropagationMethod, SectionType, TranslationMethod};

/// Matches locale codes like `en`, `en-US`, `de-DE`, `zh-Hans`, `zh-Hans-CN`.
static LANGUAGE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Za-z]{2,4})?(-[A-Za-z]{2})?$").unwrap());

/// True when the value spells a boolean, in either polarity:
/// `true/false`, `1/0`, `yes/no`, `on/off` (case-insensitive).
///
/// An empty string is not a boolean.
pub fn is_valid_boolean_string(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "false" | "1" | "0" | "yes" | "no" | "on" | "off"
    )
}

/// True only for affirmative spellings: `true`, `1`, `yes`, `on`
/// (case-insensitive). Everything else is falsy, including the empty string.
///
/// This drives actual conditional logic; [`is_valid_boolean_string`] merely
/// validates shape.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// True when the value is a valid language/locale code.
pub fn is_valid_language_code(code: &str) -> bool {
    LANGUAGE_CODE.is_match(code)
}

/// True when the value names a translation method, as internal token or label.
pub fn is_valid_translation_method(value: &str) -> bool {
    TranslationMethod::parse(value).is_some()
}

/// True when the value names the custom translation method specifically.
pub fn is_valid_custom_translation_method(value: &str) -> bool {
    TranslationMethod::parse(value) == Some(TranslationMethod::Custom)
}

/// True when the value is one of `single`, `channel`, `structure`.
pub fn is_valid_section_type(value: &str) -> bool {
    SectionType::parse(value).is_some()
}

/// True when the value names a propagation method, as internal token or label.
pub fn is_valid_propagation_method(value: &str) -> bool {
    PropagationMethod::parse(value).is_some()
}

/// True when the value names a default placement, as internal token or label.
pub fn is_valid_default_placement(value: &str) -> bool {
    DefaultPlacement::parse(value).is_some()
}

/// True for digit-only strings representing an integer greater than zero.
pub fn is_positive_integer(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.bytes().any(|b| b != b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_string_accepts_both_polarities() {
        for value in ["true", "false", "1", "0", "yes", "no", "on", "off"] {
            assert!(is_valid_boolean_string(value), "{value} should be valid");
            assert!(
                is_valid_boolean_string(&value.to_uppercase()),
                "{value} should be case-insensitive"
            );
        }
    }

    #[test]
    fn test_boolean_string_rejects_other_values() {
        for value in ["", "maybe", "2", "truee", "oui"] {
            assert!(!is_valid_boolean_string(value), "{value} should be invalid");
        }
    }

    #[test]
    fn test_truthy_only_affirmative() {
        for value in ["true", "TRUE", "1", "yes", "Yes", "on", " on "] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["false", "0", "no", "off", "", "anything"] {
            assert!(!is_truthy(value), "{value} should be falsy");
        }
    }

    #[test]
    fn test_language_codes() {
        for code in ["en", "en-US", "de-DE", "zh-Hans", "zh-Hans-CN", "fil"] {
            assert!(is_valid_language_code(code), "{code} should be valid");
        }
        for code in ["e", "english", "en123", "en@US", "en-", "EN"] {
            assert!(!is_valid_language_code(code), "{code} should be invalid");
        }
    }

    #[test]
    fn test_translation_methods() {
        assert!(is_valid_translation_method("none"));
        assert!(is_valid_translation_method("Translate for each language"));
        assert!(!is_valid_translation_method("per-site"));

        assert!(is_valid_custom_translation_method("custom"));
        assert!(is_valid_custom_translation_method("Custom…"));
        assert!(!is_valid_custom_translation_method("site"));
    }

    #[test]
    fn test_section_types() {
        assert!(is_valid_section_type("single"));
        assert!(is_valid_section_type("channel"));
        assert!(is_valid_section_type("structure"));
        // Lowercasing is the row validator's job.
        assert!(!is_valid_section_type("Single"));
        assert!(!is_valid_section_type("page"));
    }

    #[test]
    fn test_propagation_and_placement() {
        assert!(is_valid_propagation_method("all"));
        assert!(is_valid_propagation_method(
            "Only save entries to the site they were created in"
        ));
        assert!(!is_valid_propagation_method("some"));

        assert!(is_valid_default_placement("beginning"));
        assert!(is_valid_default_placement("After other entries"));
        assert!(!is_valid_default_placement("start"));
    }

    #[test]
    fn test_positive_integer() {
        assert!(is_positive_integer("1"));
        assert!(is_positive_integer("42"));
        assert!(is_positive_integer("007"));
        assert!(!is_positive_integer("0"));
        assert!(!is_positive_integer("000"));
        assert!(!is_positive_integer(""));
        assert!(!is_positive_integer("-1"));
        assert!(!is_positive_integer("3.5"));
        assert!(!is_positive_integer("12a"));
    }
}

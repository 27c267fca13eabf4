//! Inline hint computation.
//!
//! The hint is the literal completion of the typed text shown inline in the
//! input, drawn from the *currently active* candidate rather than a freshly
//! computed best match, so it always agrees with the highlighted row.

use crate::model::SuggestionItem;

/// Compute the inline autocomplete hint.
///
/// Returns the active candidate's display string when it extends `value` as
/// a strict, case-sensitive prefix; otherwise the empty string. Disabled
/// hinting, empty text, and the absence of an active candidate all yield the
/// empty string.
///
/// A non-empty result therefore always begins with exactly `value`.
pub fn compute_hint<T: SuggestionItem>(
    value: &str,
    options: &[T],
    display_key: &str,
    enabled: bool,
    active: Option<usize>,
) -> String {
    if !enabled || value.is_empty() {
        return String::new();
    }
    let Some(item) = active.and_then(|index| options.get(index)) else {
        return String::new();
    };

    let display = item.display(display_key);
    if display.len() > value.len() && display.starts_with(value) {
        display.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn options() -> Vec<Record> {
        ["value 1", "value 2", "value 3"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Record::new()
                    .with_field("id", (i + 1).to_string())
                    .with_field("name", *name)
            })
            .collect()
    }

    #[test]
    fn test_hint_follows_active_candidate() {
        let options = options();
        assert_eq!(
            compute_hint("valu", &options, "name", true, Some(0)),
            "value 1"
        );
        assert_eq!(
            compute_hint("valu", &options, "name", true, Some(1)),
            "value 2"
        );
    }

    #[test]
    fn test_hint_empty_without_active_candidate() {
        let options = options();
        assert_eq!(compute_hint("valu", &options, "name", true, None), "");
    }

    #[test]
    fn test_hint_empty_when_disabled_or_no_text() {
        let options = options();
        assert_eq!(compute_hint("valu", &options, "name", false, Some(0)), "");
        assert_eq!(compute_hint("", &options, "name", true, Some(0)), "");
    }

    #[test]
    fn test_hint_requires_strict_case_sensitive_prefix() {
        let options = options();
        // Not a prefix.
        assert_eq!(compute_hint("xyz", &options, "name", true, Some(0)), "");
        // Case mismatch.
        assert_eq!(compute_hint("Valu", &options, "name", true, Some(0)), "");
        // Equal to the display string: nothing left to hint.
        assert_eq!(compute_hint("value 1", &options, "name", true, Some(0)), "");
    }

    #[test]
    fn test_hint_prefix_invariant_and_idempotence() {
        let options = options();
        for active in [None, Some(0), Some(1), Some(2), Some(9)] {
            for value in ["", "v", "valu", "value 2", "zzz"] {
                let first = compute_hint(value, &options, "name", true, active);
                let second = compute_hint(value, &options, "name", true, active);
                assert_eq!(first, second);
                assert!(first.is_empty() || first.starts_with(value));
            }
        }
    }

    #[test]
    fn test_hint_missing_display_field_is_empty() {
        let options = vec![Record::new().with_field("id", "1")];
        assert_eq!(compute_hint("v", &options, "name", true, Some(0)), "");
    }

    #[test]
    fn test_hint_out_of_range_active_is_empty() {
        let options = options();
        assert_eq!(compute_hint("valu", &options, "name", true, Some(7)), "");
    }
}

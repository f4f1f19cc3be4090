//! Per-category pattern matchers
//!
//! Each category owns a fixed keyword list checked by case-insensitive
//! substring containment, plus extraction helpers that pull a payload out of
//! the request. Matchers are independent and run unconditionally; merging
//! their outputs is the selector's job.
//!
//! Title cleanup is an ordered list of text-transform passes, applied in
//! this order: leading-phrase stripping, time-word removal, trim,
//! capitalization. The pass order is a contract; tests pin it.

pub mod appointment;
pub mod meal;
pub mod reminder;
pub mod shopping;
pub mod task;

pub use appointment::match_appointment;
pub use meal::match_meal;
pub use reminder::match_reminder;
pub use shopping::match_shopping;
pub use task::match_task;

use crate::nlu::time::strip_time_words;

/// Strip the first matching leading phrase of each listed prefix, in order
///
/// Each prefix is removed at most once, at a word boundary, walking the list
/// front to back. Later prefixes see the remainder left by earlier ones, so
/// "add a task to" should be listed before "add".
pub(crate) fn strip_prefixes<'a>(input: &'a str, prefixes: &[&str]) -> &'a str {
    let mut rest = input.trim();
    for prefix in prefixes {
        if let Some(stripped) = strip_leading_phrase(rest, prefix) {
            rest = stripped;
        }
    }
    rest
}

/// Remove `phrase` from the front of `input` if it sits on a word boundary
pub(crate) fn strip_leading_phrase<'a>(input: &'a str, phrase: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(phrase)?;
    if rest.is_empty() || rest.starts_with(' ') {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Ordered title cleanup: prefixes, then time words, then capitalization
///
/// Falls back to `placeholder` when nothing usable remains.
pub(crate) fn clean_title(input: &str, prefixes: &[&str], placeholder: &str) -> String {
    let stripped = strip_prefixes(input, prefixes);
    let without_time = strip_time_words(stripped);
    let cleaned = without_time.trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '.');
    if cleaned.is_empty() {
        placeholder.to_string()
    } else {
        capitalize(cleaned)
    }
}

/// Upper-case the first character
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_leading_phrase_needs_word_boundary() {
        assert_eq!(strip_leading_phrase("add milk", "add"), Some("milk"));
        assert_eq!(strip_leading_phrase("additional milk", "add"), None);
        assert_eq!(strip_leading_phrase("add", "add"), Some(""));
    }

    #[test]
    fn test_prefix_order_is_honored() {
        // the longer phrase is listed first and wins
        let prefixes = ["add a task to", "add"];
        assert_eq!(strip_prefixes("add a task to call mom", &prefixes), "call mom");
        assert_eq!(strip_prefixes("add call mom", &prefixes), "call mom");
    }

    #[test]
    fn test_clean_title_pass_order() {
        let prefixes = ["i need to"];
        assert_eq!(
            clean_title("i need to call the plumber tomorrow", &prefixes, "New task"),
            "Call the plumber"
        );
        // nothing left after stripping falls back to the placeholder
        assert_eq!(clean_title("i need to tomorrow", &prefixes, "New task"), "New task");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("clean the bathroom"), "Clean the bathroom");
        assert_eq!(capitalize(""), "");
    }
}

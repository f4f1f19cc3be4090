//! Input normalization
//!
//! First stage of the pipeline. Pure and total: any string in, a cleaned
//! string out, never an error.

/// Characters allowed through besides letters, digits and whitespace.
///
/// `:` stays so clock times like "3:30" survive for the time parsers.
const ALLOWED_PUNCT: [char; 4] = [',', '.', '-', ':'];

/// Trim, collapse internal whitespace, drop everything outside the allow-list
///
/// Case is preserved; matchers lower-case their own view of the input.
pub fn normalize(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || ALLOWED_PUNCT.contains(&c) {
                Some(c)
            } else if c.is_whitespace() {
                Some(' ')
            } else {
                // dropped entirely, not replaced with a space, so
                // "it's" becomes "its" rather than "it s"
                None
            }
        })
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

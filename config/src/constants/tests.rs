//! Tests for the centralized configuration constants.

use super::*;

#[test]
fn snippet_keeps_short_text() {
    assert_eq!(snippet("class"), "class");
    assert_eq!(snippet(""), "");
}

#[test]
fn snippet_counts_characters_not_bytes() {
    let text = "é".repeat(DIAGNOSTIC_SNIPPET_CHARS + 5);
    let cut = snippet(&text);
    assert_eq!(cut.chars().count(), DIAGNOSTIC_SNIPPET_CHARS);
}

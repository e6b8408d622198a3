//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between configuration constants.

use crate::constants::*;

// =============================================================================
// RECURSION TESTS
// =============================================================================

#[test]
fn test_red_zone_is_nonzero() {
    assert!(STACKER_RED_ZONE_BYTES > 0, "red zone must be positive");
}

#[test]
fn test_stack_growth_exceeds_red_zone() {
    assert!(
        STACKER_STACK_SIZE_BYTES >= 4 * STACKER_RED_ZONE_BYTES,
        "each new stack segment should hold several red zones"
    );
}

// =============================================================================
// DIAGNOSTIC TESTS
// =============================================================================

#[test]
fn test_snippet_length_is_readable() {
    assert!(DIAGNOSTIC_SNIPPET_CHARS >= 8);
    assert!(DIAGNOSTIC_SNIPPET_CHARS <= 80);
}

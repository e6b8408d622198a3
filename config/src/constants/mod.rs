//! Centralized configuration values shared across the OPLang front end.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

// =============================================================================
// RECURSION LIMITS
// =============================================================================

/// Remaining stack, in bytes, below which recursive tree walks ask the
/// `stacker` crate for a fresh segment.
///
/// # Examples
/// ```
/// use config::constants::STACKER_RED_ZONE_BYTES;
/// assert!(STACKER_RED_ZONE_BYTES >= 32 * 1024);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 128 * 1024;

/// Bytes of stack space allocated each time `stacker` grows the stack.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024 * 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 4 * 1024 * 1024;

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Maximum number of characters of offending source text quoted in a
/// diagnostic or structural error message.
///
/// # Examples
/// ```
/// use config::constants::DIAGNOSTIC_SNIPPET_CHARS;
/// let text = "a_very_long_identifier_that_keeps_going_and_going";
/// let snippet: String = text.chars().take(DIAGNOSTIC_SNIPPET_CHARS).collect();
/// assert!(snippet.len() <= DIAGNOSTIC_SNIPPET_CHARS);
/// ```
pub const DIAGNOSTIC_SNIPPET_CHARS: usize = 24;

/// Truncates `text` to at most [`DIAGNOSTIC_SNIPPET_CHARS`] characters.
///
/// # Examples
/// ```
/// use config::constants::snippet;
/// assert_eq!(snippet("abc"), "abc");
/// assert_eq!(snippet(&"x".repeat(100)).chars().count(), 24);
/// ```
pub fn snippet(text: &str) -> String {
    text.chars().take(DIAGNOSTIC_SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests;

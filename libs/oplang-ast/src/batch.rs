//! # Batch Conversion
//!
//! Converts many independent inputs in parallel on the rayon thread pool.
//! Results come back in input order; one failing input does not affect the
//! others.

use crate::ast::Program;
use crate::cst::ParseTree;
use crate::error::{AstError, StructuralError};
use crate::{generate, parse_to_ast};
use rayon::prelude::*;

/// [`generate`] every tree in `roots`.
pub fn generate_all<T: ParseTree + Sync>(roots: &[T]) -> Vec<Result<Program, StructuralError>> {
    roots.par_iter().map(|root| generate(root)).collect()
}

/// [`parse_to_ast`] every source in `sources`.
///
/// ## Example
///
/// ```rust
/// use oplang_ast::batch::parse_all;
///
/// let results = parse_all(&["class A {}", "class", "class B {}"]);
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// assert!(results[2].is_ok());
/// ```
pub fn parse_all<S: AsRef<str> + Sync>(sources: &[S]) -> Vec<Result<Program, AstError>> {
    sources.par_iter().map(|source| parse_to_ast(source.as_ref())).collect()
}

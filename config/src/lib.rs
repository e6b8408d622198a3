//! # Config Crate
//!
//! Centralized configuration constants for the OPLang front end.
//! Every tunable value shared by the parser and the AST layer is defined
//! here so the crates agree on limits without scattering literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
//!
//! // The growth step must leave room for at least one red zone.
//! assert!(STACKER_STACK_SIZE_BYTES > STACKER_RED_ZONE_BYTES);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure `const` items, usable from any crate
//! - **Well-Documented**: Every constant has a doctest

pub mod constants;

#[cfg(test)]
mod tests;

//! # AST Visitors
//!
//! Tree walks that build the typed AST.
//!
//! ## Structure
//!
//! ```text
//! visitor/
//! ├── mod.rs             - This file
//! └── cst_to_ast/        - Parse tree to AST transformation
//!     ├── mod.rs         - Entry point (Program)
//!     ├── declarations.rs - Classes and members
//!     ├── types.rs       - Declared types
//!     ├── statements.rs  - Blocks and statements
//!     ├── expressions.rs - Expressions
//!     ├── literals.rs    - Literal tokens
//!     └── postfix.rs     - Postfix chains, assignment targets, call statements
//! ```

pub mod cst_to_ast;

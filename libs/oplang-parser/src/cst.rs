//! # Concrete Syntax Tree (CST)
//!
//! CST types representing parsed OPLang source code.
//!
//! Interior nodes mirror grammar productions; every terminal is kept as a
//! leaf tagged [`NodeKind::Token`] with its source text, so punctuation such as
//! `.`, `[` and `(` stays visible to later passes.
//!
//! ## Example
//!
//! ```rust
//! use oplang_parser::cst::NodeKind;
//!
//! let cst = oplang_parser::parse("class A {}");
//! assert_eq!(cst.root.kind, NodeKind::Program);
//! ```

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};

// =============================================================================
// CST
// =============================================================================

/// Output of one parse: the tree plus every error met on the way.
///
/// The tree is still built when errors occur; classes that failed to parse
/// are simply missing from it.
#[derive(Debug, Clone)]
pub struct Cst {
    /// Root node of the syntax tree.
    pub root: CstNode,
    /// Parse errors encountered.
    pub errors: Vec<ParseError>,
}

impl Cst {
    pub fn new(root: CstNode, errors: Vec<ParseError>) -> Self {
        Self { root, errors }
    }

    /// No lexical or syntax errors were reported.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// CST NODE
// =============================================================================

/// A node in the Concrete Syntax Tree.
///
/// ## Example
///
/// ```rust
/// use oplang_parser::{CstNode, NodeKind, Span};
/// use oplang_parser::lexer::TokenKind;
///
/// let leaf = CstNode::with_text(NodeKind::Token(TokenKind::IntLiteral), Span::from_bytes(0, 2), "42");
/// assert!(leaf.is_token(TokenKind::IntLiteral));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CstNode {
    /// Node type.
    pub kind: NodeKind,
    /// Source span.
    pub span: Span,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<CstNode>,
    /// Text content (terminals only).
    #[serde(default)]
    pub text: Option<String>,
}

impl CstNode {
    /// Create a new CST node.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Node type
    /// - `span`: Source location
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            text: None,
        }
    }

    /// Create node with text content.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Node type
    /// - `span`: Source location
    /// - `text`: Text content
    pub fn with_text(kind: NodeKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Create node with children.
    ///
    /// The span is taken from the first and last child; a childless node gets
    /// an empty span.
    pub fn with_children(kind: NodeKind, children: Vec<CstNode>) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span.merge(&last.span),
            _ => Span::zero(),
        };
        Self {
            kind,
            span,
            children,
            text: None,
        }
    }

    /// Terminal leaf for a lexer token.
    pub fn token(token: &Token) -> Self {
        Self::with_text(NodeKind::Token(token.kind), token.span, token.text.clone())
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: CstNode) {
        self.span = if self.children.is_empty() {
            child.span
        } else {
            self.span.merge(&child.span)
        };
        self.children.push(child);
    }

    /// Get text content, or empty string if none.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// True when this node is a terminal of the given token kind.
    pub fn is_token(&self, kind: TokenKind) -> bool {
        self.kind == NodeKind::Token(kind)
    }

    /// Find first child with given kind.
    pub fn find_child(&self, kind: NodeKind) -> Option<&CstNode> {
        self.children.iter().find(|c| c.kind == kind)
    }
}

/// Children are released from an explicit worklist, so dropping a deeply
/// nested tree does not recurse.
impl Drop for CstNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl Spanned for CstNode {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

/// Types of CST nodes.
///
/// One variant per OPLang grammar production, plus [`NodeKind::Token`] for
/// terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Top-level
    /// Root node containing all class declarations.
    Program,
    /// `class A extends B { ... }`
    ClassDecl,

    // Members
    /// `static final int a, b := 1;`
    AttributeDecl,
    /// One name in an attribute declaration, with optional initializer.
    AttributeItem,
    /// `static int f(int a) { ... }`
    MethodDecl,
    /// `A(int a) { ... }`
    ConstructorDecl,
    /// `~A() { ... }`
    DestructorDecl,
    /// `int a, b; float c`
    ParamList,
    /// `int & a, b` (one type shared by several names)
    ParamGroup,

    // Types
    /// `int`, `Shape` or `int[5]`
    OpType,
    /// `void` or an [`NodeKind::OpType`]
    ReturnType,

    // Statements
    /// `{ declarations and statements }`
    Block,
    /// `final int x := 1, y;`
    VarDecl,
    /// One name in a local declaration, with optional initializer.
    VarItem,
    /// `target := value;`
    AssignStmt,
    /// Assignment target.
    Lhs,
    /// `if c then s else s`
    IfStmt,
    /// `for i := a to b do s`
    ForStmt,
    /// `break;`
    BreakStmt,
    /// `continue;`
    ContinueStmt,
    /// `return e;`
    ReturnStmt,
    /// `obj.method(args);`
    CallStmt,

    // Expressions
    /// `a + b`
    BinaryExpr,
    /// `-a` or `!a`
    UnaryExpr,
    /// Primary expression followed by its suffixes: `a.b(c)[d]`
    PostfixExpr,
    /// `(e)`
    ParenExpr,
    /// `new A(args)`
    NewExpr,
    /// `{1, 2, 3}`
    ArrayLiteral,
    /// `a, b, c` inside call parentheses
    ArgList,

    // Terminals
    /// Lexer token.
    Token(TokenKind),
}

impl NodeKind {
    /// True for [`NodeKind::Token`] leaves of any token kind.
    pub const fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================

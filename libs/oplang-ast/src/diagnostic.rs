use config::constants::snippet;
use oplang_parser::{ParseError, ParseErrorKind, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A source error reported to the user, with location and an optional hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: String) -> Self {
        self.hint = Some(hint);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.span, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        let message = match &error.kind {
            ParseErrorKind::InvalidCharacter { text } => {
                format!("invalid character '{}'", snippet(text))
            }
            ParseErrorKind::IntegerOutOfRange { text } => {
                format!("integer literal '{}' is out of range", snippet(text))
            }
            kind => kind.to_string(),
        };
        let diagnostic = Diagnostic::new(message, error.span);
        match &error.kind {
            ParseErrorKind::UnterminatedString => {
                diagnostic.with_hint("close the string with '\"' on the same line".to_string())
            }
            ParseErrorKind::UnexpectedEof { .. } => {
                diagnostic.with_hint("the file ends inside a declaration".to_string())
            }
            ParseErrorKind::IntegerOutOfRange { .. } => {
                diagnostic.with_hint("integer literals must fit in 64 bits".to_string())
            }
            _ => diagnostic,
        }
    }
}

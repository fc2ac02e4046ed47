use crate::Pos;
use std::fmt;
use thiserror::Error;

/// A fatal error from the Rivulet core.
///
/// `Syntax` means the user program is malformed (unmatched glyph markers,
/// a strand with no valid reading, a bad question-marker pair, an unknown
/// command magnitude). `Internal` means the engine or its configuration
/// violated an invariant (ambiguous continuation, duplicate symbol
/// definitions, a write past the populated end of a list) — a lexicon or
/// command-table defect rather than a user-program defect.
///
/// Neither is retried: both abort interpretation of the current program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RivError {
    #[error("syntax error: {0}")]
    Syntax(Diagnostic),
    #[error("internal error: {0}")]
    Internal(Diagnostic),
}

impl RivError {
    /// A syntax error with no useful coordinates.
    pub fn syntax(message: impl Into<String>) -> Self {
        RivError::Syntax(Diagnostic {
            message: message.into(),
            pos: None,
        })
    }

    /// A syntax error anchored at a grid position.
    pub fn syntax_at(message: impl Into<String>, pos: Pos) -> Self {
        RivError::Syntax(Diagnostic {
            message: message.into(),
            pos: Some(pos),
        })
    }

    /// An internal (engine/config) error with no useful coordinates.
    pub fn internal(message: impl Into<String>) -> Self {
        RivError::Internal(Diagnostic {
            message: message.into(),
            pos: None,
        })
    }

    /// An internal error anchored at a grid position.
    pub fn internal_at(message: impl Into<String>, pos: Pos) -> Self {
        RivError::Internal(Diagnostic {
            message: message.into(),
            pos: Some(pos),
        })
    }

    /// `true` if this is a `Syntax` error.
    pub fn is_syntax(&self) -> bool {
        matches!(self, RivError::Syntax(_))
    }
}

/// Message plus optional source coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub pos: Option<Pos>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{} at {}", self.message, pos),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Result alias for core operations.
pub type RivResult<T> = Result<T, RivError>;

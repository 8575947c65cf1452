//! Error types for tokenization and scoping.
//!
//! Every error is terminal for the call that produced it: no partial token
//! list, rewritten text, or registry mutation is ever handed back alongside
//! an error. End of input is never an error.

use thiserror::Error;

/// Diagnostic produced by the grammar event parser for input that is
/// malformed at the CSS grammar level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {position}")]
pub struct GrammarError {
    /// Human-readable description of what the parser expected.
    pub message: String,
    /// Byte offset into the source where the parser gave up.
    pub position: usize,
}

/// Failure to find the boundary of one embedded template expression.
///
/// The boundary scan is purely syntactic; these are the only ways it can go
/// wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// Input ended before the closing `}}` terminator.
    #[error("unterminated expression: missing closing \"}}}}\"")]
    Unterminated,
    /// A closing bracket did not match the most recent opener.
    #[error("unbalanced '{0}' in expression")]
    Unbalanced(char),
    /// The marker contained no expression at all.
    #[error("empty expression")]
    Empty,
}

/// Error returned by [`tokenize`](crate::tokenize) and everything layered on
/// top of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is malformed per the CSS grammar.
    #[error("failed to parse CSS: {0}")]
    Grammar(#[from] GrammarError),
    /// An embedded expression marker is malformed. Tokenization aborts
    /// rather than falling back to treating the marker as literal CSS.
    #[error("failed to read embedded expression: {0}")]
    ExpressionBoundary(#[from] ExpressionError),
}

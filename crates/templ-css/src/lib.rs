//! CSS tokenization, template-expression extraction, class scoping, and the
//! style registry for templ-style template projects.
//!
//! # Scope
//!
//! This crate implements:
//! - **Span-preserving CSS tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types with their exact source text, comments included
//! - **Grammar event parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - At-rules, rulesets, and declarations as a flat event stream
//!   - Marker-aware brace handling: `{{` never opens a CSS block
//! - **Embedded-expression extraction**
//!   - `{{ expression }}` markers spliced into the token stream as single
//!     tokens, with a two-character-lookahead marker test
//!   - Byte-exact reconstruction of accepted input via [`print_tokens`],
//!     with omitted `;`/`{`/`}` punctuation synthesized
//! - **Class scoping**
//!   - Selector-position class identifiers rewritten with a prefix derived
//!     from a digest of the whole source file
//! - **Style registry**
//!   - Append-only rule list with `selector{prop:value;...}` rendering
//!
//! # Not implemented
//!
//! - Semantic validation of embedded expressions (boundaries only)
//! - Selector optimization or rule merging
//! - Minification beyond what the registry's render format already omits

/// Error types shared across the crate.
pub mod error;
/// Expression boundary resolution for `{{ ... }}` markers.
pub mod expr;
/// Event-level CSS grammar parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod grammar;
/// Embedded-expression-aware tokenization and printing.
pub mod parse;
/// Append-only style registry.
pub mod registry;
/// Class scoping with a content-derived prefix.
pub mod scope;
/// Span-preserving CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

// Re-exports for convenience
pub use error::{ExpressionError, GrammarError, ParseError};
pub use expr::expression_length;
pub use grammar::{EventKind, GrammarEvent, GrammarParser};
pub use parse::{Token, print_tokens, tokenize};
pub use registry::{ClassId, Declaration, Rule, StyleRegistry};
pub use scope::{SCOPED_CLASS_PREFIX, ScopedStylesheet, scope};
pub use tokenizer::{RawToken, TokenKind, Tokenizer};

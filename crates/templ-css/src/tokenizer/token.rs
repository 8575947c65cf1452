//! CSS token kinds per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! Unlike a value-decoding tokenizer, every token here carries its **exact
//! source text**: escapes stay escaped, strings keep their quotes, numbers
//! keep their written representation. Concatenating the `text` of a token
//! stream reproduces the tokenized input byte-for-byte, which is the
//! property the rest of this crate is built on.

use serde::Serialize;
use strum_macros::Display;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// The closed set of CSS lexical categories. Each variant corresponds to a
/// token type in the CSS Syntax Module Level 3 railroad diagrams; the token's
/// text lives next to the kind in [`RawToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenKind {
    /// "`<ident-token>`"
    Ident,
    /// "`<function-token>`" - an identifier followed by U+0028 LEFT PARENTHESIS
    Function,
    /// "`<at-keyword-token>`" - an identifier preceded by U+0040 COMMERCIAL AT
    AtKeyword,
    /// "`<hash-token>`" - one or more code points preceded by U+0023 NUMBER SIGN
    Hash,
    /// "`<string-token>`" - text is the full literal, quotes included
    String,
    /// "`<bad-string-token>`" - represents a parsing error
    BadString,
    /// "`<url-token>`" - text is the full `url(...)` form
    Url,
    /// "`<bad-url-token>`" - represents a parsing error
    BadUrl,
    /// "`<delim-token>`" - a single code point
    Delim,
    /// "`<number-token>`"
    Number,
    /// "`<percentage-token>`"
    Percentage,
    /// "`<dimension-token>`" - a number followed by a unit
    Dimension,
    /// "`<whitespace-token>`" - one or more whitespace code points
    Whitespace,
    /// A `/* ... */` comment. The CSS spec drops comments during
    /// tokenization; they are preserved here so streams print back exactly.
    Comment,
    /// "`<CDO-token>`" - the character sequence `<!--`
    Cdo,
    /// "`<CDC-token>`" - the character sequence `-->`
    Cdc,
    /// "`<colon-token>`"
    Colon,
    /// "`<semicolon-token>`"
    Semicolon,
    /// "`<comma-token>`"
    Comma,
    /// `<[-token>`
    LeftBracket,
    /// `<]-token>`
    RightBracket,
    /// `<(-token>`
    LeftParen,
    /// `<)-token>`
    RightParen,
    /// `<{-token>`
    LeftBrace,
    /// `<}-token>`
    RightBrace,
}

/// A single CSS token: its lexical category and its verbatim source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawToken {
    /// The lexical category of the token.
    pub kind: TokenKind,
    /// The exact substring of the input this token was scanned from.
    pub text: String,
}

impl RawToken {
    /// Create a token from a kind and its source text.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

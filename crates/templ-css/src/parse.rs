//! Embedded-expression-aware tokenization.
//!
//! [`tokenize`] turns CSS source into an ordered token list in which every
//! `{{ ... }}` template-expression marker is one [`Token::Expression`] and
//! everything else is a [`Token::Css`] carrying its exact source text.
//!
//! The walk is driven by grammar events, but the byte cursor is advanced
//! only by the text of tokens actually emitted: whitespace placement is
//! recomputed from the source at every construct boundary rather than
//! trusted from the grammar layer. Closing punctuation (`:` after a
//! declaration property, `{`, `;`, `}`) is synthesized from the event kind,
//! so a missing trailing semicolon or brace appears in the printed output
//! even though the source omitted it.

use serde::Serialize;
use std::fmt;

use crate::error::ParseError;
use crate::expr::expression_length;
use crate::grammar::{EventKind, GrammarParser};
use crate::tokenizer::{RawToken, TokenKind};

/// One token of tokenized template CSS.
///
/// The variant set is closed on purpose: every consumer pattern-matches
/// both arms, and concatenating the text of each token in order
/// reconstructs the tokenized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// A plain CSS token.
    Css {
        /// Byte offset of the token in the original source.
        position: usize,
        /// Lexical category.
        kind: TokenKind,
        /// Exact source substring (or synthesized punctuation).
        content: String,
    },
    /// An embedded template expression, spanning `{{` through `}}`.
    Expression {
        /// Byte offset of the opening `{{`.
        position: usize,
        /// `{{` plus the whitespace that follows it.
        prefix: String,
        /// The expression text, verbatim.
        expr: String,
        /// The whitespace before `}}` plus the `}}` itself.
        suffix: String,
    },
}

impl Token {
    /// A CSS token at the given byte offset.
    #[must_use]
    pub fn css(position: usize, kind: TokenKind, content: impl Into<String>) -> Self {
        Self::Css {
            position,
            kind,
            content: content.into(),
        }
    }

    /// Byte offset of the token in the original source.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::Css { position, .. } | Self::Expression { position, .. } => *position,
        }
    }

    /// Length in bytes of the token's literal text.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Css { content, .. } => content.len(),
            Self::Expression {
                prefix,
                expr,
                suffix,
                ..
            } => prefix.len() + expr.len() + suffix.len(),
        }
    }

    /// Returns true if the token carries no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Token {
    /// The token's literal text: the piece it contributes to printed output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css { content, .. } => f.write_str(content),
            Self::Expression {
                prefix,
                expr,
                suffix,
                ..
            } => {
                f.write_str(prefix)?;
                f.write_str(expr)?;
                f.write_str(suffix)
            }
        }
    }
}

/// Concatenate every token's literal text in order.
///
/// Total and pure; this is both the round-trip check and the way final
/// output text is produced.
#[must_use]
pub fn print_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Css { content, .. } => out.push_str(content),
            Token::Expression {
                prefix,
                expr,
                suffix,
                ..
            } => {
                out.push_str(prefix);
                out.push_str(expr);
                out.push_str(suffix);
            }
        }
    }
    out
}

/// Tokenize template CSS.
///
/// `inline` selects bare-declaration-list input (the contents of a style
/// attribute); otherwise the input is a full stylesheet. On success the
/// returned tokens reconstruct the source text, with `;`/`{`/`}`
/// punctuation synthesized where the source omitted it.
///
/// # Errors
///
/// [`ParseError::Grammar`] for input malformed at the CSS grammar level and
/// [`ParseError::ExpressionBoundary`] for a malformed `{{ ... }}` marker.
/// Both abort the whole call: no partial token list is returned.
pub fn tokenize(source: &str, inline: bool) -> Result<Vec<Token>, ParseError> {
    let mut parser = GrammarParser::new(source, inline);
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = 0usize;

    while let Some(event) = parser.next_event()? {
        if !event.is_value_bearing() {
            // Comments, stray tokens, and block-closing braces: whitespace
            // first (recomputed), then the event's own text.
            pos += emit_whitespace(source, pos, &mut tokens);
            if let Some(data) = &event.data
                && !is_spurious_whitespace(data)
            {
                tokens.push(Token::css(pos, data.kind, data.text.clone()));
                pos += data.text.len();
            }
            continue;
        }

        // The event's own keyword/property bytes come first.
        if let Some(data) = &event.data
            && !is_spurious_whitespace(data)
        {
            tokens.push(Token::css(pos, data.kind, data.text.clone()));
            pos += data.text.len();
        }
        if event.kind == EventKind::Declaration {
            tokens.push(Token::css(pos, TokenKind::Colon, ":"));
            pos += 1;
        }
        let leading = emit_whitespace(source, pos, &mut tokens);
        pos += leading;

        // Walk the value sub-tokens, splicing in expression markers.
        let values = &event.values;
        let mut index = 0;
        while index < values.len() {
            let value = &values[index];
            if is_spurious_whitespace(value) {
                index += 1;
                continue;
            }
            if index == 0 && value.is_whitespace() && leading > 0 {
                // Already emitted by the whitespace scan above.
                index += 1;
                continue;
            }
            if value.kind == TokenKind::LeftBrace && is_marker_start(source, pos) {
                let token = read_expression(source, pos)?;
                let end = pos + token.len();
                tokens.push(token);
                // Discard every sub-token the marker consumed; no token may
                // cover a byte twice.
                let mut covered = pos;
                while index < values.len() && covered < end {
                    covered += values[index].text.len();
                    index += 1;
                }
                pos = end;
                continue;
            }
            tokens.push(Token::css(pos, value.kind, value.text.clone()));
            pos += value.text.len();
            index += 1;
        }

        // Whitespace between the last value and the closing punctuation.
        pos += emit_whitespace(source, pos, &mut tokens);

        // Synthesized punctuation, present even when the source omits it.
        if matches!(event.kind, EventKind::BeginAtRule | EventKind::BeginRuleset) {
            tokens.push(Token::css(pos, TokenKind::LeftBrace, "{"));
        } else {
            tokens.push(Token::css(pos, TokenKind::Semicolon, ";"));
        }
        pos += 1;

        pos += emit_whitespace(source, pos, &mut tokens);
    }

    Ok(tokens)
}

/// Two-character lookahead: a marker starts only where the source has two
/// consecutive left braces. A single `{` is always an ordinary block start.
fn is_marker_start(source: &str, pos: usize) -> bool {
    let bytes = source.as_bytes();
    bytes.get(pos) == Some(&b'{') && bytes.get(pos + 1) == Some(&b'{')
}

/// Read one `{{ ... }}` marker starting at `pos`.
fn read_expression(source: &str, pos: usize) -> Result<Token, ParseError> {
    let prefix_ws = read_whitespace(source, pos + 2);
    let prefix = format!("{{{{{prefix_ws}");
    let expr_start = pos + prefix.len();
    let expr_len = expression_length(&source[expr_start..])?;
    let expr = source[expr_start..expr_start + expr_len].to_owned();
    let suffix_ws = read_whitespace(source, expr_start + expr_len);
    let suffix = format!("{suffix_ws}}}}}");
    Ok(Token::Expression {
        position: pos,
        prefix,
        expr,
        suffix,
    })
}

/// Scan whitespace at `pos` and emit it as a token if non-empty; returns the
/// number of bytes scanned.
fn emit_whitespace(source: &str, pos: usize, tokens: &mut Vec<Token>) -> usize {
    let ws = read_whitespace(source, pos);
    if ws.is_empty() {
        return 0;
    }
    let len = ws.len();
    tokens.push(Token::css(pos, TokenKind::Whitespace, ws));
    len
}

/// The run of whitespace starting at byte `pos` (empty if `pos` is out of
/// range, which happens after synthesized punctuation at end of input).
fn read_whitespace(source: &str, pos: usize) -> &str {
    let bytes = source.as_bytes();
    if pos >= bytes.len() {
        return "";
    }
    let mut end = pos;
    while end < bytes.len() && is_whitespace_byte(bytes[end]) {
        end += 1;
    }
    &source[pos..end]
}

/// Grammar layers occasionally produce zero-length whitespace tokens; they
/// cover no bytes and must not be emitted.
fn is_spurious_whitespace(token: &RawToken) -> bool {
    token.is_whitespace() && token.text.is_empty()
}

/// Byte-level whitespace test matching the tokenizer's whitespace class.
pub(crate) const fn is_whitespace_byte(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

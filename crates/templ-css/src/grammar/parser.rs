//! Event-level CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! Instead of building a rule tree, [`GrammarParser`] streams grammar
//! events: at-rules, ruleset begin/end, declarations, and forwarded tokens.
//! Each event carries its raw bytes and raw sub-tokens so that a consumer
//! can reconstruct source text exactly.
//!
//! One deliberate departure from plain CSS brace matching: a `{` that is
//! immediately followed by another `{` opens an embedded template-expression
//! marker, not a block. The parser keeps marker content inside the current
//! prelude or declaration value (tracking brace depth until the marker
//! closes) so that `color: {{ v }};` stays a single declaration instead of
//! being misread as a nested ruleset.

use super::event::{EventKind, GrammarEvent};
use crate::error::GrammarError;
use crate::tokenizer::{RawToken, TokenKind, Tokenizer};

/// What kind of block the parser is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Inside a ruleset body: declarations expected.
    Ruleset,
    /// Inside an at-rule body: rules expected.
    AtRule,
}

/// Why a prelude/value collection stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// A block-opening `{` at depth zero (not consumed).
    LeftBrace,
    /// A `;` at depth zero (not consumed).
    Semicolon,
    /// A block-closing `}` at depth zero (not consumed).
    RightBrace,
    /// Ran out of tokens.
    EndOfInput,
}

/// Streaming CSS grammar parser.
///
/// In inline mode the input is a bare declaration list; otherwise it is a
/// full stylesheet of rules. Call [`GrammarParser::next_event`] until it
/// yields `Ok(None)`.
pub struct GrammarParser {
    tokens: Vec<RawToken>,
    position: usize,
    inline: bool,
    scopes: Vec<Scope>,
}

impl GrammarParser {
    /// Create a parser over the given source.
    #[must_use]
    pub fn new(source: &str, inline: bool) -> Self {
        Self {
            tokens: Tokenizer::new(source).run(),
            position: 0,
            inline,
            scopes: Vec::new(),
        }
    }

    /// Produce the next grammar event, or `Ok(None)` at end of input.
    ///
    /// End of input inside an open block is not an error: the parser emits
    /// the missing `End*` events so consumers can synthesize the closing
    /// braces.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] for input that is malformed at the CSS
    /// grammar level (a selector without a block, a declaration without a
    /// colon, a stray `}`).
    pub fn next_event(&mut self) -> Result<Option<GrammarEvent>, GrammarError> {
        // Whitespace between grammar constructs is not an event of its own;
        // consumers recompute placement from the source text.
        while matches!(self.peek_kind(), Some(TokenKind::Whitespace)) {
            self.position += 1;
        }
        let declarations = match self.scopes.last() {
            Some(Scope::Ruleset) => true,
            Some(Scope::AtRule) => false,
            None => self.inline,
        };
        if declarations {
            self.next_declaration()
        } else {
            self.next_rule()
        }
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    fn next_rule(&mut self) -> Result<Option<GrammarEvent>, GrammarError> {
        let Some(token) = self.peek().cloned() else {
            return Ok(self.close_scope());
        };
        match token.kind {
            // Forwarded verbatim: comments, stray semicolons, and the
            // top-level CDO/CDC markers.
            TokenKind::Comment | TokenKind::Semicolon | TokenKind::Cdo | TokenKind::Cdc => {
                self.position += 1;
                Ok(Some(GrammarEvent::token(token)))
            }
            TokenKind::RightBrace => {
                if self.scopes.is_empty() {
                    return Err(self.error("unexpected '}'"));
                }
                self.position += 1;
                Ok(self.close_scope())
            }
            // "<at-keyword-token>: Consume an at-rule."
            TokenKind::AtKeyword => self.next_at_rule(),
            // "anything else: Consume a qualified rule."
            _ => self.next_ruleset(),
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    fn next_at_rule(&mut self) -> Result<Option<GrammarEvent>, GrammarError> {
        let keyword = self.consume_cloned();
        let (values, terminator) = self.collect_values(true);
        match terminator {
            Terminator::LeftBrace => {
                self.position += 1; // {
                self.scopes.push(Scope::AtRule);
                Ok(Some(GrammarEvent {
                    kind: EventKind::BeginAtRule,
                    data: keyword,
                    values,
                }))
            }
            Terminator::Semicolon => {
                self.position += 1; // ;
                Ok(Some(GrammarEvent {
                    kind: EventKind::AtRule,
                    data: keyword,
                    values,
                }))
            }
            // A statement ended by the enclosing block's `}` or by end of
            // input; the terminator is left for the caller.
            Terminator::RightBrace | Terminator::EndOfInput => Ok(Some(GrammarEvent {
                kind: EventKind::AtRule,
                data: keyword,
                values,
            })),
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn next_ruleset(&mut self) -> Result<Option<GrammarEvent>, GrammarError> {
        let (values, terminator) = self.collect_values(true);
        match terminator {
            Terminator::LeftBrace => {
                self.position += 1; // {
                self.scopes.push(Scope::Ruleset);
                Ok(Some(GrammarEvent {
                    kind: EventKind::BeginRuleset,
                    data: None,
                    values,
                }))
            }
            Terminator::Semicolon => Err(self.error("unexpected ';' in selector")),
            Terminator::RightBrace => Err(self.error("unexpected '}' in selector")),
            Terminator::EndOfInput => Err(self.error("unexpected end of input in selector")),
        }
    }

    /// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn next_declaration(&mut self) -> Result<Option<GrammarEvent>, GrammarError> {
        let Some(token) = self.peek().cloned() else {
            if self.scopes.is_empty() {
                // End of an inline declaration list.
                return Ok(None);
            }
            return Ok(self.close_scope());
        };
        match token.kind {
            TokenKind::Comment | TokenKind::Semicolon => {
                self.position += 1;
                Ok(Some(GrammarEvent::token(token)))
            }
            TokenKind::RightBrace => {
                if self.scopes.is_empty() {
                    return Err(self.error("unexpected '}'"));
                }
                self.position += 1;
                Ok(self.close_scope())
            }
            // "<at-keyword-token>: Consume an at-rule."
            TokenKind::AtKeyword => self.next_at_rule(),
            TokenKind::Ident => {
                let property = self.consume_cloned();
                // Whitespace between the property and its colon is tolerated
                // but not carried in the event.
                while matches!(self.peek_kind(), Some(TokenKind::Whitespace)) {
                    self.position += 1;
                }
                if self.peek_kind() != Some(TokenKind::Colon) {
                    return Err(self.error("expected ':' after declaration property"));
                }
                self.position += 1; // :
                let (values, terminator) = self.collect_values(false);
                if terminator == Terminator::Semicolon {
                    self.position += 1; // ;
                }
                // A terminating `}` or end of input is left for the caller;
                // the consumer synthesizes the declaration's `;` either way.
                Ok(Some(GrammarEvent {
                    kind: EventKind::Declaration,
                    data: property,
                    values,
                }))
            }
            _ => Err(self.error("expected a declaration")),
        }
    }

    /// Collect prelude/selector/value sub-tokens up to a terminator.
    ///
    /// `stop_on_block` is true for preludes and selectors, where a lone `{`
    /// at depth zero opens the construct's block. It is false for
    /// declaration values, where a lone `{` is kept as balanced content.
    /// In both cases `{{` starts marker content: both braces are collected
    /// and the brace depth keeps everything up to the matching `}}` inside
    /// the current value list.
    fn collect_values(&mut self, stop_on_block: bool) -> (Vec<RawToken>, Terminator) {
        let mut values = Vec::new();
        let mut brace_depth = 0usize;
        let mut group_depth = 0usize;
        loop {
            let Some(token) = self.peek() else {
                return (values, Terminator::EndOfInput);
            };
            match token.kind {
                TokenKind::Semicolon if brace_depth == 0 && group_depth == 0 => {
                    return (values, Terminator::Semicolon);
                }
                TokenKind::RightBrace => {
                    if brace_depth == 0 {
                        return (values, Terminator::RightBrace);
                    }
                    brace_depth -= 1;
                    self.push_next(&mut values);
                }
                TokenKind::LeftBrace => {
                    let marker = self.peek_kind_at(1) == Some(TokenKind::LeftBrace);
                    if brace_depth == 0 && stop_on_block && !marker {
                        return (values, Terminator::LeftBrace);
                    }
                    brace_depth += 1;
                    self.push_next(&mut values);
                }
                TokenKind::Function | TokenKind::LeftParen | TokenKind::LeftBracket => {
                    group_depth += 1;
                    self.push_next(&mut values);
                }
                TokenKind::RightParen | TokenKind::RightBracket => {
                    group_depth = group_depth.saturating_sub(1);
                    self.push_next(&mut values);
                }
                _ => self.push_next(&mut values),
            }
        }
    }

    /// Pop the innermost scope and emit its end event. The `}` data token is
    /// present even when the source omitted the brace, so consumers always
    /// have text to print.
    fn close_scope(&mut self) -> Option<GrammarEvent> {
        self.scopes.pop().map(|scope| GrammarEvent {
            kind: match scope {
                Scope::Ruleset => EventKind::EndRuleset,
                Scope::AtRule => EventKind::EndAtRule,
            },
            data: Some(RawToken::new(TokenKind::RightBrace, "}")),
            values: Vec::new(),
        })
    }

    fn push_next(&mut self, values: &mut Vec<RawToken>) {
        if let Some(token) = self.tokens.get(self.position) {
            values.push(token.clone());
            self.position += 1;
        }
    }

    fn consume_cloned(&mut self) -> Option<RawToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn peek(&self) -> Option<&RawToken> {
        self.tokens.get(self.position)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens
            .get(self.position + offset)
            .map(|token| token.kind)
    }

    /// Build a [`GrammarError`] at the current token's byte offset.
    fn error(&self, message: &str) -> GrammarError {
        let position = self.tokens[..self.position.min(self.tokens.len())]
            .iter()
            .map(|token| token.text.len())
            .sum();
        GrammarError {
            message: message.to_owned(),
            position,
        }
    }
}

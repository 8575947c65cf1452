//! Grammar events emitted by the event-level CSS parser.

use crate::tokenizer::RawToken;

/// The grammar construct an event describes.
///
/// `Begin*`/`End*` pairs bracket block contents; `AtRule` and `Declaration`
/// are complete statements; `Token` forwards a lexical token (a comment, a
/// stray semicolon) that is not part of any larger construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A block-less at-rule statement, e.g. `@charset "utf-8";`.
    AtRule,
    /// An at-rule up to and including its opening `{`.
    BeginAtRule,
    /// The `}` closing an at-rule block.
    EndAtRule,
    /// A qualified rule up to and including its opening `{`; the selector
    /// rides along as value sub-tokens.
    BeginRuleset,
    /// The `}` closing a ruleset block.
    EndRuleset,
    /// A `property: value` declaration.
    Declaration,
    /// A forwarded lexical token outside any other construct.
    Token,
}

/// One event from the grammar parser.
///
/// `data` carries the event's own raw bytes: the at-keyword for at-rules,
/// the property name for declarations, the forwarded token for `Token`
/// events, and the closing brace for `End*` events (synthesized when the
/// source omitted it). Ruleset-begin events have no data of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarEvent {
    /// What kind of construct this event describes.
    pub kind: EventKind,
    /// The event's own keyword/property/forwarded token, if any.
    pub data: Option<RawToken>,
    /// Ordered raw sub-tokens: the prelude of an at-rule, the selector of a
    /// ruleset, or the value of a declaration. Whitespace and comments are
    /// kept verbatim.
    pub values: Vec<RawToken>,
}

impl GrammarEvent {
    /// Does this event carry prelude/selector/value sub-tokens that the
    /// consumer must walk?
    #[must_use]
    pub fn is_value_bearing(&self) -> bool {
        matches!(
            self.kind,
            EventKind::AtRule
                | EventKind::BeginAtRule
                | EventKind::BeginRuleset
                | EventKind::Declaration
        )
    }

    /// A `Token` event forwarding one lexical token.
    #[must_use]
    pub fn token(token: RawToken) -> Self {
        Self {
            kind: EventKind::Token,
            data: Some(token),
            values: Vec::new(),
        }
    }
}

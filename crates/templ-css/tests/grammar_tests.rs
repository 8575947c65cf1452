//! Integration tests for the event-level grammar parser.

use templ_css::grammar::{EventKind, GrammarEvent, GrammarParser};
use templ_css::tokenizer::TokenKind;

/// Helper to drain a parser into its event list.
fn events(source: &str, inline: bool) -> Vec<GrammarEvent> {
    let mut parser = GrammarParser::new(source, inline);
    let mut out = Vec::new();
    while let Some(event) = parser.next_event().expect("grammar error") {
        out.push(event);
    }
    out
}

/// The concatenated text of an event's value sub-tokens.
fn value_text(event: &GrammarEvent) -> String {
    event
        .values
        .iter()
        .map(|token| token.text.as_str())
        .collect()
}

#[test]
fn test_empty_input() {
    assert!(events("", false).is_empty());
    assert!(events("", true).is_empty());
}

#[test]
fn test_inline_declaration() {
    let events = events("color: red;", true);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Declaration);
    let data = events[0].data.as_ref().expect("property token");
    assert_eq!(data.kind, TokenKind::Ident);
    assert_eq!(data.text, "color");
    assert_eq!(value_text(&events[0]), " red");
}

#[test]
fn test_inline_declaration_without_semicolon() {
    let events = events("color: red", true);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Declaration);
}

#[test]
fn test_two_inline_declarations() {
    let events = events("color:red;margin:0;", true);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::Declaration);
    assert_eq!(events[1].kind, EventKind::Declaration);
    assert_eq!(
        events[1].data.as_ref().map(|token| token.text.as_str()),
        Some("margin")
    );
}

#[test]
fn test_ruleset_events() {
    let events = events("a:hover { color: red; }", false);
    let kinds: Vec<EventKind> = events.iter().map(|event| event.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::BeginRuleset,
            EventKind::Declaration,
            EventKind::EndRuleset,
        ]
    );
    // The selector rides along as raw sub-tokens, trailing space included.
    assert_eq!(value_text(&events[0]), "a:hover ");
    assert!(events[0].data.is_none());
}

#[test]
fn test_missing_close_brace_still_ends_ruleset() {
    let events = events("a { color: red;", false);
    assert_eq!(events.last().map(|event| event.kind), Some(EventKind::EndRuleset));
    let data = events.last().and_then(|event| event.data.as_ref());
    assert_eq!(data.map(|token| token.text.as_str()), Some("}"));
}

#[test]
fn test_at_rule_statement() {
    let events = events("@charset \"utf-8\";", false);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::AtRule);
    assert_eq!(
        events[0].data.as_ref().map(|token| token.text.as_str()),
        Some("@charset")
    );
    assert_eq!(value_text(&events[0]), " \"utf-8\"");
}

#[test]
fn test_at_rule_block_nesting() {
    let events = events("@media screen { a { color: red; } }", false);
    let kinds: Vec<EventKind> = events.iter().map(|event| event.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::BeginAtRule,
            EventKind::BeginRuleset,
            EventKind::Declaration,
            EventKind::EndRuleset,
            EventKind::EndAtRule,
        ]
    );
}

#[test]
fn test_comment_is_forwarded() {
    let events = events("/* note */ a { color: red; }", false);
    assert_eq!(events[0].kind, EventKind::Token);
    assert_eq!(
        events[0].data.as_ref().map(|token| token.kind),
        Some(TokenKind::Comment)
    );
}

#[test]
fn test_stray_semicolon_is_forwarded() {
    let events = events("color:red;;", true);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::Declaration);
    assert_eq!(events[1].kind, EventKind::Token);
}

#[test]
fn test_marker_stays_inside_declaration_value() {
    let events = events("color: {{ accent }};", true);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Declaration);
    assert_eq!(value_text(&events[0]), " {{ accent }}");
}

#[test]
fn test_marker_with_inner_braces_stays_inside_value() {
    let events = events("color: {{ pick(Theme{dark: true}) }};", true);
    assert_eq!(events.len(), 1);
    assert_eq!(value_text(&events[0]), " {{ pick(Theme{dark: true}) }}");
}

#[test]
fn test_marker_in_selector_does_not_open_block() {
    let events = events(".{{ name }}-badge { color: red; }", false);
    assert_eq!(events[0].kind, EventKind::BeginRuleset);
    assert_eq!(value_text(&events[0]), ".{{ name }}-badge ");
}

#[test]
fn test_lone_brace_in_value_is_balanced_content() {
    let events = events("grid: { a };", true);
    assert_eq!(events.len(), 1);
    assert_eq!(value_text(&events[0]), " { a }");
}

#[test]
fn test_semicolon_inside_parens_does_not_terminate() {
    let events = events("background: url(data:image/png;base64,AAAA);", true);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Declaration);
}

#[test]
fn test_error_on_missing_colon() {
    let mut parser = GrammarParser::new("color red;", true);
    assert!(parser.next_event().is_err());
}

#[test]
fn test_error_on_stray_close_brace() {
    let mut parser = GrammarParser::new("}", false);
    assert!(parser.next_event().is_err());
}

#[test]
fn test_error_on_selector_without_block() {
    let mut parser = GrammarParser::new("a:hover", false);
    assert!(parser.next_event().is_err());
}

#[test]
fn test_error_carries_byte_position() {
    let mut parser = GrammarParser::new("color red;", true);
    let error = parser.next_event().expect_err("expected grammar error");
    assert_eq!(error.position, 6);
}

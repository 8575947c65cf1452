//! Integration tests for embedded-expression-aware tokenization.

use templ_css::parse::{Token, print_tokens, tokenize};
use templ_css::tokenizer::TokenKind;
use templ_css::{ExpressionError, ParseError};

/// Shorthand for the expected form of a CSS token.
fn css(position: usize, kind: TokenKind, content: &str) -> Token {
    Token::css(position, kind, content)
}

/// Accepted input must print back to itself.
fn assert_round_trip(input: &str, inline: bool) {
    let tokens = tokenize(input, inline).expect("tokenize failed");
    assert_eq!(print_tokens(&tokens), input);
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize("", true).expect("tokenize failed"), Vec::new());
    assert_eq!(tokenize("", false).expect("tokenize failed"), Vec::new());
}

#[test]
fn test_inline_key_value() {
    let tokens = tokenize("font-color: red;", true).expect("tokenize failed");
    assert_eq!(
        tokens,
        vec![
            css(0, TokenKind::Ident, "font-color"),
            css(10, TokenKind::Colon, ":"),
            css(11, TokenKind::Whitespace, " "),
            css(12, TokenKind::Ident, "red"),
            css(15, TokenKind::Semicolon, ";"),
        ]
    );
    assert_eq!(print_tokens(&tokens), "font-color: red;");
}

#[test]
fn test_inline_key_value_expression() {
    let tokens = tokenize("font-color: {{ red }};", true).expect("tokenize failed");
    assert_eq!(
        tokens,
        vec![
            css(0, TokenKind::Ident, "font-color"),
            css(10, TokenKind::Colon, ":"),
            css(11, TokenKind::Whitespace, " "),
            Token::Expression {
                position: 12,
                prefix: "{{ ".to_owned(),
                expr: "red".to_owned(),
                suffix: " }}".to_owned(),
            },
            css(21, TokenKind::Semicolon, ";"),
        ]
    );
    assert_eq!(print_tokens(&tokens), "font-color: {{ red }};");
}

#[test]
fn test_hover_pseudo_class() {
    let input = "a:hover {\n  background-color: yellow;\n}";
    let tokens = tokenize(input, false).expect("tokenize failed");
    assert_eq!(
        tokens,
        vec![
            css(0, TokenKind::Ident, "a"),
            css(1, TokenKind::Colon, ":"),
            css(2, TokenKind::Ident, "hover"),
            css(7, TokenKind::Whitespace, " "),
            css(8, TokenKind::LeftBrace, "{"),
            css(9, TokenKind::Whitespace, "\n  "),
            css(12, TokenKind::Ident, "background-color"),
            css(28, TokenKind::Colon, ":"),
            css(29, TokenKind::Whitespace, " "),
            css(30, TokenKind::Ident, "yellow"),
            css(36, TokenKind::Semicolon, ";"),
            css(37, TokenKind::Whitespace, "\n"),
            css(38, TokenKind::RightBrace, "}"),
        ]
    );
    assert_eq!(print_tokens(&tokens), input);
}

#[test]
fn test_missing_semicolon_is_synthesized() {
    let tokens = tokenize("a:hover{background-color:yellow}", false).expect("tokenize failed");
    assert_eq!(print_tokens(&tokens), "a:hover{background-color:yellow;}");
}

#[test]
fn test_missing_close_brace_is_synthesized() {
    let tokens = tokenize("a:hover{background-color:yellow;", false).expect("tokenize failed");
    assert_eq!(print_tokens(&tokens), "a:hover{background-color:yellow;}");
}

#[test]
fn test_single_brace_is_never_a_marker() {
    let tokens = tokenize("margin: { auto };", true).expect("tokenize failed");
    assert!(
        tokens
            .iter()
            .all(|token| matches!(token, Token::Css { .. })),
        "single braces must stay CSS tokens: {tokens:?}"
    );
    assert_eq!(print_tokens(&tokens), "margin: { auto };");
}

#[test]
fn test_two_braces_are_exactly_one_marker() {
    let tokens = tokenize("margin: {{ auto }};", true).expect("tokenize failed");
    let expressions: Vec<&Token> = tokens
        .iter()
        .filter(|token| matches!(token, Token::Expression { .. }))
        .collect();
    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].to_string(), "{{ auto }}");
}

#[test]
fn test_expression_in_full_stylesheet_value() {
    let input = ".card { color: {{ theme.Accent }}; }";
    let tokens = tokenize(input, false).expect("tokenize failed");
    assert_eq!(print_tokens(&tokens), input);
    let expression = tokens
        .iter()
        .find(|token| matches!(token, Token::Expression { .. }))
        .expect("expression token");
    assert_eq!(expression.position(), 15);
    assert_eq!(expression.to_string(), "{{ theme.Accent }}");
}

#[test]
fn test_expression_followed_by_more_values() {
    let input = "border: {{ width }} solid red;";
    let tokens = tokenize(input, true).expect("tokenize failed");
    assert_eq!(print_tokens(&tokens), input);
    // The marker must not swallow the values after it.
    assert!(tokens.iter().any(|token| matches!(
        token,
        Token::Css { kind: TokenKind::Ident, content, .. } if content == "solid"
    )));
}

#[test]
fn test_expression_with_call_and_commas() {
    let input = "color: {{ rgb(255, 99, 71) }};";
    let tokens = tokenize(input, true).expect("tokenize failed");
    assert_eq!(print_tokens(&tokens), input);
}

#[test]
fn test_expression_without_padding_whitespace() {
    let input = "color: {{accent}};";
    let tokens = tokenize(input, true).expect("tokenize failed");
    assert_eq!(print_tokens(&tokens), input);
    let expression = tokens
        .iter()
        .find(|token| matches!(token, Token::Expression { .. }))
        .expect("expression token");
    let Token::Expression { prefix, expr, suffix, .. } = expression else {
        unreachable!()
    };
    assert_eq!(prefix, "{{");
    assert_eq!(expr, "accent");
    assert_eq!(suffix, "}}");
}

#[test]
fn test_round_trip_inputs() {
    assert_round_trip("font-color: red;", true);
    assert_round_trip("color:red;margin:0;", true);
    assert_round_trip("color: {{ accent }}; margin: {{ gap }};", true);
    assert_round_trip("a:hover {\n  background-color: yellow;\n}", false);
    assert_round_trip(".card{color:red;}", false);
    assert_round_trip("/* banner */\nh1 { font-size: 2rem; }", false);
    assert_round_trip(
        "@media screen { .card { width: {{ card.Width }}; } }",
        false,
    );
    assert_round_trip("@charset \"utf-8\";", false);
}

#[test]
fn test_determinism() {
    let input = ".card { color: {{ theme.Accent }}; }";
    let first = tokenize(input, false).expect("tokenize failed");
    let second = tokenize(input, false).expect("tokenize failed");
    assert_eq!(first, second);
}

#[test]
fn test_unterminated_expression_aborts() {
    let result = tokenize("color: {{ red;", true);
    assert!(matches!(
        result,
        Err(ParseError::ExpressionBoundary(ExpressionError::Unterminated))
    ));
}

#[test]
fn test_unbalanced_expression_aborts() {
    let result = tokenize("color: {{ rgb(red }};", true);
    assert!(matches!(
        result,
        Err(ParseError::ExpressionBoundary(ExpressionError::Unbalanced(_)))
    ));
}

#[test]
fn test_empty_expression_aborts() {
    let result = tokenize("color: {{ }};", true);
    assert!(matches!(
        result,
        Err(ParseError::ExpressionBoundary(ExpressionError::Empty))
    ));
}

#[test]
fn test_no_partial_tokens_on_failure() {
    // The first declaration is fine; the failure in the second must still
    // abort the whole call.
    let result = tokenize("color: red; width: {{ w;", true);
    assert!(result.is_err());
}

#[test]
fn test_grammar_error_surfaces() {
    let result = tokenize("color red;", true);
    assert!(matches!(result, Err(ParseError::Grammar(_))));
}

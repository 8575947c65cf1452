//! CSS tokenizer per [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms).
//!
//! The consume-a-token state machine follows the spec section by section,
//! but tokens are captured as source spans rather than decoded values: the
//! scanner only ever decides where a token *ends*, and the text between the
//! start and end positions becomes the token verbatim.

use super::token::{RawToken, TokenKind};

/// Span-preserving CSS tokenizer.
///
/// Feed it a source string, call [`Tokenizer::run`], and get back a token
/// stream whose concatenated text equals the input.
pub struct Tokenizer {
    /// The input being tokenized.
    input: Vec<char>,
    /// Current position in the input.
    position: usize,
}

impl Tokenizer {
    /// Create a tokenizer over the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// Tokenize the whole input. Tokenization itself cannot fail: malformed
    /// constructs surface as `BadString`/`BadUrl`/`Delim` tokens, exactly as
    /// the spec's error recovery prescribes.
    #[must_use]
    pub fn run(mut self) -> Vec<RawToken> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Scan one token and capture its source span.
    fn next_token(&mut self) -> Option<RawToken> {
        let start = self.position;
        let kind = self.consume_token()?;
        let text: String = self.input[start..self.position].iter().collect();
        Some(RawToken { kind, text })
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Option<TokenKind> {
        // Comments are tokens here, not discarded trivia (see module docs).
        if self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            self.consume_comment();
            return Some(TokenKind::Comment);
        }

        // "Consume the next input code point."
        let c = self.consume()?;

        let kind = match c {
            // "whitespace"
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                self.consume_whitespace();
                TokenKind::Whitespace
            }

            // "U+0022 QUOTATION MARK (")"
            '"' => self.consume_string('"'),

            // "U+0023 NUMBER SIGN (#)"
            '#' => {
                // "If the next input code point is an ident code point or the next
                // two input code points are a valid escape..."
                if self.peek().is_some_and(is_ident_code_point)
                    || self.is_valid_escape(self.peek(), self.peek_at(1))
                {
                    // "Consume an ident sequence."
                    self.consume_ident_sequence();
                    TokenKind::Hash
                } else {
                    TokenKind::Delim
                }
            }

            // "U+0027 APOSTROPHE (')"
            '\'' => self.consume_string('\''),

            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,

            // "U+002B PLUS SIGN (+)"
            '+' => {
                // "If the input stream starts with a number..."
                if self.would_start_number_after_sign() {
                    self.consume_number();
                    self.consume_numeric_suffix()
                } else {
                    TokenKind::Delim
                }
            }

            ',' => TokenKind::Comma,

            // "U+002D HYPHEN-MINUS (-)"
            '-' => {
                if self.would_start_number_after_sign() {
                    self.consume_number();
                    self.consume_numeric_suffix()
                }
                // "Otherwise, if the next 2 input code points are U+002D U+003E (->)..."
                else if self.peek() == Some('-') && self.peek_at(1) == Some('>') {
                    let _ = self.consume(); // -
                    let _ = self.consume(); // >
                    TokenKind::Cdc
                }
                // "Otherwise, if the input stream starts with an ident sequence..."
                else if self.would_start_ident_sequence_with(Some('-')) {
                    self.reconsume();
                    self.consume_ident_like()
                } else {
                    TokenKind::Delim
                }
            }

            // "U+002E FULL STOP (.)"
            '.' => {
                if self.peek().is_some_and(|next| next.is_ascii_digit()) {
                    self.reconsume();
                    self.consume_number();
                    self.consume_numeric_suffix()
                } else {
                    TokenKind::Delim
                }
            }

            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,

            // "U+003C LESS-THAN SIGN (<)"
            '<' => {
                // "If the next 3 input code points are U+0021 U+002D U+002D (!--)..."
                if self.peek() == Some('!')
                    && self.peek_at(1) == Some('-')
                    && self.peek_at(2) == Some('-')
                {
                    let _ = self.consume(); // !
                    let _ = self.consume(); // -
                    let _ = self.consume(); // -
                    TokenKind::Cdo
                } else {
                    TokenKind::Delim
                }
            }

            // "U+0040 COMMERCIAL AT (@)"
            '@' => {
                // "If the next 3 input code points would start an ident sequence..."
                if self.would_start_ident_sequence() {
                    self.consume_ident_sequence();
                    TokenKind::AtKeyword
                } else {
                    TokenKind::Delim
                }
            }

            '[' => TokenKind::LeftBracket,

            // "U+005C REVERSE SOLIDUS (\)"
            '\\' => {
                if self.is_valid_escape(Some('\\'), self.peek()) {
                    self.reconsume();
                    self.consume_ident_like()
                } else {
                    // "This is a parse error."
                    TokenKind::Delim
                }
            }

            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,

            // "digit"
            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_number();
                self.consume_numeric_suffix()
            }

            // "ident-start code point"
            c if is_ident_start_code_point(c) => {
                self.reconsume();
                self.consume_ident_like()
            }

            // "anything else"
            _ => TokenKind::Delim,
        };
        Some(kind)
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// Consumes exactly one `/* ... */` span; an unterminated comment runs to
    /// end of input.
    fn consume_comment(&mut self) {
        let _ = self.consume(); // /
        let _ = self.consume(); // *
        loop {
            match self.consume() {
                Some('*') if self.peek() == Some('/') => {
                    let _ = self.consume(); // /
                    return;
                }
                Some(_) => {}
                None => return,
            }
        }
    }

    /// Consume a run of whitespace characters.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Escapes are skipped, not decoded: a backslash and the code point after
    /// it stay inside the span, which is all that is needed to find the
    /// closing quote.
    fn consume_string(&mut self, ending: char) -> TokenKind {
        loop {
            match self.consume() {
                // "ending code point: Return the <string-token>."
                Some(c) if c == ending => return TokenKind::String,
                // "EOF: This is a parse error. Return the <string-token>."
                None => return TokenKind::String,
                // "newline: This is a parse error. Reconsume... return a <bad-string-token>."
                Some('\n') => {
                    self.reconsume();
                    return TokenKind::BadString;
                }
                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => {
                    // Covers escaped quotes, escaped backslashes, and line
                    // continuations alike; EOF after the backslash is fine.
                    let _ = self.consume();
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.5 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// Classify what follows an already-consumed number.
    fn consume_numeric_suffix(&mut self) -> TokenKind {
        // "If the next 3 input code points would start an ident sequence..."
        if self.would_start_ident_sequence() {
            self.consume_ident_sequence();
            TokenKind::Dimension
        } else if self.peek() == Some('%') {
            let _ = self.consume();
            TokenKind::Percentage
        } else {
            TokenKind::Number
        }
    }

    /// [§ 4.3.6 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like(&mut self) -> TokenKind {
        let name_start = self.position;
        self.consume_ident_sequence();
        let name: String = self.input[name_start..self.position].iter().collect();

        // "If string's value is an ASCII case-insensitive match for 'url',
        // and the next input code point is U+0028 LEFT PARENTHESIS (()"
        if name.eq_ignore_ascii_case("url") && self.peek() == Some('(') {
            let _ = self.consume(); // (
            self.consume_whitespace();
            match self.peek() {
                // "...return a <function-token>" - the quoted argument is
                // tokenized separately as a string.
                Some('"' | '\'') => TokenKind::Function,
                // "Otherwise, consume a url token, and return it."
                _ => self.consume_url(),
            }
        } else if self.peek() == Some('(') {
            let _ = self.consume();
            TokenKind::Function
        } else {
            TokenKind::Ident
        }
    }

    /// [§ 4.3.7 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    fn consume_url(&mut self) -> TokenKind {
        self.consume_whitespace();
        loop {
            match self.consume() {
                // "U+0029 RIGHT PARENTHESIS ()): Return the <url-token>."
                Some(')') => return TokenKind::Url,
                // "EOF: This is a parse error. Return the <url-token>."
                None => return TokenKind::Url,
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    match self.peek() {
                        Some(')') => {
                            let _ = self.consume();
                            return TokenKind::Url;
                        }
                        None => return TokenKind::Url,
                        _ => {
                            self.consume_bad_url_remnants();
                            return TokenKind::BadUrl;
                        }
                    }
                }
                // "This is a parse error. Consume the remnants of a bad url..."
                Some('"' | '\'' | '(') => {
                    self.consume_bad_url_remnants();
                    return TokenKind::BadUrl;
                }
                Some('\\') => {
                    if self.is_valid_escape(Some('\\'), self.peek()) {
                        let _ = self.consume();
                    } else {
                        self.consume_bad_url_remnants();
                        return TokenKind::BadUrl;
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.14 Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.consume() {
                Some(')') | None => return,
                Some('\\') => {
                    if self.is_valid_escape(Some('\\'), self.peek()) {
                        let _ = self.consume();
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) {
        loop {
            match self.peek() {
                Some(c) if is_ident_code_point(c) => {
                    let _ = self.consume();
                }
                Some('\\') if self.is_valid_escape(Some('\\'), self.peek_at(1)) => {
                    let _ = self.consume(); // backslash
                    let _ = self.consume(); // escaped code point
                }
                _ => return,
            }
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// Span only: sign, integer part, fraction, exponent.
    fn consume_number(&mut self) {
        if matches!(self.peek(), Some('+' | '-')) {
            let _ = self.consume();
        }
        self.consume_digits();

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by a digit..."
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.consume(); // .
            self.consume_digits();
        }

        // "If the next 2 or 3 input code points are E/e, optionally a sign,
        // followed by a digit..."
        if matches!(self.peek(), Some('e' | 'E')) {
            let next = self.peek_at(1);
            let has_sign = matches!(next, Some('+' | '-'));
            let digit_pos = if has_sign { 2 } else { 1 };
            if self.peek_at(digit_pos).is_some_and(|c| c.is_ascii_digit()) {
                let _ = self.consume(); // e or E
                if has_sign {
                    let _ = self.consume();
                }
                self.consume_digits();
            }
        }
    }

    /// Consume a run of ASCII digits.
    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.consume();
        }
    }

    /// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_valid_escape(&self, first: Option<char>, second: Option<char>) -> bool {
        // "If the first code point is not U+005C REVERSE SOLIDUS (\), return false."
        if first != Some('\\') {
            return false;
        }
        // "Otherwise, if the second code point is a newline, return false."
        second != Some('\n')
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident_sequence(&self) -> bool {
        self.would_start_ident_sequence_with(self.peek())
    }

    fn would_start_ident_sequence_with(&self, first: Option<char>) -> bool {
        match first {
            // "U+002D HYPHEN-MINUS"
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(is_ident_start_code_point)
                    || second == Some('-')
                    || self.is_valid_escape(second, self.peek_at(2))
            }
            Some(c) if is_ident_start_code_point(c) => true,
            // "U+005C REVERSE SOLIDUS (\)"
            Some('\\') => self.is_valid_escape(Some('\\'), self.peek_at(1)),
            _ => false,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    ///
    /// Variant used when the sign character itself was just consumed.
    fn would_start_number_after_sign(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            // "...U+002E FULL STOP (.) and the third code point is a digit"
            Some('.') => self.peek_at(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    /// Put back the last consumed character.
    fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Peek at a character at an offset from the current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}

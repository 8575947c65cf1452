//! Expression boundary resolver.
//!
//! Template expressions are embedded in CSS between `{{` and `}}` markers.
//! Given the text starting immediately after a marker's opening delimiter
//! (and any leading whitespace), [`expression_length`] finds where one
//! syntactically complete expression ends. The scan is purely syntactic:
//! brackets must balance, string literals may contain anything, and the
//! expression ends at the first `}}` outside all of them. No attempt is made
//! to validate the host language's actual grammar.

use crate::error::ExpressionError;
use crate::parse::is_whitespace_byte;

/// Byte length of one complete expression at the start of `input`.
///
/// The returned length excludes the whitespace (if any) between the
/// expression and its closing `}}`; the caller scans that whitespace into
/// the marker's suffix.
///
/// # Errors
///
/// [`ExpressionError::Unterminated`] if the input ends before a closing
/// `}}`, [`ExpressionError::Unbalanced`] if a closing bracket has no
/// matching opener, and [`ExpressionError::Empty`] if the terminator
/// arrives before any expression text.
pub fn expression_length(input: &str) -> Result<usize, ExpressionError> {
    let bytes = input.as_bytes();
    let mut openers: Vec<u8> = Vec::new();
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        if openers.is_empty() && byte == b'}' && bytes.get(index + 1) == Some(&b'}') {
            let mut end = index;
            while end > 0 && is_whitespace_byte(bytes[end - 1]) {
                end -= 1;
            }
            if end == 0 {
                return Err(ExpressionError::Empty);
            }
            return Ok(end);
        }
        match byte {
            b'(' | b'[' | b'{' => {
                openers.push(byte);
                index += 1;
            }
            b')' | b']' | b'}' => {
                let expected = match byte {
                    b')' => b'(',
                    b']' => b'[',
                    _ => b'{',
                };
                if openers.pop() != Some(expected) {
                    return Err(ExpressionError::Unbalanced(char::from(byte)));
                }
                index += 1;
            }
            // String literals may contain brackets and braces freely.
            // Backtick literals are raw: no escape handling inside them.
            b'"' | b'\'' | b'`' => index = skip_string(bytes, index)?,
            _ => index += 1,
        }
    }
    Err(ExpressionError::Unterminated)
}

/// Skip a quoted literal, returning the index just past its closing quote.
fn skip_string(bytes: &[u8], start: usize) -> Result<usize, ExpressionError> {
    let quote = bytes[start];
    let mut index = start + 1;
    while index < bytes.len() {
        if bytes[index] == quote {
            return Ok(index + 1);
        }
        if bytes[index] == b'\\' && quote != b'`' {
            index += 2;
        } else {
            index += 1;
        }
    }
    Err(ExpressionError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::expression_length;
    use crate::error::ExpressionError;

    #[test]
    fn test_bare_identifier() {
        assert_eq!(expression_length("red }}"), Ok(3));
    }

    #[test]
    fn test_no_space_before_terminator() {
        assert_eq!(expression_length("red}}"), Ok(3));
    }

    #[test]
    fn test_call_with_nested_parens() {
        let input = "rgb(red(), 0, 0) }};";
        assert_eq!(expression_length(input), Ok(16));
    }

    #[test]
    fn test_braces_inside_expression() {
        let input = "Colors{primary: true} }}";
        assert_eq!(expression_length(input), Ok(21));
    }

    #[test]
    fn test_terminator_inside_string() {
        let input = "lookup(\"}}\") }}";
        assert_eq!(expression_length(input), Ok(12));
    }

    #[test]
    fn test_terminator_inside_backtick_literal() {
        let input = "raw(`}}`) }}";
        assert_eq!(expression_length(input), Ok(9));
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let input = "quote(\"\\\"}}\") }}";
        assert_eq!(expression_length(input), Ok(13));
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            expression_length("red"),
            Err(ExpressionError::Unterminated)
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            expression_length("\"red }}"),
            Err(ExpressionError::Unterminated)
        );
    }

    #[test]
    fn test_unbalanced_close() {
        assert_eq!(
            expression_length("rgb(red }}"),
            Err(ExpressionError::Unbalanced('}'))
        );
    }

    #[test]
    fn test_mismatched_brackets() {
        assert_eq!(
            expression_length("f(a] }}"),
            Err(ExpressionError::Unbalanced(']'))
        );
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(expression_length("}}"), Err(ExpressionError::Empty));
    }

    #[test]
    fn test_whitespace_only_expression() {
        // Leading whitespace belongs to the marker prefix, so by the time
        // the resolver runs the expression slot is genuinely empty.
        assert_eq!(expression_length("   }}"), Err(ExpressionError::Empty));
    }
}

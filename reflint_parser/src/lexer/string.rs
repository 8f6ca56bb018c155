//! String literal lexing.

use super::cursor::Cursor;
use crate::token::TokenKind;

/// Parse a string literal delimited by `quote` (`'` or `"`).
///
/// The cursor should be positioned just after the opening quote.
/// Handles the common escape sequences; an unterminated literal yields an
/// error token rather than a panic.
pub fn parse_string(cursor: &mut Cursor<'_>, quote: char) -> TokenKind {
    let mut value = String::new();

    loop {
        if cursor.is_eof() {
            return TokenKind::Error("unterminated string literal".to_string());
        }
        match cursor.bump() {
            Some(c) if c == quote => return TokenKind::String(value),
            Some('\\') => match cursor.bump() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('0') => value.push('\0'),
                Some(c) => value.push(c),
                None => return TokenKind::Error("unterminated string literal".to_string()),
            },
            Some('\n') => {
                return TokenKind::Error("unterminated string literal".to_string());
            }
            Some(c) => value.push(c),
            None => return TokenKind::Error("unterminated string literal".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_string() {
        let mut cursor = Cursor::new("hello'");
        assert_eq!(
            parse_string(&mut cursor, '\''),
            TokenKind::String("hello".into())
        );
    }

    #[test]
    fn test_escapes() {
        let mut cursor = Cursor::new(r#"a\nb\"c""#);
        assert_eq!(
            parse_string(&mut cursor, '"'),
            TokenKind::String("a\nb\"c".into())
        );
    }

    #[test]
    fn test_unterminated() {
        let mut cursor = Cursor::new("oops");
        assert!(matches!(
            parse_string(&mut cursor, '"'),
            TokenKind::Error(_)
        ));
    }

    #[test]
    fn test_empty_string() {
        let mut cursor = Cursor::new("\"");
        assert_eq!(parse_string(&mut cursor, '"'), TokenKind::String("".into()));
    }
}

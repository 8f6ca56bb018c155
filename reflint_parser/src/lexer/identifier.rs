//! Identifier and keyword handling.
//!
//! JavaScript identifiers follow Unicode identifier rules with two
//! additions: `$` and `_` are valid anywhere in an identifier.

use super::cursor::Cursor;
use crate::token::{Keyword, TokenKind};

/// Check if a character can start an identifier.
#[inline]
#[must_use]
pub fn is_id_start(c: char) -> bool {
    // Fast path for common ASCII
    if c.is_ascii_alphabetic() || c == '_' || c == '$' {
        return true;
    }
    unicode_xid::UnicodeXID::is_xid_start(c)
}

/// Check if a character can continue an identifier.
#[inline]
#[must_use]
pub fn is_id_continue(c: char) -> bool {
    // Fast path for common ASCII
    if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
        return true;
    }
    unicode_xid::UnicodeXID::is_xid_continue(c)
}

/// Parse an identifier or keyword.
///
/// The cursor should be positioned just after the first character has
/// been consumed.
pub fn parse_identifier(cursor: &mut Cursor<'_>, first_char: char) -> TokenKind {
    let start = cursor.pos() - first_char.len_utf8();
    cursor.eat_while(is_id_continue);
    let text = cursor.slice_from(start);

    match Keyword::from_str(text) {
        Some(kw) => TokenKind::Keyword(kw),
        None => TokenKind::Ident(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_start_classes() {
        assert!(is_id_start('a'));
        assert!(is_id_start('_'));
        assert!(is_id_start('$'));
        assert!(!is_id_start('1'));
        assert!(!is_id_start('-'));
    }

    #[test]
    fn test_parse_identifier_vs_keyword() {
        let mut cursor = Cursor::new("const");
        let first = cursor.bump().unwrap();
        assert_eq!(
            parse_identifier(&mut cursor, first),
            TokenKind::Keyword(Keyword::Const)
        );

        let mut cursor = Cursor::new("useState(");
        let first = cursor.bump().unwrap();
        assert_eq!(
            parse_identifier(&mut cursor, first),
            TokenKind::Ident("useState".into())
        );
    }

    #[test]
    fn test_dollar_identifier() {
        let mut cursor = Cursor::new("$props");
        let first = cursor.bump().unwrap();
        assert_eq!(
            parse_identifier(&mut cursor, first),
            TokenKind::Ident("$props".into())
        );
    }
}

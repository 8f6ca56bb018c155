//! Lexer for the analyzed JavaScript subset.
//!
//! Produces a flat token stream. Whitespace and comments (`//` and
//! `/* ... */`) are skipped; the parser never sees them. There is no
//! automatic-semicolon-insertion handling: the subset expects explicit
//! statement terminators or unambiguous statement starts.

mod cursor;
pub mod identifier;
mod string;

use crate::token::{Token, TokenKind};
use cursor::Cursor;
use identifier::{is_id_start, parse_identifier};
use reflint_core::Span;
use string::parse_string;

/// The lexer: wraps a cursor and yields tokens on demand.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer over the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Produce the next token, consuming input.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.cursor.pos();
        let Some(c) = self.cursor.bump() else {
            return Token::new(TokenKind::Eof, self.cursor.span_from(start));
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '?' => TokenKind::Question,
            '=' => {
                if self.cursor.eat('>') {
                    TokenKind::Arrow
                } else if self.cursor.eat('=') {
                    if self.cursor.eat('=') {
                        TokenKind::StrictEq
                    } else {
                        TokenKind::EqEq
                    }
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.cursor.eat('=') {
                    if self.cursor.eat('=') {
                        TokenKind::StrictNotEq
                    } else {
                        TokenKind::NotEq
                    }
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.cursor.eat('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.cursor.eat('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '&' => {
                if self.cursor.eat('&') {
                    TokenKind::AmpAmp
                } else {
                    TokenKind::Error("expected '&&'".to_string())
                }
            }
            '|' => {
                if self.cursor.eat('|') {
                    TokenKind::PipePipe
                } else {
                    TokenKind::Error("expected '||'".to_string())
                }
            }
            '\'' | '"' => parse_string(&mut self.cursor, c),
            c if c.is_ascii_digit() => self.lex_number(start),
            c if is_id_start(c) => parse_identifier(&mut self.cursor, c),
            c => TokenKind::Error(format!("unexpected character '{c}'")),
        };

        Token::new(kind, self.cursor.span_from(start))
    }

    /// Lex a number literal. The first digit has been consumed.
    fn lex_number(&mut self, start: usize) -> TokenKind {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.first() == '.' && self.cursor.second().is_ascii_digit() {
            self.cursor.bump();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let text = self.cursor.slice_from(start);
        match text.parse::<f64>() {
            Ok(value) => TokenKind::Number(value),
            Err(_) => TokenKind::Error(format!("invalid number literal '{text}'")),
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_while(|c| c.is_whitespace());
            if self.cursor.first() == '/' && self.cursor.second() == '/' {
                self.cursor.eat_while(|c| c != '\n');
            } else if self.cursor.first() == '/' && self.cursor.second() == '*' {
                self.cursor.bump();
                self.cursor.bump();
                loop {
                    if self.cursor.is_eof() {
                        return;
                    }
                    if self.cursor.first() == '*' && self.cursor.second() == '/' {
                        self.cursor.bump();
                        self.cursor.bump();
                        break;
                    }
                    self.cursor.bump();
                }
            } else {
                return;
            }
        }
    }
}

/// Tokenize an entire source string.
///
/// The final token is always [`TokenKind::Eof`].
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

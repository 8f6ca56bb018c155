//! Recursive-descent parser for the analyzed JavaScript subset.
//!
//! Statements are parsed by [`StmtParser`], expressions by [`ExprParser`]
//! with precedence climbing. The parser allocates nodes into a
//! [`SyntaxTree`] arena bottom-up, so parent links are complete when a
//! node is created.

mod expr;
mod stmt;

use crate::ast::{NodeId, NodeKind, SyntaxTree};
use crate::lexer::tokenize;
use crate::token::{Keyword, Token, TokenKind};
use reflint_core::{LintError, LintResult, Span};

pub use expr::ExprParser;
pub use stmt::StmtParser;

// =============================================================================
// Parser Core
// =============================================================================

/// Parser over a pre-lexed token buffer.
///
/// Tokens are buffered (rather than streamed) because arrow-function
/// detection needs unbounded lookahead to the matching `)`.
pub struct Parser {
    /// All tokens, ending with `Eof`.
    tokens: Vec<Token>,
    /// Index of the current token.
    pos: usize,
    /// Arena the parser allocates into.
    tree: SyntaxTree,
}

impl Parser {
    /// Create a new parser for the given source code.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            tokens: tokenize(source),
            pos: 0,
            tree: SyntaxTree::new(),
        }
    }

    /// Parse a whole program, consuming the parser.
    pub fn parse_program(mut self) -> LintResult<SyntaxTree> {
        let start = self.current().span.start;
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(StmtParser::parse(&mut self)?);
        }

        let end = self.previous_end().max(start);
        let root = self
            .tree
            .alloc(NodeKind::Program { body }, Span::new(start, end));
        self.tree.set_root(root);
        Ok(self.tree)
    }

    // =========================================================================
    // Token Management
    // =========================================================================

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Peek `n` tokens ahead of the current one.
    #[inline]
    pub fn peek(&self, n: usize) -> &Token {
        &self.tokens[(self.pos + n).min(self.tokens.len() - 1)]
    }

    /// Advance to the next token, returning the one consumed.
    pub fn advance(&mut self) -> &Token {
        let token = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the given kind (by variant).
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    /// Check if the current token is a specific keyword.
    #[inline]
    pub fn check_keyword(&self, kw: Keyword) -> bool {
        matches!(&self.current().kind, TokenKind::Keyword(k) if *k == kw)
    }

    /// Consume the current token if it matches, otherwise return false.
    pub fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it's the given keyword.
    pub fn match_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect and consume a specific token, or error.
    pub fn expect(&mut self, kind: &TokenKind, msg: &str) -> LintResult<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_at_current(msg))
        }
    }

    /// Expect and consume an identifier, returning its name and span.
    pub fn expect_identifier(&mut self, msg: &str) -> LintResult<(String, Span)> {
        if let TokenKind::Ident(name) = &self.current().kind {
            let name = name.clone();
            let span = self.current().span;
            self.advance();
            Ok((name, span))
        } else {
            Err(self.error_at_current(msg))
        }
    }

    /// Check if at end of file.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    // =========================================================================
    // Arena Access
    // =========================================================================

    /// Allocate a node in the arena.
    #[inline]
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.tree.alloc(kind, span)
    }

    /// Read-only view of the arena under construction.
    #[inline]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    // =========================================================================
    // Span Tracking
    // =========================================================================

    /// Start offset of the current token.
    #[inline]
    pub fn start_span(&self) -> u32 {
        self.current().span.start
    }

    /// End offset of the most recently consumed token.
    pub fn previous_end(&self) -> u32 {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].span.end
        }
    }

    /// Span from `start` to the end of the previous token.
    pub fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.previous_end().max(start))
    }

    // =========================================================================
    // Lookahead
    // =========================================================================

    /// Whether the tokens ahead form an arrow function head.
    ///
    /// Either `ident =>`, or a parenthesized parameter list whose closing
    /// `)` is directly followed by `=>`. Lookahead is bounded by the token
    /// buffer length.
    pub fn arrow_function_ahead(&self) -> bool {
        match &self.current().kind {
            TokenKind::Ident(_) => matches!(self.peek(1).kind, TokenKind::Arrow),
            TokenKind::LeftParen => {
                let mut depth = 1usize;
                let mut i = 1usize;
                loop {
                    match &self.peek(i).kind {
                        TokenKind::LeftParen => depth += 1,
                        TokenKind::RightParen => {
                            depth -= 1;
                            if depth == 0 {
                                return matches!(self.peek(i + 1).kind, TokenKind::Arrow);
                            }
                        }
                        TokenKind::Eof => return false,
                        _ => {}
                    }
                    i += 1;
                }
            }
            _ => false,
        }
    }

    // =========================================================================
    // Error Handling
    // =========================================================================

    /// Create an error at the current token.
    pub fn error_at_current(&self, msg: &str) -> LintError {
        let token = self.current();
        let location = match &token.kind {
            TokenKind::Eof => "at end of file".to_string(),
            TokenKind::Error(e) => format!("lexer error: {e}"),
            kind => format!("at '{kind}'"),
        };
        LintError::syntax(format!("{location}: {msg}"), token.span)
    }
}

// =============================================================================
// Precedence Levels
// =============================================================================

/// Binary-expression precedence levels for precedence climbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precedence {
    /// Lowest level, entry point.
    Lowest = 0,
    /// `||`
    Or = 1,
    /// `&&`
    And = 2,
    /// `==`, `!=`, `===`, `!==`
    Equality = 3,
    /// `<`, `<=`, `>`, `>=`
    Relational = 4,
    /// `+`, `-`
    Additive = 5,
    /// `*`, `/`, `%`
    Multiplicative = 6,
}

impl Precedence {
    /// The next tighter level.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Lowest => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Equality,
            Self::Equality => Self::Relational,
            Self::Relational => Self::Additive,
            Self::Additive => Self::Multiplicative,
            Self::Multiplicative => Self::Multiplicative,
        }
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Parse source code into a syntax tree.
pub fn parse(source: &str) -> LintResult<SyntaxTree> {
    Parser::new(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_program() {
        let tree = parse("").unwrap();
        assert!(matches!(
            tree.kind(tree.root()),
            NodeKind::Program { body } if body.is_empty()
        ));
    }

    #[test]
    fn test_arrow_lookahead() {
        let parser = Parser::new("(a, b) => a");
        assert!(parser.arrow_function_ahead());

        let parser = Parser::new("(a + b) * c");
        assert!(!parser.arrow_function_ahead());

        let parser = Parser::new("x => x");
        assert!(parser.arrow_function_ahead());

        let parser = Parser::new("({ onFetched }) => null");
        assert!(parser.arrow_function_ahead());
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Multiplicative > Precedence::Additive);
        assert!(Precedence::And > Precedence::Or);
        assert_eq!(Precedence::Additive.next(), Precedence::Multiplicative);
    }

    #[test]
    fn test_syntax_error_reports_location() {
        let err = parse("const = 3;").unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }
}

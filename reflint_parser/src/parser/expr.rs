//! Expression parsing with precedence climbing.

use super::{Parser, Precedence, StmtParser};
use crate::ast::{BinaryOp, NodeId, NodeKind, UnaryOp};
use crate::token::{Keyword, TokenKind};
use reflint_core::LintResult;

/// Expression parser.
pub struct ExprParser;

impl ExprParser {
    /// Parse a full expression (assignment level).
    pub fn parse_expression(p: &mut Parser) -> LintResult<NodeId> {
        Self::parse_assignment(p)
    }

    /// Assignment level: arrow functions, `=`, conditionals and below.
    pub fn parse_assignment(p: &mut Parser) -> LintResult<NodeId> {
        if p.arrow_function_ahead() {
            return Self::parse_arrow_function(p);
        }

        let start = p.start_span();
        let target = Self::parse_conditional(p)?;

        if p.match_token(&TokenKind::Assign) {
            let value = Self::parse_assignment(p)?;
            return Ok(p.alloc(NodeKind::Assign { target, value }, p.span_from(start)));
        }
        Ok(target)
    }

    /// `test ? consequent : alternate` and below.
    fn parse_conditional(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        let test = Self::parse_binary(p, Precedence::Lowest)?;

        if p.match_token(&TokenKind::Question) {
            let consequent = Self::parse_assignment(p)?;
            p.expect(&TokenKind::Colon, "expected ':' in conditional")?;
            let alternate = Self::parse_assignment(p)?;
            return Ok(p.alloc(
                NodeKind::Conditional {
                    test,
                    consequent,
                    alternate,
                },
                p.span_from(start),
            ));
        }
        Ok(test)
    }

    /// Binary operators by precedence climbing.
    fn parse_binary(p: &mut Parser, min_prec: Precedence) -> LintResult<NodeId> {
        let start = p.start_span();
        let mut left = Self::parse_unary(p)?;

        while let Some((prec, op)) = Self::binary_op(&p.current().kind) {
            if prec < min_prec {
                break;
            }
            p.advance();
            let right = Self::parse_binary(p, prec.next())?;
            left = p.alloc(NodeKind::Binary { op, left, right }, p.span_from(start));
        }
        Ok(left)
    }

    /// Map a token to its binary operator and precedence.
    fn binary_op(kind: &TokenKind) -> Option<(Precedence, BinaryOp)> {
        Some(match kind {
            TokenKind::PipePipe => (Precedence::Or, BinaryOp::Or),
            TokenKind::AmpAmp => (Precedence::And, BinaryOp::And),
            TokenKind::EqEq => (Precedence::Equality, BinaryOp::Eq),
            TokenKind::NotEq => (Precedence::Equality, BinaryOp::NotEq),
            TokenKind::StrictEq => (Precedence::Equality, BinaryOp::StrictEq),
            TokenKind::StrictNotEq => (Precedence::Equality, BinaryOp::StrictNotEq),
            TokenKind::Less => (Precedence::Relational, BinaryOp::Less),
            TokenKind::LessEqual => (Precedence::Relational, BinaryOp::LessEq),
            TokenKind::Greater => (Precedence::Relational, BinaryOp::Greater),
            TokenKind::GreaterEqual => (Precedence::Relational, BinaryOp::GreaterEq),
            TokenKind::Plus => (Precedence::Additive, BinaryOp::Add),
            TokenKind::Minus => (Precedence::Additive, BinaryOp::Sub),
            TokenKind::Star => (Precedence::Multiplicative, BinaryOp::Mul),
            TokenKind::Slash => (Precedence::Multiplicative, BinaryOp::Div),
            TokenKind::Percent => (Precedence::Multiplicative, BinaryOp::Rem),
            _ => return None,
        })
    }

    /// `!x`, `-x` and below.
    fn parse_unary(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        let op = match &p.current().kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            p.advance();
            let argument = Self::parse_unary(p)?;
            return Ok(p.alloc(NodeKind::Unary { op, argument }, p.span_from(start)));
        }
        Self::parse_postfix(p)
    }

    /// Calls, member access and subscripts.
    fn parse_postfix(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        let mut expr = Self::parse_primary(p)?;

        loop {
            if p.match_token(&TokenKind::LeftParen) {
                let mut arguments = Vec::new();
                if !p.check(&TokenKind::RightParen) {
                    loop {
                        arguments.push(Self::parse_assignment(p)?);
                        if !p.match_token(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                p.expect(&TokenKind::RightParen, "expected ')' after arguments")?;
                expr = p.alloc(
                    NodeKind::Call {
                        callee: expr,
                        arguments,
                    },
                    p.span_from(start),
                );
            } else if p.match_token(&TokenKind::Dot) {
                let (name, span) = p.expect_identifier("expected property name after '.'")?;
                let property = p.alloc(NodeKind::Ident { name }, span);
                expr = p.alloc(
                    NodeKind::Member {
                        object: expr,
                        property,
                        computed: false,
                    },
                    p.span_from(start),
                );
            } else if p.match_token(&TokenKind::LeftBracket) {
                let property = Self::parse_expression(p)?;
                p.expect(&TokenKind::RightBracket, "expected ']' after subscript")?;
                expr = p.alloc(
                    NodeKind::Member {
                        object: expr,
                        property,
                        computed: true,
                    },
                    p.span_from(start),
                );
            } else {
                return Ok(expr);
            }
        }
    }

    /// Literals, identifiers, grouping, array/object literals, function
    /// expressions.
    fn parse_primary(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        let span = p.current().span;

        match &p.current().kind {
            TokenKind::Number(value) => {
                let value = *value;
                p.advance();
                Ok(p.alloc(NodeKind::NumberLit(value), span))
            }
            TokenKind::String(value) => {
                let value = value.clone();
                p.advance();
                Ok(p.alloc(NodeKind::StringLit(value), span))
            }
            TokenKind::Keyword(Keyword::True) => {
                p.advance();
                Ok(p.alloc(NodeKind::BoolLit(true), span))
            }
            TokenKind::Keyword(Keyword::False) => {
                p.advance();
                Ok(p.alloc(NodeKind::BoolLit(false), span))
            }
            TokenKind::Keyword(Keyword::Null) => {
                p.advance();
                Ok(p.alloc(NodeKind::NullLit, span))
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                p.advance();
                Ok(p.alloc(NodeKind::Ident { name }, span))
            }
            TokenKind::LeftParen => {
                p.advance();
                let expr = Self::parse_expression(p)?;
                p.expect(&TokenKind::RightParen, "expected ')'")?;
                Ok(expr)
            }
            TokenKind::LeftBracket => {
                p.advance();
                let mut elements = Vec::new();
                if !p.check(&TokenKind::RightBracket) {
                    loop {
                        elements.push(Self::parse_assignment(p)?);
                        if !p.match_token(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                p.expect(&TokenKind::RightBracket, "expected ']'")?;
                Ok(p.alloc(NodeKind::ArrayLit { elements }, p.span_from(start)))
            }
            TokenKind::LeftBrace => Self::parse_object_literal(p),
            TokenKind::Keyword(Keyword::Function) => Self::parse_function_expression(p),
            _ => Err(p.error_at_current("expected an expression")),
        }
    }

    /// `{ key: value, shorthand }`
    fn parse_object_literal(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        p.advance(); // `{`

        let mut properties = Vec::new();
        if !p.check(&TokenKind::RightBrace) {
            loop {
                let prop_start = p.start_span();
                let (key_name, key_span) = p.expect_identifier("expected property name")?;
                let key = p.alloc(
                    NodeKind::Ident {
                        name: key_name.clone(),
                    },
                    key_span,
                );
                let (value, shorthand) = if p.match_token(&TokenKind::Colon) {
                    (Self::parse_assignment(p)?, false)
                } else {
                    // Shorthand: the value is a reference to `key_name`.
                    let value = p.alloc(NodeKind::Ident { name: key_name }, key_span);
                    (value, true)
                };
                properties.push(p.alloc(
                    NodeKind::Property {
                        key,
                        value,
                        shorthand,
                    },
                    p.span_from(prop_start),
                ));
                if !p.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        p.expect(&TokenKind::RightBrace, "expected '}' in object literal")?;
        Ok(p.alloc(NodeKind::ObjectLit { properties }, p.span_from(start)))
    }

    /// `function name?(params) { ... }` in expression position.
    fn parse_function_expression(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        p.advance(); // `function`

        let name = if matches!(p.current().kind, TokenKind::Ident(_)) {
            let (name, span) = p.expect_identifier("expected function name")?;
            Some(p.alloc(NodeKind::Ident { name }, span))
        } else {
            None
        };
        let params = StmtParser::parse_params(p)?;
        let body = StmtParser::parse_block(p)?;

        Ok(p.alloc(
            NodeKind::FunctionExpr { name, params, body },
            p.span_from(start),
        ))
    }

    /// `params => body`
    fn parse_arrow_function(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();

        let params = if matches!(p.current().kind, TokenKind::Ident(_)) {
            let (name, span) = p.expect_identifier("expected parameter name")?;
            vec![p.alloc(NodeKind::Ident { name }, span)]
        } else {
            StmtParser::parse_params(p)?
        };
        p.expect(&TokenKind::Arrow, "expected '=>'")?;

        let body = if p.check(&TokenKind::LeftBrace) {
            StmtParser::parse_block(p)?
        } else {
            Self::parse_assignment(p)?
        };

        Ok(p.alloc(NodeKind::ArrowFunction { params, body }, p.span_from(start)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::ast::{BinaryOp, NodeId, NodeKind};

    fn find_kind<'t>(
        tree: &'t crate::ast::SyntaxTree,
        pred: impl Fn(&NodeKind) -> bool,
    ) -> Option<(NodeId, &'t NodeKind)> {
        (0..tree.len()).map(|i| NodeId::new(i as u32)).find_map(|id| {
            let kind = tree.kind(id);
            pred(kind).then_some((id, kind))
        })
    }

    #[test]
    fn test_effect_call_shape() {
        let tree = parse("useEffect(() => { onFetched(data); }, [onFetched, data]);").unwrap();
        let (_, kind) = find_kind(&tree, |k| matches!(k, NodeKind::Call { .. })).unwrap();
        let NodeKind::Call { callee, arguments } = kind else {
            unreachable!()
        };
        assert_eq!(tree.ident_name(*callee), Some("useEffect"));
        assert_eq!(arguments.len(), 2);
        assert!(matches!(
            tree.kind(arguments[0]),
            NodeKind::ArrowFunction { .. }
        ));
        assert!(matches!(tree.kind(arguments[1]), NodeKind::ArrayLit { .. }));
    }

    #[test]
    fn test_namespaced_effect_call() {
        let tree = parse("React.useEffect(() => {}, []);").unwrap();
        let (_, kind) = find_kind(&tree, |k| matches!(k, NodeKind::Member { .. })).unwrap();
        let NodeKind::Member {
            object,
            property,
            computed,
        } = kind
        else {
            unreachable!()
        };
        assert!(!computed);
        assert_eq!(tree.ident_name(*object), Some("React"));
        assert_eq!(tree.ident_name(*property), Some("useEffect"));
    }

    #[test]
    fn test_precedence() {
        let tree = parse("a + b * c;").unwrap();
        let (_, kind) = find_kind(
            &tree,
            |k| matches!(k, NodeKind::Binary { op: BinaryOp::Add, .. }),
        )
        .unwrap();
        let NodeKind::Binary { right, .. } = kind else {
            unreachable!()
        };
        assert!(matches!(
            tree.kind(*right),
            NodeKind::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn test_arrow_with_destructured_param() {
        let tree = parse("const Child = ({ onFetched }) => { onFetched(); };").unwrap();
        let (_, kind) = find_kind(&tree, |k| matches!(k, NodeKind::ArrowFunction { .. })).unwrap();
        let NodeKind::ArrowFunction { params, .. } = kind else {
            unreachable!()
        };
        assert!(matches!(
            tree.kind(params[0]),
            NodeKind::ObjectPattern { .. }
        ));
    }

    #[test]
    fn test_expression_arrow_body() {
        let tree = parse("const f = x => x + 1;").unwrap();
        let (_, kind) = find_kind(&tree, |k| matches!(k, NodeKind::ArrowFunction { .. })).unwrap();
        let NodeKind::ArrowFunction { body, .. } = kind else {
            unreachable!()
        };
        assert!(matches!(tree.kind(*body), NodeKind::Binary { .. }));
    }

    #[test]
    fn test_grouping_drops_parens() {
        let tree = parse("(a);").unwrap();
        assert!(find_kind(&tree, |k| matches!(k, NodeKind::Ident { .. })).is_some());
    }

    #[test]
    fn test_conditional_expression() {
        let tree = parse("const v = isOpen ? a : b;").unwrap();
        assert!(find_kind(&tree, |k| matches!(k, NodeKind::Conditional { .. })).is_some());
    }
}

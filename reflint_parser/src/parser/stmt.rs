//! Statement and pattern parsing.

use super::{ExprParser, Parser};
use crate::ast::{DeclKind, NodeId, NodeKind};
use crate::token::{Keyword, TokenKind};
use reflint_core::LintResult;

/// Statement parser.
pub struct StmtParser;

impl StmtParser {
    /// Parse one statement.
    pub fn parse(p: &mut Parser) -> LintResult<NodeId> {
        if p.check_keyword(Keyword::Const) {
            return Self::parse_var_statement(p, DeclKind::Const);
        }
        if p.check_keyword(Keyword::Let) {
            return Self::parse_var_statement(p, DeclKind::Let);
        }
        if p.check_keyword(Keyword::Var) {
            return Self::parse_var_statement(p, DeclKind::Var);
        }
        if p.check_keyword(Keyword::Function) {
            return Self::parse_function_declaration(p);
        }
        if p.check_keyword(Keyword::Return) {
            return Self::parse_return(p);
        }
        if p.check_keyword(Keyword::If) {
            return Self::parse_if(p);
        }
        if p.check(&TokenKind::LeftBrace) {
            return Self::parse_block(p);
        }

        // Expression statement
        let start = p.start_span();
        let expr = ExprParser::parse_expression(p)?;
        p.match_token(&TokenKind::Semicolon);
        Ok(p.alloc(NodeKind::ExprStmt { expr }, p.span_from(start)))
    }

    /// `const x = e, [a, b] = e2;`
    fn parse_var_statement(p: &mut Parser, kind: DeclKind) -> LintResult<NodeId> {
        let start = p.start_span();
        p.advance(); // declaration keyword

        let mut declarators = Vec::new();
        loop {
            let decl_start = p.start_span();
            let pattern = Self::parse_pattern(p)?;
            let init = if p.match_token(&TokenKind::Assign) {
                Some(ExprParser::parse_assignment(p)?)
            } else {
                None
            };
            declarators.push(p.alloc(
                NodeKind::VarDeclarator { pattern, init },
                p.span_from(decl_start),
            ));

            if !p.match_token(&TokenKind::Comma) {
                break;
            }
        }
        p.match_token(&TokenKind::Semicolon);

        Ok(p.alloc(NodeKind::VarDecl { kind, declarators }, p.span_from(start)))
    }

    /// `function Name(params) { ... }`
    fn parse_function_declaration(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        p.advance(); // `function`

        let (name, name_span) = p.expect_identifier("expected function name")?;
        let name = p.alloc(NodeKind::Ident { name }, name_span);
        let params = Self::parse_params(p)?;
        let body = Self::parse_block(p)?;

        Ok(p.alloc(
            NodeKind::FunctionDecl { name, params, body },
            p.span_from(start),
        ))
    }

    /// `return expr?;`
    fn parse_return(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        p.advance(); // `return`

        let argument = if p.check(&TokenKind::Semicolon)
            || p.check(&TokenKind::RightBrace)
            || p.is_at_end()
        {
            None
        } else {
            Some(ExprParser::parse_expression(p)?)
        };
        p.match_token(&TokenKind::Semicolon);

        Ok(p.alloc(NodeKind::Return { argument }, p.span_from(start)))
    }

    /// `if (test) stmt else stmt?`
    fn parse_if(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        p.advance(); // `if`

        p.expect(&TokenKind::LeftParen, "expected '(' after 'if'")?;
        let test = ExprParser::parse_expression(p)?;
        p.expect(&TokenKind::RightParen, "expected ')' after condition")?;

        let consequent = Self::parse(p)?;
        let alternate = if p.match_keyword(Keyword::Else) {
            Some(Self::parse(p)?)
        } else {
            None
        };

        Ok(p.alloc(
            NodeKind::If {
                test,
                consequent,
                alternate,
            },
            p.span_from(start),
        ))
    }

    /// `{ stmt* }`
    pub fn parse_block(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        p.expect(&TokenKind::LeftBrace, "expected '{'")?;

        let mut body = Vec::new();
        while !p.check(&TokenKind::RightBrace) && !p.is_at_end() {
            body.push(Self::parse(p)?);
        }
        p.expect(&TokenKind::RightBrace, "expected '}'")?;

        Ok(p.alloc(NodeKind::Block { body }, p.span_from(start)))
    }

    /// `( pattern, ... )`
    pub fn parse_params(p: &mut Parser) -> LintResult<Vec<NodeId>> {
        p.expect(&TokenKind::LeftParen, "expected '('")?;
        let mut params = Vec::new();
        if !p.check(&TokenKind::RightParen) {
            loop {
                params.push(Self::parse_pattern(p)?);
                if !p.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        p.expect(&TokenKind::RightParen, "expected ')'")?;
        Ok(params)
    }

    /// A binding pattern: identifier, array pattern or object pattern.
    pub fn parse_pattern(p: &mut Parser) -> LintResult<NodeId> {
        let start = p.start_span();
        match &p.current().kind {
            TokenKind::Ident(_) => {
                let (name, span) = p.expect_identifier("expected binding name")?;
                Ok(p.alloc(NodeKind::Ident { name }, span))
            }
            TokenKind::LeftBracket => {
                p.advance();
                let mut elements = Vec::new();
                if !p.check(&TokenKind::RightBracket) {
                    loop {
                        elements.push(Self::parse_pattern(p)?);
                        if !p.match_token(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                p.expect(&TokenKind::RightBracket, "expected ']' in array pattern")?;
                Ok(p.alloc(NodeKind::ArrayPattern { elements }, p.span_from(start)))
            }
            TokenKind::LeftBrace => {
                p.advance();
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
                            (Self::parse_pattern(p)?, false)
                        } else {
                            // Shorthand: the binding reuses the key's name.
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
                p.expect(&TokenKind::RightBrace, "expected '}' in object pattern")?;
                Ok(p.alloc(NodeKind::ObjectPattern { properties }, p.span_from(start)))
            }
            _ => Err(p.error_at_current("expected a binding pattern")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::ast::{DeclKind, NodeKind};

    #[test]
    fn test_state_cell_declaration_shape() {
        let tree = parse("const [data, setData] = useState();").unwrap();
        let NodeKind::Program { body } = tree.kind(tree.root()) else {
            panic!("expected program root");
        };
        let NodeKind::VarDecl { kind, declarators } = tree.kind(body[0]) else {
            panic!("expected var decl");
        };
        assert_eq!(*kind, DeclKind::Const);
        let NodeKind::VarDeclarator { pattern, init } = tree.kind(declarators[0]) else {
            panic!("expected declarator");
        };
        assert!(matches!(
            tree.kind(*pattern),
            NodeKind::ArrayPattern { elements } if elements.len() == 2
        ));
        assert!(matches!(tree.kind(init.unwrap()), NodeKind::Call { .. }));
    }

    #[test]
    fn test_function_declaration() {
        let tree = parse("function Form({ onClose }) { return null; }").unwrap();
        let NodeKind::Program { body } = tree.kind(tree.root()) else {
            panic!("expected program root");
        };
        let NodeKind::FunctionDecl { name, params, .. } = tree.kind(body[0]) else {
            panic!("expected function decl");
        };
        assert_eq!(tree.ident_name(*name), Some("Form"));
        assert!(matches!(
            tree.kind(params[0]),
            NodeKind::ObjectPattern { .. }
        ));
    }

    #[test]
    fn test_shorthand_pattern_binds_key_name() {
        let tree = parse("const { onFetched } = props;").unwrap();
        let mut found = false;
        for i in 0..tree.len() {
            if let NodeKind::Property {
                value, shorthand, ..
            } = tree.kind(crate::ast::NodeId::new(i as u32))
            {
                assert!(*shorthand);
                assert_eq!(tree.ident_name(*value), Some("onFetched"));
                found = true;
            }
        }
        assert!(found);
    }

    #[test]
    fn test_if_else() {
        let tree = parse("if (!isOpen) { close(); } else { open(); }").unwrap();
        let NodeKind::Program { body } = tree.kind(tree.root()) else {
            panic!("expected program root");
        };
        assert!(matches!(
            tree.kind(body[0]),
            NodeKind::If { alternate: Some(_), .. }
        ));
    }

    #[test]
    fn test_return_without_argument() {
        let tree = parse("function f() { return; }").unwrap();
        let mut returns = 0;
        for i in 0..tree.len() {
            if let NodeKind::Return { argument } = tree.kind(crate::ast::NodeId::new(i as u32)) {
                assert!(argument.is_none());
                returns += 1;
            }
        }
        assert_eq!(returns, 1);
    }
}

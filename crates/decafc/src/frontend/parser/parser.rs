//! Recursive descent parser for Decaf

use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::*;
use crate::frontend::lexer::{Lexer, Token, TokenKind};

/// Recursive descent parser for Decaf
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete program
    pub fn parse(&mut self) -> CompileResult<Program> {
        let start = self.expect(TokenKind::Class)?.span;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LBrace)?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let member_start = self.current.span;

            if self.match_token(&TokenKind::Void)? {
                let name = self.expect_ident()?;
                methods.push(self.parse_method_decl_rest(None, name, member_start)?);
                continue;
            }

            let ty = self.parse_type()?;
            let name = self.expect_ident()?;

            if self.check(&TokenKind::LParen) {
                methods.push(self.parse_method_decl_rest(Some(ty), name, member_start)?);
            } else if methods.is_empty() {
                fields.push(self.parse_field_decl_rest(ty, name, member_start)?);
            } else {
                return Err(CompileError::parser(
                    "field declarations must precede method declarations",
                    name.span,
                ));
            }
        }

        let close_span = self.expect(TokenKind::RBrace)?.span;
        self.expect(TokenKind::Eof)?;

        Ok(Program {
            name: name.name,
            fields,
            methods,
            span: start.merge(close_span),
            close_span,
        })
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> CompileResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> CompileResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn expect_ident(&mut self) -> CompileResult<Ident> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let token = self.advance()?;
                Ok(Ident::new(name, token.span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Whether the token after the current one is `(`
    fn next_is_call(&mut self) -> CompileResult<bool> {
        Ok(matches!(self.lexer.peek()?.kind, TokenKind::LParen))
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        CompileError::parser(
            format!("expected {}, found {}", expected, self.current.kind),
            self.current.span,
        )
    }

    fn parse_type(&mut self) -> CompileResult<ValueType> {
        let ty = match self.current.kind {
            TokenKind::Int => ValueType::Int,
            TokenKind::Boolean => ValueType::Boolean,
            _ => return Err(self.unexpected("type")),
        };
        self.advance()?;
        Ok(ty)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_field_decl_rest(
        &mut self,
        ty: ValueType,
        first: Ident,
        start: Span,
    ) -> CompileResult<FieldDecl> {
        let mut names = vec![self.parse_field_name_rest(first)?];

        while self.match_token(&TokenKind::Comma)? {
            let name = self.expect_ident()?;
            names.push(self.parse_field_name_rest(name)?);
        }

        let end = self.expect(TokenKind::Semi)?.span;
        Ok(FieldDecl {
            ty,
            names,
            span: start.merge(end),
        })
    }

    fn parse_field_name_rest(&mut self, name: Ident) -> CompileResult<FieldName> {
        if !self.match_token(&TokenKind::LBracket)? {
            return Ok(FieldName {
                span: name.span,
                name,
                array_len: None,
            });
        }

        let len = match &self.current.kind {
            TokenKind::IntLiteral(text) => {
                let text = text.clone();
                self.advance()?;
                text
            }
            _ => return Err(self.unexpected("array length literal")),
        };
        let end = self.expect(TokenKind::RBracket)?.span;

        Ok(FieldName {
            span: name.span.merge(end),
            name,
            array_len: Some(len),
        })
    }

    fn parse_method_decl_rest(
        &mut self,
        return_type: Option<ValueType>,
        name: Ident,
        start: Span,
    ) -> CompileResult<MethodDecl> {
        self.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let param_start = self.current.span;
                let ty = self.parse_type()?;
                let param_name = self.expect_ident()?;
                params.push(Param {
                    ty,
                    span: param_start.merge(param_name.span),
                    name: param_name,
                });
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;
        Ok(MethodDecl {
            name,
            return_type,
            params,
            span: start.merge(body.span),
            body,
        })
    }

    fn parse_var_decl(&mut self) -> CompileResult<VarDecl> {
        let start = self.current.span;
        let ty = self.parse_type()?;

        let mut names = vec![self.expect_ident()?];
        while self.match_token(&TokenKind::Comma)? {
            names.push(self.expect_ident()?);
        }

        let end = self.expect(TokenKind::Semi)?.span;
        Ok(VarDecl {
            ty,
            names,
            span: start.merge(end),
        })
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_block(&mut self) -> CompileResult<Block> {
        let start = self.expect(TokenKind::LBrace)?.span;

        let mut var_decls = Vec::new();
        while self.current.kind.is_type_keyword() {
            var_decls.push(self.parse_var_decl()?);
        }

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            statements.push(self.parse_statement()?);
        }

        let close_span = self.expect(TokenKind::RBrace)?.span;
        Ok(Block {
            var_decls,
            statements,
            span: start.merge(close_span),
            close_span,
        })
    }

    fn parse_statement(&mut self) -> CompileResult<Stmt> {
        let start = self.current.span;

        match &self.current.kind {
            TokenKind::If => {
                self.advance()?;
                self.expect(TokenKind::LParen)?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                let then_block = self.parse_block()?;
                let else_block = if self.match_token(&TokenKind::Else)? {
                    Some(self.parse_block()?)
                } else {
                    None
                };
                let end = else_block.as_ref().map_or(then_block.span, |b| b.span);
                Ok(Stmt::new(
                    StmtKind::If { condition, then_block, else_block },
                    start.merge(end),
                ))
            }
            TokenKind::For => {
                self.advance()?;
                let var = self.expect_ident()?;
                self.expect(TokenKind::Eq)?;
                let from = self.parse_expression()?;
                self.expect(TokenKind::Comma)?;
                let to = self.parse_expression()?;
                let body = self.parse_block()?;
                let span = start.merge(body.span);
                Ok(Stmt::new(
                    StmtKind::For { var, start: from, end: to, body },
                    span,
                ))
            }
            TokenKind::Return => {
                self.advance()?;
                let value = if self.check(&TokenKind::Semi) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                let end = self.expect(TokenKind::Semi)?.span;
                Ok(Stmt::new(StmtKind::Return(value), start.merge(end)))
            }
            TokenKind::Break => {
                self.advance()?;
                let end = self.expect(TokenKind::Semi)?.span;
                Ok(Stmt::new(StmtKind::Break, start.merge(end)))
            }
            TokenKind::Continue => {
                self.advance()?;
                let end = self.expect(TokenKind::Semi)?.span;
                Ok(Stmt::new(StmtKind::Continue, start.merge(end)))
            }
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let span = block.span;
                Ok(Stmt::new(StmtKind::Block(block), span))
            }
            TokenKind::Callout => self.parse_call_statement(),
            TokenKind::Identifier(_) => {
                if self.next_is_call()? {
                    return self.parse_call_statement();
                }

                let location = self.parse_location()?;
                let op = self.parse_assign_op()?;
                let value = self.parse_expression()?;
                let end = self.expect(TokenKind::Semi)?.span;
                Ok(Stmt::new(
                    StmtKind::Assign { location, op, value },
                    start.merge(end),
                ))
            }
            _ => Err(self.unexpected("statement")),
        }
    }

    fn parse_call_statement(&mut self) -> CompileResult<Stmt> {
        let call = self.parse_method_call()?;
        let end = self.expect(TokenKind::Semi)?.span;
        let span = call.span.merge(end);
        Ok(Stmt::new(StmtKind::Call(call), span))
    }

    fn parse_assign_op(&mut self) -> CompileResult<AssignOp> {
        let op = match self.current.kind {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            _ => return Err(self.unexpected("assignment operator")),
        };
        self.advance()?;
        Ok(op)
    }

    fn parse_location(&mut self) -> CompileResult<Location> {
        let name = self.expect_ident()?;

        if self.match_token(&TokenKind::LBracket)? {
            let index = self.parse_expression()?;
            let end = self.expect(TokenKind::RBracket)?.span;
            Ok(Location {
                span: name.span.merge(end),
                name,
                index: Some(Box::new(index)),
            })
        } else {
            Ok(Location {
                span: name.span,
                name,
                index: None,
            })
        }
    }

    fn parse_method_call(&mut self) -> CompileResult<MethodCall> {
        let start = self.current.span;

        if self.match_token(&TokenKind::Callout)? {
            self.expect(TokenKind::LParen)?;
            let name = match &self.current.kind {
                TokenKind::StringLiteral(s) => {
                    let s = s.clone();
                    self.advance()?;
                    s
                }
                _ => return Err(self.unexpected("string literal naming the callout")),
            };

            let mut args = Vec::new();
            while self.match_token(&TokenKind::Comma)? {
                let arg = match &self.current.kind {
                    TokenKind::StringLiteral(s) => {
                        let s = s.clone();
                        self.advance()?;
                        CalloutArg::Str(s)
                    }
                    _ => CalloutArg::Expr(self.parse_expression()?),
                };
                args.push(arg);
            }

            let end = self.expect(TokenKind::RParen)?.span;
            return Ok(MethodCall {
                kind: CallKind::Callout { name, args },
                span: start.merge(end),
            });
        }

        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }

        let end = self.expect(TokenKind::RParen)?.span;
        Ok(MethodCall {
            kind: CallKind::User { name, args },
            span: start.merge(end),
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn parse_expression(&mut self) -> CompileResult<Expr> {
        self.parse_logical_or_expression()
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        let span = left.span.merge(right.span);
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    fn parse_logical_or_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_logical_and_expression()?;

        while self.match_token(&TokenKind::PipePipe)? {
            let right = self.parse_logical_and_expression()?;
            left = Self::binary(BinaryOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_logical_and_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_equality_expression()?;

        while self.match_token(&TokenKind::AmpAmp)? {
            let right = self.parse_equality_expression()?;
            left = Self::binary(BinaryOp::And, left, right);
        }

        Ok(left)
    }

    fn parse_equality_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_relational_expression()?;

        loop {
            let op = match self.current.kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Ne,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_relational_expression()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_relational_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_additive_expression()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::LtEq => BinaryOp::Le,
                TokenKind::GtEq => BinaryOp::Ge,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_additive_expression()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_multiplicative_expression()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplicative_expression()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_unary_expression()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_unary_expression()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> CompileResult<Expr> {
        let start_span = self.current.span;

        let op = match self.current.kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_primary_expression(),
        };
        self.advance()?;

        let operand = self.parse_unary_expression()?;
        let span = start_span.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_primary_expression(&mut self) -> CompileResult<Expr> {
        let span = self.current.span;

        match &self.current.kind {
            TokenKind::IntLiteral(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::Literal(Literal::Int(s)), span))
            }
            TokenKind::BoolLiteral(b) => {
                let b = *b;
                self.advance()?;
                Ok(Expr::new(ExprKind::Literal(Literal::Bool(b)), span))
            }
            TokenKind::CharLiteral(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::Literal(Literal::Char(s)), span))
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                let end = self.expect(TokenKind::RParen)?.span;
                Ok(Expr::new(ExprKind::Paren(Box::new(inner)), span.merge(end)))
            }
            TokenKind::Callout => {
                let call = self.parse_method_call()?;
                let span = call.span;
                Ok(Expr::new(ExprKind::Call(call), span))
            }
            TokenKind::Identifier(_) => {
                if self.next_is_call()? {
                    let call = self.parse_method_call()?;
                    let span = call.span;
                    Ok(Expr::new(ExprKind::Call(call), span))
                } else {
                    let location = self.parse_location()?;
                    let span = location.span;
                    Ok(Expr::new(ExprKind::Location(location), span))
                }
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}

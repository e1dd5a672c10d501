//! Statement Parsing
//!
//! Declarations, control flow, labels and blocks.

use scope_ir::{DeclKind, NodeId, NodeKind};
use scope_lexer::TokenKind;
use scope_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        match self.current_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Semicolon => {
                self.advance();
                Ok(self.finish(NodeKind::EmptyStatement, start))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let (kind, declarations) = self.parse_variable_declarations(false)?;
                self.consume_semicolon()?;
                Ok(self.finish(NodeKind::VariableDeclaration { kind, declarations }, start))
            }
            TokenKind::Function => self.parse_function(start, false, true),
            TokenKind::Class => self.parse_class(true),
            TokenKind::If => self.parse_if(start),
            TokenKind::For => self.parse_for(start),
            TokenKind::While => {
                self.advance();
                let test = self.parse_paren_expression()?;
                let body = self.parse_statement()?;
                Ok(self.finish(NodeKind::WhileStatement { test, body }, start))
            }
            TokenKind::Do => {
                self.advance();
                let body = self.parse_statement()?;
                self.expect(&TokenKind::While)?;
                let test = self.parse_paren_expression()?;
                self.eat(&TokenKind::Semicolon);
                Ok(self.finish(NodeKind::DoWhileStatement { body, test }, start))
            }
            TokenKind::Return => {
                self.advance();
                let argument = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.consume_semicolon()?;
                Ok(self.finish(NodeKind::ReturnStatement { argument }, start))
            }
            TokenKind::Break | TokenKind::Continue => self.parse_jump(start),
            TokenKind::Throw => {
                self.advance();
                if self.current().newline_before {
                    return Err(self.error_here("Illegal newline after throw"));
                }
                let argument = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(self.finish(NodeKind::ThrowStatement { argument }, start))
            }
            TokenKind::Try => self.parse_try(start),
            TokenKind::Switch => self.parse_switch(start),
            TokenKind::Debugger => {
                self.advance();
                self.consume_semicolon()?;
                Ok(self.finish(NodeKind::DebuggerStatement, start))
            }
            TokenKind::With => {
                self.advance();
                let object = self.parse_paren_expression()?;
                let body = self.parse_statement()?;
                Ok(self.finish(NodeKind::WithStatement { object, body }, start))
            }
            TokenKind::Ident(name)
                if name == self.names.r#async
                    && matches!(self.peek(1).kind, TokenKind::Function)
                    && !self.peek(1).newline_before =>
            {
                self.advance();
                self.parse_function(start, true, true)
            }
            TokenKind::Ident(_) if matches!(self.peek(1).kind, TokenKind::Colon) => {
                let label = self.parse_identifier()?;
                self.advance();
                let body = self.parse_statement()?;
                Ok(self.finish(NodeKind::LabeledStatement { label, body }, start))
            }
            _ => {
                let expression = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(self.finish(NodeKind::ExpressionStatement { expression }, start))
            }
        }
    }

    /// `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        self.expect(&TokenKind::LBrace)?;
        let body = self.with_no_in(false, |p| {
            let mut body = Vec::new();
            while !p.check(&TokenKind::RBrace) {
                if p.is_at_end() {
                    return Err(p.unexpected());
                }
                body.push(p.parse_statement()?);
            }
            Ok(body)
        })?;
        self.expect(&TokenKind::RBrace)?;
        Ok(self.finish(NodeKind::BlockStatement { body }, start))
    }

    /// Whether a restricted production (`return`, `break`) ends here.
    fn at_statement_end(&self) -> bool {
        self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
            || self.is_at_end()
            || self.current().newline_before
    }

    fn parse_paren_expression(&mut self) -> Result<NodeId, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.with_no_in(false, Self::parse_expression)?;
        self.expect(&TokenKind::RParen)?;
        Ok(expr)
    }

    /// `var|let|const` followed by one or more declarators.
    pub(crate) fn parse_variable_declarations(
        &mut self,
        no_in: bool,
    ) -> Result<(DeclKind, Vec<NodeId>), ParseError> {
        let kind = match self.advance().kind {
            TokenKind::Var => DeclKind::Var,
            TokenKind::Let => DeclKind::Let,
            _ => DeclKind::Const,
        };
        let mut declarations = Vec::new();
        loop {
            let start = self.current_start();
            let id = self.parse_binding_target()?;
            let init = if self.eat(&TokenKind::Eq) {
                Some(self.with_no_in(no_in, Self::parse_assignment)?)
            } else {
                None
            };
            declarations.push(self.finish(NodeKind::VariableDeclarator { id, init }, start));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok((kind, declarations))
    }

    fn parse_if(&mut self, start: u32) -> Result<NodeId, ParseError> {
        self.advance();
        let test = self.parse_paren_expression()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat(&TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(self.finish(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
            start,
        ))
    }

    fn parse_for(&mut self, start: u32) -> Result<NodeId, ParseError> {
        self.advance();
        self.expect(&TokenKind::LParen)?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if matches!(
            self.current_kind(),
            TokenKind::Var | TokenKind::Let | TokenKind::Const
        ) {
            let decl_start = self.current_start();
            let (kind, declarations) = self.parse_variable_declarations(true)?;
            Some(self.finish(NodeKind::VariableDeclaration { kind, declarations }, decl_start))
        } else {
            Some(self.with_no_in(true, Self::parse_expression)?)
        };

        if let Some(left) = init {
            let is_in = self.check(&TokenKind::In);
            if is_in || self.check_contextual(self.names.of) {
                self.advance();
                let right = if is_in {
                    self.with_no_in(false, Self::parse_expression)?
                } else {
                    self.with_no_in(false, Self::parse_assignment)?
                };
                self.expect(&TokenKind::RParen)?;
                let body = self.parse_statement()?;
                let kind = if is_in {
                    NodeKind::ForInStatement { left, right, body }
                } else {
                    NodeKind::ForOfStatement { left, right, body }
                };
                return Ok(self.finish(kind, start));
            }
        }

        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.with_no_in(false, Self::parse_expression)?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.with_no_in(false, Self::parse_expression)?)
        };
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_statement()?;
        Ok(self.finish(
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            },
            start,
        ))
    }

    /// `break` / `continue` with an optional same-line label.
    fn parse_jump(&mut self, start: u32) -> Result<NodeId, ParseError> {
        let is_break = matches!(self.advance().kind, TokenKind::Break);
        let label = if self.check_ident() && !self.current().newline_before {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        let kind = if is_break {
            NodeKind::BreakStatement { label }
        } else {
            NodeKind::ContinueStatement { label }
        };
        Ok(self.finish(kind, start))
    }

    fn parse_try(&mut self, start: u32) -> Result<NodeId, ParseError> {
        self.advance();
        let block = self.parse_block()?;

        let handler = if self.check(&TokenKind::Catch) {
            let catch_start = self.current_start();
            self.advance();
            let param = if self.eat(&TokenKind::LParen) {
                let param = self.parse_binding_target()?;
                self.expect(&TokenKind::RParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(self.finish(NodeKind::CatchClause { param, body }, catch_start))
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_here("Missing catch or finally clause"));
        }
        Ok(self.finish(
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            },
            start,
        ))
    }

    fn parse_switch(&mut self, start: u32) -> Result<NodeId, ParseError> {
        self.advance();
        let discriminant = self.parse_paren_expression()?;
        self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.eat(&TokenKind::RBrace) {
            let case_start = self.current_start();
            let test = match self.current_kind() {
                TokenKind::Case => {
                    self.advance();
                    Some(self.parse_expression()?)
                }
                TokenKind::Default if !seen_default => {
                    self.advance();
                    seen_default = true;
                    None
                }
                TokenKind::Default => return Err(self.error_here("Multiple default clauses")),
                _ => return Err(self.unexpected()),
            };
            self.expect(&TokenKind::Colon)?;

            let mut consequent = Vec::new();
            while !matches!(
                self.current_kind(),
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) {
                consequent.push(self.parse_statement()?);
            }
            cases.push(self.finish(NodeKind::SwitchCase { test, consequent }, case_start));
        }

        Ok(self.finish(
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            },
            start,
        ))
    }
}

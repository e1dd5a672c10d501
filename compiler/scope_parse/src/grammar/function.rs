//! Function and Class Parsing
//!
//! Declarations, expressions, arrows, methods and class bodies.

use scope_ir::{Class, Function, NodeId, NodeKind, PropertyKind};
use scope_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `function [*] name? (params) { body }`, after any `async` prefix.
    pub(crate) fn parse_function(
        &mut self,
        start: u32,
        is_async: bool,
        declaration: bool,
    ) -> Result<NodeId, ParseError> {
        self.expect(&TokenKind::Function)?;
        let is_generator = self.eat(&TokenKind::Star);
        let id = if self.check_ident() {
            Some(self.parse_identifier()?)
        } else if declaration {
            return Err(self.unexpected());
        } else {
            None
        };
        let params = self.parse_params()?;
        let body = self.parse_block()?;

        let function = Function {
            id,
            params,
            body,
            expression: false,
            is_async,
            is_generator,
        };
        let kind = if declaration {
            NodeKind::FunctionDeclaration(function)
        } else {
            NodeKind::FunctionExpression(function)
        };
        Ok(self.finish(kind, start))
    }

    /// `x => body` or `(params) => body`, after any `async` prefix.
    pub(crate) fn parse_arrow(&mut self, start: u32, is_async: bool) -> Result<NodeId, ParseError> {
        let params = if self.check_ident() {
            vec![self.parse_identifier()?]
        } else {
            self.parse_params()?
        };
        self.expect(&TokenKind::Arrow)?;

        let (body, expression) = if self.check(&TokenKind::LBrace) {
            (self.parse_block()?, false)
        } else {
            (self.parse_assignment()?, true)
        };

        Ok(self.finish(
            NodeKind::ArrowFunctionExpression(Function {
                id: None,
                params,
                body,
                expression,
                is_async,
                is_generator: false,
            }),
            start,
        ))
    }

    /// Method value: `(params) { body }` as an anonymous function expression.
    pub(crate) fn parse_method(
        &mut self,
        is_async: bool,
        is_generator: bool,
    ) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(self.finish(
            NodeKind::FunctionExpression(Function {
                id: None,
                params,
                body,
                expression: false,
                is_async,
                is_generator,
            }),
            start,
        ))
    }

    /// `(a, b = 1, {c}, ...rest)`
    pub(crate) fn parse_params(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let params = self.with_no_in(false, |p| {
            let mut params = Vec::new();
            while !p.check(&TokenKind::RParen) {
                if p.check(&TokenKind::Ellipsis) {
                    params.push(p.parse_rest_element()?);
                    break;
                }
                params.push(p.parse_binding_element()?);
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(params)
        })?;
        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    /// `class Name extends Base { members }`
    pub(crate) fn parse_class(&mut self, declaration: bool) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        self.expect(&TokenKind::Class)?;
        let id = if self.check_ident() {
            Some(self.parse_identifier()?)
        } else if declaration {
            return Err(self.unexpected());
        } else {
            None
        };
        let super_class = if self.eat(&TokenKind::Extends) {
            Some(self.parse_identifier_chain()?)
        } else {
            None
        };

        self.expect(&TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.eat(&TokenKind::RBrace) {
            if self.eat(&TokenKind::Semicolon) {
                continue;
            }
            if self.is_at_end() {
                return Err(self.unexpected());
            }
            members.push(self.parse_class_member()?);
        }

        let class = Class {
            id,
            super_class,
            members,
        };
        let kind = if declaration {
            NodeKind::ClassDeclaration(class)
        } else {
            NodeKind::ClassExpression(class)
        };
        Ok(self.finish(kind, start))
    }

    /// `a.b.c` style heritage expressions.
    fn parse_identifier_chain(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let mut expr = self.parse_identifier()?;
        while self.eat(&TokenKind::Dot) {
            let property = self.parse_identifier()?;
            expr = self.finish(
                NodeKind::MemberExpression {
                    object: expr,
                    property,
                    computed: false,
                },
                start,
            );
        }
        Ok(expr)
    }

    fn parse_class_member(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let is_static = self.check_contextual(self.names.r#static)
            && !matches!(self.peek(1).kind, TokenKind::LParen);
        if is_static {
            self.advance();
        }
        let (kind, is_async, is_generator) = self.parse_member_modifiers();
        let (key, computed) = self.parse_property_key()?;
        let value = self.parse_method(is_async, is_generator)?;

        let is_constructor =
            !computed && !is_static && self.ast.identifier_name(key) == Some(self.names.constructor);
        let kind = match kind {
            PropertyKind::Init if is_constructor => PropertyKind::Constructor,
            PropertyKind::Init => PropertyKind::Method,
            other => other,
        };
        Ok(self.finish(
            NodeKind::MethodDefinition {
                key,
                value,
                computed,
                is_static,
                kind,
            },
            start,
        ))
    }
}

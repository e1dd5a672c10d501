//! Binding Pattern Parsing
//!
//! Targets of declarations, parameters and catch clauses.

use scope_ir::{NodeId, NodeKind, PropertyKind};
use scope_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Identifier, object pattern or array pattern.
    pub(crate) fn parse_binding_target(&mut self) -> Result<NodeId, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(_) => self.parse_identifier(),
            TokenKind::LBrace => self.parse_object_pattern(),
            TokenKind::LBracket => self.parse_array_pattern(),
            _ => Err(self.unexpected()),
        }
    }

    /// Binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let left = self.parse_binding_target()?;
        if !self.eat(&TokenKind::Eq) {
            return Ok(left);
        }
        let right = self.with_no_in(false, Self::parse_assignment)?;
        Ok(self.finish(NodeKind::AssignmentPattern { left, right }, start))
    }

    pub(crate) fn parse_rest_element(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        self.expect(&TokenKind::Ellipsis)?;
        let argument = self.parse_binding_target()?;
        Ok(self.finish(NodeKind::RestElement { argument }, start))
    }

    fn parse_object_pattern(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        self.advance();
        let mut properties = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.check(&TokenKind::Ellipsis) {
                properties.push(self.parse_rest_element()?);
                break;
            }
            properties.push(self.parse_pattern_property()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(self.finish(NodeKind::ObjectPattern { properties }, start))
    }

    fn parse_pattern_property(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let (key, computed) = self.parse_property_key()?;

        let (value, shorthand) = if self.eat(&TokenKind::Colon) {
            (self.parse_binding_element()?, false)
        } else {
            let Some(name) = (!computed).then(|| self.ast.identifier_name(key)).flatten() else {
                return Err(self.unexpected());
            };
            let location = self.ast.location(key);
            let mut value = self.ast.alloc(NodeKind::Identifier { name }, location);
            if self.eat(&TokenKind::Eq) {
                let right = self.with_no_in(false, Self::parse_assignment)?;
                value = self.finish(NodeKind::AssignmentPattern { left: value, right }, start);
            }
            (value, true)
        };

        Ok(self.finish(
            NodeKind::Property {
                key,
                value,
                computed,
                shorthand,
                kind: PropertyKind::Init,
            },
            start,
        ))
    }

    fn parse_array_pattern(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        self.advance();
        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            if self.eat(&TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            if self.check(&TokenKind::Ellipsis) {
                elements.push(Some(self.parse_rest_element()?));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(self.finish(NodeKind::ArrayPattern { elements }, start))
    }
}

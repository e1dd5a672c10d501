//! Expression Parsing
//!
//! Precedence climbing for binary and logical operators, then unary,
//! postfix, call/member chains and primary expressions.

use scope_ir::{
    AssignOp, BinaryOp, Literal, LogicalOp, NodeId, NodeKind, PropertyKind, UnaryOp, UpdateOp,
};
use scope_lexer::TokenKind;
use scope_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

/// Infix operator found at the cursor.
#[derive(Copy, Clone)]
enum Infix {
    Binary(BinaryOp),
    Logical(LogicalOp),
}

impl Infix {
    fn precedence(self) -> u8 {
        match self {
            Infix::Binary(op) => op.precedence(),
            Infix::Logical(op) => op.precedence(),
        }
    }

    fn is_right_associative(self) -> bool {
        matches!(self, Infix::Binary(op) if op.is_right_associative())
    }
}

impl Parser<'_> {
    /// Comma-separated expression sequence.
    pub(crate) fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let first = self.parse_assignment()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(&TokenKind::Comma) {
            expressions.push(self.parse_assignment()?);
        }
        Ok(self.finish(NodeKind::SequenceExpression { expressions }, start))
    }

    pub(crate) fn parse_assignment(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment_inner())
    }

    fn parse_assignment_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        if self.check(&TokenKind::Yield) {
            return self.parse_yield(start);
        }

        let left = self.parse_conditional()?;
        let Some(operator) = self.match_assign_op() else {
            return Ok(left);
        };

        let valid_target = match self.ast.kind(left) {
            NodeKind::Identifier { .. } | NodeKind::MemberExpression { .. } => true,
            NodeKind::ObjectExpression { .. } | NodeKind::ArrayExpression { .. } => {
                operator == AssignOp::Assign
            }
            _ => false,
        };
        if !valid_target {
            return Err(self.error_here("Assigning to rvalue"));
        }

        self.advance();
        let right = self.parse_assignment()?;
        Ok(self.finish(
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            },
            start,
        ))
    }

    fn parse_yield(&mut self, start: u32) -> Result<NodeId, ParseError> {
        self.advance();
        let delegate = self.eat(&TokenKind::Star);
        let argument = if delegate
            || !(self.current().newline_before
                || matches!(
                    self.current_kind(),
                    TokenKind::Semicolon
                        | TokenKind::RParen
                        | TokenKind::RBracket
                        | TokenKind::RBrace
                        | TokenKind::Comma
                        | TokenKind::Colon
                        | TokenKind::Eof
                ))
        {
            Some(self.parse_assignment()?)
        } else {
            None
        };
        Ok(self.finish(NodeKind::YieldExpression { argument, delegate }, start))
    }

    fn parse_conditional(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let test = self.parse_binary(1)?;
        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.with_no_in(false, Self::parse_assignment)?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;
        Ok(self.finish(
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
            start,
        ))
    }

    /// Precedence climbing over binary and logical operators.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_infix_op() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let next_min = if op.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary(next_min)?;
            let kind = match op {
                Infix::Binary(operator) => NodeKind::BinaryExpression {
                    operator,
                    left,
                    right,
                },
                Infix::Logical(operator) => NodeKind::LogicalExpression {
                    operator,
                    left,
                    right,
                },
            };
            left = self.finish(kind, start);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();

        if let Some(operator) = self.match_unary_op() {
            self.advance();
            let argument = self.parse_unary()?;
            return Ok(self.finish(NodeKind::UnaryExpression { operator, argument }, start));
        }

        if let Some(operator) = self.match_update_op() {
            self.advance();
            let argument = self.parse_unary()?;
            self.check_simple_target(argument)?;
            return Ok(self.finish(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument,
                },
                start,
            ));
        }

        if self.eat(&TokenKind::Await) {
            let argument = self.parse_unary()?;
            return Ok(self.finish(NodeKind::AwaitExpression { argument }, start));
        }

        let expr = self.parse_left_hand_side()?;
        if !self.current().newline_before {
            if let Some(operator) = self.match_update_op() {
                self.check_simple_target(expr)?;
                self.advance();
                return Ok(self.finish(
                    NodeKind::UpdateExpression {
                        operator,
                        prefix: false,
                        argument: expr,
                    },
                    start,
                ));
            }
        }
        Ok(expr)
    }

    fn check_simple_target(&self, target: NodeId) -> Result<(), ParseError> {
        match self.ast.kind(target) {
            NodeKind::Identifier { .. } | NodeKind::MemberExpression { .. } => Ok(()),
            _ => Err(ParseError::new(
                "Assigning to rvalue",
                self.ast.location(target),
            )),
        }
    }

    /// Member accesses, calls and tagged templates.
    fn parse_left_hand_side(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let mut expr = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            match self.current_kind() {
                TokenKind::Dot | TokenKind::LBracket => {
                    expr = self.parse_member_suffix(expr, start)?;
                }
                TokenKind::LParen => {
                    let arguments = self.parse_arguments()?;
                    expr = self.finish(
                        NodeKind::CallExpression {
                            callee: expr,
                            arguments,
                        },
                        start,
                    );
                }
                TokenKind::Template { .. } => {
                    let quasi = self.parse_template()?;
                    expr = self.finish(
                        NodeKind::TaggedTemplateExpression { tag: expr, quasi },
                        start,
                    );
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// `.name` or `[expr]` applied to `object`.
    fn parse_member_suffix(&mut self, object: NodeId, start: u32) -> Result<NodeId, ParseError> {
        let computed = matches!(self.advance().kind, TokenKind::LBracket);
        let property = if computed {
            let property = self.with_no_in(false, Self::parse_expression)?;
            self.expect(&TokenKind::RBracket)?;
            property
        } else {
            self.parse_identifier_name()?
        };
        Ok(self.finish(
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            },
            start,
        ))
    }

    /// `new Callee(args)`; arguments are optional.
    fn parse_new(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        self.advance();
        let mut callee = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        while matches!(self.current_kind(), TokenKind::Dot | TokenKind::LBracket) {
            callee = self.parse_member_suffix(callee, start)?;
        }
        let arguments = if self.check(&TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self.finish(NodeKind::NewExpression { callee, arguments }, start))
    }

    /// `( arg, ...spread, )`
    fn parse_arguments(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let arguments = self.with_no_in(false, |p| {
            let mut arguments = Vec::new();
            while !p.check(&TokenKind::RParen) {
                arguments.push(p.parse_spread_or_assignment()?);
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(arguments)
        })?;
        self.expect(&TokenKind::RParen)?;
        Ok(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        if self.eat(&TokenKind::Ellipsis) {
            let argument = self.parse_assignment()?;
            return Ok(self.finish(NodeKind::SpreadElement { argument }, start));
        }
        self.parse_assignment()
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        trace!(token = %self.current_kind(), "primary");
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let next = self.peek(1);
                if name == self.names.r#async && !next.newline_before {
                    match next.kind {
                        TokenKind::Function => {
                            self.advance();
                            return self.parse_function(start, true, false);
                        }
                        TokenKind::Ident(_)
                            if matches!(self.peek(2).kind, TokenKind::Arrow) =>
                        {
                            self.advance();
                            return self.parse_arrow(start, true);
                        }
                        TokenKind::LParen if self.cursor.arrow_follows_parens(1) => {
                            self.advance();
                            return self.parse_arrow(start, true);
                        }
                        _ => {}
                    }
                }
                if matches!(next.kind, TokenKind::Arrow) && !next.newline_before {
                    return self.parse_arrow(start, false);
                }
                self.parse_identifier()
            }
            TokenKind::Number(value) => {
                self.advance();
                Ok(self.finish(NodeKind::Literal(Literal::Number(value)), start))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(self.finish(NodeKind::Literal(Literal::String(value)), start))
            }
            TokenKind::True | TokenKind::False => {
                let value = matches!(self.advance().kind, TokenKind::True);
                Ok(self.finish(NodeKind::Literal(Literal::Boolean(value)), start))
            }
            TokenKind::Null => {
                self.advance();
                Ok(self.finish(NodeKind::Literal(Literal::Null), start))
            }
            TokenKind::This => {
                self.advance();
                Ok(self.finish(NodeKind::ThisExpression, start))
            }
            TokenKind::Super => {
                self.advance();
                let name = self.interner.intern("super");
                Ok(self.finish(NodeKind::Identifier { name }, start))
            }
            TokenKind::Template { .. } => self.parse_template(),
            TokenKind::LParen => {
                if self.cursor.arrow_follows_parens(0) {
                    return self.parse_arrow(start, false);
                }
                self.advance();
                let expr = self.with_no_in(false, Self::parse_expression)?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Function => self.parse_function(start, false, false),
            TokenKind::Class => self.parse_class(false),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_template(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let TokenKind::Template {
            raw,
            has_substitutions,
        } = self.current_kind()
        else {
            return Err(self.unexpected());
        };
        self.advance();
        Ok(self.finish(
            NodeKind::TemplateLiteral {
                raw,
                has_substitutions,
            },
            start,
        ))
    }

    /// `[a, , ...rest]`
    fn parse_array_literal(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        self.advance();
        let elements = self.with_no_in(false, |p| {
            let mut elements = Vec::new();
            while !p.check(&TokenKind::RBracket) {
                if p.eat(&TokenKind::Comma) {
                    elements.push(None);
                    continue;
                }
                elements.push(Some(p.parse_spread_or_assignment()?));
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(elements)
        })?;
        self.expect(&TokenKind::RBracket)?;
        Ok(self.finish(NodeKind::ArrayExpression { elements }, start))
    }

    /// `{ key: value, shorthand, method() {}, get x() {}, ...spread }`
    fn parse_object_literal(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        self.advance();
        let properties = self.with_no_in(false, |p| {
            let mut properties = Vec::new();
            while !p.check(&TokenKind::RBrace) {
                properties.push(p.parse_object_member()?);
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(properties)
        })?;
        self.expect(&TokenKind::RBrace)?;
        Ok(self.finish(NodeKind::ObjectExpression { properties }, start))
    }

    fn parse_object_member(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        if self.eat(&TokenKind::Ellipsis) {
            let argument = self.parse_assignment()?;
            return Ok(self.finish(NodeKind::SpreadElement { argument }, start));
        }

        let (kind, is_async, is_generator) = self.parse_member_modifiers();
        let (key, computed) = self.parse_property_key()?;

        if self.check(&TokenKind::LParen) {
            let value = self.parse_method(is_async, is_generator)?;
            let kind = if kind == PropertyKind::Init {
                PropertyKind::Method
            } else {
                kind
            };
            return Ok(self.finish(
                NodeKind::Property {
                    key,
                    value,
                    computed,
                    shorthand: false,
                    kind,
                },
                start,
            ));
        }

        if self.eat(&TokenKind::Colon) {
            let value = self.parse_assignment()?;
            return Ok(self.finish(
                NodeKind::Property {
                    key,
                    value,
                    computed,
                    shorthand: false,
                    kind: PropertyKind::Init,
                },
                start,
            ));
        }

        // Shorthand `{ a }` or `{ a = 1 }` (the latter only valid as a pattern)
        let Some(name) = (!computed).then(|| self.ast.identifier_name(key)).flatten() else {
            return Err(self.unexpected());
        };
        let location = self.ast.location(key);
        let mut value = self.ast.alloc(NodeKind::Identifier { name }, location);
        if self.eat(&TokenKind::Eq) {
            let right = self.parse_assignment()?;
            value = self.finish(NodeKind::AssignmentPattern { left: value, right }, start);
        }
        Ok(self.finish(
            NodeKind::Property {
                key,
                value,
                computed: false,
                shorthand: true,
                kind: PropertyKind::Init,
            },
            start,
        ))
    }

    /// Leading `get`, `set`, `async` or `*` before a member key.
    pub(crate) fn parse_member_modifiers(&mut self) -> (PropertyKind, bool, bool) {
        let mut kind = PropertyKind::Init;
        let mut is_async = false;
        if self.check_ident() && self.starts_member_key(1) {
            if self.check_contextual(self.names.get) {
                kind = PropertyKind::Get;
                self.advance();
            } else if self.check_contextual(self.names.set) {
                kind = PropertyKind::Set;
                self.advance();
            } else if self.check_contextual(self.names.r#async) && !self.peek(1).newline_before {
                is_async = true;
                self.advance();
            }
        }
        let is_generator = self.eat(&TokenKind::Star);
        (kind, is_async, is_generator)
    }

    /// Whether the token at `offset` can begin a member key.
    fn starts_member_key(&self, offset: usize) -> bool {
        let kind = self.peek(offset).kind;
        matches!(
            kind,
            TokenKind::Ident(_)
                | TokenKind::String(_)
                | TokenKind::Number(_)
                | TokenKind::LBracket
                | TokenKind::Star
        ) || kind.keyword_text().is_some()
    }

    /// Property key: identifier-like name, string, number or `[computed]`.
    pub(crate) fn parse_property_key(&mut self) -> Result<(NodeId, bool), ParseError> {
        let start = self.current_start();
        match self.current_kind() {
            TokenKind::String(value) => {
                self.advance();
                Ok((self.finish(NodeKind::Literal(Literal::String(value)), start), false))
            }
            TokenKind::Number(value) => {
                self.advance();
                Ok((self.finish(NodeKind::Literal(Literal::Number(value)), start), false))
            }
            TokenKind::LBracket => {
                self.advance();
                let key = self.with_no_in(false, Self::parse_assignment)?;
                self.expect(&TokenKind::RBracket)?;
                Ok((key, true))
            }
            _ => Ok((self.parse_identifier_name()?, false)),
        }
    }

    /// An identifier node from the current `Ident` token.
    pub(crate) fn parse_identifier(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let TokenKind::Ident(name) = self.current_kind() else {
            return Err(self.unexpected());
        };
        self.advance();
        Ok(self.finish(NodeKind::Identifier { name }, start))
    }

    /// Identifier in a position where keywords are plain names.
    fn parse_identifier_name(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_start();
        let kind = self.current_kind();
        let name = match kind {
            TokenKind::Ident(name) => name,
            _ => match kind.keyword_text() {
                Some(text) => self.interner.intern(text),
                None => return Err(self.unexpected()),
            },
        };
        self.advance();
        Ok(self.finish(NodeKind::Identifier { name }, start))
    }

    // Operator matching

    fn match_infix_op(&self) -> Option<Infix> {
        let op = match self.current_kind() {
            TokenKind::PipePipe => return Some(Infix::Logical(LogicalOp::Or)),
            TokenKind::AmpAmp => return Some(Infix::Logical(LogicalOp::And)),
            TokenKind::Pipe => BinaryOp::BitOr,
            TokenKind::Caret => BinaryOp::BitXor,
            TokenKind::Amp => BinaryOp::BitAnd,
            TokenKind::EqEq => BinaryOp::LooseEq,
            TokenKind::NotEq => BinaryOp::LooseNotEq,
            TokenKind::EqEqEq => BinaryOp::StrictEq,
            TokenKind::NotEqEq => BinaryOp::StrictNotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::InstanceOf => BinaryOp::InstanceOf,
            TokenKind::In if !self.no_in => BinaryOp::In,
            TokenKind::Shl => BinaryOp::Shl,
            TokenKind::Shr => BinaryOp::Shr,
            TokenKind::UShr => BinaryOp::UShr,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            TokenKind::StarStar => BinaryOp::Exp,
            _ => return None,
        };
        Some(Infix::Binary(op))
    }

    fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::TypeOf => Some(UnaryOp::TypeOf),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            _ => None,
        }
    }

    fn match_update_op(&self) -> Option<UpdateOp> {
        match self.current_kind() {
            TokenKind::PlusPlus => Some(UpdateOp::Increment),
            TokenKind::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        }
    }

    fn match_assign_op(&self) -> Option<AssignOp> {
        match self.current_kind() {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::AddAssign),
            TokenKind::MinusEq => Some(AssignOp::SubAssign),
            TokenKind::StarEq => Some(AssignOp::MulAssign),
            TokenKind::SlashEq => Some(AssignOp::DivAssign),
            TokenKind::PercentEq => Some(AssignOp::ModAssign),
            TokenKind::StarStarEq => Some(AssignOp::ExpAssign),
            TokenKind::ShlEq => Some(AssignOp::ShlAssign),
            TokenKind::ShrEq => Some(AssignOp::ShrAssign),
            TokenKind::UShrEq => Some(AssignOp::UShrAssign),
            TokenKind::AmpEq => Some(AssignOp::BitAndAssign),
            TokenKind::PipeEq => Some(AssignOp::BitOrAssign),
            TokenKind::CaretEq => Some(AssignOp::BitXorAssign),
            _ => None,
        }
    }
}

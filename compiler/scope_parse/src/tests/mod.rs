//! Parser tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod asi;

use scope_ir::{Ast, NodeId, NodeKind, StringInterner};

use crate::{parse, ParseError};

/// Parsed script plus the interner its names live in.
pub(crate) struct Parsed {
    pub ast: Ast,
    pub interner: StringInterner,
    pub program: NodeId,
}

impl Parsed {
    pub fn body(&self) -> Vec<NodeId> {
        match self.ast.kind(self.program) {
            NodeKind::Program { body } => body.clone(),
            other => panic!("expected program, got {other:?}"),
        }
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.ast.kind(id)
    }

    /// The expression of the `index`th expression statement.
    pub fn expression(&self, index: usize) -> NodeId {
        match self.kind(self.body()[index]) {
            NodeKind::ExpressionStatement { expression } => *expression,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    pub fn name_of(&self, id: NodeId) -> &str {
        let name = self.ast.identifier_name(id).expect("identifier");
        self.interner.lookup(name)
    }
}

pub(crate) fn parse_ok(source: &str) -> Parsed {
    let mut ast = Ast::new();
    let mut interner = StringInterner::new();
    let program = parse(source, &mut ast, &mut interner).expect("source should parse");
    Parsed {
        ast,
        interner,
        program,
    }
}

pub(crate) fn parse_err(source: &str) -> ParseError {
    let mut ast = Ast::new();
    let mut interner = StringInterner::new();
    parse(source, &mut ast, &mut interner).expect_err("source should fail to parse")
}

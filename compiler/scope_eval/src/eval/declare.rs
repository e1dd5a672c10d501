//! Frames and declarations.

use scope_ir::{Function, Location, Name, NodeId, NodeKind};
use tracing::debug;

use super::{EvalState, Evaluator, Mode};
use crate::errors;
use crate::symbols::{Frame, FrameId, SymbolEntry, SymbolId};
use crate::value::{type_label, FunctionBody, FunctionValue, SymbolKind, Value, ValueType};

impl Evaluator<'_> {
    pub(super) fn eval_program(&mut self, body: &[NodeId], state: &mut EvalState) -> SymbolId {
        self.eval_statements(body, state);
        self.empty()
    }

    /// A block gets its own frame, takes any pending call arguments, and
    /// yields the last `return` among its direct statements.
    pub(super) fn eval_block(
        &mut self,
        node: NodeId,
        body: &[NodeId],
        state: &mut EvalState,
    ) -> SymbolId {
        let frame = self.table.alloc_frame(Frame::new(
            None,
            Some(state.frame),
            state.captured_frame,
            self.ast.location(node),
        ));
        self.table.push_frame(state.frame, frame);

        let outer = std::mem::replace(&mut state.frame, frame);
        if let Some(arguments) = state.pending_arguments.take() {
            for argument in arguments {
                self.table.push_symbol(frame, argument);
            }
        }

        let returned = self.eval_statements(body, state);
        state.frame = outer;

        match returned {
            Some(result) => result,
            None => self.named(self.names.block_result),
        }
    }

    /// Evaluate a statement list: function declarations first, then the
    /// rest in order, then speculation of the declared functions.
    fn eval_statements(&mut self, body: &[NodeId], state: &mut EvalState) -> Option<SymbolId> {
        let ast = self.ast;
        let mark = self.deferred.len();
        let is_declaration = |&&statement: &&NodeId| {
            matches!(ast.kind(statement), NodeKind::FunctionDeclaration(_))
        };

        for statement in body.iter().filter(is_declaration) {
            self.eval(*statement, Mode::Rvalue, state);
        }

        let mut returned = None;
        for statement in body.iter().filter(|s| !is_declaration(s)) {
            let result = self.eval(*statement, Mode::Rvalue, state);
            if matches!(ast.kind(*statement), NodeKind::ReturnStatement { .. }) {
                returned = Some(result);
            }
        }

        let pending = self.deferred.split_off(mark);
        for (declaration, defining) in pending {
            if let NodeKind::FunctionDeclaration(function) = ast.kind(declaration) {
                self.speculate_declaration(declaration, function, defining);
            }
        }
        returned
    }

    pub(super) fn eval_declarator(
        &mut self,
        node: NodeId,
        decl_kind: SymbolKind,
        state: &mut EvalState,
    ) -> SymbolId {
        let NodeKind::VariableDeclarator { id, init } = *self.ast.kind(node) else {
            return self.empty();
        };

        let left = self.eval(id, Mode::Rvalue, state);
        let name = self.display_name(left);
        let previous = self.entry(left).clone();

        if previous.kind == Some(SymbolKind::Reserved) {
            self.error(errors::reserved_binding(&name, type_label(previous.ty)), id);
            return left;
        }

        let kind = if previous.ty.is_some() {
            if previous.is_global {
                self.info(errors::shadow_variable(&name), id);
            } else {
                self.warning(errors::already_declared(&name), id);
            }
            SymbolKind::Let
        } else {
            decl_kind
        };

        let init_result = init.map(|init| self.eval(init, Mode::Rvalue, state));
        let Some(id_name) = previous.id else {
            // Destructuring binds nothing.
            return init_result.unwrap_or_else(|| self.empty());
        };

        let source = init_result.map(|init| self.entry(init).clone()).unwrap_or_default();
        let location = self.ast.location(init.unwrap_or(node));
        let entry = self.alloc(SymbolEntry::declared(Some(id_name), kind, &source, location));

        let frame = match (kind, state.is_active, self.table.main_frame()) {
            (SymbolKind::Var, true, Some(main)) => main,
            _ => state.frame,
        };
        self.table.push_symbol(frame, entry);
        entry
    }

    pub(super) fn eval_function_declaration(
        &mut self,
        node: NodeId,
        function: &Function,
        state: &mut EvalState,
    ) -> SymbolId {
        let Some(id) = function.id else {
            return self.empty();
        };

        let found = self.eval(id, Mode::Rvalue, state);
        let name = self.display_name(found);
        let previous = self.entry(found).clone();

        if previous.kind == Some(SymbolKind::Reserved) {
            self.warning(errors::reserved_function_name(&name, type_label(previous.ty)), id);
            return found;
        }

        let kind = if previous.is_resolved() {
            self.warning(errors::already_declared_as(&name, type_label(previous.ty)), id);
            SymbolKind::Let
        } else {
            SymbolKind::Var
        };

        let entry = self.alloc(SymbolEntry {
            id: previous.id,
            kind: Some(kind),
            ty: Some(ValueType::Function),
            value: Value::Function(Box::new(FunctionValue {
                params: function.params.clone(),
                body: FunctionBody::Node(function.body),
                defining_frame: Some(state.frame),
                is_expression_body: function.expression,
            })),
            location: Some(self.ast.location(id)),
            is_global: false,
        });
        self.table.push_symbol(state.frame, entry);

        if !self.options.evaluate_on_call_only {
            self.deferred.push((node, state.frame));
        }
        entry
    }

    /// Evaluate a declared function's body once without a caller.
    ///
    /// The local frame has no parent. Functions declared at top level reach
    /// globals through the global fallback; nested ones through a capture
    /// edge to their defining frame.
    fn speculate_declaration(&mut self, node: NodeId, function: &Function, defining: FrameId) {
        let capture = (self.table.main_frame() != Some(defining)).then_some(defining);
        let local = self.table.alloc_frame(Frame::new(
            Some(self.names.local),
            None,
            capture,
            self.ast.location(node),
        ));
        let mut local_state = EvalState::speculative(local);
        let arguments = self.placeholder_arguments(&function.params, &mut local_state);
        local_state.pending_arguments = Some(arguments);
        self.speculate_body(function.body, &mut local_state);
    }

    /// A function or arrow expression. The body is speculated in place
    /// unless bodies are analyzed only on call.
    pub(super) fn eval_function_expression(
        &mut self,
        node: NodeId,
        function: &Function,
        state: &mut EvalState,
    ) -> SymbolId {
        if !self.options.evaluate_on_call_only {
            let local = self.table.alloc_frame(Frame::new(
                Some(self.names.local),
                Some(state.frame),
                Some(state.frame),
                self.ast.location(node),
            ));
            let mut local_state = EvalState::speculative(local);
            let arguments = self.placeholder_arguments(&function.params, &mut local_state);
            if function.expression {
                for argument in arguments {
                    self.table.push_symbol(local, argument);
                }
            } else {
                local_state.pending_arguments = Some(arguments);
            }
            self.speculate_body(function.body, &mut local_state);
        }

        let id = function.id.and_then(|id| self.ast.identifier_name(id));
        self.alloc(SymbolEntry {
            id,
            kind: Some(SymbolKind::Let),
            ty: Some(ValueType::Function),
            value: Value::Function(Box::new(FunctionValue {
                params: function.params.clone(),
                body: FunctionBody::Node(function.body),
                defining_frame: Some(state.frame),
                is_expression_body: function.expression,
            })),
            location: Some(self.ast.location(node)),
            is_global: false,
        })
    }

    fn speculate_body(&mut self, body: NodeId, state: &mut EvalState) {
        if !self.active_bodies.insert(body) {
            debug!(?body, "body already under evaluation; speculation skipped");
            return;
        }
        self.eval(body, Mode::Rvalue, state);
        self.active_bodies.remove(&body);
    }

    /// Argument entries for parameters no caller has bound.
    fn placeholder_arguments(&mut self, params: &[NodeId], state: &mut EvalState) -> Vec<SymbolId> {
        params
            .iter()
            .map(|&param| {
                let (name, source) = match *self.ast.kind(param) {
                    NodeKind::AssignmentPattern { left, right } => {
                        let default = self.eval(right, Mode::Rvalue, state);
                        (self.ast.identifier_name(left), self.entry(default).clone())
                    }
                    NodeKind::RestElement { argument } => (
                        self.ast.identifier_name(argument),
                        SymbolEntry::computed(Value::Array(Vec::new()), None),
                    ),
                    _ => (self.ast.identifier_name(param), SymbolEntry::default()),
                };
                let location = self.ast.location(param);
                self.argument(name, &source, location)
            })
            .collect()
    }

    pub(super) fn argument(
        &mut self,
        name: Option<Name>,
        source: &SymbolEntry,
        location: Location,
    ) -> SymbolId {
        self.alloc(SymbolEntry::declared(name, SymbolKind::Argument, source, location))
    }

    pub(super) fn eval_labeled(
        &mut self,
        node: NodeId,
        label: NodeId,
        body: NodeId,
        state: &mut EvalState,
    ) -> SymbolId {
        let name = self.ast.identifier_name(label);
        let entry = self.alloc(SymbolEntry {
            id: name,
            kind: Some(SymbolKind::Let),
            ty: Some(ValueType::Label),
            value: Value::Label(body),
            location: Some(self.ast.location(node)),
            is_global: false,
        });
        self.table.push_symbol(state.frame, entry);
        self.eval(body, Mode::Rvalue, state)
    }
}

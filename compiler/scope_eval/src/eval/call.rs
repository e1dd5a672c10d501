//! Call expressions.

use scope_ir::{Location, NodeId, NodeKind};
use tracing::debug;

use super::{EvalState, Evaluator, Mode};
use crate::errors;
use crate::symbols::{SymbolEntry, SymbolId};
use crate::value::{FunctionBody, FunctionValue, SymbolKind, Value};

impl Evaluator<'_> {
    /// Evaluate a call expression.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn eval_call(
        &mut self,
        node: NodeId,
        callee: NodeId,
        arguments: &[NodeId],
        state: &mut EvalState,
    ) -> SymbolId {
        let function = self.eval(callee, Mode::Rvalue, state);

        let mut args = Vec::with_capacity(arguments.len());
        for (position, &argument) in arguments.iter().enumerate() {
            let arg = self.eval(argument, Mode::Rvalue, state);
            if self.is_reportable_undefined(arg, state) {
                let message = errors::undefined_argument(position + 1, &self.display_name(arg));
                self.warning(message, argument);
            }
            args.push(arg);
        }

        let name = self.display_name(function);
        let entry = self.entry(function);
        if entry.kind.is_none() {
            self.warning(errors::not_in_scope(&name), callee);
            return self.named(self.names.call_returns);
        }

        let callable = entry
            .is_function()
            .then(|| entry.value.as_function().cloned())
            .flatten();
        let Some(callable) = callable else {
            if entry.kind == Some(SymbolKind::Native) {
                return function;
            }
            self.error(errors::not_a_function(&name), node);
            return self.named(self.names.call_returns);
        };

        if callable.is_user_defined() && args.len() != callable.params.len() {
            self.warning(errors::wrong_arity(&name, callable.params.len()), callee);
        }
        self.apply(node, &callable, &args, state)
    }

    /// Run a function value on already evaluated arguments.
    pub(super) fn apply(
        &mut self,
        node: NodeId,
        function: &FunctionValue,
        args: &[SymbolId],
        state: &mut EvalState,
    ) -> SymbolId {
        match &function.body {
            FunctionBody::Node(body) => self.enter_function(node, function, *body, args, state),
            FunctionBody::Reserved { returns } => {
                let result = self.alloc_host(returns, None);
                let name = self.names.call_returns;
                self.table.symbol_mut(result).id = Some(name);
                result
            }
            FunctionBody::Native {
                receiver,
                method,
                arity,
            } => self.invoke_native(node, *receiver, *method, *arity, args, state),
        }
    }

    /// Bind `args` to the parameters and evaluate the body.
    ///
    /// Expression bodies run in a detached copy of the caller's frame, with a
    /// capture edge to the defining frame when the call happens elsewhere.
    /// Block bodies get a fresh frame through the pending arguments, with a
    /// capture edge to the defining frame when the call happens elsewhere.
    fn enter_function(
        &mut self,
        node: NodeId,
        function: &FunctionValue,
        body: NodeId,
        args: &[SymbolId],
        state: &mut EvalState,
    ) -> SymbolId {
        if self.call_depth >= self.options.max_call_depth || self.active_bodies.contains(&body) {
            debug!(depth = self.call_depth, ?body, "call not entered");
            let result = self.named(self.names.call_returns);
            self.unentered_calls.insert(result);
            return result;
        }

        let location = self.ast.location(node);
        let bound = self.bind_arguments(&function.params, args, location, state);

        self.call_depth += 1;
        self.active_bodies.insert(body);

        let captured = function
            .defining_frame
            .filter(|&defining| defining != state.frame);
        let result = if function.is_expression_body {
            let frame = self.table.snapshot_frame(state.frame, captured);
            for argument in bound {
                self.table.push_symbol(frame, argument);
            }
            let mut call_state = EvalState {
                frame,
                pending_arguments: None,
                ..state.clone()
            };
            self.eval(body, Mode::Rvalue, &mut call_state)
        } else {
            let mut call_state = state.clone();
            call_state.pending_arguments = Some(bound);
            if function.defining_frame != Some(state.frame) {
                call_state.captured_frame = captured;
            }
            self.eval(body, Mode::Rvalue, &mut call_state)
        };

        self.active_bodies.remove(&body);
        self.call_depth -= 1;
        result
    }

    fn bind_arguments(
        &mut self,
        params: &[NodeId],
        args: &[SymbolId],
        location: Location,
        state: &mut EvalState,
    ) -> Vec<SymbolId> {
        let mut bound = Vec::with_capacity(params.len());
        for (position, &param) in params.iter().enumerate() {
            let passed = args.get(position).map(|&arg| self.entry(arg).clone());
            let (name, source) = match *self.ast.kind(param) {
                NodeKind::Identifier { name } => (Some(name), passed.unwrap_or_default()),
                NodeKind::AssignmentPattern { left, right } => {
                    let source = match passed {
                        Some(source) => source,
                        None => {
                            let default = self.eval(right, Mode::Rvalue, state);
                            self.entry(default).clone()
                        }
                    };
                    (self.ast.identifier_name(left), source)
                }
                NodeKind::RestElement { argument } => {
                    let rest = args.get(position..).unwrap_or_default();
                    let items = rest.iter().map(|&arg| self.table.duplicate(arg)).collect();
                    (
                        self.ast.identifier_name(argument),
                        SymbolEntry::computed(Value::Array(items), None),
                    )
                }
                _ => (None, SymbolEntry::default()),
            };
            bound.push(self.argument(name, &source, location));
        }
        bound
    }
}

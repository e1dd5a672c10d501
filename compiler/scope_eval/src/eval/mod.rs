//! Static evaluator.
//!
//! One pass over a `Program` builds the frame tree and resolves every node
//! to a symbol entry. Each node kind has one rule, dispatched from
//! [`Evaluator::eval`]; kinds the analysis does not model evaluate to an
//! empty entry without a diagnostic.
//!
//! Results are [`SymbolId`]s. An identifier that resolves returns the stored
//! entry itself, so assignment, update and property materialization write
//! through to the declaration. Every computed value is a fresh entry.
//!
//! Function bodies are evaluated in two situations: speculatively, once per
//! function literal with `is_active == false`, and for real at each call
//! site. Speculation never pushes into a frame the caller still uses.

mod call;
mod control;
mod declare;
mod expr;
mod native;
mod ops;

use rustc_hash::FxHashSet;
use scope_diagnostic::{Diagnostic, DiagnosticBag, Severity};
use scope_ir::{Ast, Name, NodeId, NodeKind, StringInterner};
use scope_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::bridge::{from_host, to_host};
use crate::host::{HostValue, NativeRegistry};
use crate::options::EngineOptions;
use crate::reserved::ReservedRegistry;
use crate::symbols::{FrameId, SymbolEntry, SymbolId, SymbolTable};
use crate::value::{SymbolKind, Value, ValueType};

/// Whether an identifier names a binding or a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Bare name: property keys, member names, labels.
    Lvalue,
    Rvalue,
}

/// State threaded through one evaluation path.
#[derive(Clone, Debug)]
pub(crate) struct EvalState {
    pub frame: FrameId,
    /// `false` while speculating inside a function body nobody called.
    pub is_active: bool,
    /// Argument entries for the next block frame.
    pub pending_arguments: Option<Vec<SymbolId>>,
    /// Capture edge given to the next block frame.
    pub captured_frame: Option<FrameId>,
}

impl EvalState {
    fn active(frame: FrameId) -> Self {
        EvalState {
            frame,
            is_active: true,
            pending_arguments: None,
            captured_frame: None,
        }
    }

    fn speculative(frame: FrameId) -> Self {
        EvalState {
            frame,
            is_active: false,
            pending_arguments: None,
            captured_frame: None,
        }
    }
}

/// Names interned once per build.
#[derive(Clone, Copy)]
pub(crate) struct WellKnownNames {
    pub(crate) main: Name,
    pub(crate) local: Name,
    pub(crate) call_returns: Name,
    pub(crate) block_result: Name,
    pub(crate) length: Name,
    pub(crate) name: Name,
}

impl WellKnownNames {
    pub(crate) fn new(interner: &mut StringInterner) -> Self {
        WellKnownNames {
            main: interner.intern("main"),
            local: interner.intern("local"),
            call_returns: interner.intern("Returns of the function"),
            block_result: interner.intern("Result of the function call"),
            length: interner.intern("length"),
            name: interner.intern("name"),
        }
    }
}

/// Read-only inputs of one build.
#[derive(Clone, Copy)]
pub(crate) struct EvalContext<'a> {
    pub ast: &'a Ast,
    pub reserved: &'a ReservedRegistry,
    pub natives: &'a NativeRegistry,
    pub options: &'a EngineOptions,
}

pub(crate) struct Evaluator<'a> {
    ast: &'a Ast,
    reserved: &'a ReservedRegistry,
    natives: &'a NativeRegistry,
    options: &'a EngineOptions,
    interner: &'a mut StringInterner,
    table: &'a mut SymbolTable,
    diagnostics: &'a mut DiagnosticBag,
    names: WellKnownNames,
    /// Function declarations waiting to be speculated, with their
    /// defining frame. Drained at the end of each block.
    deferred: Vec<(NodeId, FrameId)>,
    call_depth: usize,
    /// Function bodies currently being evaluated.
    active_bodies: FxHashSet<NodeId>,
    /// Results of calls the depth or recursion guard did not enter.
    unentered_calls: FxHashSet<SymbolId>,
    /// Label bodies currently being revisited by `break`/`continue`.
    revisiting: FxHashSet<NodeId>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        context: EvalContext<'a>,
        interner: &'a mut StringInterner,
        table: &'a mut SymbolTable,
        diagnostics: &'a mut DiagnosticBag,
    ) -> Self {
        let names = WellKnownNames::new(interner);
        Evaluator {
            ast: context.ast,
            reserved: context.reserved,
            natives: context.natives,
            options: context.options,
            interner,
            table,
            diagnostics,
            names,
            deferred: Vec::new(),
            call_depth: 0,
            active_bodies: FxHashSet::default(),
            unentered_calls: FxHashSet::default(),
            revisiting: FxHashSet::default(),
        }
    }

    /// Evaluate `node` and everything below it.
    pub(crate) fn eval(&mut self, node: NodeId, mode: Mode, state: &mut EvalState) -> SymbolId {
        ensure_sufficient_stack(|| self.eval_inner(node, mode, state))
    }

    fn eval_opt(&mut self, node: Option<NodeId>, mode: Mode, state: &mut EvalState) -> SymbolId {
        match node {
            Some(node) => self.eval(node, mode, state),
            None => self.empty(),
        }
    }

    fn eval_inner(&mut self, node: NodeId, mode: Mode, state: &mut EvalState) -> SymbolId {
        let ast = self.ast;
        match ast.kind(node) {
            NodeKind::Program { body } => self.eval_program(body, state),
            NodeKind::VariableDeclaration { kind, declarations } => {
                for &declarator in declarations {
                    self.eval_declarator(declarator, SymbolKind::from(*kind), state);
                }
                self.empty()
            }
            NodeKind::VariableDeclarator { .. } => {
                self.eval_declarator(node, SymbolKind::Var, state)
            }
            NodeKind::FunctionDeclaration(function) => {
                self.eval_function_declaration(node, function, state)
            }
            NodeKind::ExpressionStatement { expression } => {
                self.eval(*expression, Mode::Rvalue, state)
            }
            NodeKind::BlockStatement { body } => self.eval_block(node, body, state),
            NodeKind::ReturnStatement { argument } => self.eval_opt(*argument, Mode::Rvalue, state),
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => self.eval_if(*test, *consequent, *alternate, state),
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => self.eval_for(*init, *test, *update, *body, state),
            NodeKind::WhileStatement { test, body } => self.eval_while(*test, *body, state),
            NodeKind::DoWhileStatement { body, test } => self.eval_do_while(*body, *test, state),
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => self.eval_switch(*discriminant, cases, state),
            NodeKind::SwitchCase { test, consequent } => {
                self.eval_switch_case(*test, consequent, state)
            }
            NodeKind::LabeledStatement { label, body } => {
                self.eval_labeled(node, *label, *body, state)
            }
            NodeKind::BreakStatement { label } | NodeKind::ContinueStatement { label } => {
                self.eval_jump(*label, state)
            }
            NodeKind::Identifier { name } => self.eval_identifier(node, *name, mode, state),
            NodeKind::Literal(literal) => self.eval_literal(literal),
            NodeKind::TemplateLiteral {
                raw,
                has_substitutions: false,
            } => self.eval_template(*raw),
            NodeKind::ArrayExpression { elements } => self.eval_array(elements, state),
            NodeKind::ObjectExpression { properties } => self.eval_object(properties, state),
            NodeKind::Property {
                key,
                value,
                computed,
                ..
            } => self.eval_property(*key, *value, *computed, state),
            NodeKind::FunctionExpression(function)
            | NodeKind::ArrowFunctionExpression(function) => {
                self.eval_function_expression(node, function, state)
            }
            NodeKind::UnaryExpression { operator, argument } => {
                self.eval_unary(node, *operator, *argument, state)
            }
            NodeKind::UpdateExpression {
                operator,
                prefix,
                argument,
            } => self.eval_update(node, *operator, *prefix, *argument, state),
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => self.eval_binary(node, *operator, *left, *right, state),
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => self.eval_assignment(node, *operator, *left, *right, state),
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => self.eval_conditional(*test, *consequent, *alternate, state),
            NodeKind::CallExpression { callee, arguments } => {
                self.eval_call(node, *callee, arguments, state)
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => self.eval_member(*object, *property, *computed, state),
            NodeKind::AwaitExpression { argument } => self.eval(*argument, Mode::Rvalue, state),

            NodeKind::ClassDeclaration(_)
            | NodeKind::ClassExpression(_)
            | NodeKind::MethodDefinition { .. }
            | NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement
            | NodeKind::ForInStatement { .. }
            | NodeKind::ForOfStatement { .. }
            | NodeKind::ThrowStatement { .. }
            | NodeKind::TryStatement { .. }
            | NodeKind::CatchClause { .. }
            | NodeKind::WithStatement { .. }
            | NodeKind::TemplateLiteral { .. }
            | NodeKind::TaggedTemplateExpression { .. }
            | NodeKind::ThisExpression
            | NodeKind::LogicalExpression { .. }
            | NodeKind::NewExpression { .. }
            | NodeKind::SequenceExpression { .. }
            | NodeKind::YieldExpression { .. }
            | NodeKind::SpreadElement { .. }
            | NodeKind::ObjectPattern { .. }
            | NodeKind::ArrayPattern { .. }
            | NodeKind::AssignmentPattern { .. }
            | NodeKind::RestElement { .. } => {
                trace!(kind = ast.kind(node).type_name(), "unsupported node");
                self.empty()
            }
        }
    }

    // Entries

    /// Fresh entry with nothing known about it.
    fn empty(&mut self) -> SymbolId {
        self.table.alloc_symbol(SymbolEntry::default())
    }

    fn alloc(&mut self, entry: SymbolEntry) -> SymbolId {
        self.table.alloc_symbol(entry)
    }

    fn alloc_computed(&mut self, value: Value, kind: Option<SymbolKind>) -> SymbolId {
        self.table.alloc_symbol(SymbolEntry::computed(value, kind))
    }

    /// Entry carrying only a name, as calls return when no body ran.
    fn named(&mut self, name: Name) -> SymbolId {
        self.table.alloc_symbol(SymbolEntry::unresolved(Some(name)))
    }

    #[inline]
    fn entry(&self, id: SymbolId) -> &SymbolEntry {
        self.table.symbol(id)
    }

    /// Name used for an entry in messages.
    fn display_name(&self, id: SymbolId) -> String {
        self.entry(id)
            .id
            .map_or_else(|| "undefined".to_string(), |name| self.interner.lookup(name).to_string())
    }

    // Diagnostic policy

    /// Unbound parameter of a function that is only being speculated, or
    /// the result of a call that was not entered.
    fn is_placeholder(&self, id: SymbolId, state: &EvalState) -> bool {
        (!state.is_active && self.entry(id).kind == Some(SymbolKind::Argument))
            || self.unentered_calls.contains(&id)
    }

    /// Whether findings about `id` are reported: always when values are
    /// checked, otherwise only for entries that resolved to nothing.
    fn reports(&self, id: SymbolId) -> bool {
        self.options.always_evaluate_values || self.entry(id).kind.is_none()
    }

    /// Untyped operand that is neither a placeholder nor exempt.
    fn is_reportable_undefined(&self, id: SymbolId, state: &EvalState) -> bool {
        self.entry(id).ty.is_none() && !self.is_placeholder(id, state) && self.reports(id)
    }

    fn report(&mut self, severity: Severity, message: String, node: NodeId) {
        let location = self.ast.location(node);
        self.diagnostics
            .push(Diagnostic::new(severity, message, location));
    }

    fn error(&mut self, message: String, node: NodeId) {
        self.report(Severity::Error, message, node);
    }

    fn warning(&mut self, message: String, node: NodeId) {
        self.report(Severity::Warning, message, node);
    }

    fn info(&mut self, message: String, node: NodeId) {
        self.report(Severity::Info, message, node);
    }

    // Values

    fn host_value(&self, id: SymbolId) -> HostValue {
        let mut callbacks = Vec::new();
        to_host(self.table, self.interner, id, &mut callbacks)
    }

    fn alloc_host(&mut self, host: &HostValue, kind: Option<SymbolKind>) -> SymbolId {
        from_host(self.table, self.interner, host, kind, &[])
    }

    /// Text of a value as it would be printed.
    fn display_value(&self, id: SymbolId) -> String {
        crate::operators::to_js_string(&self.host_value(id))
    }

    /// Property key named by an evaluated key or member expression.
    fn key_name(&mut self, id: SymbolId) -> Option<Name> {
        let text = match &self.entry(id).value {
            Value::Name(name) => return Some(*name),
            Value::String(text) => text.clone(),
            Value::Undefined | Value::Label(_) | Value::Function(_) => return None,
            Value::Null | Value::Boolean(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                self.display_value(id)
            }
        };
        Some(self.interner.intern(&text))
    }

    fn type_of(&self, id: SymbolId) -> Option<ValueType> {
        self.entry(id).ty
    }
}

/// Evaluate `root` into `table`, pushing findings into `diagnostics`.
pub(crate) fn evaluate_program(
    context: EvalContext<'_>,
    interner: &mut StringInterner,
    table: &mut SymbolTable,
    diagnostics: &mut DiagnosticBag,
    root: NodeId,
) -> SymbolId {
    let mut evaluator = Evaluator::new(context, interner, table, diagnostics);
    let main = evaluator.table.alloc_frame(crate::symbols::Frame::new(
        Some(evaluator.names.main),
        None,
        None,
        context.ast.location(root),
    ));
    evaluator.table.set_main_frame(main);
    let mut state = EvalState::active(main);
    evaluator.eval(root, Mode::Rvalue, &mut state)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

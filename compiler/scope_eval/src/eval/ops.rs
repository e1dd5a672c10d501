//! Operators and assignment.

use scope_ir::{AssignOp, BinaryOp, NodeId, NodeKind, UnaryOp, UpdateOp};
use tracing::trace;

use super::{EvalState, Evaluator, Mode};
use crate::errors;
use crate::host::HostValue;
use crate::operators::{evaluate_binary, evaluate_unary, to_number};
use crate::symbols::{SymbolEntry, SymbolId};
use crate::value::{type_label, SymbolKind, Value, ValueType};

impl Evaluator<'_> {
    pub(super) fn eval_binary(
        &mut self,
        node: NodeId,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
        state: &mut EvalState,
    ) -> SymbolId {
        let l = self.eval(left, Mode::Rvalue, state);
        let r = self.eval(right, Mode::Rvalue, state);

        for (operand, at) in [(l, left), (r, right)] {
            if self.is_reportable_undefined(operand, state) {
                self.warning(errors::undefined_operand(&self.display_name(operand), "binary"), at);
            }
        }

        let operation = match op {
            BinaryOp::Add => Some("add"),
            BinaryOp::Sub => Some("subtract"),
            BinaryOp::Mul => Some("multiply"),
            BinaryOp::Div => Some("divide"),
            _ => None,
        };
        if let Some(operation) = operation {
            if self.checks_operand_types(l, r) && self.mismatched_operands(op, l, r) {
                let message = errors::binary_operand_types(
                    operation,
                    type_label(self.type_of(l)),
                    type_label(self.type_of(r)),
                );
                self.warning(message, node);
            }
        }

        let value = evaluate_binary(op, &self.host_value(l), &self.host_value(r))
            .unwrap_or_else(|| {
                trace!(operator = op.as_symbol(), "binary operator has no static value");
                HostValue::Undefined
            });
        self.alloc_host(&value, Some(SymbolKind::Let))
    }

    /// Type findings on arithmetic are reported when values are checked or
    /// an operand resolved to nothing.
    fn checks_operand_types(&self, l: SymbolId, r: SymbolId) -> bool {
        self.options.always_evaluate_values
            || self.entry(l).kind.is_none()
            || self.entry(r).kind.is_none()
    }

    /// `+` accepts numbers and strings; `-`, `*` and `/` only numbers.
    /// Parameters and calls that were not entered are never blamed.
    fn mismatched_operands(&self, op: BinaryOp, l: SymbolId, r: SymbolId) -> bool {
        let accepts = |ty: Option<ValueType>| match op {
            BinaryOp::Add => matches!(ty, Some(ValueType::Number | ValueType::String)),
            _ => ty == Some(ValueType::Number),
        };
        [l, r].into_iter().any(|operand| {
            !accepts(self.type_of(operand))
                && self.entry(operand).kind != Some(SymbolKind::Argument)
                && !self.unentered_calls.contains(&operand)
        })
    }

    pub(super) fn eval_unary(
        &mut self,
        node: NodeId,
        op: UnaryOp,
        argument: NodeId,
        state: &mut EvalState,
    ) -> SymbolId {
        let operand = self.eval(argument, Mode::Rvalue, state);
        let name = self.display_name(operand);
        let entry = self.entry(operand);
        let (ty, kind, is_function) = (entry.ty, entry.kind, entry.is_function());
        let placeholder = self.is_placeholder(operand, state);

        if is_function {
            self.warning(errors::unary_on_function(&name), argument);
        } else if !placeholder {
            match op {
                UnaryOp::Neg | UnaryOp::Plus | UnaryOp::BitNot if ty != Some(ValueType::Number) => {
                    self.warning(errors::unary_operand_type(type_label(ty), &name), node);
                }
                UnaryOp::Not if ty.is_none() && kind.is_none() => {
                    self.warning(errors::unary_operand_type(type_label(ty), &name), node);
                }
                _ => {}
            }
        }

        let host = match op {
            UnaryOp::TypeOf => HostValue::String(type_label(ty).to_string()),
            UnaryOp::Void | UnaryOp::Delete => HostValue::Undefined,
            _ => evaluate_unary(op, &self.host_value(operand)).unwrap_or_default(),
        };
        let computed = self.alloc_host(&host, None);
        let result = self.table.duplicate(operand);
        self.copy_value(computed, result);
        result
    }

    pub(super) fn eval_update(
        &mut self,
        node: NodeId,
        op: UpdateOp,
        prefix: bool,
        argument: NodeId,
        state: &mut EvalState,
    ) -> SymbolId {
        let target = self.eval(argument, Mode::Rvalue, state);
        let name = self.display_name(target);

        if self.is_reportable_undefined(target, state) {
            self.warning(errors::undefined_operand(&name, "update"), argument);
        } else if self.type_of(target) != Some(ValueType::Number)
            && !self.is_placeholder(target, state)
            && self.reports(target)
        {
            self.info(errors::not_a_number(&name), node);
        }

        let old = to_number(&self.host_value(target));
        let new = match op {
            UpdateOp::Increment => old + 1.0,
            UpdateOp::Decrement => old - 1.0,
        };
        let before = (!prefix).then(|| self.table.duplicate(target));

        let entry = self.table.symbol_mut(target);
        entry.value = Value::Number(new);
        entry.ty = Some(ValueType::Number);

        before.unwrap_or(target)
    }

    /// Plain and compound assignment. Writes through to the resolved
    /// target; an unresolved bare name becomes an implicit `var`.
    pub(super) fn eval_assignment(
        &mut self,
        node: NodeId,
        op: AssignOp,
        left: NodeId,
        right: NodeId,
        state: &mut EvalState,
    ) -> SymbolId {
        let mut target = self.eval(left, Mode::Rvalue, state);
        let value = self.eval(right, Mode::Rvalue, state);

        if self.is_reportable_undefined(value, state) {
            self.warning(errors::undefined_operand(&self.display_name(value), "assign"), right);
        }

        let name = self.display_name(target);
        let entry = self.entry(target);
        let (id, kind, is_function) = (entry.id, entry.kind, entry.is_function());
        if kind == Some(SymbolKind::Reserved) && is_function {
            self.error(errors::assign_to_reserved_function(&name), left);
            return target;
        }

        if kind.is_none() && matches!(self.ast.kind(left), NodeKind::Identifier { .. }) {
            let location = self.ast.location(left);
            target = self.alloc(SymbolEntry::declared(
                id,
                SymbolKind::Var,
                &SymbolEntry::default(),
                location,
            ));
            let frame = match (state.is_active, self.table.main_frame()) {
                (true, Some(main)) => main,
                _ => state.frame,
            };
            self.table.push_symbol(frame, target);
        } else if kind == Some(SymbolKind::Const) {
            self.error(errors::assign_to_constant(&name), left);
            return target;
        }

        let Some(binary) = op.binary() else {
            self.copy_value(value, target);
            return target;
        };

        let exempt = self.is_placeholder(target, state) || self.is_placeholder(value, state);
        if matches!(binary, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div)
            && !exempt
            && self.checks_operand_types(target, value)
            && self.mismatched_operands(binary, target, value)
        {
            let message = errors::compound_operand_types(
                op.as_symbol(),
                type_label(self.type_of(value)),
                type_label(self.type_of(target)),
            );
            self.warning(message, node);
        }

        let result = evaluate_binary(binary, &self.host_value(target), &self.host_value(value))
            .unwrap_or_default();
        let computed = self.alloc_host(&result, None);
        self.copy_value(computed, target);
        target
    }

    /// Give `to` the type and value of `from`.
    fn copy_value(&mut self, from: SymbolId, to: SymbolId) {
        let source = self.entry(from);
        let (ty, value) = (source.ty, source.value.clone());
        let target = self.table.symbol_mut(to);
        target.ty = ty;
        target.value = value;
    }
}

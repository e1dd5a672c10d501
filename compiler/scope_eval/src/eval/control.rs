//! Branches, loops and jumps.
//!
//! Every branch is visited regardless of its test. Loop bodies run once.

use scope_ir::NodeId;
use tracing::debug;

use super::{EvalState, Evaluator, Mode};
use crate::errors;
use crate::symbols::SymbolId;
use crate::value::{Value, ValueType};

impl Evaluator<'_> {
    pub(super) fn eval_if(
        &mut self,
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
        state: &mut EvalState,
    ) -> SymbolId {
        self.eval(test, Mode::Rvalue, state);
        self.eval(consequent, Mode::Rvalue, state);
        self.eval_opt(alternate, Mode::Rvalue, state);
        self.empty()
    }

    pub(super) fn eval_for(
        &mut self,
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
        state: &mut EvalState,
    ) -> SymbolId {
        self.eval_opt(init, Mode::Rvalue, state);
        if let Some(test) = test {
            let condition = self.eval(test, Mode::Rvalue, state);
            self.check_condition(test, condition);
        }
        self.eval_opt(update, Mode::Rvalue, state);
        self.eval(body, Mode::Rvalue, state);
        self.empty()
    }

    pub(super) fn eval_while(&mut self, test: NodeId, body: NodeId, state: &mut EvalState) -> SymbolId {
        let condition = self.eval(test, Mode::Rvalue, state);
        self.check_condition(test, condition);
        self.eval(body, Mode::Rvalue, state);
        self.empty()
    }

    pub(super) fn eval_do_while(
        &mut self,
        body: NodeId,
        test: NodeId,
        state: &mut EvalState,
    ) -> SymbolId {
        self.eval(body, Mode::Rvalue, state);
        let condition = self.eval(test, Mode::Rvalue, state);
        self.check_condition(test, condition);
        self.empty()
    }

    /// Loop tests that are not booleans are noted, with the value the test
    /// had before the body ran.
    fn check_condition(&mut self, test: NodeId, condition: SymbolId) {
        if self.type_of(condition) != Some(ValueType::Boolean) && self.reports(condition) {
            let message = errors::not_a_boolean(&self.display_value(condition));
            self.info(message, test);
        }
    }

    pub(super) fn eval_switch(
        &mut self,
        discriminant: NodeId,
        cases: &[NodeId],
        state: &mut EvalState,
    ) -> SymbolId {
        self.eval(discriminant, Mode::Rvalue, state);
        for &case in cases {
            self.eval(case, Mode::Rvalue, state);
        }
        self.empty()
    }

    pub(super) fn eval_switch_case(
        &mut self,
        test: Option<NodeId>,
        consequent: &[NodeId],
        state: &mut EvalState,
    ) -> SymbolId {
        self.eval_opt(test, Mode::Rvalue, state);
        for &statement in consequent {
            self.eval(statement, Mode::Rvalue, state);
        }
        self.empty()
    }

    /// `break label` and `continue label` revisit the labelled body.
    pub(super) fn eval_jump(&mut self, label: Option<NodeId>, state: &mut EvalState) -> SymbolId {
        let Some(label) = label else {
            return self.empty();
        };

        let target = self.eval(label, Mode::Rvalue, state);
        let body = match self.entry(target).value {
            Value::Label(body) if self.type_of(target) == Some(ValueType::Label) => Some(body),
            _ => None,
        };
        let Some(body) = body else {
            let name = self.display_name(target);
            self.error(errors::label_not_found(&name), label);
            return self.empty();
        };

        if !self.revisiting.insert(body) {
            debug!(?body, "label body already being revisited");
            return self.empty();
        }
        self.eval(body, Mode::Rvalue, state);
        self.revisiting.remove(&body);
        self.empty()
    }
}

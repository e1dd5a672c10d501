//! Native method calls and callback re-entry.

use scope_ir::{Name, NodeId};
use tracing::{debug, trace};

use super::{EvalState, Evaluator};
use crate::bridge::{from_host, to_host};
use crate::errors;
use crate::host::{Callback, HostValue, NativeCall, NativeContext, NativeEffect};
use crate::symbols::SymbolId;
use crate::value::SymbolKind;

impl Evaluator<'_> {
    pub(super) fn invoke_native(
        &mut self,
        node: NodeId,
        receiver: SymbolId,
        method: Name,
        arity: usize,
        args: &[SymbolId],
        state: &EvalState,
    ) -> SymbolId {
        let name = self.interner.lookup(method).to_string();
        let native = self
            .type_of(receiver)
            .and_then(|ty| self.natives.lookup(ty, &name))
            .copied();
        let Some(native) = native else {
            self.error(errors::not_a_function(&name), node);
            return self.named(self.names.call_returns);
        };

        if self.options.check_native_arity && args.len() != arity {
            self.warning(errors::wrong_arity(&name, arity), node);
        }

        let mut callbacks = Vec::new();
        let mut host_receiver = to_host(self.table, self.interner, receiver, &mut callbacks);
        let host_args: Vec<HostValue> = args
            .iter()
            .map(|&arg| to_host(self.table, self.interner, arg, &mut callbacks))
            .collect();

        trace!(method = %name, args = host_args.len(), "native call");
        let mut invoker = CallbackInvoker {
            evaluator: self,
            callbacks,
            state: state.clone(),
            node,
        };
        let outcome = {
            let mut call = NativeCall::new(&mut host_receiver, &host_args, &mut invoker);
            (native.func)(&mut call)
        };
        let callbacks = invoker.callbacks;

        match outcome {
            Ok(value) => {
                if native.effect == NativeEffect::MutatesReceiver {
                    let updated = from_host(self.table, self.interner, &host_receiver, None, &callbacks);
                    let updated = self.entry(updated);
                    let (ty, value) = (updated.ty, updated.value.clone());
                    let target = self.table.symbol_mut(receiver);
                    target.ty = ty;
                    target.value = value;
                }
                from_host(
                    self.table,
                    self.interner,
                    &value,
                    Some(SymbolKind::Native),
                    &callbacks,
                )
            }
            Err(error) => {
                self.warning(error.to_string(), node);
                self.named(self.names.call_returns)
            }
        }
    }
}

/// Lets a native method call back into analyzed functions.
struct CallbackInvoker<'e, 'a> {
    evaluator: &'e mut Evaluator<'a>,
    /// Function entries handed out as [`Callback`]s, by index.
    callbacks: Vec<SymbolId>,
    state: EvalState,
    node: NodeId,
}

impl NativeContext for CallbackInvoker<'_, '_> {
    fn invoke(&mut self, callback: Callback, args: Vec<HostValue>) -> HostValue {
        let Some(&function) = self.callbacks.get(callback.index()) else {
            debug!(index = callback.index(), "unknown callback");
            return HostValue::Undefined;
        };
        let evaluator = &mut *self.evaluator;
        let Some(callable) = evaluator.entry(function).value.as_function().cloned() else {
            return HostValue::Undefined;
        };

        if evaluator.options.check_native_arity
            && callable.is_user_defined()
            && callable.params.len() != args.len()
        {
            let message = errors::wrong_callback_arity(callable.params.len(), args.len());
            evaluator.warning(message, self.node);
        }

        let arguments: Vec<SymbolId> = args
            .iter()
            .map(|arg| {
                from_host(
                    evaluator.table,
                    evaluator.interner,
                    arg,
                    Some(SymbolKind::Argument),
                    &self.callbacks,
                )
            })
            .collect();
        let result = evaluator.apply(self.node, &callable, &arguments, &mut self.state);
        to_host(evaluator.table, evaluator.interner, result, &mut self.callbacks)
    }
}

//! Block invocation and scope mutaters.

use std::rc::Rc;

use bir_ir::{BlockCall, Expression, Identifier, ScopeMutaterKind, VariableKind};
use smallvec::SmallVec;
use tracing::trace;

use super::Engine;
use crate::block::{BlockKind, NativeContext};
use crate::callstack::Frame;
use crate::errors::{
    argument_count_mismatch, const_reassignment, immutable_scope_reassignment,
    missing_scope_instance, missing_slot, undefined_block, EvalResult,
};
use crate::scope::{BlockRef, FoundBlock, LocalScope, Scope, UpdateOutcome};

/// Evaluated verbs or arguments of one call.
pub(super) type Values = SmallVec<[i64; 4]>;

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl Engine {
    /// `name:verb(args)`: resolve, check arity, evaluate verbs then
    /// arguments, and run the block here or in the engine that owns it.
    pub(super) fn call_block(&mut self, call: &BlockCall) -> EvalResult<i64> {
        let alias = call.name.value.as_str();
        let FoundBlock { block, foreign } = self
            .current_scope()
            .borrow()
            .find_block(alias)
            .ok_or_else(|| undefined_block(alias))?;

        self.check_arity(&block, alias, call)?;
        let verbs = self.eval_all(&call.verbs)?;
        let args = self.eval_all(&call.args)?;

        if foreign {
            self.call_foreign(&block, alias, &verbs, &args)
        } else {
            self.invoke(&block, alias, &verbs, &args)
        }
    }

    fn check_arity(&self, block: &BlockRef, alias: &str, call: &BlockCall) -> EvalResult<()> {
        let block = block.borrow();
        if block.is_native() {
            return Ok(());
        }
        // Only missing values are errors; extra ones are evaluated and dropped.
        let mut mismatches = Vec::new();
        if call.verbs.len() < block.verbs.len() {
            mismatches.push(format!(
                "expected {}, found {}",
                plural(block.verbs.len(), "verb"),
                call.verbs.len()
            ));
        }
        if call.args.len() < block.args.len() {
            mismatches.push(format!(
                "expected {}, found {}",
                plural(block.args.len(), "argument"),
                call.args.len()
            ));
        }
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(argument_count_mismatch(alias, mismatches))
        }
    }

    fn eval_all(&mut self, exprs: &[Expression]) -> EvalResult<Values> {
        exprs.iter().map(|expr| self.eval(expr)).collect()
    }

    /// Run a block in this engine with already evaluated verbs and args.
    ///
    /// The call scope sees the block's instance first, then the caller's
    /// scope. The frame is named after the alias used at the call site.
    #[tracing::instrument(level = "debug", skip(self, block), fields(engine = %self.id))]
    pub(super) fn invoke(
        &mut self,
        block: &BlockRef,
        alias: &str,
        verbs: &[i64],
        args: &[i64],
    ) -> EvalResult<i64> {
        let (kind, instance, verb_names, arg_names) = {
            let block = block.borrow();
            let names = |idents: &[Identifier]| -> Vec<String> {
                idents.iter().map(|ident| ident.value.clone()).collect()
            };
            (
                block.kind.clone(),
                block.instance.clone(),
                names(&block.verbs),
                names(&block.args),
            )
        };

        match kind {
            BlockKind::Native(host) => {
                self.callstack
                    .push_call(Frame::new(alias, Rc::from(Vec::new())))?;
                let interface = self.runtime.interface.clone();
                let mut ctx = NativeContext {
                    engine: self.id,
                    interface: &interface,
                };
                let result = host(&mut ctx, verbs, args);
                self.callstack.pop();
                result
            }
            BlockKind::Interpreted(body) => {
                let mut parents = Vec::with_capacity(2);
                parents.extend(instance);
                parents.push(self.current_scope());
                let mut scope = Scope::with_parents(parents);
                for (name, value) in verb_names.into_iter().zip(verbs) {
                    scope.push(name, *value, VariableKind::Let);
                }
                for (name, value) in arg_names.into_iter().zip(args) {
                    scope.push(name, *value, VariableKind::Let);
                }

                let frame = Frame::new(alias, body.program);
                self.with_scope(LocalScope::new(scope), |this| {
                    this.enter(frame, true)
                })
            }
        }
    }

    /// `$read(i)`, `$write(i, v)`, `$delete(i)` on slot `value_<i>` of the
    /// nearest enclosing block's instance.
    pub(super) fn scope_mutater(
        &mut self,
        mutater: ScopeMutaterKind,
        args: &[Expression],
    ) -> EvalResult<i64> {
        let keyword = mutater.keyword();
        if args.len() < mutater.min_args() {
            return Err(argument_count_mismatch(
                keyword,
                vec![format!(
                    "expected at least {}, found {}",
                    plural(mutater.min_args(), "argument"),
                    args.len()
                )],
            ));
        }
        let values = self.eval_all(args)?;

        let current = self.current_scope();
        let target = self
            .callstack
            .names_innermost_first()
            .find_map(|name| current.borrow().find_block(name))
            .ok_or_else(|| missing_scope_instance(keyword))?;
        let (block_name, instance) = {
            let block = target.block.borrow();
            (block.name.clone(), block.instance.clone())
        };
        let instance = instance.ok_or_else(|| missing_scope_instance(keyword))?;
        let slot = format!("value_{}", values[0]);
        trace!(mutater = keyword, block = %block_name, %slot, "scope mutater");

        match mutater {
            ScopeMutaterKind::Read => {
                let value = instance.borrow().find_local(&slot).map(|binding| binding.value);
                value.ok_or_else(|| missing_slot(&block_name, &slot))
            }
            ScopeMutaterKind::Write => {
                let value = values[1];
                let mut instance = instance.borrow_mut();
                if !instance.has_local(&slot) {
                    instance.push(slot, value, VariableKind::Let);
                    return Ok(value);
                }
                match instance.update(&slot, value) {
                    UpdateOutcome::DeniedConst => Err(const_reassignment(&slot)),
                    UpdateOutcome::DeniedImmutable => Err(immutable_scope_reassignment(&slot)),
                    UpdateOutcome::Granted | UpdateOutcome::Unbound => Ok(value),
                }
            }
            ScopeMutaterKind::Delete => {
                let mut instance = instance.borrow_mut();
                if !instance.has_local(&slot) {
                    return Err(missing_slot(&block_name, &slot));
                }
                Ok(instance.delete(&slot))
            }
        }
    }
}

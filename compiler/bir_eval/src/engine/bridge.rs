//! Calls into blocks owned by an imported engine.
//!
//! The caller lends its call stack by value and its scope stack by shared
//! handles. The owner runs the block on top of the caller's scopes, so the
//! body sees the caller's live bindings, then hands the call stack back and
//! restores its own state whether the call succeeded or not.

use std::mem;

use tracing::debug;

use super::{Engine, EngineId};
use crate::callstack::CallStack;
use crate::errors::EvalResult;
use crate::scope::{BlockRef, ScopeRef};

impl Engine {
    #[tracing::instrument(level = "debug", skip(self, block, verbs, args), fields(engine = %self.id))]
    pub(super) fn call_foreign(
        &mut self,
        block: &BlockRef,
        alias: &str,
        verbs: &[i64],
        args: &[i64],
    ) -> EvalResult<i64> {
        let owner = block.borrow().owner;
        if owner == self.id {
            return self.invoke(block, alias, verbs, args);
        }

        let scopes = self.scopestack.clone();
        let callstack = mem::take(&mut self.callstack);
        let Some(engine) = self.find_engine_mut(owner) else {
            // The owner is not below this engine (a sibling import reached
            // through the caller's scopes). The scope chain is the same
            // either way, so run it here.
            debug!(%owner, "owner not reachable, running locally");
            self.callstack = callstack;
            return self.invoke(block, alias, verbs, args);
        };

        let (result, callstack) = engine.run_borrowed(callstack, &scopes, block, alias, verbs, args);
        self.callstack = callstack;
        result
    }

    /// Depth-first search of the engines loaded below this one.
    fn find_engine_mut(&mut self, id: EngineId) -> Option<&mut Engine> {
        if self.uses.contains_key(&id) {
            return self.uses.get_mut(&id);
        }
        self.uses
            .values_mut()
            .find_map(|engine| engine.find_engine_mut(id))
    }

    /// Run `block` on the lent call stack and scopes, then restore.
    fn run_borrowed(
        &mut self,
        callstack: CallStack,
        scopes: &[ScopeRef],
        block: &BlockRef,
        alias: &str,
        verbs: &[i64],
        args: &[i64],
    ) -> (EvalResult<i64>, CallStack) {
        let own_callstack = mem::replace(&mut self.callstack, callstack);
        let own_depth = self.scopestack.len();
        let top = self.current_scope();
        let was_foreign = top.borrow().is_foreign();

        top.borrow_mut().set_foreign(false);
        self.scopestack.extend(scopes.iter().cloned());

        let result = self
            .invoke(block, alias, verbs, args)
            .map_err(|err| self.attach_report(err));

        self.scopestack.truncate(own_depth);
        top.borrow_mut().set_foreign(was_foreign);
        let lent = mem::replace(&mut self.callstack, own_callstack);
        (result, lent)
    }
}

//! Block declaration, inheritance and `init`.

use std::rc::Rc;

use bir_ir::{BlockBody, BlockDecl, Primitive, Statements, VariableKind};
use tracing::debug;

use super::Engine;
use crate::block::Block;
use crate::callstack::Frame;
use crate::errors::{duplicate_declaration, undefined_block, EvalResult};
use crate::scope::{BlockRef, LocalScope, Scope, ScopeRef};

/// Instance slot updated with the populate count, when present.
const INDEX_SLOT: &str = "index";

impl Engine {
    pub(super) fn declare_block(&mut self, decl: &BlockDecl) -> EvalResult<()> {
        match &decl.implements {
            Some(parent) => self.declare_implementing(decl, &parent.value),
            None => self.declare_plain(decl),
        }
    }

    /// Register the block, then build its instance from `init`.
    fn declare_plain(&mut self, decl: &BlockDecl) -> EvalResult<()> {
        let name = decl.name.value.as_str();
        let scope = self.current_scope();
        if scope.borrow().has_local_block(name) {
            return Err(duplicate_declaration(name).at(decl.name.position));
        }

        let body = decl.body.clone().unwrap_or_else(|| BlockBody {
            init: None,
            program: Rc::from(Vec::new()),
        });
        let init = body.init.clone();
        let block = LocalScope::new(Block::declared(self.id, decl, body));
        scope.borrow_mut().add_block(block.clone());
        debug!(block = name, engine = %self.id, "declared block");

        let instance = self.run_init(&block, init)?;
        scope.borrow().flag_block_as_initialized(name, instance);
        Ok(())
    }

    /// `name implements parent { populate }`.
    ///
    /// Shape and body come from `parent`; the instance is built fresh by
    /// running the copied `init`, then seeded from `populate`.
    fn declare_implementing(&mut self, decl: &BlockDecl, parent: &str) -> EvalResult<()> {
        let name = decl.name.value.as_str();
        let scope = self.current_scope();
        let found = scope
            .borrow()
            .find_block(parent)
            .ok_or_else(|| undefined_block(parent))?;
        if scope.borrow().has_local_block(name) {
            return Err(duplicate_declaration(name).at(decl.name.position));
        }

        let block = LocalScope::new(Block::implementing(self.id, name, &found.block.borrow()));
        let init = block.borrow().init().cloned();
        scope.borrow_mut().add_block(block.clone());
        debug!(block = name, implements = parent, engine = %self.id, "declared block");

        let mut instance = self.run_init(&block, init)?;
        if let Some(populate) = &decl.populate {
            let values = self.populate_values(populate)?;
            let instance = instance.get_or_insert_with(|| Scope::child_of(&scope));
            let mut instance = instance.borrow_mut();
            for (index, value) in values.iter().enumerate() {
                instance.push(format!("value_{index}"), *value, VariableKind::Const);
            }
            // `index` is overwritten even when `init` declared it const.
            let count = i64::try_from(values.len()).unwrap_or(i64::MAX);
            instance.overwrite_local(INDEX_SLOT, count);
        }
        scope.borrow().flag_block_as_initialized(name, instance);
        Ok(())
    }

    /// Run `init` in a fresh child of the current scope; that scope becomes
    /// the block's instance.
    ///
    /// The instance is attached before `init` runs so scope mutaters inside
    /// the `$name` frame can address its slots.
    fn run_init(&mut self, block: &BlockRef, init: Option<Statements>) -> EvalResult<Option<ScopeRef>> {
        let Some(init) = init else {
            return Ok(None);
        };
        let instance = Scope::child_of(&self.current_scope());
        let name = {
            let mut block = block.borrow_mut();
            block.instance = Some(instance.clone());
            block.name.clone()
        };
        self.with_scope(instance.clone(), |this| {
            this.enter(Frame::new(format!("${name}"), init), true)
        })?;
        Ok(Some(instance))
    }

    /// Character codes of a string, or the evaluated elements of an array.
    fn populate_values(&mut self, populate: &Primitive) -> EvalResult<Vec<i64>> {
        match populate {
            Primitive::Int(value) => Ok(vec![*value]),
            Primitive::String(text) => Ok(text.chars().map(|c| i64::from(u32::from(c))).collect()),
            Primitive::Array(elements) => elements.iter().map(|expr| self.eval(expr)).collect(),
        }
    }
}

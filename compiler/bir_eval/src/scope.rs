//! Lexical scopes.
//!
//! A scope holds variable bindings and declared blocks, and links to any
//! number of parent scopes. Lookups search the local frame first, then each
//! parent depth-first in order; the first hit wins. Names are unique per
//! scope only, so shadowing across levels is allowed.
//!
//! Scopes are shared through [`LocalScope`] handles: the scope stack, a
//! block's persistent instance and every child that names it as a parent all
//! point at the same scope.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use bir_ir::VariableKind;
use bir_stack::ensure_sufficient_stack;

use crate::block::Block;

/// A single-threaded shared handle with interior mutability.
///
/// Wraps `Rc<RefCell<T>>` so every shared allocation goes through
/// [`LocalScope::new`]. Not thread-safe; the engine runs on one thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same value.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub type ScopeRef = LocalScope<Scope>;
pub type BlockRef = LocalScope<Block>;

/// One variable binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub value: i64,
    pub kind: VariableKind,
}

/// Result of [`Scope::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Granted,
    /// The binding is `const`.
    DeniedConst,
    /// The binding lives in an immutable scope.
    DeniedImmutable,
    /// No scope in the chain binds the name.
    Unbound,
}

impl UpdateOutcome {
    #[inline]
    pub fn is_denied(self) -> bool {
        matches!(self, UpdateOutcome::DeniedConst | UpdateOutcome::DeniedImmutable)
    }
}

/// A resolved block and whether the resolution crossed a foreign scope.
#[derive(Clone, Debug)]
pub struct FoundBlock {
    pub block: BlockRef,
    pub foreign: bool,
}

#[derive(Debug, Default)]
pub struct Scope {
    parents: Vec<ScopeRef>,
    frame: Vec<Binding>,
    blocks: Vec<BlockRef>,
    immutable: bool,
    foreign: bool,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// A scope whose lookups fall through to `parents`, in order.
    pub fn with_parents(parents: Vec<ScopeRef>) -> Self {
        Scope {
            parents,
            ..Scope::default()
        }
    }

    /// Shorthand for a fresh shared child of `parent`.
    pub fn child_of(parent: &ScopeRef) -> ScopeRef {
        LocalScope::new(Scope::with_parents(vec![parent.clone()]))
    }

    pub fn add_parent(&mut self, parent: ScopeRef) {
        self.parents.push(parent);
    }

    pub fn set_immutable(&mut self, immutable: bool) {
        self.immutable = immutable;
    }

    pub fn is_foreign(&self) -> bool {
        self.foreign
    }

    pub fn set_foreign(&mut self, foreign: bool) {
        self.foreign = foreign;
    }

    /// Append a binding. Duplicate checks are the caller's job.
    pub fn push(&mut self, name: impl Into<String>, value: i64, kind: VariableKind) {
        self.frame.push(Binding {
            name: name.into(),
            value,
            kind,
        });
    }

    pub fn find_local(&self, name: &str) -> Option<&Binding> {
        self.frame.iter().find(|binding| binding.name == name)
    }

    pub fn has_local(&self, name: &str) -> bool {
        self.find_local(name).is_some()
    }

    pub fn find(&self, name: &str) -> Option<i64> {
        if let Some(binding) = self.find_local(name) {
            return Some(binding.value);
        }
        ensure_sufficient_stack(|| {
            self.parents
                .iter()
                .find_map(|parent| parent.borrow().find(name))
        })
    }

    /// Overwrite an existing binding.
    ///
    /// A local binding is checked for `const` first, then for this scope
    /// being immutable. Without a local binding every parent is asked, and
    /// every parent that binds the name is written: the walk does not stop at
    /// the first grant. The first denial wins, otherwise any grant wins.
    pub fn update(&mut self, name: &str, value: i64) -> UpdateOutcome {
        let immutable = self.immutable;
        if let Some(binding) = self.frame.iter_mut().find(|binding| binding.name == name) {
            if binding.kind == VariableKind::Const {
                return UpdateOutcome::DeniedConst;
            }
            if immutable {
                return UpdateOutcome::DeniedImmutable;
            }
            binding.value = value;
            return UpdateOutcome::Granted;
        }

        ensure_sufficient_stack(|| {
            let mut outcome = UpdateOutcome::Unbound;
            for parent in &self.parents {
                let report = parent.borrow_mut().update(name, value);
                match (outcome, report) {
                    (current, _) if current.is_denied() => {}
                    (_, UpdateOutcome::Unbound) => {}
                    (_, report) => outcome = report,
                }
            }
            outcome
        })
    }

    /// Set a local binding regardless of `const` or an immutable scope.
    ///
    /// Returns whether the binding exists. Only the runtime itself writes
    /// this way; programs go through [`Scope::update`].
    pub fn overwrite_local(&mut self, name: &str, value: i64) -> bool {
        match self.frame.iter_mut().find(|binding| binding.name == name) {
            Some(binding) => {
                binding.value = value;
                true
            }
            None => false,
        }
    }

    /// Remove the first binding of `name` in lookup order.
    ///
    /// Always yields 0, whether or not anything was removed.
    pub fn delete(&mut self, name: &str) -> i64 {
        self.remove_first(name);
        0
    }

    fn remove_first(&mut self, name: &str) -> bool {
        if let Some(index) = self.frame.iter().position(|binding| binding.name == name) {
            self.frame.remove(index);
            return true;
        }
        ensure_sufficient_stack(|| {
            self.parents
                .iter()
                .any(|parent| parent.borrow_mut().remove_first(name))
        })
    }

    /// Register a block. Duplicate checks are the caller's job.
    pub fn add_block(&mut self, block: BlockRef) {
        self.blocks.push(block);
    }

    pub fn has_local_block(&self, name: &str) -> bool {
        self.local_block(name).is_some()
    }

    fn local_block(&self, name: &str) -> Option<&BlockRef> {
        self.blocks.iter().find(|block| block.borrow().name == name)
    }

    /// Resolve a block by name.
    ///
    /// A leading `$` (the marker on init frame names) is ignored. A local hit
    /// is foreign when this scope is; a hit through a parent carries the
    /// parent's answer.
    pub fn find_block(&self, name: &str) -> Option<FoundBlock> {
        let name = name.strip_prefix('$').unwrap_or(name);
        self.find_block_unmarked(name)
    }

    fn find_block_unmarked(&self, name: &str) -> Option<FoundBlock> {
        if let Some(block) = self.local_block(name) {
            return Some(FoundBlock {
                block: block.clone(),
                foreign: self.foreign,
            });
        }
        ensure_sufficient_stack(|| {
            self.parents
                .iter()
                .find_map(|parent| parent.borrow().find_block_unmarked(name))
        })
    }

    /// Mark a declared block as initialized and attach its instance.
    ///
    /// Returns whether a block of that name was found.
    pub fn flag_block_as_initialized(&self, name: &str, instance: Option<ScopeRef>) -> bool {
        match self.find_block(name) {
            Some(found) => {
                let mut block = found.block.borrow_mut();
                block.initialized = true;
                block.instance = instance;
                true
            }
            None => false,
        }
    }
}

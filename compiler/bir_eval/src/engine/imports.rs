//! Loading `use` imports into engines of their own.

use bir_ir::UseImport;
use tracing::debug;

use super::Engine;
use crate::errors::{cyclic_import, module_load, EvalError, EvalErrorKind, EvalResult};
use crate::module_loader::{canonical, module_name, read_module, resolve_module};

impl Engine {
    /// Resolve, parse and run one import, then expose its top scope to this
    /// engine as a read-only parent of the root scope.
    #[tracing::instrument(level = "debug", skip_all, fields(engine = %self.id, module = %import.source))]
    pub(super) fn load_import(&mut self, import: &UseImport) -> EvalResult<()> {
        let name = import.source.as_str();
        let path = resolve_module(&self.runtime.config.stdlib_dir, name)?;

        let key = canonical(&path);
        {
            let loading = self.runtime.loading.borrow();
            if loading.contains(&key) {
                let mut chain: Vec<String> =
                    loading.iter().map(|entry| module_name(entry)).collect();
                chain.push(name.to_string());
                return Err(cyclic_import(name, &chain));
            }
        }

        let content = read_module(&path, name)?;
        let mut engine = Engine::with_runtime(content, path, self.runtime.clone());
        engine
            .init()
            .map_err(|err| syntax_as_load_failure(name, err))?;
        engine.run()?;

        let top = engine.current_scope();
        {
            let mut top = top.borrow_mut();
            top.set_immutable(true);
            top.set_foreign(true);
        }
        self.root.borrow_mut().add_parent(top);
        debug!(module = name, id = %engine.id, "module loaded");
        self.uses.insert(engine.id, engine);
        Ok(())
    }
}

/// A module that fails to parse is a load failure of the importer, not a
/// syntax error of the program being run.
fn syntax_as_load_failure(name: &str, err: EvalError) -> EvalError {
    let EvalError {
        kind,
        position,
        report,
    } = err;
    match kind {
        EvalErrorKind::Syntax(parse) => {
            let mut load = module_load(name, format!("{parse} at {}", parse.position));
            load.position = position;
            load.report = report;
            load
        }
        kind => EvalError {
            kind,
            position,
            report,
        },
    }
}

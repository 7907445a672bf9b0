//! Pass execution over a module.
//!
//! Functions are independent units of work — each owns its arena and
//! shares nothing — so a pass that advertises function-parallelism
//! runs across functions on the rayon pool, one fresh instance per
//! function. Sequential passes still get a fresh instance per
//! function; only the iteration strategy differs.
//!
//! The first error aborts the run: pass failures are compiler defects
//! (see [`PassError`](crate::PassError)), not recoverable conditions.

use rayon::prelude::*;

use skiff_ir::Module;

use crate::pass::PassResult;
use crate::registry::PassRegistry;

/// Runs scheduled passes over a module.
pub struct PassRunner<'r> {
    registry: &'r PassRegistry,
}

impl<'r> PassRunner<'r> {
    /// Create a runner backed by `registry`.
    pub fn new(registry: &'r PassRegistry) -> Self {
        Self { registry }
    }

    /// Run the named passes over `module`, in order.
    pub fn run(&self, passes: &[&str], module: &mut Module) -> PassResult<()> {
        for &name in passes {
            self.run_pass(name, module)?;
        }
        Ok(())
    }

    fn run_pass(&self, name: &str, module: &mut Module) -> PassResult<()> {
        let parallel = self.registry.create(name)?.is_function_parallel();
        tracing::debug!(
            pass = name,
            functions = module.functions.len(),
            parallel,
            "running pass"
        );

        if parallel {
            let registry = self.registry;
            module.functions.par_iter_mut().try_for_each(|func| {
                let mut instance = registry.create(name)?;
                instance.run_function(func)
            })
        } else {
            for func in &mut module.functions {
                let mut instance = self.registry.create(name)?;
                instance.run_function(func)?;
            }
            Ok(())
        }
    }
}

//! Pass registry.
//!
//! Maps stable pass names to factories. The runner creates a fresh
//! instance per function through the factory, so pass state never
//! leaks between functions or between runs.

use rustc_hash::FxHashMap;

use crate::pass::{Pass, PassError, PassFactory, PassResult};

/// Name → factory table for the passes the scheduler may select.
pub struct PassRegistry {
    factories: FxHashMap<&'static str, PassFactory>,
}

impl PassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Create a registry with every built-in pass registered.
    pub fn with_builtin_passes() -> Self {
        let mut registry = Self::new();
        registry.register(crate::MergeLocals::NAME, || {
            Box::new(crate::MergeLocals::new())
        });
        registry
    }

    /// Register a factory under a stable name. A later registration
    /// under the same name replaces the earlier one.
    pub fn register(&mut self, name: &'static str, factory: PassFactory) {
        self.factories.insert(name, factory);
    }

    /// Instantiate the pass registered under `name`.
    pub fn create(&self, name: &str) -> PassResult<Box<dyn Pass>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| PassError::UnknownPass(name.to_owned()))?;
        Ok(factory())
    }

    /// Returns `true` if a pass is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted for deterministic listings.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for PassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
